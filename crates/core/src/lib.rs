pub mod error;
pub mod history;
pub mod metric;
pub mod sample;

pub use error::{GraphError, ParseError, Result, SampleError};
pub use history::HistoryRing;
pub use metric::{Direction, Interface, Metric, NetMetric};
pub use sample::{Reading, Sample};
