//! Resource sampling from the Linux procfs counters.
//!
//! [`Sampler`] owns a [`DataSource`] plus the per-metric state that rate
//! metrics need, and turns each read into a normalized [`graph_core::Sample`].

pub mod cpu;
pub mod fake;
pub mod load;
pub mod memory;
pub mod network;
pub mod sampler;
pub mod source;

pub use fake::FakeSource;
pub use sampler::{Previous, Sampler, SamplerState, Tick, MIN_NET_PEAK};
pub use source::{DataSource, ProcFile, ProcSource};
