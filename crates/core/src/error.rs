use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid format string: {0}")]
    Parse(#[from] ParseError),

    #[error("cannot write status line: {source}")]
    Output { source: std::io::Error },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// A malformed format string.  Fatal, reported before the first tick.
///
/// Every variant carries the byte offset in the format string where the
/// offending directive (or stray brace) starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown metric '{name}' at offset {offset}")]
    UnknownMetric { name: String, offset: usize },

    #[error("invalid history length '{spec}' at offset {offset} (expected an integer between 1 and {max})")]
    InvalidHistory {
        spec:   String,
        offset: usize,
        max:    usize,
    },

    #[error("unterminated directive starting at offset {offset}")]
    Unterminated { offset: usize },

    #[error("unexpected '{{' inside directive starting at offset {offset}")]
    NestedOpen { offset: usize },

    #[error("single '}}' at offset {offset} (write '}}}}' for a literal brace)")]
    StrayClose { offset: usize },

    #[error("unexpected '{found}' after label marker at offset {offset}")]
    TrailingLabel { found: char, offset: usize },
}

/// Failure to read one metric on one tick.
///
/// Never escapes the sampler: it is logged and turned into an unreadable
/// reading so the rest of the line still renders.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("cannot read {file}: {source}")]
    Source {
        file:   &'static str,
        source: std::io::Error,
    },

    #[error("no network interface '{name}'")]
    NoInterface { name: String },

    #[error("malformed {file}: {detail}")]
    Malformed { file: &'static str, detail: String },
}

impl SampleError {
    pub fn malformed(file: &'static str, detail: impl Into<String>) -> Self {
        Self::Malformed {
            file,
            detail: detail.into(),
        }
    }
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
