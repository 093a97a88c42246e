//! Format string mini-language: literal text interleaved with
//! `{metric[:n][!]}` graph directives.

pub mod parser;
pub mod program;

pub use parser::{parse, parse_with_limit, DEFAULT_MAX_HISTORY};
pub use program::{Directive, FormatProgram, Segment};

