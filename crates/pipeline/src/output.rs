use graph_core::{GraphError, Result};
use std::io::Write;

/// Write one status line and flush it immediately.
///
/// Any failure (typically a closed pipe) is an output error; the caller is
/// expected to stop rather than retry.
pub fn emit<W: Write + ?Sized>(out: &mut W, line: &str) -> Result<()> {
    writeln!(out, "{line}")
        .and_then(|()| out.flush())
        .map_err(|source| GraphError::Output { source })
}
