use graph_core::SampleError;
use std::path::PathBuf;

/// Kernel counter files the sampler reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcFile {
    Stat,
    MemInfo,
    LoadAvg,
    NetDev,
}

impl ProcFile {
    /// Path relative to the proc root, e.g. `"net/dev"`.
    pub fn name(self) -> &'static str {
        match self {
            ProcFile::Stat    => "stat",
            ProcFile::MemInfo => "meminfo",
            ProcFile::LoadAvg => "loadavg",
            ProcFile::NetDev  => "net/dev",
        }
    }
}

/// Where raw counter text comes from.
///
/// Implementations return the full file contents, or a [`SampleError`] when
/// the file cannot be read this tick.
pub trait DataSource {
    fn read(&mut self, file: ProcFile) -> Result<String, SampleError>;
}

/// Reads counters from a procfs mount (normally `/proc`).
#[derive(Debug, Clone)]
pub struct ProcSource {
    root: PathBuf,
}

impl ProcSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for ProcSource {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl DataSource for ProcSource {
    fn read(&mut self, file: ProcFile) -> Result<String, SampleError> {
        std::fs::read_to_string(self.root.join(file.name())).map_err(|source| SampleError::Source {
            file: file.name(),
            source,
        })
    }
}
