use crate::source::{DataSource, ProcFile};
use graph_core::SampleError;
use std::collections::{HashMap, VecDeque};

/// Scripted data source for tests.
///
/// Each file holds a queue of contents.  Reads pop the queue until one entry
/// is left, which is then returned on every later read.  Files with no
/// script fail with `NotFound`.
#[derive(Debug, Default)]
pub struct FakeSource {
    script: HashMap<ProcFile, VecDeque<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `contents` as a future read of `file`.
    pub fn with(mut self, file: ProcFile, contents: impl Into<String>) -> Self {
        self.push(file, contents);
        self
    }

    pub fn push(&mut self, file: ProcFile, contents: impl Into<String>) {
        self.script.entry(file).or_default().push_back(contents.into());
    }

    /// Replace the script for `file` with a single, sticky entry.
    pub fn set(&mut self, file: ProcFile, contents: impl Into<String>) {
        self.script.insert(file, VecDeque::from([contents.into()]));
    }

    /// Make every later read of `file` fail.
    pub fn remove(&mut self, file: ProcFile) {
        self.script.remove(&file);
    }
}

impl DataSource for FakeSource {
    fn read(&mut self, file: ProcFile) -> Result<String, SampleError> {
        let missing = || SampleError::Source {
            file:   file.name(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not scripted"),
        };

        let queue = self.script.get_mut(&file).ok_or_else(missing)?;
        if queue.len() > 1 {
            return queue.pop_front().ok_or_else(missing);
        }
        queue.front().cloned().ok_or_else(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_entry_is_sticky() {
        let mut source = FakeSource::new()
            .with(ProcFile::Stat, "a")
            .with(ProcFile::Stat, "b");

        assert_eq!(source.read(ProcFile::Stat).unwrap(), "a");
        assert_eq!(source.read(ProcFile::Stat).unwrap(), "b");
        assert_eq!(source.read(ProcFile::Stat).unwrap(), "b");
        assert!(source.read(ProcFile::MemInfo).is_err());

        source.set(ProcFile::Stat, "c");
        assert_eq!(source.read(ProcFile::Stat).unwrap(), "c");

        source.remove(ProcFile::Stat);
        assert!(source.read(ProcFile::Stat).is_err());
    }
}
