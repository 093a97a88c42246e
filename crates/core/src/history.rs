use crate::sample::{Reading, Sample};
use std::collections::VecDeque;

/// Rolling history of samples for one metric, feeding sparkline rendering.
///
/// Capacity is fixed at construction (at least 1).  Newest sample sits at the
/// back; pushing at capacity evicts the oldest.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    samples:  VecDeque<Sample>,
    capacity: usize,
}

impl HistoryRing {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest if at capacity.
    pub fn push(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// The `n` most recent readings, oldest first.
    ///
    /// Always returns exactly `n` entries: missing leading entries (not yet
    /// recorded, or beyond capacity) are `Reading::Unreadable`.
    pub fn slice(&self, n: usize) -> Vec<Reading> {
        let have = self.samples.len().min(n);
        let mut out = Vec::with_capacity(n);
        out.resize(n - have, Reading::Unreadable);
        out.extend(
            self.samples
                .iter()
                .skip(self.samples.len() - have)
                .map(|s| s.reading),
        );
        out
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}
