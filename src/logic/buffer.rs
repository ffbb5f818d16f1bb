//! History Buffer - Bounded FIFO of recent verdicts
//!
//! One mutex guards both appends and reads, so a reader always copies out
//! whole entries and never sees a half-applied eviction.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use parking_lot::Mutex;

use crate::models::{HistoryEntry, HistoryStats};

#[derive(Debug)]
pub struct HistoryBuffer {
    entries: Mutex<VecDeque<HistoryEntry>>,
    capacity: NonZeroUsize,
}

impl HistoryBuffer {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity.get())),
            capacity,
        }
    }

    /// Append at the tail, evicting the oldest entry when full.
    ///
    /// The timestamp is raised to the tail's if the clock stepped backwards,
    /// keeping timestamps non-decreasing in insertion order.
    pub fn append(&self, mut entry: HistoryEntry) {
        let mut entries = self.entries.lock();

        if let Some(last) = entries.back() {
            if entry.timestamp < last.timestamp {
                entry.timestamp = last.timestamp;
            }
        }

        if entries.len() == self.capacity.get() {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Last `min(limit, len)` entries, oldest first. `limit <= 0` counts as 1.
    pub fn recent(&self, limit: i64) -> Vec<HistoryEntry> {
        let limit = usize::try_from(limit.max(1)).unwrap_or(usize::MAX);
        let entries = self.entries.lock();

        let start = entries.len().saturating_sub(limit);
        entries.range(start..).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            size: self.len(),
            capacity: self.capacity(),
        }
    }
}
