//! Rolling window of load test samples
//!
//! Keeps the last N completed load tests (10 by default) for the live chart.

use std::collections::VecDeque;

use crate::dashboard::types::LoadTestSample;

/// Number of samples the chart shows
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Fixed-capacity FIFO buffer of samples, oldest first
#[derive(Debug, Clone)]
pub struct RollingWindow {
    entries: VecDeque<LoadTestSample>,
    capacity: usize,
}

impl RollingWindow {
    /// Creates an empty window holding at most [`DEFAULT_WINDOW_SIZE`] samples
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_WINDOW_SIZE)
    }

    /// Creates an empty window with the given capacity (at least 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends at the tail, evicting from the head while over capacity
    pub fn push(&mut self, sample: LoadTestSample) {
        self.entries.push_back(sample);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Returns a copy of all samples in chronological order (oldest first)
    pub fn snapshot(&self) -> Vec<LoadTestSample> {
        self.entries.iter().cloned().collect()
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<&LoadTestSample> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self::new()
    }
}
