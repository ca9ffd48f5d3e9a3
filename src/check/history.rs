// src/check/history.rs

use crate::check::CheckResult;
use crate::probe::Measurement;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of sweeps kept in history.
pub const DEFAULT_HISTORY_LIMIT: usize = 300;

fn default_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

/// A passed reading of one probe at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementPoint {
    pub checked_at: DateTime<Utc>,
    pub measurement: Measurement,
}

/// Bounded list of past check results, newest first.
///
/// The bound is not persisted with the entries; whoever loads a history
/// applies its own via [`ResultHistory::set_limit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultHistory {
    #[serde(skip, default = "default_limit")]
    limit: usize,
    entries: VecDeque<CheckResult>,
}

impl ResultHistory {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            entries: VecDeque::new(),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Changes the bound, dropping the oldest entries if the history is now too long.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.entries.truncate(limit);
    }

    /// Puts `result` at index 0 and drops whatever falls off the end.
    pub fn prepend(&mut self, result: CheckResult) -> &mut Self {
        self.entries.push_front(result);
        self.entries.truncate(self.limit);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&CheckResult> {
        self.entries.front()
    }

    pub fn get(&self, index: usize) -> Option<&CheckResult> {
        self.entries.get(index)
    }

    /// Newest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &CheckResult> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Numeric readings of `probe` across history, oldest first.
    ///
    /// Sweeps where the probe was skipped, failed, absent or passed without a
    /// number are left out.
    pub fn measurements(&self, probe: &str) -> Vec<MeasurementPoint> {
        self.entries
            .iter()
            .rev()
            .filter_map(|result| {
                result
                    .measurement_of(probe)
                    .filter(|m| m.number().is_some())
                    .map(|m| MeasurementPoint {
                        checked_at: result.checked_at(),
                        measurement: m.clone(),
                    })
            })
            .collect()
    }
}

impl Default for ResultHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a ResultHistory {
    type Item = &'a CheckResult;
    type IntoIter = std::collections::vec_deque::Iter<'a, CheckResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
