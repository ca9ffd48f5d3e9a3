// src/check/result.rs

use crate::probe::{Measurement, ProbeOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassedProbe {
    pub probe: String,
    pub measurement: Measurement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedProbe {
    pub probe: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedProbe {
    pub probe: String,
    pub detail: String,
}

/// Classification of a probe inside one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    Passed,
    Skipped,
    Failed,
}

/// Classified outcome of one full probe sweep.
///
/// Each probe handed to the run sits in exactly one of the three lists, in
/// the order the probes were supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    checked_at: DateTime<Utc>,
    #[serde(default)]
    duration_ms: u64,
    #[serde(default)]
    passed: Vec<PassedProbe>,
    #[serde(default)]
    skipped: Vec<SkippedProbe>,
    #[serde(default)]
    failed: Vec<FailedProbe>,
}

impl CheckResult {
    pub fn builder() -> CheckResultBuilder {
        CheckResultBuilder::new()
    }

    pub fn checked_at(&self) -> DateTime<Utc> {
        self.checked_at
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn passed(&self) -> &[PassedProbe] {
        &self.passed
    }

    pub fn skipped(&self) -> &[SkippedProbe] {
        &self.skipped
    }

    pub fn failed(&self) -> &[FailedProbe] {
        &self.failed
    }

    pub fn probe_count(&self) -> usize {
        self.passed.len() + self.skipped.len() + self.failed.len()
    }

    /// Healthy means nothing failed. Skips do not count against it.
    pub fn is_healthy(&self) -> bool {
        self.failed.is_empty()
    }

    /// First classification recorded under `probe`.
    pub fn status_of(&self, probe: &str) -> Option<ProbeStatus> {
        if self.passed.iter().any(|p| p.probe == probe) {
            Some(ProbeStatus::Passed)
        } else if self.skipped.iter().any(|p| p.probe == probe) {
            Some(ProbeStatus::Skipped)
        } else if self.failed.iter().any(|p| p.probe == probe) {
            Some(ProbeStatus::Failed)
        } else {
            None
        }
    }

    /// Measurement recorded for `probe` if it passed in this sweep.
    pub fn measurement_of(&self, probe: &str) -> Option<&Measurement> {
        self.passed
            .iter()
            .find(|p| p.probe == probe)
            .map(|p| &p.measurement)
    }
}

/// Accumulator the runner folds probe outcomes into.
#[derive(Debug)]
pub struct CheckResultBuilder {
    checked_at: DateTime<Utc>,
    started: Instant,
    passed: Vec<PassedProbe>,
    skipped: Vec<SkippedProbe>,
    failed: Vec<FailedProbe>,
}

impl CheckResultBuilder {
    pub fn new() -> Self {
        Self {
            checked_at: Utc::now(),
            started: Instant::now(),
            passed: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Overrides the sweep timestamp.
    #[must_use]
    pub fn at(mut self, checked_at: DateTime<Utc>) -> Self {
        self.checked_at = checked_at;
        self
    }

    pub fn add_passed(&mut self, probe: impl Into<String>, measurement: Measurement) -> &mut Self {
        self.passed.push(PassedProbe {
            probe: probe.into(),
            measurement,
        });
        self
    }

    pub fn add_skipped(&mut self, probe: impl Into<String>, reason: impl Into<String>) -> &mut Self {
        self.skipped.push(SkippedProbe {
            probe: probe.into(),
            reason: reason.into(),
        });
        self
    }

    pub fn add_failed(&mut self, probe: impl Into<String>, detail: impl Into<String>) -> &mut Self {
        self.failed.push(FailedProbe {
            probe: probe.into(),
            detail: detail.into(),
        });
        self
    }

    pub fn record(&mut self, probe: impl Into<String>, outcome: ProbeOutcome) -> &mut Self {
        match outcome {
            ProbeOutcome::Passed(measurement) => self.add_passed(probe, measurement),
            ProbeOutcome::Skipped(reason) => self.add_skipped(probe, reason),
            ProbeOutcome::Failed(detail) => self.add_failed(probe, detail),
        }
    }

    pub fn finish(self) -> CheckResult {
        CheckResult {
            checked_at: self.checked_at,
            duration_ms: u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX),
            passed: self.passed,
            skipped: self.skipped,
            failed: self.failed,
        }
    }
}

impl Default for CheckResultBuilder {
    fn default() -> Self {
        Self::new()
    }
}
