// src/probe/mod.rs

//! Probe contract consumed by the runner.
//!
//! Probes are supplied by the host application through a [`ProbeRegistry`];
//! this crate never implements concrete checks itself.

pub mod measurement;
pub mod registry;

pub use measurement::{Measurement, Reading};
pub use registry::{ProbeRegistry, StaticRegistry};

use async_trait::async_trait;
use thiserror::Error;

/// Outcome of a single probe execution.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Passed(Measurement),
    /// The probe chose not to run, e.g. its preconditions were not met.
    Skipped(String),
    Failed(String),
}

impl ProbeOutcome {
    /// Passed without anything to measure.
    pub fn passed() -> Self {
        Self::Passed(Measurement::None)
    }

    pub fn measured(measurement: Measurement) -> Self {
        Self::Passed(measurement)
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped(reason.into())
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self::Failed(detail.into())
    }
}

/// Error type for probe implementations that prefer `?` over building outcomes by hand.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbeError {
    #[error("skipped: {0}")]
    Skipped(String),

    #[error("{0}")]
    Failed(String),
}

impl ProbeError {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped(reason.into())
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self::Failed(detail.into())
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(err: std::io::Error) -> Self {
        Self::Failed(format!("IO error: {err}"))
    }
}

impl From<Result<Option<Measurement>, ProbeError>> for ProbeOutcome {
    fn from(result: Result<Option<Measurement>, ProbeError>) -> Self {
        match result {
            Ok(measurement) => Self::Passed(measurement.unwrap_or_default()),
            Err(ProbeError::Skipped(reason)) => Self::Skipped(reason),
            Err(ProbeError::Failed(detail)) => Self::Failed(detail),
        }
    }
}

impl From<Result<Measurement, ProbeError>> for ProbeOutcome {
    fn from(result: Result<Measurement, ProbeError>) -> Self {
        result.map(Some).into()
    }
}

/// A named diagnostic check.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Identity used in check results. Not required to be unique.
    fn name(&self) -> &str;

    /// Runs the check. Timeouts, if any, are the probe's own business.
    async fn check(&self) -> ProbeOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_measurement_becomes_sentinel() {
        let outcome: ProbeOutcome = Ok::<Option<Measurement>, ProbeError>(None).into();
        assert_eq!(outcome, ProbeOutcome::Passed(Measurement::None));
    }

    #[test]
    fn probe_errors_map_to_outcomes() {
        let skipped: ProbeOutcome =
            Err::<Option<Measurement>, _>(ProbeError::skipped("disabled")).into();
        assert_eq!(skipped, ProbeOutcome::Skipped("disabled".to_string()));

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let failed: ProbeOutcome = Err::<Measurement, _>(ProbeError::from(io)).into();
        assert_eq!(failed, ProbeOutcome::Failed("IO error: no such file".to_string()));
    }
}
