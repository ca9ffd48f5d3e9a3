// src/check/mod.rs

pub mod history;
pub mod result;
pub mod runner;

pub use history::{MeasurementPoint, ResultHistory, DEFAULT_HISTORY_LIMIT};
pub use result::{
    CheckResult, CheckResultBuilder, FailedProbe, PassedProbe, ProbeStatus, SkippedProbe,
};
pub use runner::ProbeRunner;
