// src/check/runner.rs

use crate::check::{CheckResult, CheckResultBuilder};
use crate::probe::{Probe, ProbeOutcome};
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs every probe once and classifies the outcomes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProbeRunner;

impl ProbeRunner {
    pub fn new() -> Self {
        Self
    }

    /// Executes `probes` sequentially, in order.
    ///
    /// A misbehaving probe, including one that panics, only affects its own
    /// classification; the sweep always continues with the next probe.
    pub async fn run(&self, probes: &[Arc<dyn Probe>]) -> CheckResult {
        debug!(probes.count = probes.len(), "Starting probe sweep");
        let mut builder = CheckResultBuilder::new();

        for probe in probes {
            let name = probe.name().to_string();
            let outcome = Self::run_one(probe.as_ref()).await;
            builder.record(name, outcome);
        }

        let result = builder.finish();
        info!(
            probes.passed = result.passed().len(),
            probes.skipped = result.skipped().len(),
            probes.failed = result.failed().len(),
            duration_ms = result.duration_ms(),
            "Probe sweep finished"
        );
        result
    }

    async fn run_one(probe: &dyn Probe) -> ProbeOutcome {
        let started = Instant::now();
        let outcome = match AssertUnwindSafe(probe.check()).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(payload) => ProbeOutcome::Failed(format!(
                "probe panicked: {}",
                panic_message(payload.as_ref())
            )),
        };
        let elapsed = started.elapsed();

        match &outcome {
            ProbeOutcome::Passed(measurement) => {
                debug!(probe = probe.name(), elapsed = ?elapsed, %measurement, "Probe passed");
            }
            ProbeOutcome::Skipped(reason) => {
                debug!(probe = probe.name(), elapsed = ?elapsed, reason = %reason, "Probe skipped");
            }
            ProbeOutcome::Failed(detail) => {
                warn!(probe = probe.name(), elapsed = ?elapsed, detail = %detail, "Probe failed");
            }
        }
        outcome
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
