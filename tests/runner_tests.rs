// tests/runner_tests.rs

mod common;

use common::{AlwaysFail, AlwaysPass, AlwaysSkip, CountingProbe, PanickingProbe};
use proptest::prelude::*;
use scrutiny::{
    check::ProbeStatus, Measurement, Probe, ProbeError, ProbeOutcome, ProbeRunner,
};
use std::sync::Arc;

#[tokio::test]
async fn test_mixed_probes_are_classified() {
    let probes: Vec<Arc<dyn Probe>> = vec![
        Arc::new(AlwaysPass::measuring(
            "AlwaysPass",
            Measurement::new("percentage", 50.0).with_threshold(80.0),
        )),
        Arc::new(AlwaysSkip::new("AlwaysSkip", "disabled")),
        Arc::new(AlwaysFail::new("AlwaysFail", "IOError: disk not readable")),
    ];

    let result = ProbeRunner::new().run(&probes).await;

    assert_eq!(result.passed().len(), 1);
    assert_eq!(result.passed()[0].probe, "AlwaysPass");
    assert_eq!(result.passed()[0].measurement.number(), Some(50.0));
    assert_eq!(result.passed()[0].measurement.threshold(), Some(80.0));

    assert_eq!(result.skipped().len(), 1);
    assert_eq!(result.skipped()[0].probe, "AlwaysSkip");
    assert_eq!(result.skipped()[0].reason, "disabled");

    assert_eq!(result.failed().len(), 1);
    assert_eq!(result.failed()[0].probe, "AlwaysFail");
    assert_eq!(result.failed()[0].detail, "IOError: disk not readable");
}

#[tokio::test]
async fn test_failure_does_not_stop_later_probes() {
    let counter = CountingProbe::new("B");
    let probes: Vec<Arc<dyn Probe>> = vec![
        Arc::new(AlwaysFail::new("A", "connection refused")),
        Arc::new(counter.clone()),
    ];

    let result = ProbeRunner::new().run(&probes).await;

    assert_eq!(counter.calls(), 1);
    assert_eq!(result.status_of("A"), Some(ProbeStatus::Failed));
    assert_eq!(result.status_of("B"), Some(ProbeStatus::Passed));
}

#[tokio::test]
async fn test_panicking_probe_is_failed_and_isolated() {
    let probes: Vec<Arc<dyn Probe>> = vec![
        Arc::new(PanickingProbe {
            name: "panics".to_string(),
        }),
        Arc::new(AlwaysPass::new("after")),
    ];

    let result = ProbeRunner::new().run(&probes).await;

    assert_eq!(result.failed().len(), 1);
    assert_eq!(result.failed()[0].probe, "panics");
    assert!(result.failed()[0].detail.contains("probe exploded"));
    assert_eq!(result.status_of("after"), Some(ProbeStatus::Passed));
}

#[tokio::test]
async fn test_pass_without_value_uses_sentinel() {
    let probes: Vec<Arc<dyn Probe>> = vec![Arc::new(AlwaysPass::new("quiet"))];

    let result = ProbeRunner::new().run(&probes).await;

    assert_eq!(result.passed().len(), 1);
    assert_eq!(result.passed()[0].measurement, Measurement::None);
    assert!(result.failed().is_empty());
    assert!(result.skipped().is_empty());
}

#[tokio::test]
async fn test_empty_probe_set() {
    let result = ProbeRunner::new().run(&[]).await;

    assert_eq!(result.probe_count(), 0);
    assert!(result.passed().is_empty());
    assert!(result.skipped().is_empty());
    assert!(result.failed().is_empty());
    assert!(result.is_healthy());
}

#[tokio::test]
async fn test_order_is_kept_and_duplicates_are_not_merged() {
    let probes: Vec<Arc<dyn Probe>> = vec![
        Arc::new(AlwaysPass::new("z")),
        Arc::new(AlwaysPass::new("a")),
        Arc::new(AlwaysPass::new("z")),
        Arc::new(AlwaysPass::new("m")),
    ];

    let result = ProbeRunner::new().run(&probes).await;

    let names: Vec<_> = result.passed().iter().map(|p| p.probe.as_str()).collect();
    assert_eq!(names, vec!["z", "a", "z", "m"]);
}

#[test]
fn test_probe_error_conversions_classify_like_outcomes() {
    let skip: ProbeOutcome = Err::<Option<Measurement>, _>(ProbeError::skipped("no disk")).into();
    assert!(matches!(skip, ProbeOutcome::Skipped(ref r) if r == "no disk"));

    let fail: ProbeOutcome = Err::<Option<Measurement>, _>(ProbeError::failed("timeout")).into();
    assert!(matches!(fail, ProbeOutcome::Failed(ref d) if d == "timeout"));
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Pass,
    Silent,
    Skip,
    Fail,
}

fn kind() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::Pass),
        Just(Kind::Silent),
        Just(Kind::Skip),
        Just(Kind::Fail),
    ]
}

fn build(kinds: &[Kind]) -> Vec<Arc<dyn Probe>> {
    kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| -> Arc<dyn Probe> {
            let name = format!("probe-{i}");
            match kind {
                Kind::Pass => Arc::new(AlwaysPass::measuring(&name, Measurement::new("n", i as f64))),
                Kind::Silent => Arc::new(AlwaysPass::new(&name)),
                Kind::Skip => Arc::new(AlwaysSkip::new(&name, "skip")),
                Kind::Fail => Arc::new(AlwaysFail::new(&name, "fail")),
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn every_probe_lands_in_exactly_one_list(kinds in proptest::collection::vec(kind(), 0..24)) {
        let probes = build(&kinds);
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let result = runtime.block_on(ProbeRunner::new().run(&probes));

        prop_assert_eq!(result.probe_count(), kinds.len());

        for (i, kind) in kinds.iter().enumerate() {
            let name = format!("probe-{i}");
            let in_passed = result.passed().iter().filter(|p| p.probe == name).count();
            let in_skipped = result.skipped().iter().filter(|p| p.probe == name).count();
            let in_failed = result.failed().iter().filter(|p| p.probe == name).count();
            prop_assert_eq!(in_passed + in_skipped + in_failed, 1);

            match kind {
                Kind::Pass | Kind::Silent => prop_assert_eq!(in_passed, 1),
                Kind::Skip => prop_assert_eq!(in_skipped, 1),
                Kind::Fail => prop_assert_eq!(in_failed, 1),
            }
        }

        // each list keeps input order
        let passed: Vec<usize> = result
            .passed()
            .iter()
            .map(|p| p.probe["probe-".len()..].parse().unwrap())
            .collect();
        let mut sorted = passed.clone();
        sorted.sort_unstable();
        prop_assert_eq!(passed, sorted);
    }
}
