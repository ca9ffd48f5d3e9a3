//! Common test probes and fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use scrutiny::{
    config::CheckConfig, CacheStore, InMemoryStore, Measurement, Probe, ProbeOutcome,
    ResultCache, StaticRegistry,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Passes, optionally with a measurement
pub struct AlwaysPass {
    pub name: String,
    pub measurement: Option<Measurement>,
}

impl AlwaysPass {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            measurement: None,
        }
    }

    pub fn measuring(name: &str, measurement: Measurement) -> Self {
        Self {
            name: name.to_string(),
            measurement: Some(measurement),
        }
    }
}

#[async_trait]
impl Probe for AlwaysPass {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> ProbeOutcome {
        ProbeOutcome::Passed(self.measurement.clone().unwrap_or_default())
    }
}

pub struct AlwaysSkip {
    pub name: String,
    pub reason: String,
}

impl AlwaysSkip {
    pub fn new(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl Probe for AlwaysSkip {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> ProbeOutcome {
        ProbeOutcome::skipped(self.reason.clone())
    }
}

pub struct AlwaysFail {
    pub name: String,
    pub detail: String,
}

impl AlwaysFail {
    pub fn new(name: &str, detail: &str) -> Self {
        Self {
            name: name.to_string(),
            detail: detail.to_string(),
        }
    }
}

#[async_trait]
impl Probe for AlwaysFail {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> ProbeOutcome {
        ProbeOutcome::failed(self.detail.clone())
    }
}

pub struct PanickingProbe {
    pub name: String,
}

#[async_trait]
impl Probe for PanickingProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> ProbeOutcome {
        panic!("probe exploded")
    }
}

/// Passes and counts how many times it ran
#[derive(Clone)]
pub struct CountingProbe {
    pub name: String,
    pub calls: Arc<AtomicUsize>,
}

impl CountingProbe {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Probe for CountingProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> ProbeOutcome {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        ProbeOutcome::measured(Measurement::new("runs", n as f64))
    }
}

/// Result cache over an in-memory store with default settings and the given probes
pub fn result_cache(registry: StaticRegistry) -> (ResultCache, Arc<InMemoryStore>) {
    result_cache_with(registry, CheckConfig::default())
}

pub fn result_cache_with(
    registry: StaticRegistry,
    settings: CheckConfig,
) -> (ResultCache, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let cache = ResultCache::new(
        store.clone() as Arc<dyn CacheStore>,
        Arc::new(registry),
        settings,
    );
    (cache, store)
}
