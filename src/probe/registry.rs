// src/probe/registry.rs

use crate::probe::Probe;
use std::sync::Arc;

/// Supplies the ordered set of probes for each sweep.
pub trait ProbeRegistry: Send + Sync {
    fn probes(&self) -> Vec<Arc<dyn Probe>>;
}

impl ProbeRegistry for Vec<Arc<dyn Probe>> {
    fn probes(&self) -> Vec<Arc<dyn Probe>> {
        self.clone()
    }
}

/// Fixed, registration-ordered list of probes.
#[derive(Default, Clone)]
pub struct StaticRegistry {
    probes: Vec<Arc<dyn Probe>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<P: Probe + 'static>(&mut self, probe: P) -> &mut Self {
        self.probes.push(Arc::new(probe));
        self
    }

    #[must_use]
    pub fn with<P: Probe + 'static>(mut self, probe: P) -> Self {
        self.register(probe);
        self
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

impl ProbeRegistry for StaticRegistry {
    fn probes(&self) -> Vec<Arc<dyn Probe>> {
        self.probes.clone()
    }
}

impl std::fmt::Debug for StaticRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticRegistry")
            .field(
                "probes",
                &self.probes.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
