//! Lookup table from platform key to adapter.

use crate::{
    FacebookAdapter, LinkedInAdapter, MediumAdapter, PlatformAdapter, PlatformCredentials,
    XAdapter,
};
use pressroom_core::PlatformKind;
use reqwest::Client;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Adapters keyed by platform.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: BTreeMap<PlatformKind, Arc<dyn PlatformAdapter>>,
}

impl AdapterRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build all four adapters from `credentials`, sharing one HTTP client.
    ///
    /// Every platform is registered; those without credentials report not
    /// ready.
    #[instrument(skip_all)]
    pub fn from_credentials(credentials: &PlatformCredentials) -> Self {
        let client = Client::new();
        let mut registry = Self::new();
        registry.register(Arc::new(XAdapter::with_client(
            client.clone(),
            credentials.x.clone(),
        )));
        registry.register(Arc::new(FacebookAdapter::with_client(
            client.clone(),
            credentials.facebook.clone(),
        )));
        registry.register(Arc::new(LinkedInAdapter::with_client(
            client.clone(),
            credentials.linkedin.clone(),
        )));
        registry.register(Arc::new(MediumAdapter::with_client(
            client,
            credentials.medium.clone(),
        )));

        let ready: Vec<String> = registry
            .readiness()
            .into_iter()
            .filter(|(_, ready)| *ready)
            .map(|(kind, _)| kind.to_string())
            .collect();
        info!(ready = ?ready, "Platform adapters initialized");
        registry
    }

    /// Register `adapter` under its own kind, replacing any previous one.
    pub fn register(&mut self, adapter: Arc<dyn PlatformAdapter>) -> &mut Self {
        self.adapters.insert(adapter.kind(), adapter);
        self
    }

    /// Adapter for `kind`.
    pub fn get(&self, kind: PlatformKind) -> Option<Arc<dyn PlatformAdapter>> {
        self.adapters.get(&kind).cloned()
    }

    /// Registered platforms in key order.
    pub fn kinds(&self) -> Vec<PlatformKind> {
        self.adapters.keys().copied().collect()
    }

    /// Readiness of every registered adapter.
    pub fn readiness(&self) -> Vec<(PlatformKind, bool)> {
        self.adapters
            .iter()
            .map(|(kind, adapter)| (*kind, adapter.is_ready()))
            .collect()
    }

    /// Number of registered adapters.
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Check if no adapters are registered.
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.readiness()).finish()
    }
}
