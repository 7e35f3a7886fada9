//! Connection diagnostics across all platforms.

use derive_getters::Getters;
use futures::future::join_all;
use pressroom_core::{ConnectionStatus, PlatformKind};
use pressroom_platforms::AdapterRegistry;
use serde::Serialize;
use tracing::{info, instrument};

/// Connection check result for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct ConnectionReport {
    /// Platform checked.
    platform: PlatformKind,
    /// Whether credentials were configured.
    ready: bool,
    /// Connection test result; `None` when not ready.
    status: Option<ConnectionStatus>,
}

/// Test every ready adapter concurrently.
///
/// Adapters that are not ready are reported without any I/O.
#[instrument(skip_all, fields(platforms = registry.len()))]
pub async fn check_connections(registry: &AdapterRegistry) -> Vec<ConnectionReport> {
    let checks = registry.kinds().into_iter().filter_map(|kind| {
        registry.get(kind).map(|adapter| async move {
            let ready = adapter.is_ready();
            let status = if ready {
                Some(adapter.test_connection().await)
            } else {
                None
            };
            ConnectionReport {
                platform: kind,
                ready,
                status,
            }
        })
    });

    let reports = join_all(checks).await;
    let connected = reports
        .iter()
        .filter(|r| r.status.as_ref().is_some_and(ConnectionStatus::success))
        .count();
    info!(checked = reports.len(), connected, "Connection checks complete");
    reports
}
