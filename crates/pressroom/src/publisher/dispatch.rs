//! Shared dispatch behind both publishers.

use super::PublishDisposition;
use crate::audit::{AuditAction, AuditEntry, AuditSink, PublishFlow};
use pressroom_cache::{DedupCache, Fingerprint};
use pressroom_core::{PlatformKind, PostContent};
use pressroom_error::{PublishError, PublishErrorKind, PublishResult};
use pressroom_platforms::AdapterRegistry;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Cache, adapters and audit sink shared by one publisher.
#[derive(Clone)]
pub(crate) struct Dispatcher {
    flow: PublishFlow,
    cache: Arc<DedupCache>,
    registry: Arc<AdapterRegistry>,
    audit: Arc<dyn AuditSink>,
    dry_run: bool,
}

/// Platform key canonicalized when recognized, trimmed and lower-cased
/// otherwise.
pub(crate) fn platform_key(raw: &str) -> String {
    PlatformKind::from_key(raw)
        .map(|kind| kind.to_string())
        .unwrap_or_else(|| raw.trim().to_lowercase())
}

impl Dispatcher {
    pub(crate) fn new(
        flow: PublishFlow,
        cache: Arc<DedupCache>,
        registry: Arc<AdapterRegistry>,
        audit: Arc<dyn AuditSink>,
        dry_run: bool,
    ) -> Self {
        Self {
            flow,
            cache,
            registry,
            audit,
            dry_run,
        }
    }

    pub(crate) fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn audit(&self, platform: &str, content: &PostContent, action: AuditAction) {
        let entry = AuditEntry::new(
            self.flow,
            platform,
            &content.text(),
            content.media().is_some(),
            self.dry_run,
            action,
        );
        self.audit.record(&entry);
    }

    /// Run one attempt past the fingerprint stage.
    pub(crate) async fn dispatch(
        &self,
        raw_platform: &str,
        fingerprint: &Fingerprint,
        content: &PostContent,
    ) -> PublishResult<PublishDisposition> {
        let platform = platform_key(raw_platform);

        let verdict = self.cache.check_and_record(fingerprint);
        if verdict.is_duplicate() {
            info!(
                %platform,
                %fingerprint,
                first_seen = %verdict.recorded_at(),
                "Duplicate content, skipping"
            );
            self.audit(&platform, content, AuditAction::DuplicateSkipped);
            return Ok(PublishDisposition::DuplicateSkipped);
        }
        debug!(%platform, %fingerprint, "New content fingerprint");

        let adapter = PlatformKind::from_key(raw_platform).and_then(|kind| self.registry.get(kind));
        let Some(adapter) = adapter else {
            warn!(%platform, "No adapter for platform, skipping");
            self.audit(&platform, content, AuditAction::UnsupportedPlatform);
            return Ok(PublishDisposition::UnsupportedPlatform);
        };

        if self.dry_run {
            if !adapter.is_ready() {
                info!(%platform, "Dry run: adapter not configured, nothing to test");
                self.audit(&platform, content, AuditAction::DryRunNotConfigured);
                return Ok(PublishDisposition::DryRun { connection: None });
            }
            let status = adapter.test_connection().await;
            info!(
                %platform,
                connected = status.success(),
                identity = ?status.identity(),
                error = ?status.error(),
                "Dry run: would publish"
            );
            self.audit(&platform, content, AuditAction::DryRunTested);
            return Ok(PublishDisposition::DryRun {
                connection: Some(status),
            });
        }

        if !adapter.is_ready() {
            warn!(%platform, "Adapter not configured, skipping live publish");
            self.audit(&platform, content, AuditAction::NotConfigured);
            return Ok(PublishDisposition::NotConfigured);
        }

        let outcome = adapter.publish(content).await;
        if !outcome.success() {
            let message = outcome.error().unwrap_or("unknown error").to_string();
            error!(%platform, error = %message, "Publish failed");
            self.audit(&platform, content, AuditAction::PublishFailed);
            return Err(PublishError::new(PublishErrorKind::PlatformFailure {
                platform,
                message,
            }));
        }

        let post_id = outcome.post_id();
        info!(%platform, post_id = ?post_id, "Published");
        self.audit(&platform, content, AuditAction::Published);
        Ok(PublishDisposition::Published {
            post_id,
            data: outcome.data().cloned(),
        })
    }
}
