//! Audit trail of publish attempts.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// Characters of content kept in an audit preview.
const PREVIEW_CHARS: usize = 50;

/// Which publisher produced an entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PublishFlow {
    /// Short social post
    SocialPost,
    /// Long-form article
    Article,
}

/// Terminal state reached by one publish attempt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuditAction {
    /// Fingerprint seen inside the retention window
    DuplicateSkipped,
    /// Dry run, connection tested
    DryRunTested,
    /// Dry run, adapter not configured so nothing was tested
    DryRunNotConfigured,
    /// Live, adapter not configured
    NotConfigured,
    /// Platform key not recognized or not registered
    UnsupportedPlatform,
    /// Live publish accepted
    Published,
    /// Live publish rejected
    PublishFailed,
}

/// One structured audit record.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct AuditEntry {
    /// When the attempt finished.
    timestamp: DateTime<Utc>,
    /// Publisher that handled the attempt.
    flow: PublishFlow,
    /// Platform key.
    platform: String,
    /// Truncated content preview.
    preview: String,
    /// Whether media was attached.
    has_media: bool,
    /// Whether the pipeline was in dry-run mode.
    dry_run: bool,
    /// Terminal state.
    action: AuditAction,
}

impl AuditEntry {
    /// Build an entry stamped with the current time; `content` is truncated.
    pub fn new(
        flow: PublishFlow,
        platform: impl Into<String>,
        content: &str,
        has_media: bool,
        dry_run: bool,
        action: AuditAction,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            flow,
            platform: platform.into(),
            preview: preview(content),
            has_media,
            dry_run,
            action,
        }
    }
}

/// Single-line preview of `content`, truncated on a character boundary.
pub fn preview(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let mut truncated: String = flat.chars().take(PREVIEW_CHARS).collect();
    truncated.push_str("...");
    truncated
}

/// Destination for audit entries.
pub trait AuditSink: Send + Sync {
    /// Record one entry. Must not fail.
    fn record(&self, entry: &AuditEntry);
}

/// Emits each entry as a structured `tracing` event on target
/// `pressroom::audit`.
#[derive(Clone)]
pub struct TracingAuditSink {
    #[cfg(feature = "metrics")]
    attempts: opentelemetry::metrics::Counter<u64>,
}

impl TracingAuditSink {
    /// Create the sink.
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "metrics")]
            attempts: opentelemetry::global::meter("pressroom")
                .u64_counter("pressroom_publish_attempts")
                .with_description("Publish attempts by platform and terminal action")
                .build(),
        }
    }
}

impl std::fmt::Debug for TracingAuditSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TracingAuditSink").finish_non_exhaustive()
    }
}

impl Default for TracingAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditSink for TracingAuditSink {
    fn record(&self, entry: &AuditEntry) {
        info!(
            target: "pressroom::audit",
            timestamp = %entry.timestamp.to_rfc3339(),
            flow = %entry.flow,
            platform = %entry.platform,
            action = %entry.action,
            dry_run = entry.dry_run,
            has_media = entry.has_media,
            preview = %entry.preview,
            "Publish attempt"
        );

        #[cfg(feature = "metrics")]
        self.attempts.add(
            1,
            &[
                opentelemetry::KeyValue::new("platform", entry.platform.clone()),
                opentelemetry::KeyValue::new("action", entry.action.to_string()),
                opentelemetry::KeyValue::new("dry_run", entry.dry_run),
            ],
        );
    }
}

/// Keeps entries in memory; used to assert on the audit trail.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded entries, oldest first.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Actions of recorded entries, oldest first.
    pub fn actions(&self) -> Vec<AuditAction> {
        self.entries().iter().map(|e| e.action).collect()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, entry: &AuditEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());
    }
}
