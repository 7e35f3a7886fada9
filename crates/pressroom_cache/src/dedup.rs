//! Time-windowed deduplication cache.

use crate::Fingerprint;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument, trace};

/// Dedup cache configuration.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct DedupCacheConfig {
    /// Hours a fingerprint suppresses duplicates after it is first recorded.
    #[serde(default = "default_retention_hours")]
    retention_hours: u32,
}

impl Default for DedupCacheConfig {
    fn default() -> Self {
        Self {
            retention_hours: default_retention_hours(),
        }
    }
}

fn default_retention_hours() -> u32 {
    24
}

/// Answer returned by [`DedupCache::check_and_record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupVerdict {
    /// Whether the fingerprint was already recorded inside the window.
    is_duplicate: bool,
    /// When the live entry for this fingerprint was recorded.
    recorded_at: DateTime<Utc>,
}

impl DedupVerdict {
    /// Whether the fingerprint was already recorded inside the window.
    pub fn is_duplicate(&self) -> bool {
        self.is_duplicate
    }

    /// When the live entry for this fingerprint was recorded.
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// Process-wide set of recently seen fingerprints.
///
/// Entries are never refreshed by a duplicate hit, so a fingerprint is reported
/// as new at most once per rolling retention window. Expired entries are swept
/// on every access; there is no background timer and no persistence across
/// restarts.
///
/// The check and the insert happen under one lock, so concurrent callers
/// racing on the same fingerprint see exactly one non-duplicate verdict.
#[derive(Debug)]
pub struct DedupCache {
    entries: Mutex<HashMap<Fingerprint, DateTime<Utc>>>,
    retention: TimeDelta,
}

impl DedupCache {
    /// Create an empty cache.
    pub fn new(config: DedupCacheConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            retention: TimeDelta::hours(i64::from(config.retention_hours)),
        }
    }

    /// Retention window.
    pub fn retention(&self) -> TimeDelta {
        self.retention
    }

    /// Check `fingerprint` against the cache and record it if new.
    pub fn check_and_record(&self, fingerprint: &Fingerprint) -> DedupVerdict {
        self.check_and_record_at(fingerprint, Utc::now())
    }

    /// [`check_and_record`](Self::check_and_record) with an explicit clock.
    #[instrument(skip(self), fields(fingerprint = %fingerprint))]
    pub fn check_and_record_at(&self, fingerprint: &Fingerprint, now: DateTime<Utc>) -> DedupVerdict {
        let mut entries = self.lock();
        let swept = Self::sweep(&mut entries, now, self.retention);
        if swept > 0 {
            debug!(swept, remaining = entries.len(), "Swept expired fingerprints");
        }

        if let Some(recorded_at) = entries.get(fingerprint) {
            trace!(%recorded_at, "Duplicate fingerprint");
            return DedupVerdict {
                is_duplicate: true,
                recorded_at: *recorded_at,
            };
        }

        entries.insert(fingerprint.clone(), now);
        trace!("Recorded new fingerprint");
        DedupVerdict {
            is_duplicate: false,
            recorded_at: now,
        }
    }

    /// Remove every expired entry, returning how many were removed.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Utc::now())
    }

    /// [`sweep_expired`](Self::sweep_expired) with an explicit clock.
    pub fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.lock();
        Self::sweep(&mut entries, now, self.retention)
    }

    /// Number of live entries, including any not yet swept.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn sweep(
        entries: &mut HashMap<Fingerprint, DateTime<Utc>>,
        now: DateTime<Utc>,
        retention: TimeDelta,
    ) -> usize {
        let before = entries.len();
        entries.retain(|_, recorded_at| now.signed_duration_since(*recorded_at) < retention);
        before - entries.len()
    }

    // A panic while holding the lock cannot leave the map half-updated, so the
    // poisoned guard is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<Fingerprint, DateTime<Utc>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DedupCache {
    fn default() -> Self {
        Self::new(DedupCacheConfig::default())
    }
}
