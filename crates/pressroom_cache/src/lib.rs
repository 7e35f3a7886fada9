//! Content fingerprinting and time-windowed deduplication.
//!
//! [`ContentHasher`] derives a short, deterministic [`Fingerprint`] from the
//! normalized parts of a publish request. [`DedupCache`] remembers
//! fingerprints for a retention window and answers, atomically, whether a
//! fingerprint was already seen inside that window.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod dedup;
mod hasher;

pub use dedup::{DedupCache, DedupCacheConfig, DedupVerdict};
pub use hasher::{ContentHasher, FINGERPRINT_LEN, Fingerprint};
