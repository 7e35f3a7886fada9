//! Deterministic content fingerprints.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
pub const FINGERPRINT_LEN: usize = 16;

/// Separator placed between normalized parts before hashing.
const PART_DELIMITER: &str = "\u{1f}";

/// Short hex digest identifying a normalized set of content parts.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fingerprints `(platform, content)` or `(title, body)` tuples.
///
/// Each part is trimmed and lower-cased, the parts are joined with a fixed
/// delimiter, hashed with SHA-256, and the hex digest is truncated to
/// [`FINGERPRINT_LEN`] characters.
///
/// # Example
///
/// ```rust
/// use pressroom_cache::ContentHasher;
///
/// let a = ContentHasher::fingerprint(&["x", "Hello"]);
/// let b = ContentHasher::fingerprint(&["X", "  hello  "]);
/// assert_eq!(a, b);
/// assert_eq!(a.as_str().len(), 16);
/// ```
pub struct ContentHasher;

impl ContentHasher {
    /// Fingerprint the given parts.
    #[must_use]
    pub fn fingerprint<S: AsRef<str>>(parts: &[S]) -> Fingerprint {
        let normalized = parts
            .iter()
            .map(|part| Self::normalize(part.as_ref()))
            .collect::<Vec<_>>()
            .join(PART_DELIMITER);

        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        let mut digest = hex::encode(hasher.finalize());
        digest.truncate(FINGERPRINT_LEN);
        Fingerprint(digest)
    }

    /// Trim and lower-case a single part.
    #[must_use]
    pub fn normalize(part: &str) -> String {
        part.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let first = ContentHasher::fingerprint(&["linkedin", "Structured settlements 101"]);
        let second = ContentHasher::fingerprint(&["linkedin", "Structured settlements 101"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(
            ContentHasher::fingerprint(&["x", "Hello"]),
            ContentHasher::fingerprint(&["x", "  hello  "])
        );
    }

    #[test]
    fn test_fixed_length_hex() {
        let fp = ContentHasher::fingerprint(&["facebook", ""]);
        assert_eq!(fp.as_str().len(), FINGERPRINT_LEN);
        assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_platform_distinguishes() {
        assert_ne!(
            ContentHasher::fingerprint(&["x", "Same text"]),
            ContentHasher::fingerprint(&["facebook", "Same text"])
        );
    }

    #[test]
    fn test_part_boundaries_matter() {
        assert_ne!(
            ContentHasher::fingerprint(&["ab", "c"]),
            ContentHasher::fingerprint(&["a", "bc"])
        );
    }

    #[test]
    fn test_known_digest_prefix() {
        // sha256("") = e3b0c44298fc1c149afbf4c8996fb924...
        assert_eq!(ContentHasher::fingerprint(&["  "]).as_str(), "e3b0c44298fc1c14");
    }
}
