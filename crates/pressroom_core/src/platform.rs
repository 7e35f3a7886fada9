//! Supported publishing platforms.

use serde::{Deserialize, Serialize};

/// Publishing platform keys.
///
/// Parsing is case-insensitive and accepts `twitter` as an alias for `x`.
/// Keys that do not parse are treated by the publishers as unsupported
/// platforms rather than errors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlatformKind {
    /// X (formerly Twitter)
    #[strum(to_string = "x", serialize = "twitter")]
    X,
    /// Facebook page
    Facebook,
    /// LinkedIn organization page
    #[strum(serialize = "linkedin")]
    LinkedIn,
    /// Medium
    Medium,
}

impl PlatformKind {
    /// Parse a platform key, returning `None` for unknown platforms.
    pub fn from_key(key: &str) -> Option<Self> {
        key.trim().parse().ok()
    }

    /// Human-readable platform name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Facebook => "Facebook",
            Self::LinkedIn => "LinkedIn",
            Self::Medium => "Medium",
        }
    }
}
