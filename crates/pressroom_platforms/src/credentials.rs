//! Per-platform credentials, populated once at bootstrap.

use crate::{FacebookCredentials, LinkedInCredentials, MediumCredentials, XCredentials};
use serde::Deserialize;

/// Credentials for every platform.
///
/// A `None` section leaves that one adapter permanently not ready; the rest
/// of the pipeline is unaffected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformCredentials {
    /// X (Twitter) credentials
    #[serde(default)]
    pub x: Option<XCredentials>,
    /// Facebook page credentials
    #[serde(default)]
    pub facebook: Option<FacebookCredentials>,
    /// LinkedIn organization credentials
    #[serde(default)]
    pub linkedin: Option<LinkedInCredentials>,
    /// Medium integration credentials
    #[serde(default)]
    pub medium: Option<MediumCredentials>,
}

impl PlatformCredentials {
    /// Read every credential set through `lookup` (usually the environment).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            x: XCredentials::from_lookup(&lookup),
            facebook: FacebookCredentials::from_lookup(&lookup),
            linkedin: LinkedInCredentials::from_lookup(&lookup),
            medium: MediumCredentials::from_lookup(&lookup),
        }
    }

    /// Overlay `other`, keeping this set's sections where `other` has none.
    pub fn merged_with(self, other: PlatformCredentials) -> Self {
        Self {
            x: other.x.or(self.x),
            facebook: other.facebook.or(self.facebook),
            linkedin: other.linkedin.or(self.linkedin),
            medium: other.medium.or(self.medium),
        }
    }
}

/// Fetch a variable, treating blank values as absent.
pub(crate) fn lookup_value<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Placeholder shown instead of secrets in `Debug` output.
pub(crate) const REDACTED: &str = "[redacted]";
