//! The two publishing flows.
//!
//! [`SocialPublisher`] fingerprints `(social_post, platform, content)`;
//! [`ArticlePublisher`] fingerprints `(article, title, body)`. The flow name
//! keeps the two apart in the shared cache. Past the fingerprint
//! both run the same dispatch: dedup check, then dry-run connection test or
//! live publish, then exactly one audit entry.

mod article;
mod dispatch;
mod social;

pub use article::ArticlePublisher;
pub use social::SocialPublisher;

use pressroom_core::ConnectionStatus;
use serde_json::Value;

/// Terminal state of a request that did not fail.
///
/// Every state is final; publishers never retry.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum PublishDisposition {
    /// Seen inside the retention window; nothing was sent
    #[display("skipped duplicate")]
    DuplicateSkipped,
    /// Dry run; `connection` is `None` when the adapter was not ready
    #[display("dry run")]
    DryRun {
        /// Result of the connection test, if one ran
        connection: Option<ConnectionStatus>,
    },
    /// Live mode but the adapter has no credentials
    #[display("not configured")]
    NotConfigured,
    /// Platform key is unknown or has no registered adapter
    #[display("unsupported platform")]
    UnsupportedPlatform,
    /// Live publish accepted
    #[display("published {}", post_id.as_deref().unwrap_or("(no id)"))]
    Published {
        /// Platform identifier of the new post
        post_id: Option<String>,
        /// Normalized platform response
        data: Option<Value>,
    },
}

impl PublishDisposition {
    /// True only for an accepted live publish.
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}
