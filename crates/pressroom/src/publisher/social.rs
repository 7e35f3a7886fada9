//! Social post publisher.

use super::PublishDisposition;
use super::dispatch::{Dispatcher, platform_key};
use crate::audit::{AuditSink, PublishFlow};
use pressroom_cache::{ContentHasher, DedupCache};
use pressroom_core::PostRequest;
use pressroom_error::PublishResult;
use pressroom_platforms::AdapterRegistry;
use std::sync::Arc;
use tracing::instrument;

/// Publishes short posts, deduplicated on `(platform, content)`.
#[derive(Clone)]
pub struct SocialPublisher {
    dispatcher: Dispatcher,
}

impl SocialPublisher {
    /// Create a publisher over shared cache, adapters and audit sink.
    pub fn new(
        cache: Arc<DedupCache>,
        registry: Arc<AdapterRegistry>,
        audit: Arc<dyn AuditSink>,
        dry_run: bool,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(PublishFlow::SocialPost, cache, registry, audit, dry_run),
        }
    }

    /// Whether this publisher only tests connections.
    pub fn is_dry_run(&self) -> bool {
        self.dispatcher.is_dry_run()
    }

    /// Publish `request`.
    ///
    /// Duplicates, dry runs, unsupported platforms and unconfigured adapters
    /// all resolve successfully.
    ///
    /// # Errors
    ///
    /// Returns `PlatformFailure` only when a live publish is rejected; the
    /// message carries the adapter's error.
    #[instrument(skip(self, request), fields(platform = %request.platform()))]
    pub async fn publish(&self, request: &PostRequest) -> PublishResult<PublishDisposition> {
        let platform = platform_key(request.platform());
        let fingerprint = ContentHasher::fingerprint(&[
            PublishFlow::SocialPost.as_ref(),
            platform.as_str(),
            request.content().as_str(),
        ]);
        self.dispatcher
            .dispatch(request.platform(), &fingerprint, &request.to_content())
            .await
    }
}
