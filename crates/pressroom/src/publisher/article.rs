//! Article publisher.

use super::PublishDisposition;
use super::dispatch::Dispatcher;
use crate::audit::{AuditSink, PublishFlow};
use pressroom_cache::{ContentHasher, DedupCache};
use pressroom_core::ArticleRequest;
use pressroom_error::PublishResult;
use pressroom_platforms::AdapterRegistry;
use std::sync::Arc;
use tracing::instrument;

/// Publishes long-form articles, deduplicated on `(title, body)`.
///
/// The platform is not part of the fingerprint: an article goes out once per
/// window, whichever platform it was sent to first.
#[derive(Clone)]
pub struct ArticlePublisher {
    dispatcher: Dispatcher,
}

impl ArticlePublisher {
    /// Create a publisher over shared cache, adapters and audit sink.
    pub fn new(
        cache: Arc<DedupCache>,
        registry: Arc<AdapterRegistry>,
        audit: Arc<dyn AuditSink>,
        dry_run: bool,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(PublishFlow::Article, cache, registry, audit, dry_run),
        }
    }

    /// Whether this publisher only tests connections.
    pub fn is_dry_run(&self) -> bool {
        self.dispatcher.is_dry_run()
    }

    /// Publish `request`.
    ///
    /// # Errors
    ///
    /// Returns `PlatformFailure` only when a live publish is rejected.
    #[instrument(skip(self, request), fields(platform = %request.platform(), title = %request.article().title()))]
    pub async fn publish(&self, request: &ArticleRequest) -> PublishResult<PublishDisposition> {
        let article = request.article();
        let fingerprint = ContentHasher::fingerprint(&[
            PublishFlow::Article.as_ref(),
            article.title().as_str(),
            article.body().as_str(),
        ]);
        self.dispatcher
            .dispatch(request.platform(), &fingerprint, &request.to_content())
            .await
    }
}
