//! One-time construction of the pipeline.

use crate::audit::{AuditSink, TracingAuditSink};
use crate::config::PressroomConfig;
use crate::diagnostics::{ConnectionReport, check_connections};
use crate::publisher::{ArticlePublisher, SocialPublisher};
use pressroom_cache::DedupCache;
use pressroom_platforms::AdapterRegistry;
use std::sync::Arc;
use tracing::{info, instrument};

/// Fully wired pipeline: one cache, one adapter registry, one audit sink,
/// shared by the social and article publishers.
#[derive(Clone)]
pub struct Pressroom {
    social: SocialPublisher,
    article: ArticlePublisher,
    registry: Arc<AdapterRegistry>,
    cache: Arc<DedupCache>,
    dry_run: bool,
}

impl Pressroom {
    /// Build everything from `config`, logging audits through `tracing`.
    #[instrument(skip_all, fields(dry_run = config.dry_run))]
    pub fn from_config(config: &PressroomConfig) -> Self {
        let registry = Arc::new(AdapterRegistry::from_credentials(&config.platforms));
        let cache = Arc::new(DedupCache::new(config.dedup.clone()));
        let pressroom =
            Self::with_parts(registry, cache, Arc::new(TracingAuditSink::new()), config.dry_run);
        info!(
            dry_run = config.dry_run,
            retention_hours = config.dedup.retention_hours(),
            "Pressroom initialized"
        );
        pressroom
    }

    /// Build from explicit parts.
    pub fn with_parts(
        registry: Arc<AdapterRegistry>,
        cache: Arc<DedupCache>,
        audit: Arc<dyn AuditSink>,
        dry_run: bool,
    ) -> Self {
        Self {
            social: SocialPublisher::new(
                Arc::clone(&cache),
                Arc::clone(&registry),
                Arc::clone(&audit),
                dry_run,
            ),
            article: ArticlePublisher::new(Arc::clone(&cache), Arc::clone(&registry), audit, dry_run),
            registry,
            cache,
            dry_run,
        }
    }

    /// Social post publisher.
    pub fn social(&self) -> &SocialPublisher {
        &self.social
    }

    /// Article publisher.
    pub fn article(&self) -> &ArticlePublisher {
        &self.article
    }

    /// Adapter registry.
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Shared dedup cache.
    pub fn cache(&self) -> &DedupCache {
        &self.cache
    }

    /// Whether publishing is simulated.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Test every ready adapter's connection.
    pub async fn check_connections(&self) -> Vec<ConnectionReport> {
        check_connections(&self.registry).await
    }
}
