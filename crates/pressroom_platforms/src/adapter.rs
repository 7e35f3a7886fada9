//! The uniform adapter contract.

use async_trait::async_trait;
use pressroom_core::{ConnectionStatus, PlatformKind, PostContent, PublishOutcome};

/// Uniform wrapper around one external publishing platform.
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    /// Platform this adapter publishes to.
    fn kind(&self) -> PlatformKind;

    /// True iff every required credential was present at construction.
    ///
    /// Pure and synchronous; performs no I/O.
    fn is_ready(&self) -> bool;

    /// Verify the credentials with a minimal authenticated read.
    ///
    /// Used for dry runs and diagnostics, never as a precondition of
    /// [`publish`](Self::publish).
    async fn test_connection(&self) -> ConnectionStatus;

    /// Publish `content` to the platform.
    async fn publish(&self, content: &PostContent) -> PublishOutcome;
}
