//! Deduplicated, dry-run-by-default content publishing.
//!
//! Pressroom takes generated marketing content and decides, per request,
//! whether to skip it (seen in the last 24 hours), simulate it (dry run), or
//! publish it to X, Facebook, LinkedIn or Medium.
//!
//! # Flow
//!
//! ```text
//! request -> fingerprint -> dedup cache -> duplicate? skip
//!                                       -> dry run?  adapter.test_connection()
//!                                       -> live      adapter.publish()
//!         -> one audit entry per attempt
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use pressroom::{Pressroom, PressroomConfig};
//! use pressroom::core::PostRequest;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PressroomConfig::from_env()?;
//! let pressroom = Pressroom::from_config(&config);
//! let disposition = pressroom
//!     .social()
//!     .publish(&PostRequest::text("Great news about settlements!", "x"))
//!     .await?;
//! println!("{disposition}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod audit;
mod bootstrap;
mod config;
mod diagnostics;
mod observability;
mod publisher;

pub use audit::{AuditAction, AuditEntry, AuditSink, MemoryAuditSink, PublishFlow, TracingAuditSink, preview};
pub use bootstrap::Pressroom;
pub use config::{PressroomConfig, parse_dry_run};
pub use diagnostics::{ConnectionReport, check_connections};
pub use observability::{init_observability, shutdown_observability};
pub use publisher::{ArticlePublisher, PublishDisposition, SocialPublisher};

// Re-export the component crates for single-dependency consumers.
pub use pressroom_cache as cache;
pub use pressroom_core as core;
pub use pressroom_error as error;
pub use pressroom_platforms as platforms;
