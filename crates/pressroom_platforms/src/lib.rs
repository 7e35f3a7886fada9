//! Platform adapters for the Pressroom publishing pipeline.
//!
//! Each external platform is wrapped behind the [`PlatformAdapter`] trait,
//! which exposes the same three capabilities everywhere:
//!
//! - `is_ready` - were all required credentials supplied at construction
//! - `test_connection` - a minimal authenticated read ("who am I")
//! - `publish` - the actual write
//!
//! # Error semantics
//!
//! Adapters never return errors. Missing credentials, local validation
//! failures, non-2xx responses and transport failures are all reported as a
//! failed [`PublishOutcome`](pressroom_core::PublishOutcome) or
//! [`ConnectionStatus`](pressroom_core::ConnectionStatus) carrying a
//! human-readable message.
//!
//! # Platforms
//!
//! - [`XAdapter`] - X API v2, OAuth 1.0a user context
//! - [`FacebookAdapter`] - Graph API page feed, photos and videos
//! - [`LinkedInAdapter`] - UGC posts on an organization page
//! - [`MediumAdapter`] - draft posts on a user or publication

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod adapter;
mod credentials;
mod facebook;
mod http;
mod linkedin;
mod medium;
mod registry;
mod x;

pub use adapter::PlatformAdapter;
pub use credentials::PlatformCredentials;
pub use facebook::{FacebookAdapter, FacebookCredentials, FacebookEdge, FacebookRequest};
pub use linkedin::{LinkedInAdapter, LinkedInCredentials};
pub use medium::{MEDIUM_MAX_TAGS, MediumAdapter, MediumCredentials, MediumTarget};
pub use registry::AdapterRegistry;
pub use x::{X_MAX_TWEET_LENGTH, XAdapter, XCredentials};
