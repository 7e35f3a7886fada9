//! Core data types for the Pressroom publishing pipeline.
//!
//! This crate provides the request and outcome types shared by the platform
//! adapters and the publishers.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod content;
mod outcome;
mod platform;
mod request;

pub use content::{Article, ArticleBuilder, ContentFormat, Media, MediaType, PostContent};
pub use outcome::{ConnectionStatus, PublishOutcome};
pub use platform::PlatformKind;
pub use request::{ArticleRequest, ArticleRequestBuilder, PostRequest, PostRequestBuilder};
