//! Error types for the Pressroom publishing pipeline.
//!
//! Every error carries the source location where it was created. Platform
//! adapters never surface these errors to callers directly: they are collapsed
//! into a uniform outcome at the adapter boundary. Only the publishers raise
//! [`PublishError`], and only for a genuine live publishing failure.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod platform;
mod publish;

pub use config::{ConfigError, ConfigErrorKind};
pub use error::{PressroomError, PressroomErrorKind, PressroomResult};
pub use platform::{PlatformError, PlatformErrorKind, PlatformResult};
pub use publish::{PublishError, PublishErrorKind, PublishResult};
