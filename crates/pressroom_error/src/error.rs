//! Top-level error aggregating every Pressroom error kind.

use crate::{ConfigError, PlatformError, PublishError};

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum PressroomErrorKind {
    /// Platform adapter error
    #[display("{}", _0)]
    Platform(PlatformError),
    /// Configuration error
    #[display("{}", _0)]
    Config(ConfigError),
    /// Publisher error
    #[display("{}", _0)]
    Publish(PublishError),
}

/// Pressroom error with kind discrimination.
#[derive(Debug, derive_more::Display)]
#[display("Pressroom Error: {}", _0)]
pub struct PressroomError(Box<PressroomErrorKind>);

impl PressroomError {
    /// Create a new error from a kind.
    pub fn new(kind: PressroomErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PressroomErrorKind {
        &self.0
    }
}

impl std::error::Error for PressroomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            PressroomErrorKind::Platform(e) => Some(e),
            PressroomErrorKind::Config(e) => Some(e),
            PressroomErrorKind::Publish(e) => Some(e),
        }
    }
}

impl<T> From<T> for PressroomError
where
    T: Into<PressroomErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Pressroom operations.
pub type PressroomResult<T> = Result<T, PressroomError>;
