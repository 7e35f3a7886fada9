//! Publisher error types.

/// Kinds of publisher errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PublishErrorKind {
    /// Live publish reached the platform and was not accepted
    #[display("Failed to publish to {}: {}", platform, message)]
    PlatformFailure {
        /// Platform key
        platform: String,
        /// Error string reported by the adapter
        message: String,
    },
}

/// Publisher error with location tracking.
///
/// # Examples
///
/// ```
/// use pressroom_error::{PublishError, PublishErrorKind};
///
/// let err = PublishError::new(PublishErrorKind::PlatformFailure {
///     platform: "x".to_string(),
///     message: "Tweet is too long".to_string(),
/// });
/// assert!(err.to_string().contains("too long"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    /// The kind of error that occurred
    pub kind: PublishErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PublishError {
    /// Create a new publish error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for publisher operations.
pub type PublishResult<T> = Result<T, PublishError>;
