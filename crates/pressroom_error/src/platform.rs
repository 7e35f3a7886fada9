//! Platform adapter error types.

/// Failure categories for a single platform call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PlatformErrorKind {
    /// Required credentials were absent when the adapter was built
    #[display("{} is not configured", _0)]
    NotConfigured(String),
    /// Rejected locally before any network call
    #[display("Validation failed: {}", _0)]
    Validation(String),
    /// Platform answered with a non-2xx status
    #[display("HTTP {} error: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Message taken from the platform's error envelope when parseable
        message: String,
    },
    /// Transport-level failure
    #[display("Network error: {}", _0)]
    Network(String),
    /// Success response whose body could not be understood
    #[display("Response parsing failed: {}", _0)]
    ResponseParsing(String),
}

impl PlatformErrorKind {
    /// True when the failure happened before any request left the process.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::NotConfigured(_) | Self::Validation(_))
    }
}

/// Platform error with location tracking.
///
/// # Examples
///
/// ```
/// use pressroom_error::{PlatformError, PlatformErrorKind};
///
/// let err = PlatformError::new(PlatformErrorKind::Validation("Tweet is too long".to_string()));
/// assert!(err.kind.to_string().contains("too long"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    /// The kind of error that occurred
    pub kind: PlatformErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PlatformError {
    /// Create a new platform error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
