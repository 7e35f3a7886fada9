//! Configuration error types.

/// Kinds of configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// Configuration file could not be read
    #[display("Failed to read configuration: {}", _0)]
    Io(String),
    /// Configuration file is not valid TOML for the expected shape
    #[display("Failed to parse configuration: {}", _0)]
    Parse(String),
    /// A value was present but unusable
    #[display("Invalid configuration value: {}", _0)]
    Invalid(String),
}

/// Configuration error with location tracking.
///
/// # Examples
///
/// ```
/// use pressroom_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Invalid("retention_hours".to_string()));
/// assert!(format!("{}", err).contains("retention_hours"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
