//! Pipeline configuration from TOML and the environment.

use pressroom_cache::DedupCacheConfig;
use pressroom_error::{ConfigError, ConfigErrorKind};
use pressroom_platforms::PlatformCredentials;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

const DRY_RUN_VARS: [&str; 2] = ["PRESSROOM_DRY_RUN", "DRY_RUN"];
const RETENTION_VAR: &str = "PRESSROOM_DEDUP_RETENTION_HOURS";

/// Top-level configuration.
///
/// ```toml
/// dry_run = false
///
/// [dedup]
/// retention_hours = 24
///
/// [platforms.medium]
/// integration_token = "..."
/// author_id = "..."
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PressroomConfig {
    /// Only test connections, never publish. Defaults to `true`.
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,
    /// Dedup cache settings
    #[serde(default)]
    pub dedup: DedupCacheConfig,
    /// Platform credentials
    #[serde(default)]
    pub platforms: PlatformCredentials,
}

fn default_dry_run() -> bool {
    true
}

impl Default for PressroomConfig {
    fn default() -> Self {
        Self {
            dry_run: default_dry_run(),
            dedup: DedupCacheConfig::default(),
            platforms: PlatformCredentials::default(),
        }
    }
}

/// Interpret a dry-run flag value.
///
/// Only an explicit `false`, `0`, `no` or `off` turns dry run off; anything
/// else keeps it on.
pub fn parse_dry_run(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

impl PressroomConfig {
    /// Configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().overlay(lookup)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or TOML is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Io(format!("{}: {}", path.display(), e)))
        })?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))?;
        config.validate()?;
        info!(path = %path.display(), dry_run = config.dry_run, "Configuration file loaded");
        Ok(config)
    }

    /// Optional TOML file, then the environment on top.
    ///
    /// # Errors
    ///
    /// Returns error if the file or any variable is unusable.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.overlay(|key| std::env::var(key).ok())
    }

    /// Apply variables from `lookup` over this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the retention variable is not a positive integer.
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = DRY_RUN_VARS.iter().find_map(|key| lookup(*key)) {
            self.dry_run = parse_dry_run(&value);
            debug!(dry_run = self.dry_run, "Dry-run flag from environment");
        }

        if let Some(value) = lookup(RETENTION_VAR).filter(|v| !v.trim().is_empty()) {
            let hours: u32 = value.trim().parse().map_err(|_| {
                ConfigError::new(ConfigErrorKind::Invalid(format!(
                    "{} must be a whole number of hours, got {:?}",
                    RETENTION_VAR, value
                )))
            })?;
            self.dedup = self.dedup.with_retention_hours(hours);
        }

        self.platforms = self
            .platforms
            .merged_with(PlatformCredentials::from_lookup(&lookup));
        self.validate()?;

        if !self.dry_run {
            warn!("Live publishing enabled");
        }
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if *self.dedup.retention_hours() == 0 {
            return Err(ConfigError::new(ConfigErrorKind::Invalid(
                "dedup retention_hours must be at least 1".to_string(),
            )));
        }
        Ok(())
    }
}
