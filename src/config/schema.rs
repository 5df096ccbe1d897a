//! Configuration schema types
//!
//! This module defines the configuration structure for batchkit. Every section
//! is optional in the TOML file and falls back to its defaults.

use crate::core::extract::{DuplicatePolicy, ExtractOptions, RowOrder};
use crate::core::format::{MissingCellPolicy, DEFAULT_TEMPERATURE};
use crate::core::split::DEFAULT_SPLIT_NUMBER;
use serde::{Deserialize, Serialize};

/// Main batchkit configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Defaults for the format command
    #[serde(default)]
    pub format: FormatConfig,

    /// Defaults for the split command
    #[serde(default)]
    pub split: SplitConfig,

    /// Defaults for the extract command
    #[serde(default)]
    pub extract: ExtractConfig,
}

impl BatchConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.logging.validate()?;
        self.format.validate()?;
        self.split.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to a local file
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

/// Defaults for the format command
///
/// Any field left unset here must be supplied on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Model name
    #[serde(default)]
    pub model: Option<String>,

    /// System prompt
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Token limit per request
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Whether request bodies carry a temperature field at all
    #[serde(default = "default_true")]
    pub include_temperature: bool,

    /// Column holding the user message
    #[serde(default)]
    pub content_column: Option<String>,

    /// Rendering of missing content cells
    #[serde(default)]
    pub missing_cell: MissingCellPolicy,
}

impl FormatConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.temperature.is_finite() {
            return Err("format.temperature must be a finite number".to_string());
        }
        if self.max_tokens == Some(0) {
            return Err("format.max_tokens must be a positive integer".to_string());
        }
        if matches!(self.model.as_deref(), Some(m) if m.trim().is_empty()) {
            return Err("format.model cannot be empty".to_string());
        }
        Ok(())
    }

    /// Temperature to send, honoring `include_temperature`
    pub fn effective_temperature(&self) -> Option<f64> {
        self.include_temperature.then_some(self.temperature)
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            model: None,
            system_prompt: None,
            max_tokens: None,
            temperature: default_temperature(),
            include_temperature: true,
            content_column: None,
            missing_cell: MissingCellPolicy::default(),
        }
    }
}

/// Defaults for the split command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Number of shards
    #[serde(default = "default_split_number")]
    pub split_number: usize,
}

impl SplitConfig {
    fn validate(&self) -> Result<(), String> {
        if self.split_number == 0 {
            return Err("split.split_number must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            split_number: default_split_number(),
        }
    }
}

/// Defaults for the extract command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Row ordering
    #[serde(default)]
    pub order: RowOrder,

    /// Duplicate merge policy
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

impl From<ExtractConfig> for ExtractOptions {
    fn from(config: ExtractConfig) -> Self {
        ExtractOptions::new(config.order, config.duplicates)
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_true() -> bool {
    true
}

fn default_split_number() -> usize {
    DEFAULT_SPLIT_NUMBER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_path, "./logs");
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_config_rotation_validation() {
        let mut config = LoggingConfig::default();
        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "never".to_string();
        config.local_enabled = true;
        config.local_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_format_config_validation() {
        let mut config = FormatConfig::default();
        assert!(config.validate().is_ok());

        config.max_tokens = Some(0);
        assert!(config.validate().is_err());

        config.max_tokens = Some(100);
        config.temperature = f64::NAN;
        assert!(config.validate().is_err());

        config.temperature = 0.2;
        config.model = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_effective_temperature() {
        let mut config = FormatConfig::default();
        assert_eq!(config.effective_temperature(), Some(1.0));

        config.include_temperature = false;
        assert_eq!(config.effective_temperature(), None);
    }

    #[test]
    fn test_split_config_validation() {
        let mut config = SplitConfig::default();
        assert_eq!(config.split_number, 2);
        assert!(config.validate().is_ok());

        config.split_number = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: BatchConfig = toml::from_str("").unwrap();
        assert_eq!(config, BatchConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_policies_deserialize_from_toml() {
        let config: BatchConfig = toml::from_str(
            r#"
[format]
missing_cell = "nan"

[extract]
order = "first_seen"
duplicates = "first_seen"
"#,
        )
        .unwrap();
        assert_eq!(config.format.missing_cell, MissingCellPolicy::Nan);
        assert_eq!(config.extract.order, RowOrder::FirstSeen);
        assert_eq!(config.extract.duplicates, DuplicatePolicy::FirstSeen);
    }
}
