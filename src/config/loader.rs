//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::BatchConfig;
use crate::domain::errors::BatchError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into BatchConfig
/// 4. Applies environment variable overrides (BATCHKIT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use batchkit::config::loader::load_config;
///
/// let config = load_config("batchkit.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BatchConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BatchError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BatchError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut config = parse_config(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        BatchError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Loads `path` when given, otherwise the default file if it exists, otherwise
/// built-in defaults with environment overrides applied.
pub fn load_config_or_default(
    path: Option<&str>,
    default_path: impl AsRef<Path>,
) -> Result<BatchConfig> {
    if let Some(path) = path {
        return load_config(path);
    }

    let default_path = default_path.as_ref();
    if default_path.exists() {
        return load_config(default_path);
    }

    let mut config = BatchConfig::default();
    apply_env_overrides(&mut config)?;
    config.validate().map_err(|e| {
        BatchError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Parses TOML text after `${VAR}` substitution
pub fn parse_config(contents: &str) -> Result<BatchConfig> {
    let contents = substitute_env_vars(contents)?;
    toml::from_str(&contents)
        .map_err(|e| BatchError::Configuration(format!("Failed to parse TOML: {}", e)))
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| BatchError::Other(format!("invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Comment lines are copied untouched
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(BatchError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using BATCHKIT_* prefix
///
/// Environment variables follow the pattern: BATCHKIT_<SECTION>_<KEY>
/// For example: BATCHKIT_FORMAT_MODEL, BATCHKIT_SPLIT_SPLIT_NUMBER
fn apply_env_overrides(config: &mut BatchConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("BATCHKIT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("BATCHKIT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("BATCHKIT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("BATCHKIT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    // Format overrides
    if let Ok(val) = std::env::var("BATCHKIT_FORMAT_MODEL") {
        config.format.model = Some(val);
    }
    if let Ok(val) = std::env::var("BATCHKIT_FORMAT_SYSTEM_PROMPT") {
        config.format.system_prompt = Some(val);
    }
    if let Ok(val) = std::env::var("BATCHKIT_FORMAT_MAX_TOKENS") {
        config.format.max_tokens = Some(val.parse().map_err(|_| {
            BatchError::Configuration(format!(
                "BATCHKIT_FORMAT_MAX_TOKENS must be a positive integer, got '{val}'"
            ))
        })?);
    }
    if let Ok(val) = std::env::var("BATCHKIT_FORMAT_TEMPERATURE") {
        config.format.temperature = val.parse().map_err(|_| {
            BatchError::Configuration(format!(
                "BATCHKIT_FORMAT_TEMPERATURE must be a number, got '{val}'"
            ))
        })?;
    }
    if let Ok(val) = std::env::var("BATCHKIT_FORMAT_CONTENT_COLUMN") {
        config.format.content_column = Some(val);
    }
    if let Ok(val) = std::env::var("BATCHKIT_FORMAT_MISSING_CELL") {
        config.format.missing_cell = val
            .parse()
            .map_err(|e: BatchError| BatchError::Configuration(e.to_string()))?;
    }

    // Split overrides
    if let Ok(val) = std::env::var("BATCHKIT_SPLIT_SPLIT_NUMBER") {
        if let Ok(n) = val.parse() {
            config.split.split_number = n;
        }
    }

    // Extract overrides
    if let Ok(val) = std::env::var("BATCHKIT_EXTRACT_ORDER") {
        config.extract.order = val
            .parse()
            .map_err(|e: BatchError| BatchError::Configuration(e.to_string()))?;
    }
    if let Ok(val) = std::env::var("BATCHKIT_EXTRACT_DUPLICATES") {
        config.extract.duplicates = val
            .parse()
            .map_err(|e: BatchError| BatchError::Configuration(e.to_string()))?;
    }

    Ok(())
}
