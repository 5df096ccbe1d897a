//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the batchkit configuration file.

use crate::cli::{EXIT_CONFIG, EXIT_OK};
use crate::config::{load_config_or_default, DEFAULT_CONFIG_PATH};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let shown_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        tracing::info!(config_path = %shown_path, "Validating configuration");

        println!("🔍 Validating configuration file: {shown_path}");
        println!();

        let config = match load_config_or_default(config_path, DEFAULT_CONFIG_PATH) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        let unset = "(not set)";
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!(
            "  Model: {}",
            config.format.model.as_deref().unwrap_or(unset)
        );
        println!(
            "  Content Column: {}",
            config.format.content_column.as_deref().unwrap_or(unset)
        );
        match config.format.max_tokens {
            Some(max_tokens) => println!("  Max Tokens: {max_tokens}"),
            None => println!("  Max Tokens: {unset}"),
        }
        match config.format.effective_temperature() {
            Some(t) => println!("  Temperature: {t}"),
            None => println!("  Temperature: omitted"),
        }
        println!("  Missing Cells: {}", config.format.missing_cell);
        println!("  Split Number: {}", config.split.split_number);
        println!("  Extract Order: {}", config.extract.order);
        println!("  Extract Duplicates: {}", config.extract.duplicates);
        println!();
        Ok(EXIT_OK)
    }
}
