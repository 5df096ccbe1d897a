//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use crate::config::DEFAULT_CONFIG_PATH;
use clap::Args;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing batchkit configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match tokio::fs::write(&self.output, Self::generate_config()).await {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your model and prompt", self.output);
                println!("  2. Validate configuration: batchkit validate-config");
                println!("  3. Build a batch: batchkit format rows.csv");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate the sample configuration
    pub fn generate_config() -> &'static str {
        r#"# batchkit configuration
# Command-line flags override every value below.
# Values may reference environment variables, e.g. model = "${BATCHKIT_MODEL}"

[application]
log_level = "info"  # trace | debug | info | warn | error

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never

[format]
model = "gpt-4o-mini"
system_prompt = "Translate the following text into English."
max_tokens = 1024
temperature = 1.0
include_temperature = true
content_column = "text"
missing_cell = "empty"  # empty | nan

[split]
split_number = 2

[extract]
order = "custom_id"  # custom_id | first_seen
duplicates = "prefer_non_empty"  # prefer_non_empty | first_seen
"#
    }
}
