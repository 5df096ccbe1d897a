//! Configuration management for batchkit.
//!
//! batchkit reads an optional TOML file holding defaults for each command.
//! Command-line flags always win over file values.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use batchkit::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("batchkit.toml")?;
//! println!("Shards: {}", config.split.split_number);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`LoggingConfig`] - Local JSON log file
//! - [`FormatConfig`] - Model, prompt, token limit, temperature, content column
//! - [`SplitConfig`] - Default shard count
//! - [`ExtractConfig`] - Row ordering and duplicate policy
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [format]
//! model = "gpt-4o-mini"
//! system_prompt = "Translate the following text into English."
//! max_tokens = 1024
//! content_column = "text"
//!
//! [split]
//! split_number = 4
//!
//! [extract]
//! order = "custom_id"
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders are substituted from the environment, and any
//! value can be overridden with `BATCHKIT_<SECTION>_<KEY>`:
//!
//! ```bash
//! export BATCHKIT_FORMAT_MODEL="gpt-4o"
//! export BATCHKIT_SPLIT_SPLIT_NUMBER=8
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, BatchConfig, ExtractConfig, FormatConfig, LoggingConfig, SplitConfig,
};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_PATH: &str = "batchkit.toml";
