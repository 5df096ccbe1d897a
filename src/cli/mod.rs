//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for batchkit using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Exit code for a successful run
pub const EXIT_OK: i32 = 0;

/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;

/// Exit code for rejected input (validation, parameters, missing column)
pub const EXIT_INVALID_INPUT: i32 = 3;

/// Exit code for internal failures
pub const EXIT_FATAL: i32 = 5;

/// batchkit - chat-completion batch file toolkit
#[derive(Parser, Debug)]
#[command(name = "batchkit")]
#[command(version, about, long_about = None)]
#[command(author = "Batchkit Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to ./batchkit.toml when present)
    #[arg(short, long, env = "BATCHKIT_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "BATCHKIT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a CSV file into a batch-request JSONL file
    Format(commands::format::FormatArgs),

    /// Split a JSONL file into a zip archive of shards
    Split(commands::split::SplitArgs),

    /// Extract batch-response content into a CSV file
    Extract(commands::extract::ExtractArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
