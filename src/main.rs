// Batchkit - Chat-completion batch file toolkit
// Copyright (c) 2025 Batchkit Contributors
// Licensed under the MIT License

use batchkit::cli::{Cli, Commands, EXIT_CONFIG, EXIT_FATAL};
use batchkit::config::{load_config_or_default, BatchConfig, DEFAULT_CONFIG_PATH};
use batchkit::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // init and validate-config report on the file themselves
    let config = match &cli.command {
        Commands::Init(_) | Commands::ValidateConfig(_) => BatchConfig::default(),
        _ => match load_config_or_default(cli.config.as_deref(), DEFAULT_CONFIG_PATH) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ {e}");
                process::exit(EXIT_CONFIG);
            }
        },
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.application.log_level);
    let guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Batchkit - chat-completion batch file toolkit"
    );

    let exit_code = match execute_command(&cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors, flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: &BatchConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Format(args) => args.execute(config).await,
        Commands::Split(args) => args.execute(config).await,
        Commands::Extract(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(cli.config.as_deref()).await,
        Commands::Init(args) => args.execute().await,
    }
}
