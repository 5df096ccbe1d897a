//! Extract command implementation

use super::{read_input, report_failure, write_artifact};
use crate::cli::EXIT_OK;
use crate::config::{BatchConfig, ExtractConfig};
use crate::core::extract::{self, DuplicatePolicy, ExtractOptions, RowOrder};
use crate::domain::{Result, Upload};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Batch-response JSONL file
    pub input: PathBuf,

    /// Row order (custom_id or first_seen)
    #[arg(long)]
    pub order: Option<String>,

    /// Duplicate policy (prefer_non_empty or first_seen)
    #[arg(long)]
    pub duplicates: Option<String>,

    /// Directory the extracted_content.csv file is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

impl ExtractArgs {
    /// Resolves transform options, flags first then config
    pub fn options(&self, config: &ExtractConfig) -> Result<ExtractOptions> {
        let order = match &self.order {
            Some(raw) => raw.parse::<RowOrder>()?,
            None => config.order,
        };
        let duplicates = match &self.duplicates {
            Some(raw) => raw.parse::<DuplicatePolicy>()?,
            None => config.duplicates,
        };
        Ok(ExtractOptions::new(order, duplicates))
    }

    /// Execute the extract command
    pub async fn execute(&self, config: &BatchConfig) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting extract command");

        let options = match self.options(&config.extract) {
            Ok(options) => options,
            Err(e) => return Ok(report_failure(&e)),
        };

        let (name, bytes) = match read_input(&self.input).await {
            Ok(input) => input,
            Err(e) => return Ok(report_failure(&e)),
        };

        let artifact = match extract::extract(&Upload::new(&name, &bytes), &options) {
            Ok(artifact) => artifact,
            Err(e) => return Ok(report_failure(&e)),
        };

        let path = match write_artifact(&artifact, &self.output_dir).await {
            Ok(path) => path,
            Err(e) => return Ok(report_failure(&e)),
        };

        println!("✅ Extracted responses into {}", path.display());
        println!("   Order: {}", options.order);
        println!("   Duplicates: {}", options.duplicates);
        Ok(EXIT_OK)
    }
}
