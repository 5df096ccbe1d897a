//! Split command implementation

use super::{read_input, report_failure, write_artifact};
use crate::cli::EXIT_OK;
use crate::config::{BatchConfig, SplitConfig};
use crate::core::split::{self, parse_split_number, SplitOptions};
use crate::domain::{Result, Upload};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// JSONL file to split
    pub input: PathBuf,

    /// Number of shards (default 2)
    #[arg(short = 'n', long)]
    pub split_number: Option<String>,

    /// Directory the split_files.zip archive is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

impl SplitArgs {
    /// Resolves transform options, flags first then config
    pub fn options(&self, config: &SplitConfig) -> Result<SplitOptions> {
        let split_number = match &self.split_number {
            Some(raw) => parse_split_number(raw)?,
            None => config.split_number,
        };
        let options = SplitOptions::new(split_number);
        options.validate()?;
        Ok(options)
    }

    /// Execute the split command
    pub async fn execute(&self, config: &BatchConfig) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting split command");

        let options = match self.options(&config.split) {
            Ok(options) => options,
            Err(e) => return Ok(report_failure(&e)),
        };

        let (name, bytes) = match read_input(&self.input).await {
            Ok(input) => input,
            Err(e) => return Ok(report_failure(&e)),
        };

        let artifact = match split::split(&Upload::new(&name, &bytes), &options) {
            Ok(artifact) => artifact,
            Err(e) => return Ok(report_failure(&e)),
        };

        let path = match write_artifact(&artifact, &self.output_dir).await {
            Ok(path) => path,
            Err(e) => return Ok(report_failure(&e)),
        };

        println!(
            "✅ Split {} into {} requested shards: {}",
            name,
            options.split_number,
            path.display()
        );
        Ok(EXIT_OK)
    }
}
