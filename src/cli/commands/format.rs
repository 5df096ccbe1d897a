//! Format command implementation
//!
//! This module implements the `format` command, turning a CSV file into a
//! batch-request JSONL file.

use super::{read_input, report_failure, write_artifact};
use crate::cli::EXIT_OK;
use crate::config::{BatchConfig, FormatConfig};
use crate::core::format::{
    self, parse_max_tokens, parse_temperature, FormatOptions, MissingCellPolicy,
};
use crate::domain::{BatchError, Result, Upload};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the format command
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// CSV file to convert
    pub input: PathBuf,

    /// Model name written into every request
    #[arg(long)]
    pub model: Option<String>,

    /// System prompt sent with every row
    #[arg(long)]
    pub system_prompt: Option<String>,

    /// Token limit per request
    #[arg(long)]
    pub max_tokens: Option<String>,

    /// Sampling temperature (default 1.0)
    #[arg(long, conflicts_with = "no_temperature")]
    pub temperature: Option<String>,

    /// Omit the temperature field from request bodies
    #[arg(long)]
    pub no_temperature: bool,

    /// Column holding the user message
    #[arg(long)]
    pub content_column: Option<String>,

    /// Rendering of missing cells (empty or nan)
    #[arg(long)]
    pub missing_cell: Option<String>,

    /// Directory the output.jsonl file is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

impl FormatArgs {
    /// Resolves transform options, flags first then config
    pub fn options(&self, config: &FormatConfig) -> Result<FormatOptions> {
        let model = self
            .model
            .clone()
            .or_else(|| config.model.clone())
            .ok_or_else(|| BatchError::parameter("model", "field is required"))?;

        let system_prompt = self
            .system_prompt
            .clone()
            .or_else(|| config.system_prompt.clone())
            .ok_or_else(|| BatchError::parameter("system_prompt", "field is required"))?;

        let max_tokens = match (&self.max_tokens, config.max_tokens) {
            (Some(raw), _) => parse_max_tokens(raw)?,
            (None, Some(value)) => value,
            (None, None) => return Err(BatchError::parameter("max_tokens", "field is required")),
        };

        let content_column = self
            .content_column
            .clone()
            .or_else(|| config.content_column.clone())
            .ok_or_else(|| BatchError::parameter("content_column", "field is required"))?;

        let temperature = if self.no_temperature {
            None
        } else {
            match &self.temperature {
                Some(raw) => Some(parse_temperature(raw)?),
                None => config.effective_temperature(),
            }
        };

        let missing_cell = match &self.missing_cell {
            Some(raw) => raw.parse::<MissingCellPolicy>()?,
            None => config.missing_cell,
        };

        let options = FormatOptions::new(model, system_prompt, max_tokens, content_column)
            .with_temperature(temperature)
            .with_missing_cell(missing_cell);
        options.validate()?;
        Ok(options)
    }

    /// Execute the format command
    pub async fn execute(&self, config: &BatchConfig) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting format command");

        let options = match self.options(&config.format) {
            Ok(options) => options,
            Err(e) => return Ok(report_failure(&e)),
        };

        let (name, bytes) = match read_input(&self.input).await {
            Ok(input) => input,
            Err(e) => return Ok(report_failure(&e)),
        };

        let artifact = match format::format(&Upload::new(&name, &bytes), &options) {
            Ok(artifact) => artifact,
            Err(e) => return Ok(report_failure(&e)),
        };
        let rows = artifact.bytes.iter().filter(|&&b| b == b'\n').count();

        let path = match write_artifact(&artifact, &self.output_dir).await {
            Ok(path) => path,
            Err(e) => return Ok(report_failure(&e)),
        };

        println!("✅ Formatted {rows} rows into {}", path.display());
        println!("   Model: {}", options.model);
        println!("   Content column: {}", options.content_column);
        Ok(EXIT_OK)
    }
}
