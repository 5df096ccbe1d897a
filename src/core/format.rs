//! CSV to batch-request JSONL
//!
//! Every table row becomes one chat-completion request line. Row order is
//! preserved and row `i` (0-based) gets the id `request-<i + 1>`. Output is
//! UTF-8 with non-ASCII characters written literally.

use crate::domain::{Artifact, BatchError, BatchRequestRecord, CustomId, Result, Table, Upload};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// Suggested filename of the formatter artifact
pub const OUTPUT_FILENAME: &str = "output.jsonl";

/// Media type of the formatter artifact
pub const OUTPUT_MEDIA_TYPE: &str = "text/plain";

/// Temperature used when the caller doesn't supply one
pub const DEFAULT_TEMPERATURE: f64 = 1.0;

/// How a missing content cell is rendered in the user message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingCellPolicy {
    /// Empty string
    #[default]
    Empty,
    /// The literal string `nan`
    Nan,
}

impl MissingCellPolicy {
    fn render(self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Nan => "nan",
        }
    }
}

impl FromStr for MissingCellPolicy {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "nan" => Ok(Self::Nan),
            _ => Err(BatchError::parameter(
                "missing_cell",
                format!("expected 'empty' or 'nan', got '{s}'"),
            )),
        }
    }
}

impl fmt::Display for MissingCellPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Nan => write!(f, "nan"),
        }
    }
}

/// Parameters of one format call
#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    /// Model name written into every request body
    pub model: String,

    /// System prompt, copied verbatim
    pub system_prompt: String,

    /// Token limit per request
    pub max_tokens: u32,

    /// Sampling temperature; `None` omits the field from the request body
    pub temperature: Option<f64>,

    /// Column holding the user message content
    pub content_column: String,

    /// Rendering of missing content cells
    pub missing_cell: MissingCellPolicy,
}

impl FormatOptions {
    /// Creates options with the default temperature and missing-cell policy
    pub fn new(
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        max_tokens: u32,
        content_column: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system_prompt: system_prompt.into(),
            max_tokens,
            temperature: Some(DEFAULT_TEMPERATURE),
            content_column: content_column.into(),
            missing_cell: MissingCellPolicy::default(),
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_missing_cell(mut self, policy: MissingCellPolicy) -> Self {
        self.missing_cell = policy;
        self
    }

    /// Checks required fields and numeric ranges
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(BatchError::parameter("model", "field is required"));
        }
        if self.content_column.is_empty() {
            return Err(BatchError::parameter("content_column", "field is required"));
        }
        if self.max_tokens == 0 {
            return Err(BatchError::parameter(
                "max_tokens",
                "must be a positive integer",
            ));
        }
        if let Some(t) = self.temperature {
            if !t.is_finite() {
                return Err(BatchError::parameter("temperature", "must be a finite number"));
            }
        }
        Ok(())
    }
}

/// Parses a token limit supplied as text
///
/// # Errors
///
/// Returns a parameter error for non-numeric or non-positive values.
pub fn parse_max_tokens(raw: &str) -> Result<u32> {
    let value: u32 = raw.trim().parse().map_err(|_| {
        BatchError::parameter(
            "max_tokens",
            format!("expected a positive integer, got '{raw}'"),
        )
    })?;
    if value == 0 {
        return Err(BatchError::parameter(
            "max_tokens",
            "must be a positive integer",
        ));
    }
    Ok(value)
}

/// Parses a temperature supplied as text
pub fn parse_temperature(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| {
            BatchError::parameter("temperature", format!("expected a number, got '{raw}'"))
        })
}

/// Builds one request record per table row
pub fn build_records(
    table: &Table,
    column: usize,
    options: &FormatOptions,
) -> Vec<BatchRequestRecord> {
    table
        .column(column)
        .enumerate()
        .map(|(i, cell)| {
            let content = cell.unwrap_or_else(|| options.missing_cell.render());
            BatchRequestRecord::chat(
                CustomId::for_row(i),
                &options.model,
                &options.system_prompt,
                content,
                options.max_tokens,
                options.temperature,
            )
        })
        .collect()
}

/// Converts an uploaded CSV into a batch-request JSONL artifact
///
/// # Errors
///
/// - Validation error when the upload is empty
/// - Parameter error when options are invalid
/// - Column-not-found error when the content column is absent
/// - CSV error when the upload cannot be parsed
///
/// # Examples
///
/// ```
/// use batchkit::core::format::{format, FormatOptions};
/// use batchkit::domain::Upload;
///
/// let csv = b"text\nhello\nworld\n";
/// let options = FormatOptions::new("gpt-4", "translate", 50, "text");
/// let artifact = format(&Upload::new("input.csv", csv), &options).unwrap();
///
/// let text = String::from_utf8(artifact.bytes).unwrap();
/// assert_eq!(text.lines().count(), 2);
/// assert_eq!(artifact.filename, "output.jsonl");
/// ```
pub fn format(upload: &Upload<'_>, options: &FormatOptions) -> Result<Artifact> {
    let started = Instant::now();
    let bytes = upload.require_present()?;
    options.validate()?;
    crate::log_transform_start!("format", bytes.len());

    let table = Table::from_csv(bytes)?;
    let column = table.column_index(&options.content_column)?;
    tracing::debug!(
        rows = table.len(),
        column = %options.content_column,
        model = %options.model,
        "Parsed input table"
    );

    let records = build_records(&table, column, options);

    let mut output = Vec::with_capacity(bytes.len() * 2);
    for record in &records {
        serde_json::to_writer(&mut output, record)?;
        output.push(b'\n');
    }

    crate::log_transform_complete!("format", records.len(), output.len(), started.elapsed());
    Ok(Artifact::new(OUTPUT_FILENAME, OUTPUT_MEDIA_TYPE, output))
}
