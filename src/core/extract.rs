//! Batch-response JSONL to CSV
//!
//! Each response line is parsed on its own; lines that aren't JSON objects or
//! carry no usable `custom_id` are dropped. Content is read from
//! `response.body.choices[0].message.content`, defaulting to an empty string
//! when any level is missing.
//!
//! Records sharing a `custom_id` collapse into one row according to a
//! [`DuplicatePolicy`], and rows are emitted in the configured [`RowOrder`].

use crate::domain::{Artifact, BatchError, CustomId, ExtractedRow, Result, Upload};
use csv::{Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// Suggested filename of the extractor artifact
pub const OUTPUT_FILENAME: &str = "extracted_content.csv";

/// Media type of the extractor artifact
pub const OUTPUT_MEDIA_TYPE: &str = "text/csv";

const CONTENT_POINTER: &str = "/response/body/choices/0/message/content";
const UTF8_BOM: &str = "\u{feff}";
const CSV_HEADER: [&str; 2] = ["custom_id", "content"];

/// Order of rows in the extracted CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOrder {
    /// Ascending code-point order of `custom_id`
    #[default]
    CustomId,
    /// Order in which each `custom_id` first appeared
    FirstSeen,
}

impl FromStr for RowOrder {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "custom_id" | "id" => Ok(Self::CustomId),
            "first_seen" | "input" => Ok(Self::FirstSeen),
            _ => Err(BatchError::parameter(
                "order",
                format!("expected 'custom_id' or 'first_seen', got '{s}'"),
            )),
        }
    }
}

impl fmt::Display for RowOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CustomId => write!(f, "custom_id"),
            Self::FirstSeen => write!(f, "first_seen"),
        }
    }
}

/// How records sharing a `custom_id` are merged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later non-empty content replaces earlier content; empty content never
    /// replaces anything
    #[default]
    PreferNonEmpty,
    /// The first record for an id wins
    FirstSeen,
}

impl FromStr for DuplicatePolicy {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "prefer_non_empty" | "non_empty" => Ok(Self::PreferNonEmpty),
            "first_seen" | "first" => Ok(Self::FirstSeen),
            _ => Err(BatchError::parameter(
                "duplicates",
                format!("expected 'prefer_non_empty' or 'first_seen', got '{s}'"),
            )),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreferNonEmpty => write!(f, "prefer_non_empty"),
            Self::FirstSeen => write!(f, "first_seen"),
        }
    }
}

/// Parameters of one extract call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractOptions {
    pub order: RowOrder,
    pub duplicates: DuplicatePolicy,
}

impl ExtractOptions {
    pub fn new(order: RowOrder, duplicates: DuplicatePolicy) -> Self {
        Self { order, duplicates }
    }
}

/// Parses one response line, returning `None` when the line is unusable
pub fn parse_line(line: &str) -> Option<ExtractedRow> {
    try_parse_line(line).ok()
}

fn try_parse_line(line: &str) -> std::result::Result<ExtractedRow, &'static str> {
    let line = line.trim_start_matches(UTF8_BOM);
    let record: Value = serde_json::from_str(line).map_err(|_| "invalid JSON")?;
    let object = record.as_object().ok_or("not a JSON object")?;

    let custom_id = object
        .get("custom_id")
        .and_then(Value::as_str)
        .and_then(|id| CustomId::new(id).ok())
        .ok_or("missing custom_id")?;

    let content = match record.pointer(CONTENT_POINTER) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    Ok(ExtractedRow::new(custom_id, content))
}

/// Rows after deduplication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRows {
    pub rows: Vec<ExtractedRow>,

    /// Records folded into an earlier row with the same id
    pub duplicates: usize,
}

/// Collapses records sharing a `custom_id` and orders the result
pub fn merge_rows(
    records: impl IntoIterator<Item = ExtractedRow>,
    options: &ExtractOptions,
) -> MergedRows {
    let mut index: HashMap<CustomId, usize> = HashMap::new();
    let mut rows: Vec<ExtractedRow> = Vec::new();
    let mut duplicates = 0;

    for record in records {
        match index.get(&record.custom_id) {
            Some(&i) => {
                duplicates += 1;
                if options.duplicates == DuplicatePolicy::PreferNonEmpty
                    && !record.content.is_empty()
                {
                    rows[i].content = record.content;
                }
            }
            None => {
                index.insert(record.custom_id.clone(), rows.len());
                rows.push(record);
            }
        }
    }

    if options.order == RowOrder::CustomId {
        rows.sort_by(|a, b| a.custom_id.cmp(&b.custom_id));
    }

    MergedRows { rows, duplicates }
}

/// Writes rows as BOM-prefixed CSV with a `custom_id,content` header
pub fn write_csv(rows: &[ExtractedRow]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.as_bytes().to_vec());

    writer.write_record(CSV_HEADER)?;
    for (i, row) in rows.iter().enumerate() {
        writer
            .serialize(row)
            .map_err(|e| BatchError::Csv(format!("failed to write CSV row #{}: {e}", i + 1)))?;
    }

    writer
        .into_inner()
        .map_err(|e| BatchError::Csv(format!("failed to flush CSV output: {e}")))
}

/// Extracts response content from an uploaded JSONL file into CSV
///
/// # Errors
///
/// - Validation error when the filename doesn't end in `.jsonl` or the file
///   has no lines
/// - Encoding error when the upload is not UTF-8
///
/// # Examples
///
/// ```
/// use batchkit::core::extract::{extract, ExtractOptions};
/// use batchkit::domain::Upload;
///
/// let jsonl = br#"{"custom_id":"request-1","response":{"body":{"choices":[{"message":{"content":"A"}}]}}}"#;
/// let artifact = extract(&Upload::new("out.jsonl", jsonl), &ExtractOptions::default()).unwrap();
///
/// let csv = String::from_utf8(artifact.bytes).unwrap();
/// assert_eq!(csv, "\u{feff}custom_id,content\nrequest-1,A\n");
/// ```
pub fn extract(upload: &Upload<'_>, options: &ExtractOptions) -> Result<Artifact> {
    let started = Instant::now();
    upload.require_extension(".jsonl", "JSONL")?;
    crate::log_transform_start!("extract", upload.bytes().len());

    let text = upload.text()?;
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return Err(BatchError::Validation("The file is empty".to_string()));
    }

    let mut skipped = 0;
    let records = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| match try_parse_line(line) {
            Ok(row) => Some(row),
            Err(reason) => {
                skipped += 1;
                crate::log_skipped_line!(i + 1, reason);
                None
            }
        })
        .collect::<Vec<_>>();

    let merged = merge_rows(records, options);
    if skipped > 0 {
        tracing::warn!(skipped, total_lines = lines.len(), "Dropped unparseable lines");
    }
    tracing::debug!(
        rows = merged.rows.len(),
        duplicates = merged.duplicates,
        order = %options.order,
        policy = %options.duplicates,
        "Merged response records"
    );

    let bytes = write_csv(&merged.rows)?;

    crate::log_transform_complete!("extract", merged.rows.len(), bytes.len(), started.elapsed());
    Ok(Artifact::new(OUTPUT_FILENAME, OUTPUT_MEDIA_TYPE, bytes))
}
