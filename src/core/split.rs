//! JSONL sharding
//!
//! A JSONL file of `L` lines is cut into `N` contiguous ranges of
//! `ceil(L / N)` lines each (the last range may be shorter). Non-blank ranges
//! are written as `part_<k>.jsonl` entries of a deflate-compressed zip archive,
//! where `k` is the 1-based position among the requested ranges.

use crate::domain::{Artifact, BatchError, Result, Upload};
use std::io::{Cursor, Write};
use std::ops::Range;
use std::time::Instant;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Suggested filename of the splitter artifact
pub const OUTPUT_FILENAME: &str = "split_files.zip";

/// Media type of the splitter artifact
pub const OUTPUT_MEDIA_TYPE: &str = "application/zip";

/// Shard count used when the caller doesn't supply one
pub const DEFAULT_SPLIT_NUMBER: usize = 2;

/// Parameters of one split call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOptions {
    /// Number of requested shards
    pub split_number: usize,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            split_number: DEFAULT_SPLIT_NUMBER,
        }
    }
}

impl SplitOptions {
    pub fn new(split_number: usize) -> Self {
        Self { split_number }
    }

    pub fn validate(&self) -> Result<()> {
        if self.split_number == 0 {
            return Err(BatchError::parameter(
                "split_number",
                "must be a positive integer",
            ));
        }
        Ok(())
    }
}

/// Parses a shard count supplied as text
pub fn parse_split_number(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(BatchError::parameter(
            "split_number",
            format!("expected a positive integer, got '{raw}'"),
        )),
    }
}

/// A contiguous slice of the input lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard {
    /// 1-based numeral among requested shards
    pub number: usize,

    /// Line range, end-exclusive
    pub lines: Range<usize>,
}

impl Shard {
    /// Archive entry name
    pub fn entry_name(&self) -> String {
        format!("part_{}.jsonl", self.number)
    }
}

/// Computes the line ranges for `total_lines` lines split `split_number` ways.
///
/// Ranges that would start past the end are not produced, so small inputs
/// yield fewer than `split_number` shards.
pub fn plan_shards(total_lines: usize, split_number: usize) -> Vec<Shard> {
    if total_lines == 0 || split_number == 0 {
        return Vec::new();
    }
    let lines_per_file = total_lines.div_ceil(split_number);

    (0..split_number)
        .map(|i| i * lines_per_file..((i + 1) * lines_per_file).min(total_lines))
        .take_while(|range| range.start < total_lines)
        .enumerate()
        .map(|(i, lines)| Shard { number: i + 1, lines })
        .collect()
}

/// Splits an uploaded JSONL file into a zip archive of shards
///
/// # Errors
///
/// - Validation error when the filename doesn't end in `.jsonl` or the file
///   has no lines
/// - Parameter error when `split_number` is zero
/// - Archive error when the zip cannot be written
///
/// # Examples
///
/// ```
/// use batchkit::core::split::{split, SplitOptions};
/// use batchkit::domain::Upload;
///
/// let jsonl = b"{\"a\":1}\n{\"a\":2}\n{\"a\":3}\n";
/// let artifact = split(&Upload::new("batch.jsonl", jsonl), &SplitOptions::new(2)).unwrap();
/// assert_eq!(artifact.filename, "split_files.zip");
/// ```
pub fn split(upload: &Upload<'_>, options: &SplitOptions) -> Result<Artifact> {
    let started = Instant::now();
    upload.require_extension(".jsonl", "JSONL")?;
    options.validate()?;
    crate::log_transform_start!("split", upload.bytes().len());

    let text = upload.text()?;
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return Err(BatchError::Validation("The file is empty".to_string()));
    }

    let shards = plan_shards(lines.len(), options.split_number);
    tracing::debug!(
        total_lines = lines.len(),
        split_number = options.split_number,
        planned = shards.len(),
        "Planned shards"
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let entry_options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut written = 0;
    for shard in &shards {
        let content = lines[shard.lines.clone()].join("\n");
        if content.trim().is_empty() {
            tracing::debug!(shard = shard.number, "Skipping blank shard");
            continue;
        }
        zip.start_file(shard.entry_name(), entry_options)?;
        zip.write_all(content.as_bytes())?;
        written += 1;
    }

    let bytes = zip.finish()?.into_inner();

    crate::log_transform_complete!("split", written, bytes.len(), started.elapsed());
    Ok(Artifact::new(OUTPUT_FILENAME, OUTPUT_MEDIA_TYPE, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use test_case::test_case;
    use zip::ZipArchive;

    fn entries(artifact: &Artifact) -> Vec<(String, String)> {
        let mut archive = ZipArchive::new(Cursor::new(artifact.bytes.clone())).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut content = String::new();
                file.read_to_string(&mut content).unwrap();
                (file.name().to_string(), content)
            })
            .collect()
    }

    fn jsonl(n: usize) -> String {
        (1..=n)
            .map(|i| format!("{{\"n\":{i}}}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test_case(5, 2, &[0..3, 3..5] ; "five lines two ways")]
    #[test_case(6, 3, &[0..2, 2..4, 4..6] ; "even split")]
    #[test_case(2, 5, &[0..1, 1..2] ; "more shards than lines")]
    #[test_case(7, 1, &[0..7] ; "single shard")]
    #[test_case(10, 4, &[0..3, 3..6, 6..9, 9..10] ; "short last shard")]
    fn test_plan_shards(total: usize, n: usize, expected: &[Range<usize>]) {
        let ranges: Vec<_> = plan_shards(total, n).into_iter().map(|s| s.lines).collect();
        assert_eq!(ranges, expected);
    }

    #[test]
    fn test_plan_shards_stops_at_end() {
        // ceil(4 / 3) = 2, so the third range would start at line 4
        let shards = plan_shards(4, 3);
        assert_eq!(shards.len(), 2);
        assert_eq!(shards[1].number, 2);
    }

    #[test]
    fn test_split_five_lines_two_ways() {
        let input = jsonl(5);
        let artifact = split(
            &Upload::new("batch.jsonl", input.as_bytes()),
            &SplitOptions::default(),
        )
        .unwrap();

        let files = entries(&artifact);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].0, "part_1.jsonl");
        assert_eq!(files[0].1.lines().count(), 3);
        assert_eq!(files[1].0, "part_2.jsonl");
        assert_eq!(files[1].1.lines().count(), 2);
        assert_eq!(artifact.media_type, "application/zip");
    }

    #[test]
    fn test_shards_reconstruct_input() {
        let input = jsonl(17);
        let artifact = split(
            &Upload::new("batch.jsonl", input.as_bytes()),
            &SplitOptions::new(4),
        )
        .unwrap();

        let joined = entries(&artifact)
            .into_iter()
            .map(|(_, content)| content)
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(joined, input);
    }

    #[test]
    fn test_blank_shard_keeps_numbering_gap() {
        let input = "{\"a\":1}\n{\"a\":2}\n\n   \n{\"a\":5}\n{\"a\":6}";
        let artifact = split(
            &Upload::new("batch.jsonl", input.as_bytes()),
            &SplitOptions::new(3),
        )
        .unwrap();

        let names: Vec<_> = entries(&artifact).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["part_1.jsonl", "part_3.jsonl"]);
    }

    #[test]
    fn test_shard_contents_are_deterministic() {
        let input = jsonl(9);
        let upload = Upload::new("batch.jsonl", input.as_bytes());
        let first = entries(&split(&upload, &SplitOptions::new(2)).unwrap());
        let second = entries(&split(&upload, &SplitOptions::new(2)).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_wrong_extension_rejected() {
        let err = split(&Upload::new("batch.json", b"{}"), &SplitOptions::default()).unwrap_err();
        assert!(matches!(err, BatchError::Validation(_)));
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = split(&Upload::new("batch.jsonl", b""), &SplitOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: The file is empty");
    }

    #[test]
    fn test_zero_split_number_rejected() {
        let err = split(&Upload::new("batch.jsonl", b"{}"), &SplitOptions::new(0)).unwrap_err();
        assert!(matches!(err, BatchError::Parameter { .. }));
    }

    #[test]
    fn test_parse_split_number() {
        assert_eq!(parse_split_number("3").unwrap(), 3);
        assert!(parse_split_number("0").is_err());
        assert!(parse_split_number("two").is_err());
    }
}
