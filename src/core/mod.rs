//! Core transforms for batchkit.
//!
//! Each transform is a pure, synchronous function from an [`Upload`] plus
//! options to an [`Artifact`]. Nothing is cached or shared between calls.
//!
//! # Modules
//!
//! - [`format`] - CSV rows to chat-completion batch-request JSONL
//! - [`split`] - JSONL file to a zip archive of contiguous shards
//! - [`extract`] - Batch-response JSONL to a deduplicated CSV
//!
//! # Example
//!
//! ```rust
//! use batchkit::core::{extract, format, split};
//! use batchkit::domain::Upload;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = format::FormatOptions::new("gpt-4o-mini", "Summarize", 256, "text");
//! let requests = format::format(&Upload::new("rows.csv", b"text\nhello\n"), &options)?;
//!
//! let shards = split::split(
//!     &Upload::new("output.jsonl", &requests.bytes),
//!     &split::SplitOptions::new(4),
//! )?;
//! println!("{} -> {} bytes", shards.filename, shards.len());
//!
//! let responses = br#"{"custom_id":"request-1","response":{"body":{"choices":[{"message":{"content":"hi"}}]}}}"#;
//! let table = extract::extract(
//!     &Upload::new("results.jsonl", responses),
//!     &extract::ExtractOptions::default(),
//! )?;
//! assert_eq!(table.media_type, "text/csv");
//! # Ok(())
//! # }
//! ```
//!
//! [`Upload`]: crate::domain::Upload
//! [`Artifact`]: crate::domain::Artifact

pub mod extract;
pub mod format;
pub mod split;

pub use extract::{extract, DuplicatePolicy, ExtractOptions, RowOrder};
pub use format::{format, FormatOptions, MissingCellPolicy};
pub use split::{split, SplitOptions};
