//! Domain models and types for batchkit.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`CustomId`])
//! - **Input and output envelopes** ([`Upload`], [`Artifact`])
//! - **Data models** ([`Table`], [`BatchRequestRecord`], [`ExtractedRow`])
//! - **Error types** ([`BatchError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, BatchError>`]:
//!
//! ```rust
//! use batchkit::domain::{Result, Table};
//!
//! fn example() -> Result<usize> {
//!     let table = Table::from_csv(b"text\nhello\n")?;
//!     Ok(table.len())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod records;
pub mod result;
pub mod table;
pub mod upload;

// Re-export commonly used types for convenience
pub use errors::BatchError;
pub use ids::CustomId;
pub use records::{BatchRequestRecord, ChatMessage, ExtractedRow, RequestBody, Role};
pub use result::Result;
pub use table::Table;
pub use upload::{Artifact, Upload, CACHE_CONTROL};
