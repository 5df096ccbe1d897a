// Batchkit - Chat-completion batch file toolkit
// Copyright (c) 2025 Batchkit Contributors
// Licensed under the MIT License

//! # Batchkit - Chat-completion batch file toolkit
//!
//! Batchkit converts tabular data into chat-completion batch request files and
//! turns batch results back into tables.
//!
//! ## Overview
//!
//! This library provides three stateless transforms:
//! - **Formatting** CSV rows into batch-request JSONL, one request per row
//! - **Splitting** a JSONL file into contiguous shards packed in a zip archive
//! - **Extracting** assistant replies from batch-response JSONL into a CSV
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - The format, split and extract transforms
//! - [`domain`] - Core domain types, records and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use batchkit::core::format::{format, FormatOptions};
//! use batchkit::domain::Upload;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let csv = b"text\nBonjour\nHola\n";
//! let options = FormatOptions::new("gpt-4o-mini", "Translate to English", 200, "text");
//!
//! let artifact = format(&Upload::new("rows.csv", csv), &options)?;
//! assert_eq!(artifact.filename, "output.jsonl");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every transform returns [`domain::BatchError`]. Client errors (bad uploads,
//! bad parameters, a missing column) are distinguished from internal failures
//! with [`domain::BatchError::is_client_error`]:
//!
//! ```rust
//! use batchkit::core::split::{split, SplitOptions};
//! use batchkit::domain::Upload;
//!
//! let err = split(&Upload::new("batch.txt", b"{}"), &SplitOptions::default()).unwrap_err();
//! assert!(err.is_client_error());
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
