//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output on stderr
//! - JSON-formatted logs written to a rotating local file
//! - Configurable log levels with `RUST_LOG` taking precedence
//!
//! # Example
//!
//! ```no_run
//! use batchkit::logging::init_logging;
//! use batchkit::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a transform
///
/// # Example
///
/// ```no_run
/// use batchkit::log_transform_start;
///
/// log_transform_start!("split", 2048);
/// ```
#[macro_export]
macro_rules! log_transform_start {
    ($transform:expr, $input_bytes:expr) => {
        tracing::info!(
            transform = $transform,
            input_bytes = $input_bytes,
            "Starting transform"
        );
    };
}

/// Log the completion of a transform
///
/// # Example
///
/// ```no_run
/// use batchkit::log_transform_complete;
/// use std::time::Duration;
///
/// log_transform_complete!("extract", 42, 1024, Duration::from_millis(3));
/// ```
#[macro_export]
macro_rules! log_transform_complete {
    ($transform:expr, $records:expr, $output_bytes:expr, $duration:expr) => {
        tracing::info!(
            transform = $transform,
            records = $records,
            output_bytes = $output_bytes,
            duration_ms = $duration.as_millis() as u64,
            "Transform completed"
        );
    };
}

/// Log a JSONL line dropped by a tolerant parse
///
/// # Example
///
/// ```no_run
/// use batchkit::log_skipped_line;
///
/// log_skipped_line!(7, "missing custom_id");
/// ```
#[macro_export]
macro_rules! log_skipped_line {
    ($line_number:expr, $reason:expr) => {
        tracing::debug!(line = $line_number, reason = $reason, "Skipping line");
    };
}
