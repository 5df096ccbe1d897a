//! CLI command implementations
//!
//! The transform commands share the same shape: read the input file, build
//! options from flags and config, run the transform, write the artifact into
//! the output directory under its suggested filename.

pub mod extract;
pub mod format;
pub mod init;
pub mod split;
pub mod validate;

use super::{EXIT_FATAL, EXIT_INVALID_INPUT};
use crate::domain::{Artifact, BatchError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads an input file, returning its file name and contents
pub(crate) async fn read_input(path: &Path) -> Result<(String, Vec<u8>)> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            BatchError::Validation(format!("Input file not found: {}", path.display()))
        }
        _ => BatchError::Io(format!("Failed to read {}: {e}", path.display())),
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read input file");
    Ok((name, bytes))
}

/// Writes an artifact into `output_dir` under its suggested filename
pub(crate) async fn write_artifact(artifact: &Artifact, output_dir: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
        BatchError::Io(format!(
            "Failed to create output directory {}: {e}",
            output_dir.display()
        ))
    })?;

    let path = output_dir.join(artifact.filename);
    tokio::fs::write(&path, &artifact.bytes)
        .await
        .map_err(|e| BatchError::Io(format!("Failed to write {}: {e}", path.display())))?;

    tracing::info!(
        path = %path.display(),
        bytes = artifact.len(),
        media_type = artifact.media_type,
        "Artifact written"
    );
    Ok(path)
}

/// Reports a failed command and returns its exit code
pub(crate) fn report_failure(error: &BatchError) -> i32 {
    tracing::error!(error = %error, client_error = error.is_client_error(), "Command failed");
    eprintln!("❌ {error}");
    exit_code(error)
}

/// Maps an error to the process exit code
pub fn exit_code(error: &BatchError) -> i32 {
    if error.is_client_error() {
        EXIT_INVALID_INPUT
    } else {
        EXIT_FATAL
    }
}
