//! Uploaded file and produced artifact
//!
//! [`Upload`] is what the caller hands to a transform: an optional client
//! filename plus the raw bytes. [`Artifact`] is what comes back: the output
//! bytes with the filename and media type the caller should advertise.

use super::errors::BatchError;
use super::result::Result;

/// Cache directive attached to every artifact
pub const CACHE_CONTROL: &str = "no-cache, no-store, must-revalidate";

/// An uploaded file, borrowed for the lifetime of one transform call
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    filename: Option<&'a str>,
    bytes: &'a [u8],
}

impl<'a> Upload<'a> {
    /// Creates an upload with a client-supplied filename
    pub fn new(filename: &'a str, bytes: &'a [u8]) -> Self {
        Self {
            filename: Some(filename),
            bytes,
        }
    }

    /// Creates an upload without filename metadata
    pub fn anonymous(bytes: &'a [u8]) -> Self {
        Self {
            filename: None,
            bytes,
        }
    }

    pub fn filename(&self) -> Option<&'a str> {
        self.filename
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Fails with a "no file" validation error when nothing was uploaded
    pub fn require_present(&self) -> Result<&'a [u8]> {
        if self.bytes.is_empty() {
            return Err(BatchError::Validation(
                "Please select a file to upload".to_string(),
            ));
        }
        Ok(self.bytes)
    }

    /// Fails unless the filename ends with `extension` (for example `.jsonl`)
    pub fn require_extension(&self, extension: &str, label: &str) -> Result<()> {
        match self.filename {
            Some(name) if name.ends_with(extension) => Ok(()),
            _ => Err(BatchError::Validation(format!(
                "Please select a valid {label} file"
            ))),
        }
    }

    /// Decodes the upload as UTF-8 text
    pub fn text(&self) -> Result<&'a str> {
        Ok(std::str::from_utf8(self.bytes)?)
    }
}

/// Output of a transform, ready to be streamed back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Suggested download filename
    pub filename: &'static str,

    /// Suggested media type
    pub media_type: &'static str,

    /// Artifact contents
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(filename: &'static str, media_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            filename,
            media_type,
            bytes,
        }
    }

    /// Cache directive the caller attaches to the response
    pub fn cache_control(&self) -> &'static str {
        CACHE_CONTROL
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
