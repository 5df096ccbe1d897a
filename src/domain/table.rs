//! Tabular input model
//!
//! A [`Table`] is the parsed form of an uploaded CSV: an ordered header and
//! ordered rows. Cells are kept as their original text; numeric cells therefore
//! keep the decimal form they were written with.

use super::errors::BatchError;
use super::result::Result;
use csv::{ReaderBuilder, StringRecord};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Cell texts treated as missing values, matching the usual spreadsheet and
/// dataframe NA markers.
const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parsed CSV table
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Parses CSV bytes with a header row.
    ///
    /// A leading UTF-8 byte-order mark is ignored. Rows shorter than the header
    /// are accepted; their trailing cells read as missing.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Csv`] when the bytes are not valid UTF-8 CSV.
    pub fn from_csv(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record
                .map_err(|e| BatchError::Csv(format!("failed to read CSV row #{}: {e}", i + 1)))?;
            rows.push(record);
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows (header excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolves a column name to its position
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::ColumnNotFound`] listing the available columns.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| BatchError::ColumnNotFound {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    /// Iterates one column top to bottom; `None` marks a missing cell
    pub fn column(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).filter(|cell| !is_na(cell)))
    }
}

fn is_na(cell: &str) -> bool {
    NA_MARKERS.contains(&cell)
}
