//! Tab-separated table reader shared by every feed.
//!
//! The spreadsheet export writes raw cell text with no quoting, and product
//! cells may themselves contain `"` characters, so the reader runs with
//! quoting disabled. Rows may be shorter or longer than the header.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{PackdeskError, Result};

// ---------------------------------------------------------------------------
// TsvTable
// ---------------------------------------------------------------------------

/// A header row plus the data records of a TSV document.
#[derive(Debug)]
pub struct TsvTable {
    header: Vec<String>,
    records: Vec<StringRecord>,
}

impl TsvTable {
    /// Read `text` into a header and data records.
    ///
    /// Returns `Ok(None)` when the document has no data row beyond the
    /// header. Header cells are trimmed; data cells are kept as written.
    pub fn parse(text: &str) -> Result<Option<Self>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .has_headers(true)
            .trim(Trim::Headers)
            .from_reader(text.trim().as_bytes());

        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let records = reader
            .records()
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

        if records.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self { header, records }))
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Index of the column named exactly `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Indices of all `names`, in the same order, or an error naming every
    /// column that is absent.
    pub fn require(&self, names: &[&str]) -> Result<Vec<usize>> {
        let found: Vec<Option<usize>> = names.iter().map(|n| self.column(n)).collect();
        let missing: Vec<&str> = names
            .iter()
            .zip(&found)
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(PackdeskError::MissingColumns(missing.join(", ")));
        }
        Ok(found.into_iter().flatten().collect())
    }

    /// Data records, top to bottom. Cells are not trimmed.
    pub fn rows(&self) -> impl Iterator<Item = &StringRecord> + '_ {
        self.records.iter()
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }
}
