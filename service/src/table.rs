//! Tab-separated tables
//!
//! Every file the report pipeline reads or writes is a header line followed by
//! rows of text cells. Rows are padded to the header width on read so column
//! positions stay aligned.

use linkml_core::error::{LinkMLError, Result};
use std::io;
use std::path::Path;
use tracing::warn;

/// A header line plus rows of cells, all held as text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names
    pub header: Vec<String>,
    /// Data rows, each as wide as the header
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given header
    #[must_use]
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Number of columns
    #[must_use]
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Append a row, padding or truncating it to the header width
    pub fn push_row(&mut self, mut row: Vec<String>) {
        if row.len() > self.header.len() {
            warn!(
                cells = row.len(),
                columns = self.header.len(),
                "row wider than header, extra cells dropped"
            );
        }
        row.resize(self.header.len(), String::new());
        self.rows.push(row);
    }

    /// Read a tab-separated file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not valid TSV.
    pub fn read_tsv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            LinkMLError::io_error(format!("Failed to open {}: {e}", path.display()))
        })?;
        Self::from_tsv_reader(file)
            .map_err(|e| LinkMLError::parse_at(e.to_string(), path.display().to_string()))
    }

    /// Read tab-separated text from any reader
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid TSV.
    pub fn from_tsv_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = reader.records();
        let Some(first) = records.next() else {
            return Ok(Self::default());
        };
        let header_record = first.map_err(|e| LinkMLError::parse(format!("Invalid TSV header: {e}")))?;
        let mut table = Self::new(header_record.iter().map(str::to_string).collect());

        for record in records {
            let record = record.map_err(|e| LinkMLError::parse(format!("Invalid TSV row: {e}")))?;
            table.push_row(record.iter().map(str::to_string).collect());
        }
        Ok(table)
    }

    /// Write the table as a tab-separated file, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_tsv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| {
            LinkMLError::io_error(format!("Failed to create {}: {e}", path.display()))
        })?;
        self.to_tsv_writer(file)
            .map_err(|e| LinkMLError::io_error(format!("Failed to write {}: {e}", path.display())))
    }

    /// Write tab-separated text to any writer
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn to_tsv_writer<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_writer(writer);

        writer
            .write_record(&self.header)
            .map_err(|e| LinkMLError::io_error(e.to_string()))?;
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|e| LinkMLError::io_error(e.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }
}
