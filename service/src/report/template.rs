//! Blank template writer

use linkml_core::error::Result;
use std::path::Path;
use tracing::info;

use super::header::TemplateHeader;
use crate::table::Table;

/// Write the template: the header line, then the descriptor rows, no data.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_template(path: impl AsRef<Path>, header: &TemplateHeader) -> Result<()> {
    let path = path.as_ref();
    let mut table = Table::new(header.columns.clone());
    for row in header.rows() {
        table.push_row(row);
    }
    table.write_tsv(path)?;
    info!(path = %path.display(), columns = table.width(), "wrote template");
    Ok(())
}
