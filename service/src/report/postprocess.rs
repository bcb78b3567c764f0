//! Cleaning of the exporter's raw output

use linkml_core::error::Result;
use std::path::Path;
use tracing::{debug, info};

use crate::table::Table;

/// What the cleaning pass removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanSummary {
    /// Data rows kept
    pub rows: usize,
    /// Columns kept, in order
    pub kept_columns: Vec<String>,
    /// Columns dropped because every kept row was empty there
    pub dropped_columns: Vec<String>,
}

/// Drop the first data row, then every column that is empty in all remaining rows.
///
/// A cell is empty only if it is the empty string. Surviving columns keep
/// their order and their values are untouched.
#[must_use]
pub fn clean_table(raw: &Table) -> (Table, CleanSummary) {
    let rows = raw.rows.get(1..).unwrap_or_default();

    let (keep, drop): (Vec<usize>, Vec<usize>) = (0..raw.width())
        .partition(|&index| rows.iter().any(|row| row.get(index).is_some_and(|cell| !cell.is_empty())));

    let mut cleaned = Table::new(keep.iter().map(|&index| raw.header[index].clone()).collect());
    for row in rows {
        cleaned.push_row(
            keep.iter()
                .map(|&index| row.get(index).cloned().unwrap_or_default())
                .collect(),
        );
    }

    let summary = CleanSummary {
        rows: cleaned.rows.len(),
        kept_columns: cleaned.header.clone(),
        dropped_columns: drop.iter().map(|&index| raw.header[index].clone()).collect(),
    };
    (cleaned, summary)
}

/// Clean the raw export at `raw` and write the result to `cleaned`.
///
/// # Errors
///
/// Returns an error if either file cannot be read or written.
pub fn clean_populated(raw: impl AsRef<Path>, cleaned: impl AsRef<Path>) -> Result<CleanSummary> {
    let cleaned = cleaned.as_ref();
    let (table, summary) = clean_table(&Table::read_tsv(raw)?);
    table.write_tsv(cleaned)?;

    debug!(dropped = ?summary.dropped_columns, "dropped empty columns");
    info!(
        path = %cleaned.display(),
        rows = summary.rows,
        columns = summary.kept_columns.len(),
        "wrote cleaned report"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_meta_row_and_empty_columns_dropped() {
        let raw = Table::from_tsv_reader(
            "slot\tclass\trange\tunits\n>slot\tclass\trange\tannotations\nid\t\tstring\t\nage\tPerson\t\t\n"
                .as_bytes(),
        )
        .unwrap();
        let (cleaned, summary) = clean_table(&raw);

        assert_eq!(cleaned.header, vec!["slot", "class", "range"]);
        assert_eq!(cleaned.rows, vec![vec!["id", "", "string"], vec!["age", "Person", ""]]);
        assert_eq!(summary.dropped_columns, vec!["units"]);
        assert_eq!(summary.rows, 2);
    }

    #[test]
    fn test_only_meta_row_drops_everything() {
        let raw = Table::from_tsv_reader("slot\trange\n>slot\trange\n".as_bytes()).unwrap();
        let (cleaned, summary) = clean_table(&raw);
        assert!(cleaned.header.is_empty());
        assert!(cleaned.rows.is_empty());
        assert_eq!(summary.dropped_columns, vec!["slot", "range"]);
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        let raw = Table::from_tsv_reader("a\tb\nmeta\tmeta\nx\t \n".as_bytes()).unwrap();
        let (cleaned, _) = clean_table(&raw);
        assert_eq!(cleaned.header, vec!["a", "b"]);
        assert_eq!(cleaned.rows[0], vec!["x", " "]);
    }
}
