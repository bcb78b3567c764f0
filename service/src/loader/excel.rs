//! Excel sheet reader
//!
//! Reads back the header row of a rendered workbook so the report can use a
//! metamodel class's slots as its base columns.

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use linkml_core::error::{LinkMLError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

fn open(path: &Path) -> Result<Xlsx<BufReader<File>>> {
    open_workbook::<Xlsx<_>, _>(path).map_err(|e| {
        LinkMLError::parse_at(format!("Failed to open workbook: {e}"), path.display().to_string())
    })
}

/// Names of every worksheet in the workbook, in order.
///
/// # Errors
///
/// Returns an error if the file is not a readable `.xlsx` workbook.
pub fn sheet_names(path: impl AsRef<Path>) -> Result<Vec<String>> {
    Ok(open(path.as_ref())?.sheet_names())
}

/// Read the header row of `sheet`, skipping blank cells.
///
/// # Errors
///
/// Returns a `ConfigError` listing the available sheets if `sheet` is not in
/// the workbook, or a parse error if the workbook cannot be read.
pub fn read_sheet_columns(path: impl AsRef<Path>, sheet: &str) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut workbook = open(path)?;

    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(LinkMLError::config(format!(
            "sheet '{sheet}' not found in {}; available sheets: {}",
            path.display(),
            available.join(", ")
        )));
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| LinkMLError::parse(format!("Failed to read sheet '{sheet}': {e}")))?;

    let columns = header_row(&range);
    debug!(sheet, columns = columns.len(), "read sheet header");
    Ok(columns)
}

fn header_row(range: &Range<Data>) -> Vec<String> {
    range
        .rows()
        .next()
        .map(|row| {
            row.iter()
                .map(data_to_string)
                .filter(|header| !header.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn data_to_string(data: &Data) -> String {
    match data {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_to_string() {
        assert_eq!(data_to_string(&Data::String("  range ".to_string())), "range");
        assert_eq!(data_to_string(&Data::Int(3)), "3");
        assert_eq!(data_to_string(&Data::Bool(true)), "true");
        assert_eq!(data_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_missing_workbook_is_parse_error() {
        let err = read_sheet_columns("definitely/not/here.xlsx", "slot_definition").unwrap_err();
        assert!(matches!(err, LinkMLError::ParseError { .. }));
    }
}
