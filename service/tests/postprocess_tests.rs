//! Post-processing of exporter output files

use linkml2sheets::report::clean_populated;
use linkml2sheets::table::Table;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const RAW: &str = "slot\tclass\tX\trange\tunits\n\
                   >slot\tclass\tX\trange\tannotations\n\
                   id\t\t\tstring\t\n\
                   age\tPerson\t\tinteger\tyears\n\
                   name\t\t\t\t\n";

/// Column X is empty in every data row and disappears; the rest keep order and values
#[test]
fn test_empty_column_dropped() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("usage_template_populated_raw.tsv");
    let cleaned = dir.path().join("usage_template_populated_no_blank_cols.tsv");
    std::fs::write(&raw, RAW).unwrap();

    let summary = clean_populated(&raw, &cleaned).unwrap();
    assert_eq!(summary.dropped_columns, vec!["X"]);
    assert_eq!(summary.kept_columns, vec!["slot", "class", "range", "units"]);
    assert_eq!(summary.rows, 3);

    let table = Table::read_tsv(&cleaned).unwrap();
    assert_eq!(table.header, vec!["slot", "class", "range", "units"]);
    assert_eq!(
        table.rows,
        vec![
            vec!["id", "", "string", ""],
            vec!["age", "Person", "integer", "years"],
            vec!["name", "", "", ""],
        ]
    );
}

/// Only the meta row is dropped, even when it looks like data
#[test]
fn test_only_first_row_dropped() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("raw.tsv");
    let cleaned = dir.path().join("clean.tsv");
    std::fs::write(&raw, "slot\trange\nid\tstring\nname\tstring\n").unwrap();

    let summary = clean_populated(&raw, &cleaned).unwrap();
    assert_eq!(summary.rows, 1);
    let table = Table::read_tsv(&cleaned).unwrap();
    assert_eq!(table.rows, vec![vec!["name", "string"]]);
}

/// Values that look numeric are copied as written
#[test]
fn test_values_verbatim() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("raw.tsv");
    let cleaned = dir.path().join("clean.tsv");
    std::fs::write(&raw, "slot\trank\n>slot\trank\nid\t007\nage\t1.50\n").unwrap();

    clean_populated(&raw, &cleaned).unwrap();
    assert_eq!(
        std::fs::read_to_string(&cleaned).unwrap(),
        "slot\trank\nid\t007\nage\t1.50\n"
    );
}

/// A missing raw file is an error
#[test]
fn test_missing_raw_file() {
    let dir = TempDir::new().unwrap();
    assert!(clean_populated(dir.path().join("absent.tsv"), dir.path().join("out.tsv")).is_err());
}
