//! Template writer tests
//!
//! A written template must read back with the same columns in the same order,
//! and must parse as a SchemaSheets specification.

use linkml2sheets::report::{TemplateHeader, write_template};
use linkml2sheets::schema_view::ElementType;
use linkml2sheets::schemasheets::{ColumnRole, TableSpec};
use linkml2sheets::table::Table;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// Header line round-trips and only the descriptor row follows it
#[test]
fn test_roundtrip_without_tags() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usage_template.tsv");
    let columns = strings(&["slot", "class", "description", "range"]);

    let header = TemplateHeader::synthesize(&columns, &[]).unwrap();
    write_template(&path, &header).unwrap();

    let table = Table::read_tsv(&path).unwrap();
    assert_eq!(table.header, columns);
    assert_eq!(table.rows, vec![strings(&[">slot", "class", "description", "range"])]);

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "slot\tclass\tdescription\trange\n>slot\tclass\tdescription\trange\n");
}

/// Tag columns are appended and carry their inner_key settings
#[test]
fn test_roundtrip_with_tags() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usage_template.tsv");
    let columns = strings(&["slot", "class", "range"]);
    let tags = strings(&["units", "owner"]);

    let header = TemplateHeader::synthesize(&columns, &tags).unwrap();
    write_template(&path, &header).unwrap();

    let table = Table::read_tsv(&path).unwrap();
    assert_eq!(table.header, strings(&["slot", "class", "range", "units", "owner"]));
    assert_eq!(table.rows.len(), 2);
    assert_eq!(
        table.rows[1],
        strings(&[">", "", "", "inner_key: units", "inner_key: owner"])
    );

    let spec = TableSpec::from_tsv(&path).unwrap();
    assert_eq!(spec.primary_type().unwrap(), ElementType::Slot);
    assert_eq!(spec.columns[1].role(), ColumnRole::Element(ElementType::Class));
    assert_eq!(spec.columns[3].role(), ColumnRole::Metaslot("annotations"));
    assert_eq!(spec.columns[3].settings.inner_key.as_deref(), Some("units"));
    assert_eq!(spec.columns[4].settings.inner_key.as_deref(), Some("owner"));
    assert_eq!(spec.columns[2].settings.inner_key, None);
}

/// Duplicate column names survive the round trip positionally
#[test]
fn test_roundtrip_keeps_duplicates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dupes.tsv");
    let columns = strings(&["slot", "range", "range"]);

    write_template(&path, &TemplateHeader::synthesize(&columns, &[]).unwrap()).unwrap();
    let table = Table::read_tsv(&path).unwrap();
    assert_eq!(table.header, columns);
    assert_eq!(table.rows[0], strings(&[">slot", "range", "range"]));
}

/// Writing over an existing file replaces it
#[test]
fn test_template_overwritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usage_template.tsv");
    std::fs::write(&path, "stale\tcontent\nmore\trows\nand\tmore\n").unwrap();

    write_template(&path, &TemplateHeader::synthesize(&strings(&["slot"]), &[]).unwrap()).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "slot\n>slot\n");
}
