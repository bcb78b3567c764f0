//! Workbook generation tests
//!
//! Renders small schemas to `.xlsx` files and reads them back through the
//! workbook loader.

use linkml2sheets::generator::{ExcelFeatures, ExcelGenerator, GeneratorError};
use linkml2sheets::loader::{read_sheet_columns, sheet_names};
use linkml2sheets::schema_view::SchemaView;
use linkml_core::error::LinkMLError;
use linkml_core::types::SchemaDefinition;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const SCHEMA: &str = r"
id: https://example.org/people
name: people
classes:
  Base:
    abstract: true
    slots: [id, name]
  Named:
    mixin: true
    slots: [alias]
  Person:
    is_a: Base
    mixins: [Named]
    slots: [status]
    attributes:
      age:
        range: integer
        description: Age in years
    slot_usage:
      name:
        required: true
  Empty:
slots:
  id:
    identifier: true
  name:
    description: Display name
  alias:
  status:
    range: Status
enums:
  Status:
    permissible_values:
      ACTIVE:
      RETIRED:
";

fn view(yaml: &str) -> SchemaView {
    let schema: SchemaDefinition = serde_yaml::from_str(yaml).expect("valid schema");
    SchemaView::new(schema)
}

/// Only concrete classes get a sheet, and headers follow the induced slot order
#[test]
fn test_concrete_classes_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("meta.xlsx");

    let sheets = ExcelGenerator::new().generate_file(&view(SCHEMA), &path).unwrap();
    assert_eq!(sheets, vec!["Person", "Empty"]);
    assert_eq!(sheet_names(&path).unwrap(), vec!["Person", "Empty"]);

    assert_eq!(
        read_sheet_columns(&path, "Person").unwrap(),
        vec!["status", "age", "id", "name", "alias"]
    );
    assert!(read_sheet_columns(&path, "Empty").unwrap().is_empty());
}

/// Generation works with every optional feature turned off
#[test]
fn test_without_features() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.xlsx");

    let generator = ExcelGenerator::with_features(ExcelFeatures::NONE);
    assert!(!generator.add_validation());
    generator.generate_file(&view(SCHEMA), &path).unwrap();
    assert_eq!(read_sheet_columns(&path, "Person").unwrap().len(), 5);
}

/// An existing file at the output path is replaced
#[test]
fn test_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("meta.xlsx");
    std::fs::write(&path, b"not a workbook").unwrap();

    ExcelGenerator::new().generate_file(&view(SCHEMA), &path).unwrap();
    assert_eq!(sheet_names(&path).unwrap().len(), 2);
}

/// A schema with nothing but abstract classes and mixins cannot be rendered
#[test]
fn test_no_concrete_class() {
    let dir = TempDir::new().unwrap();
    let view = view("id: x\nname: s\nclasses:\n  A:\n    abstract: true\n  B:\n    mixin: true\n");

    let err = ExcelGenerator::new()
        .generate_file(&view, dir.path().join("out.xlsx"))
        .unwrap_err();
    assert!(matches!(err, GeneratorError::Validation(_)));
    assert!(!dir.path().join("out.xlsx").exists());
}

/// Names that collide once sanitized keep only the first class's sheet
#[test]
fn test_colliding_sheet_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.xlsx");
    let view = view(
        "id: x\nname: s\nclasses:\n  a/b:\n    attributes:\n      first:\n  AB:\n    attributes:\n      second:\n  '[]':\n",
    );

    let sheets = ExcelGenerator::new().generate_file(&view, &path).unwrap();
    assert_eq!(sheets, vec!["ab"]);
    assert_eq!(read_sheet_columns(&path, "ab").unwrap(), vec!["first"]);
}

/// Enums too long for an inline list still render, without the dropdown
#[test]
fn test_long_enum() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.xlsx");
    let values: String = (0..60)
        .map(|i| format!("      VALUE_NUMBER_{i}:\n"))
        .collect();
    let yaml = format!(
        "id: x\nname: s\nclasses:\n  Sample:\n    attributes:\n      code:\n        range: Codes\nenums:\n  Codes:\n    permissible_values:\n{values}"
    );

    ExcelGenerator::new().generate_file(&view(&yaml), &path).unwrap();
    assert_eq!(read_sheet_columns(&path, "Sample").unwrap(), vec!["code"]);
}

/// Asking for a sheet the workbook lacks names the sheets it has
#[test]
fn test_unknown_sheet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("meta.xlsx");
    ExcelGenerator::new().generate_file(&view(SCHEMA), &path).unwrap();

    match read_sheet_columns(&path, "slot_definition").unwrap_err() {
        LinkMLError::ConfigError(message) => {
            assert!(message.contains("slot_definition"));
            assert!(message.contains("Person, Empty"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
