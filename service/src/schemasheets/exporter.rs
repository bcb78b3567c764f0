//! Export schema elements into the rows of a SchemaSheets table

use linkml_core::{
    annotations::Annotatable,
    error::Result,
    types::{ClassDefinition, SchemaDefinition},
};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use super::types::{ColumnRole, ColumnSpec, TableSpec};
use crate::schema_view::{Element, ElementType, SchemaView};
use crate::table::Table;

/// Separator for list-valued metaslots
pub const LIST_SEPARATOR: &str = "|";

/// One row to export: an element and, for class-scoped slots, its class
#[derive(Debug, Clone, Copy)]
struct ExportRow<'a> {
    element: Element<'a>,
    parent: Option<&'a ClassDefinition>,
}

impl<'a> ExportRow<'a> {
    fn standalone(element: Element<'a>) -> Self {
        Self {
            element,
            parent: None,
        }
    }
}

/// Writes one table row per local schema element of the primary-key type
pub struct SchemaExporter<'a> {
    view: &'a SchemaView,
}

impl<'a> SchemaExporter<'a> {
    /// Create an exporter over a schema view
    #[must_use]
    pub fn new(view: &'a SchemaView) -> Self {
        Self { view }
    }

    /// Populate `spec`: header, the first descriptor row, then one row per element
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the primary-key column does not name an
    /// element type, or a serialization error if an element cannot be read.
    pub fn export(&self, spec: &TableSpec) -> Result<Table> {
        let primary = spec.primary_type()?;
        let mut table = Table::new(spec.header());
        if let Some(meta_row) = spec.meta_row() {
            table.push_row(meta_row.to_vec());
        }

        let rows = Self::rows_for(self.view.schema(), primary);
        debug!(element_type = %primary, rows = rows.len(), "exporting elements");

        for row in rows {
            let metaslots = row.element.to_value()?;
            let cells = spec
                .columns
                .iter()
                .map(|column| Self::cell(column, primary, &row, &metaslots))
                .collect();
            table.push_row(cells);
        }
        Ok(table)
    }

    /// Read the template at `template`, export, and write the result to `output`
    ///
    /// Returns the number of element rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is invalid or a file cannot be read or written.
    pub fn export_file(&self, template: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize> {
        let output = output.as_ref();
        let spec = TableSpec::from_tsv(template)?;
        let table = self.export(&spec)?;
        table.write_tsv(output)?;

        let exported = table.rows.len().saturating_sub(usize::from(spec.meta_row().is_some()));
        info!(path = %output.display(), rows = exported, "exported schema elements");
        Ok(exported)
    }

    fn rows_for(schema: &SchemaDefinition, primary: ElementType) -> Vec<ExportRow<'_>> {
        match primary {
            ElementType::Class => schema
                .classes
                .values()
                .map(Element::Class)
                .map(ExportRow::standalone)
                .collect(),
            ElementType::Enum => schema
                .enums
                .values()
                .map(Element::Enum)
                .map(ExportRow::standalone)
                .collect(),
            ElementType::Type => schema
                .types
                .values()
                .map(Element::Type)
                .map(ExportRow::standalone)
                .collect(),
            ElementType::Subset => schema
                .subsets
                .values()
                .map(Element::Subset)
                .map(ExportRow::standalone)
                .collect(),
            ElementType::Slot => {
                let mut rows: Vec<ExportRow<'_>> = schema
                    .slots
                    .values()
                    .map(Element::Slot)
                    .map(ExportRow::standalone)
                    .collect();
                for class in schema.classes.values() {
                    let scoped = class.attributes.values().chain(class.slot_usage.values());
                    rows.extend(scoped.map(|slot| ExportRow {
                        element: Element::Slot(slot),
                        parent: Some(class),
                    }));
                }
                rows
            }
        }
    }

    fn cell(column: &ColumnSpec, primary: ElementType, row: &ExportRow<'_>, metaslots: &Value) -> String {
        match column.role() {
            ColumnRole::Ignored => String::new(),
            ColumnRole::Element(element_type) if element_type == primary => row.element.name().to_string(),
            ColumnRole::Element(ElementType::Class) => {
                row.parent.map(|class| class.name.clone()).unwrap_or_default()
            }
            ColumnRole::Element(_) => String::new(),
            ColumnRole::Metaslot("annotations") => Self::annotation_cell(column, row),
            ColumnRole::Metaslot(metaslot) => {
                let value = metaslots.get(metaslot);
                let value = match (&column.settings.inner_key, value) {
                    (Some(key), Some(inner)) => inner.get(key.as_str()),
                    (_, value) => value,
                };
                value.map(format_value).unwrap_or_default()
            }
        }
    }

    fn annotation_cell(column: &ColumnSpec, row: &ExportRow<'_>) -> String {
        match &column.settings.inner_key {
            Some(tag) => row
                .element
                .get_annotation(tag)
                .map(|annotation| format_value(&Value::from(annotation.effective().clone())))
                .unwrap_or_default(),
            None => row
                .element
                .annotations()
                .filter(|annotations| !annotations.is_empty())
                .map(|annotations| {
                    let effective: serde_json::Map<String, Value> = annotations
                        .iter()
                        .map(|(tag, value)| (tag.clone(), Value::from(value.effective().clone())))
                        .collect();
                    Value::Object(effective).to_string()
                })
                .unwrap_or_default(),
        }
    }
}

/// Render a metaslot value as a single cell
#[must_use]
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(format_list_item)
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        Value::Object(_) => value.to_string(),
    }
}

fn format_list_item(value: &Value) -> String {
    match value.get("text") {
        Some(Value::String(text)) => text.clone(),
        _ => format_value(value),
    }
}
