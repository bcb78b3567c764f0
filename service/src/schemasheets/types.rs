//! Types describing a SchemaSheets table specification

use indexmap::IndexMap;
use linkml_core::error::{LinkMLError, Result};

use crate::schema_view::ElementType;

/// Per-column settings from a descriptor row (`inner_key: units`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSettings {
    /// Key to select inside a map-valued metaslot
    pub inner_key: Option<String>,
    /// Settings this exporter does not interpret
    pub other: IndexMap<String, String>,
}

/// What a column holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRole<'a> {
    /// The name of an element of this type
    Element(ElementType),
    /// The value of a metaslot of the row's element
    Metaslot(&'a str),
    /// Nothing; the column has no metaslot
    Ignored,
}

/// One column of the table specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name from the header line
    pub name: String,
    /// Metaslot from the first descriptor row, `>` stripped
    pub metaslot: String,
    /// Settings from later descriptor rows
    pub settings: ColumnSettings,
}

impl ColumnSpec {
    /// Classify the column by its metaslot
    #[must_use]
    pub fn role(&self) -> ColumnRole<'_> {
        let metaslot = self.metaslot.trim();
        if metaslot.is_empty() {
            ColumnRole::Ignored
        } else if let Some(element_type) = ElementType::from_metaslot(metaslot) {
            ColumnRole::Element(element_type)
        } else {
            ColumnRole::Metaslot(metaslot)
        }
    }
}

/// A parsed SchemaSheets template: column names plus descriptor rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSpec {
    /// Columns, in file order
    pub columns: Vec<ColumnSpec>,
    /// Descriptor rows exactly as read, first one mapping columns to metaslots
    pub descriptor_rows: Vec<Vec<String>>,
}

impl TableSpec {
    /// Column names, in file order
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// The first descriptor row, as echoed back into exported tables
    #[must_use]
    pub fn meta_row(&self) -> Option<&[String]> {
        self.descriptor_rows.first().map(Vec::as_slice)
    }

    /// Element type named by the primary-key (first) column
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if there are no columns or the first column's
    /// metaslot is not an element type.
    pub fn primary_type(&self) -> Result<ElementType> {
        let first = self
            .columns
            .first()
            .ok_or_else(|| LinkMLError::config("table specification has no columns"))?;
        match first.role() {
            ColumnRole::Element(element_type) => Ok(element_type),
            _ => Err(LinkMLError::config(format!(
                "primary key column '{}' maps to '{}', expected one of class, slot, enum, type, subset",
                first.name, first.metaslot
            ))),
        }
    }
}
