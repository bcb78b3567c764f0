//! SchemaSheets table export for `LinkML` schemas
//!
//! A SchemaSheets template is a tab-separated file whose header line names the
//! columns and whose descriptor rows (first cell starting with `>`) say what
//! each column holds:
//!
//! ```text
//! slot    class   range   units
//! >slot   class   range   annotations
//! >                       inner_key: units
//! ```
//!
//! The first descriptor row maps each column to a metaslot. The first column
//! is the primary key and names the element type, one row per element.
//! Later descriptor rows carry YAML settings for individual columns.
//!
//! ## Modules
//!
//! - `types`: table and column specifications
//! - `parser`: read a template into a [`TableSpec`]
//! - `exporter`: fill a [`TableSpec`] from a schema

pub mod exporter;
pub mod parser;
pub mod types;

pub use exporter::{SchemaExporter, format_value};
pub use types::{ColumnRole, ColumnSettings, ColumnSpec, TableSpec};
