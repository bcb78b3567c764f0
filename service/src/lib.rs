//! # linkml2sheets
//!
//! Slot-usage reports for `LinkML` schemas.
//!
//! The report is driven by the `LinkML` metamodel: the metamodel is rendered
//! to a workbook, one class's sheet (normally `slot_definition`) supplies the
//! candidate columns, and those columns become a SchemaSheets template. The
//! template is then populated with one row per slot of the schema being
//! reported on, and columns nobody uses are dropped.
//!
//! ## Quick Start
//!
//! ```no_run
//! use linkml2sheets::{ReportConfig, UsageReport};
//!
//! # async fn example() -> linkml_core::Result<()> {
//! let config = ReportConfig {
//!     source_schema_path: Some("personinfo.yaml".to_string()),
//!     ..ReportConfig::default()
//! };
//! let summary = UsageReport::new(config).run().await?;
//! println!("report written to {}", summary.populated_clean.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Outputs
//!
//! - the metamodel workbook (`meta.xlsx`)
//! - the blank template (`usage_template.tsv`)
//! - the raw export (`usage_template_populated_raw.tsv`)
//! - the cleaned report (`usage_template_populated_no_blank_cols.tsv`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)] // LinkML, SchemaSheets, TSV are proper nouns

/// Command-line interface
pub mod cli;

/// Report configuration
pub mod config;

/// Workbook rendering of schemas
pub mod generator;

/// Workbook readers
pub mod loader;

/// Schema parsing, loading and import resolution
pub mod parser;

/// Usage report stages and pipeline
pub mod report;

/// Schema introspection
pub mod schema_view;

/// SchemaSheets template parsing and export
pub mod schemasheets;

/// Tab-separated tables
pub mod table;

pub use config::ReportConfig;
pub use report::{ReportSummary, UsageReport};
pub use schema_view::SchemaView;
