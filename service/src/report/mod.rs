//! Usage report generation
//!
//! The stages run once each, in order: discover annotation tags, build the
//! column set, synthesize the header rows, write the template, export the
//! schema into it, then clean the export.

pub mod annotations;
pub mod columns;
pub mod header;
pub mod pipeline;
pub mod postprocess;
pub mod template;

pub use annotations::discover_annotations;
pub use columns::{ColumnConfig, ColumnSelection, ColumnSet, build_columns, duplicate_columns};
pub use header::TemplateHeader;
pub use pipeline::{ReportSummary, UsageReport};
pub use postprocess::{CleanSummary, clean_populated, clean_table};
pub use template::write_template;
