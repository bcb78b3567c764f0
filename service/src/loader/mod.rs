//! Readers for rendered workbooks

pub mod excel;

pub use excel::{read_sheet_columns, sheet_names};
