//! Workbook generation from `LinkML` schemas.
//!
//! The Excel renderer turns a schema (normally the metamodel) into one
//! worksheet per concrete class, so a sheet's header row can seed the usage
//! report's column list.

pub mod excel;
pub mod traits;

pub use excel::{ExcelFeatures, ExcelGenerator};
pub use traits::{GeneratorError, GeneratorResult};
