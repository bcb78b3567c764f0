//! Excel workbook rendering of a `LinkML` schema.
//!
//! Every concrete class becomes one worksheet whose header row lists the
//! slots the class ends up with. The report pipeline renders the metamodel
//! this way and reads one sheet back to learn the metaslot columns.

mod cast;
mod features;
mod generator;
mod sheets;
mod workbook;

pub use features::ExcelFeatures;
pub use generator::ExcelGenerator;
