//! Schema introspection
//!
//! [`SchemaView`] pairs a schema with its import-merged form and answers the
//! questions the report pipeline asks: which elements exist, which slots a
//! class ends up with, and which annotations are attached where.

pub mod view;

pub use view::{Element, ElementType, SchemaView, SchemaViewError};
