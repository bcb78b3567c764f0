//! # `LinkML` Core
//!
//! Core types and errors shared by the usage report generator.
//!
//! This crate provides the typed LinkML schema model (schemas, classes,
//! slots, types, enums, subsets and their annotations) together with the
//! error type every other crate in the workspace reports through.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Core error types for `LinkML` operations
pub mod error;

/// Type definitions for `LinkML` schemas
pub mod types;

/// Annotation support for schema elements
pub mod annotations;

/// Serde helpers for loosely shaped schema YAML
pub mod utils;

pub use annotations::{Annotatable, AnnotationValue, Annotations};
pub use error::{LinkMLError, Result};
pub use serde_json::Value;
pub use types::{
    ClassDefinition, EnumDefinition, PermissibleValue, SchemaDefinition, SlotDefinition,
    SubsetDefinition, TypeDefinition,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::annotations::*;
    pub use crate::error::{LinkMLError, Result};
    pub use crate::types::*;
}
