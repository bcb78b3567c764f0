//! Generator error and result types

use linkml_core::prelude::*;
use thiserror::Error;

/// Result type for generator operations
pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;

/// Errors that can occur during workbook generation
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Schema cannot be rendered
    #[error("Schema validation failed: {0}")]
    Validation(String),

    /// Workbook generation error
    #[error("Workbook generation failed: {0}")]
    Generation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `LinkML` core error
    #[error("LinkML error: {0}")]
    LinkML(#[from] LinkMLError),
}

impl From<rust_xlsxwriter::XlsxError> for GeneratorError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        GeneratorError::Generation(err.to_string())
    }
}

impl From<GeneratorError> for LinkMLError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::LinkML(inner) => inner,
            GeneratorError::Io(io) => LinkMLError::IoError(io),
            other => LinkMLError::service(other.to_string()),
        }
    }
}
