//! Configuration for the usage report
//!
//! Configuration is a YAML file with `${VAR:-default}` environment variable
//! substitution. Every field has a default, so a file only needs the values
//! it changes; command-line options override the file.

use linkml_core::{LinkMLError, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::env;
use std::path::{Path, PathBuf};

use crate::parser::ImportSettings;
use crate::report::columns::ColumnConfig;

/// Default metamodel source
pub const DEFAULT_META_PATH: &str =
    "https://raw.githubusercontent.com/linkml/linkml-model/main/linkml_model/model/schema/meta.yaml";

/// Default workbook path for the rendered metamodel
pub const DEFAULT_META_MODEL_EXCEL_FILE: &str = "meta.xlsx";

/// Default metamodel class whose sheet supplies the base columns
pub const DEFAULT_BASE_CLASS: &str = "slot_definition";

/// Default template path
pub const DEFAULT_DESTINATION_TEMPLATE: &str = "usage_template.tsv";

/// Suffix of the exporter's raw output
pub const POPULATED_RAW_SUFFIX: &str = "_populated_raw";

/// Suffix of the cleaned report
pub const POPULATED_CLEAN_SUFFIX: &str = "_populated_no_blank_cols";

/// Load configuration from `YAML` file with environment variable substitution
///
/// # Errors
///
/// Returns `LinkMLError::IoError` if the file cannot be read
/// Returns `LinkMLError::ConfigError` if the YAML cannot be parsed
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(LinkMLError::IoError)?;
    let substituted = substitute_env_vars(&contents)?;

    serde_yaml::from_str(&substituted).map_err(|e| {
        LinkMLError::ConfigError(format!("Failed to parse YAML config {}: {e}", path.display()))
    })
}

/// Substitute environment variables in the format `${VAR}` or `${VAR:-default}`
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")
        .map_err(|e| LinkMLError::config(format!("invalid substitution pattern: {e}")))?;

    Ok(re
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let default_value = caps.get(2).map_or("", |m| m.as_str());
            env::var(var_name).unwrap_or_else(|_| default_value.to_string())
        })
        .into_owned())
}

/// Everything one report run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Metamodel YAML, path or `URL`
    pub meta_path: String,
    /// Where the rendered metamodel workbook is written
    pub meta_model_excel_file: PathBuf,
    /// Metamodel class (sheet) supplying the base columns
    pub base_class: String,
    /// Column selection
    #[serde(flatten)]
    pub columns: ColumnConfig,
    /// Schema reported on, path or `URL`
    pub source_schema_path: Option<String>,
    /// Blank template path; the populated files are derived from it
    pub destination_template: PathBuf,
    /// Import resolution for both schemas
    pub imports: ImportSettings,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            meta_path: DEFAULT_META_PATH.to_string(),
            meta_model_excel_file: PathBuf::from(DEFAULT_META_MODEL_EXCEL_FILE),
            base_class: DEFAULT_BASE_CLASS.to_string(),
            columns: ColumnConfig::default(),
            source_schema_path: None,
            destination_template: PathBuf::from(DEFAULT_DESTINATION_TEMPLATE),
            imports: ImportSettings::default(),
        }
    }
}

impl ReportConfig {
    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        load_config(path.as_ref())
    }

    /// Check that the configuration can drive a run
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first missing value.
    pub fn validate(&self) -> Result<()> {
        if self
            .source_schema_path
            .as_deref()
            .is_none_or(|path| path.trim().is_empty())
        {
            return Err(LinkMLError::config(
                "source_schema_path is required (--source-schema-path or config file)",
            ));
        }
        if self.meta_path.trim().is_empty() {
            return Err(LinkMLError::config("meta_path must not be empty"));
        }
        if self.base_class.trim().is_empty() {
            return Err(LinkMLError::config("base_class must not be empty"));
        }
        if self.destination_template.as_os_str().is_empty() {
            return Err(LinkMLError::config("destination_template must not be empty"));
        }
        Ok(())
    }

    /// Path of the exporter's raw output
    #[must_use]
    pub fn populated_raw_path(&self) -> PathBuf {
        derived_path(&self.destination_template, POPULATED_RAW_SUFFIX)
    }

    /// Path of the cleaned report
    #[must_use]
    pub fn populated_clean_path(&self) -> PathBuf {
        derived_path(&self.destination_template, POPULATED_CLEAN_SUFFIX)
    }
}

/// Insert `suffix` before the template's extension; without one, append `suffix.tsv`
#[must_use]
pub fn derived_path(template: &Path, suffix: &str) -> PathBuf {
    let stem = template
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = template
        .extension()
        .map_or_else(|| "tsv".to_string(), |e| e.to_string_lossy().into_owned());
    template.with_file_name(format!("{stem}{suffix}.{extension}"))
}
