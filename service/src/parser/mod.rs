//! Schema parsing and loading
//!
//! Parses `LinkML` schemas from YAML or JSON text, fetches them from disk or
//! over HTTP, and folds their imports into a merged schema.

use linkml_core::{
    error::{LinkMLError, Result},
    types::SchemaDefinition,
};

pub mod import_resolver;
pub mod schema_loader;

pub use import_resolver::{ImportResolver, ImportSettings};
pub use schema_loader::{LoadedSchema, SchemaLoader, SchemaSource};

/// Serialization format of a schema document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// YAML (`.yaml`, `.yml`)
    Yaml,
    /// JSON (`.json`)
    Json,
}

impl SchemaFormat {
    /// Pick the format from a file name or `URL` path; YAML unless it ends in `.json`
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        if std::path::Path::new(path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            SchemaFormat::Json
        } else {
            SchemaFormat::Yaml
        }
    }
}

/// Parser for schema documents
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    /// Create a new parser
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse schema text in the given format and fill element names from their keys
    ///
    /// # Errors
    ///
    /// Returns a parse error naming `location` if the text is not a valid schema.
    pub fn parse_str(
        &self,
        content: &str,
        format: SchemaFormat,
        location: &str,
    ) -> Result<SchemaDefinition> {
        let parsed = match format {
            SchemaFormat::Yaml => serde_yaml::from_str::<SchemaDefinition>(content)
                .map_err(|e| LinkMLError::parse_at(e.to_string(), location)),
            SchemaFormat::Json => serde_json::from_str::<SchemaDefinition>(content)
                .map_err(|e| LinkMLError::parse_at(e.to_string(), location)),
        };
        let mut schema = parsed?;
        schema.normalize_names();
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(SchemaFormat::from_location("meta.yaml"), SchemaFormat::Yaml);
        assert_eq!(SchemaFormat::from_location("schema.JSON"), SchemaFormat::Json);
        assert_eq!(
            SchemaFormat::from_location("https://example.org/s.json?raw=1"),
            SchemaFormat::Json
        );
        assert_eq!(SchemaFormat::from_location("no_extension"), SchemaFormat::Yaml);
    }

    #[test]
    fn test_parse_yaml_and_json() {
        let parser = Parser::new();
        let yaml = parser
            .parse_str("id: x\nname: s\nclasses:\n  A:\n", SchemaFormat::Yaml, "s.yaml")
            .unwrap();
        assert_eq!(yaml.classes["A"].name, "A");

        let json = parser
            .parse_str(r#"{"id": "x", "name": "s", "slots": {"b": null}}"#, SchemaFormat::Json, "s.json")
            .unwrap();
        assert_eq!(json.slots["b"].name, "b");
    }

    #[test]
    fn test_parse_error_carries_location() {
        let err = Parser::new()
            .parse_str("classes: [unclosed", SchemaFormat::Yaml, "broken.yaml")
            .unwrap_err();
        match err {
            LinkMLError::ParseError { location, .. } => {
                assert_eq!(location.as_deref(), Some("broken.yaml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
