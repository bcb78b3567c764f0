//! Schema loader for loading schemas from files and URLs

use linkml_core::{
    error::{LinkMLError, Result},
    types::SchemaDefinition,
};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use url::Url;

use super::{ImportResolver, ImportSettings, Parser, SchemaFormat};

/// Where a schema document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// Local file
    Path(PathBuf),
    /// Remote document fetched over HTTP(S)
    Url(Url),
}

impl SchemaSource {
    /// Classify a location string. Only `http`/`https` count as remote;
    /// `file:` URLs become paths and anything else is a relative or absolute path.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => SchemaSource::Url(url),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map_or_else(|()| SchemaSource::Path(PathBuf::from(location)), SchemaSource::Path),
            _ => SchemaSource::Path(PathBuf::from(location)),
        }
    }

    /// Resolve a location relative to this document
    ///
    /// # Errors
    ///
    /// Returns an import error if the relative reference cannot be joined onto a `URL`.
    pub fn join(&self, relative: &str) -> Result<SchemaSource> {
        if let SchemaSource::Url(_) = SchemaSource::parse(relative) {
            return Ok(SchemaSource::parse(relative));
        }
        match self {
            SchemaSource::Url(base) => base
                .join(relative)
                .map(SchemaSource::Url)
                .map_err(|e| LinkMLError::import(relative, e.to_string())),
            SchemaSource::Path(base) => {
                let relative_path = Path::new(relative);
                if relative_path.is_absolute() {
                    return Ok(SchemaSource::Path(relative_path.to_path_buf()));
                }
                let dir = base.parent().unwrap_or_else(|| Path::new(""));
                Ok(SchemaSource::Path(dir.join(relative_path)))
            }
        }
    }

    fn format(&self) -> SchemaFormat {
        match self {
            SchemaSource::Path(path) => SchemaFormat::from_location(&path.to_string_lossy()),
            SchemaSource::Url(url) => SchemaFormat::from_location(url.path()),
        }
    }
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSource::Path(path) => write!(f, "{}", path.display()),
            SchemaSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// A schema together with the merge of everything it imports
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    /// The schema document as written
    pub schema: SchemaDefinition,
    /// The schema with all imported elements folded in
    pub merged: SchemaDefinition,
}

/// Loader for `LinkML` schemas from various sources
pub struct SchemaLoader {
    parser: Parser,
    http_client: reqwest::Client,
    settings: ImportSettings,
}

impl SchemaLoader {
    /// Create a new schema loader
    #[must_use]
    pub fn new(settings: ImportSettings) -> Self {
        Self {
            parser: Parser::new(),
            http_client: reqwest::Client::new(),
            settings,
        }
    }

    /// Import settings in effect
    #[must_use]
    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// Load a schema from a file path or `URL` and resolve its imports
    ///
    /// # Errors
    ///
    /// Returns an error if the document or any import cannot be fetched or parsed.
    pub async fn load(&self, location: &str) -> Result<LoadedSchema> {
        let source = SchemaSource::parse(location);
        let schema = self.fetch(&source).await?;
        info!(source = %source, imports = schema.imports.len(), "loaded schema");

        let merged = if self.settings.resolve {
            ImportResolver::new(self).resolve(&schema, &source).await?
        } else {
            debug!("import resolution disabled");
            schema.clone()
        };

        Ok(LoadedSchema { schema, merged })
    }

    /// Fetch and parse a single schema document, without touching its imports
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    pub async fn fetch(&self, source: &SchemaSource) -> Result<SchemaDefinition> {
        let content = match source {
            SchemaSource::Path(path) => self.load_file(path).await?,
            SchemaSource::Url(url) => self.load_url(url).await?,
        };
        self.parser
            .parse_str(&content, source.format(), &source.to_string())
    }

    async fn load_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).await.map_err(|e| {
            LinkMLError::io_error(format!("Failed to read {}: {e}", path.display()))
        })
    }

    async fn load_url(&self, url: &Url) -> Result<String> {
        debug!(%url, "fetching schema");
        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| LinkMLError::service(format!("Failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(LinkMLError::service(format!(
                "HTTP error {} fetching {url}: {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .text()
            .await
            .map_err(|e| LinkMLError::service(format!("Failed to read response from {url}: {e}")))
    }
}
