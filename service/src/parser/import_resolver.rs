//! Import resolution for `LinkML` schemas

use linkml_core::{
    error::{LinkMLError, Result},
    types::{PrefixDefinition, SchemaDefinition},
};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::path::Path;
use tracing::{debug, warn};

use super::{SchemaLoader, SchemaSource};

/// Raw GitHub directory holding the `LinkML` metamodel YAML files
pub const DEFAULT_LINKML_BASE: &str =
    "https://raw.githubusercontent.com/linkml/linkml-model/main/linkml_model/model/schema/";

/// Settings controlling how imports are followed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Follow `imports` at all
    pub resolve: bool,
    /// Directory or `URL` prefix that `linkml:` imports resolve against
    pub linkml_base: String,
    /// Maximum import nesting
    pub max_depth: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            resolve: true,
            linkml_base: DEFAULT_LINKML_BASE.to_string(),
            max_depth: 16,
        }
    }
}

/// Follows a schema's imports breadth-first and folds them into one schema
pub struct ImportResolver<'a> {
    loader: &'a SchemaLoader,
}

impl<'a> ImportResolver<'a> {
    /// Create a resolver fetching documents through `loader`
    #[must_use]
    pub fn new(loader: &'a SchemaLoader) -> Self {
        Self { loader }
    }

    /// Resolve all imports of `root`, returning the merged schema.
    ///
    /// Each document is fetched at most once. Elements already present win,
    /// so the importing schema's definitions shadow imported ones.
    ///
    /// # Errors
    ///
    /// Returns a `LinkMLError` if:
    /// - an import cannot be located, fetched or parsed
    /// - the maximum import depth is exceeded
    pub async fn resolve(
        &self,
        root: &SchemaDefinition,
        origin: &SchemaSource,
    ) -> Result<SchemaDefinition> {
        let settings = self.loader.settings();
        let mut merged = root.clone();
        let mut visited: HashSet<String> = HashSet::from([origin.to_string()]);
        let mut pending: VecDeque<(String, SchemaSource, usize)> = VecDeque::new();

        for import in &root.imports {
            let location = resolve_location(import, origin, &root.prefixes, &settings.linkml_base)?;
            pending.push_back((import.clone(), location, 1));
        }

        while let Some((import, location, depth)) = pending.pop_front() {
            if !visited.insert(location.to_string()) {
                continue;
            }
            if depth > settings.max_depth {
                return Err(LinkMLError::import(
                    import,
                    format!("Maximum import depth ({}) exceeded", settings.max_depth),
                ));
            }

            debug!(%import, %location, depth, "resolving import");
            let imported = self
                .loader
                .fetch(&location)
                .await
                .map_err(|e| LinkMLError::import(import.as_str(), e.to_string()))?;

            for nested in &imported.imports {
                let nested_location =
                    resolve_location(nested, &location, &imported.prefixes, &settings.linkml_base)?;
                pending.push_back((nested.clone(), nested_location, depth + 1));
            }

            merge_schema(&mut merged, &imported);
        }

        debug!(documents = visited.len(), "import closure resolved");
        Ok(merged)
    }
}

/// Work out where an import statement points.
///
/// `linkml:` imports resolve against `linkml_base`; other CURIEs expand through
/// the importing schema's prefixes; everything else is relative to the
/// importing document. A missing extension defaults to `.yaml`.
///
/// # Errors
///
/// Returns an import error if the location cannot be built.
pub fn resolve_location(
    import: &str,
    origin: &SchemaSource,
    prefixes: &indexmap::IndexMap<String, PrefixDefinition>,
    linkml_base: &str,
) -> Result<SchemaSource> {
    if let Some(local) = import.strip_prefix("linkml:") {
        return in_directory(linkml_base, &with_extension(local));
    }

    if let SchemaSource::Url(_) = SchemaSource::parse(import) {
        return Ok(SchemaSource::parse(&with_extension(import)));
    }

    if let Some((prefix, local)) = import.split_once(':')
        && let Some(definition) = prefixes.get(prefix)
    {
        let expansion = match definition {
            PrefixDefinition::Simple(expansion) => Some(expansion.as_str()),
            PrefixDefinition::Complex {
                prefix_reference, ..
            } => prefix_reference.as_deref(),
        };
        if let Some(expansion) = expansion {
            return Ok(SchemaSource::parse(&format!(
                "{expansion}{}",
                with_extension(local)
            )));
        }
        warn!(%import, "prefix has no expansion, treating import as relative");
    }

    origin.join(&with_extension(import))
}

fn in_directory(base: &str, file: &str) -> Result<SchemaSource> {
    match SchemaSource::parse(base) {
        SchemaSource::Url(mut url) => {
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            url.join(file)
                .map(SchemaSource::Url)
                .map_err(|e| LinkMLError::import(file, e.to_string()))
        }
        SchemaSource::Path(dir) => Ok(SchemaSource::Path(dir.join(file))),
    }
}

fn with_extension(location: &str) -> String {
    let has_extension = Path::new(location).extension().is_some_and(|ext| {
        ext.eq_ignore_ascii_case("yaml")
            || ext.eq_ignore_ascii_case("yml")
            || ext.eq_ignore_ascii_case("json")
    });
    if has_extension {
        location.to_string()
    } else {
        format!("{location}.yaml")
    }
}

/// Insert every element of `source` that `target` does not already define
pub fn merge_schema(target: &mut SchemaDefinition, source: &SchemaDefinition) {
    for (name, prefix) in &source.prefixes {
        target
            .prefixes
            .entry(name.clone())
            .or_insert_with(|| prefix.clone());
    }
    for (name, class) in &source.classes {
        target
            .classes
            .entry(name.clone())
            .or_insert_with(|| class.clone());
    }
    for (name, slot) in &source.slots {
        target
            .slots
            .entry(name.clone())
            .or_insert_with(|| slot.clone());
    }
    for (name, type_def) in &source.types {
        target
            .types
            .entry(name.clone())
            .or_insert_with(|| type_def.clone());
    }
    for (name, enum_def) in &source.enums {
        target
            .enums
            .entry(name.clone())
            .or_insert_with(|| enum_def.clone());
    }
    for (name, subset) in &source.subsets {
        target
            .subsets
            .entry(name.clone())
            .or_insert_with(|| subset.clone());
    }
}
