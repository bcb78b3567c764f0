//! Column-set construction for the usage template

use indexmap::IndexMap;
use linkml_core::utils::underscore_spaces;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Metaslots of `slot_definition` left out of the report by default
pub const DEFAULT_COLUMNS_TO_REMOVE: &[&str] = &[
    "all_members",
    "all_of",
    "alt_descriptions",
    "annotations",
    "any_of",
    "enum_range",
    "exactly_one_of",
    "extensions",
    "has_member",
    "name",
    "none_of",
    "path_rule",
    "range_expression",
    "structured_aliases",
    "unit",
];

/// Columns placed in front of the sorted base columns by default
pub const DEFAULT_COLUMNS_TO_INSERT: &[&str] = &["slot", "class"];

/// How to turn the base class's columns into the template's columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Names dropped from the base columns; names not present are ignored
    pub columns_to_remove: Vec<String>,
    /// Names placed first, in this order
    pub columns_to_insert: Vec<String>,
    /// When non-empty, the exact column list to use instead
    pub columns_to_use: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            columns_to_remove: DEFAULT_COLUMNS_TO_REMOVE.iter().map(ToString::to_string).collect(),
            columns_to_insert: DEFAULT_COLUMNS_TO_INSERT.iter().map(ToString::to_string).collect(),
            columns_to_use: Vec::new(),
        }
    }
}

impl ColumnConfig {
    /// Which rule decides the column list
    #[must_use]
    pub fn selection(&self) -> ColumnSelection {
        if self.columns_to_use.is_empty() {
            ColumnSelection::Computed
        } else {
            ColumnSelection::Overridden
        }
    }
}

/// Where the final column list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSelection {
    /// Remove, sort, insert, underscore
    Computed,
    /// `columns_to_use`, verbatim
    Overridden,
}

/// The ordered column list for a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<String>,
    selection: ColumnSelection,
    relocated: Vec<String>,
}

impl ColumnSet {
    /// Columns in template order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Consume the set, returning the columns
    #[must_use]
    pub fn into_columns(self) -> Vec<String> {
        self.columns
    }

    /// How the list was chosen
    #[must_use]
    pub fn selection(&self) -> ColumnSelection {
        self.selection
    }

    /// Number of columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether there are no columns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Insert-list names that were also base columns; they appear once, at the front
    #[must_use]
    pub fn relocated(&self) -> &[String] {
        &self.relocated
    }

    /// Names occurring more than once, with their counts, in first-seen order
    #[must_use]
    pub fn duplicates(&self) -> Vec<(&str, usize)> {
        duplicate_columns(&self.columns)
    }
}

/// Names occurring more than once in `columns`, with their counts, in first-seen order
#[must_use]
pub fn duplicate_columns(columns: &[String]) -> Vec<(&str, usize)> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for column in columns {
        *counts.entry(column.as_str()).or_default() += 1;
    }
    counts.into_iter().filter(|(_, count)| *count > 1).collect()
}

/// Build the template's column list from the base class's columns.
///
/// Removes the configured names, sorts the rest by byte order, puts the
/// insert list in front, and replaces spaces with underscores. A base column
/// that is also in the insert list is not repeated; it is reported through
/// [`ColumnSet::relocated`]. A non-empty `columns_to_use` replaces all of that
/// verbatim.
#[must_use]
pub fn build_columns(base_columns: &[String], config: &ColumnConfig) -> ColumnSet {
    let set = match config.selection() {
        ColumnSelection::Overridden => ColumnSet {
            columns: config.columns_to_use.clone(),
            selection: ColumnSelection::Overridden,
            relocated: Vec::new(),
        },
        ColumnSelection::Computed => {
            let inserted: Vec<String> = config
                .columns_to_insert
                .iter()
                .map(|column| underscore_spaces(column))
                .collect();

            let mut remaining: Vec<&String> = base_columns
                .iter()
                .filter(|column| !config.columns_to_remove.contains(column))
                .collect();
            remaining.sort();

            let (relocated, remaining): (Vec<&String>, Vec<&String>) = remaining
                .into_iter()
                .partition(|column| inserted.contains(&underscore_spaces(column)));

            let columns = inserted
                .iter()
                .cloned()
                .chain(remaining.into_iter().map(|column| underscore_spaces(column)))
                .collect();
            ColumnSet {
                columns,
                selection: ColumnSelection::Computed,
                relocated: relocated.into_iter().cloned().collect(),
            }
        }
    };

    for column in set.relocated() {
        warn!(%column, "base column is also in the insert list, keeping it only at the front");
    }
    for (column, count) in set.duplicates() {
        warn!(column, count, "column appears more than once in the template");
    }
    debug!(columns = set.len(), selection = ?set.selection(), "built column set");
    set
}
