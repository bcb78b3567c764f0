//! Parse a SchemaSheets template into a [`TableSpec`]

use linkml_core::error::{LinkMLError, Result};
use serde_yaml::Value as YamlValue;
use std::path::Path;
use tracing::debug;

use super::types::{ColumnSettings, ColumnSpec, TableSpec};
use crate::table::Table;

impl TableSpec {
    /// Read a template file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a settings cell is not a YAML map.
    pub fn from_tsv(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_table(&Table::read_tsv(path)?)
    }

    /// Build a specification from a table already in memory.
    ///
    /// Rows whose first cell starts with `>` are descriptor rows. The first
    /// maps columns to metaslots; later ones hold YAML settings per column.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the table has no descriptor row or a
    /// settings cell is not a YAML map.
    pub fn from_table(table: &Table) -> Result<Self> {
        let descriptor_rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .filter(|row| row.first().is_some_and(|cell| cell.starts_with('>')))
            .cloned()
            .collect();

        let skipped = table.rows.len() - descriptor_rows.len();
        if skipped > 0 {
            debug!(rows = skipped, "ignoring non-descriptor rows in template");
        }

        let Some(metaslots) = descriptor_rows.first() else {
            return Err(LinkMLError::config(
                "template has no descriptor row (a row starting with '>')",
            ));
        };

        let mut columns: Vec<ColumnSpec> = table
            .header
            .iter()
            .zip(metaslots)
            .map(|(name, metaslot)| ColumnSpec {
                name: name.clone(),
                metaslot: metaslot.trim_start_matches('>').trim().to_string(),
                settings: ColumnSettings::default(),
            })
            .collect();

        for row in descriptor_rows.iter().skip(1) {
            for (column, cell) in columns.iter_mut().zip(row) {
                let cell = cell.trim_start_matches('>').trim();
                if cell.is_empty() {
                    continue;
                }
                parse_settings(cell, &column.name, &mut column.settings)?;
            }
        }

        Ok(TableSpec {
            columns,
            descriptor_rows,
        })
    }
}

/// Key of the setting naming the annotation tag or map key a column reads
const INNER_KEY: &str = "inner_key";

fn parse_settings(cell: &str, column: &str, settings: &mut ColumnSettings) -> Result<()> {
    // Tags are literal text, never YAML scalars
    if let Some(tag) = cell
        .strip_prefix(INNER_KEY)
        .and_then(|rest| rest.trim_start().strip_prefix(':'))
    {
        settings.inner_key = Some(tag.trim().to_string());
        return Ok(());
    }

    let parsed: YamlValue = serde_yaml::from_str(cell).map_err(|e| {
        LinkMLError::config(format!("invalid settings '{cell}' for column '{column}': {e}"))
    })?;
    let YamlValue::Mapping(map) = parsed else {
        return Err(LinkMLError::config(format!(
            "settings for column '{column}' must be `key: value` pairs, got '{cell}'"
        )));
    };

    for (key, value) in map {
        let key = scalar_to_string(&key);
        let value = scalar_to_string(&value);
        if key == INNER_KEY {
            settings.inner_key = Some(value);
        } else {
            settings.other.insert(key, value);
        }
    }
    Ok(())
}

fn scalar_to_string(value: &YamlValue) -> String {
    match value {
        YamlValue::String(s) => s.clone(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema_view::ElementType;
    use crate::schemasheets::types::ColumnRole;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = "slot\tclass\trange\tunits\n\
                            >slot\tclass\trange\tannotations\n\
                            >\t\t\tinner_key: units\n";

    #[test]
    fn test_descriptor_rows() {
        let table = Table::from_tsv_reader(TEMPLATE.as_bytes()).unwrap();
        let spec = TableSpec::from_table(&table).unwrap();

        assert_eq!(spec.header(), vec!["slot", "class", "range", "units"]);
        assert_eq!(spec.primary_type().unwrap(), ElementType::Slot);
        assert_eq!(spec.columns[2].role(), ColumnRole::Metaslot("range"));
        assert_eq!(spec.columns[3].metaslot, "annotations");
        assert_eq!(spec.columns[3].settings.inner_key.as_deref(), Some("units"));
        assert_eq!(spec.columns[0].settings, ColumnSettings::default());
        assert_eq!(
            spec.meta_row().unwrap(),
            &[">slot", "class", "range", "annotations"].map(String::from)
        );
    }

    #[test]
    fn test_missing_descriptor_row() {
        let table = Table::from_tsv_reader("slot\tclass\nid\tPerson\n".as_bytes()).unwrap();
        assert!(matches!(
            TableSpec::from_table(&table),
            Err(LinkMLError::ConfigError(_))
        ));
    }

    #[test]
    fn test_non_map_settings_rejected() {
        let table =
            Table::from_tsv_reader("slot\trange\n>slot\trange\n>\tjust text\n".as_bytes()).unwrap();
        assert!(TableSpec::from_table(&table).is_err());
    }

    #[test]
    fn test_inner_key_taken_verbatim() {
        let table = Table::from_tsv_reader(
            "slot\tn\th\tz\n>slot\tannotations\tannotations\tannotations\n>\tinner_key: null\tinner_key: #internal\tinner_key: 007\n"
                .as_bytes(),
        )
        .unwrap();
        let spec = TableSpec::from_table(&table).unwrap();
        assert_eq!(spec.columns[1].settings.inner_key.as_deref(), Some("null"));
        assert_eq!(spec.columns[2].settings.inner_key.as_deref(), Some("#internal"));
        assert_eq!(spec.columns[3].settings.inner_key.as_deref(), Some("007"));
    }

    #[test]
    fn test_other_settings_kept() {
        let table = Table::from_tsv_reader(
            "slot\texamples\n>slot\texamples\n>\tinner_key: value\n>\tsuffix: x\n".as_bytes(),
        )
        .unwrap();
        let spec = TableSpec::from_table(&table).unwrap();
        assert_eq!(spec.columns[1].settings.inner_key.as_deref(), Some("value"));
        assert_eq!(spec.columns[1].settings.other["suffix"], "x");
    }
}
