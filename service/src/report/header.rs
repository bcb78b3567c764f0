//! Template header synthesis

use linkml_core::error::{LinkMLError, Result};

/// Metaslot that annotation-tag columns map to
pub const ANNOTATIONS_METASLOT: &str = "annotations";

/// Marks a descriptor row and, on the field row, the primary-key column
pub const DESCRIPTOR_MARKER: &str = ">";

/// The header line and descriptor rows of a blank usage template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateHeader {
    /// Column names, annotation tags appended
    pub columns: Vec<String>,
    /// Metaslot per column, first prefixed with `>`
    pub field_row: Vec<String>,
    /// `inner_key` settings for the tag columns, present only when there are tags
    pub directive_row: Option<Vec<String>>,
}

impl TemplateHeader {
    /// Build the header rows for `columns` plus one column per annotation tag
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `columns` is empty.
    pub fn synthesize(columns: &[String], tags: &[String]) -> Result<Self> {
        let Some(first) = columns.first() else {
            return Err(LinkMLError::config("template needs at least one column"));
        };

        let mut field_row = columns.to_vec();
        field_row[0] = format!("{DESCRIPTOR_MARKER}{first}");
        let mut all_columns = columns.to_vec();

        let directive_row = if tags.is_empty() {
            None
        } else {
            let mut row = vec![DESCRIPTOR_MARKER.to_string()];
            row.resize(columns.len(), String::new());
            for tag in tags {
                all_columns.push(tag.clone());
                field_row.push(ANNOTATIONS_METASLOT.to_string());
                row.push(format!("inner_key: {tag}"));
            }
            Some(row)
        };

        Ok(Self {
            columns: all_columns,
            field_row,
            directive_row,
        })
    }

    /// The descriptor rows in file order
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<String>> {
        std::iter::once(self.field_row.clone())
            .chain(self.directive_row.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_without_tags() {
        let header = TemplateHeader::synthesize(&strings(&["slot", "class", "range"]), &[]).unwrap();
        assert_eq!(header.columns, strings(&["slot", "class", "range"]));
        assert_eq!(header.field_row, strings(&[">slot", "class", "range"]));
        assert_eq!(header.directive_row, None);
        assert_eq!(header.rows().len(), 1);
    }

    #[test]
    fn test_with_tags() {
        let header =
            TemplateHeader::synthesize(&strings(&["slot", "class"]), &strings(&["units", "owner"])).unwrap();
        assert_eq!(header.columns, strings(&["slot", "class", "units", "owner"]));
        assert_eq!(
            header.field_row,
            strings(&[">slot", "class", "annotations", "annotations"])
        );
        assert_eq!(
            header.directive_row,
            Some(strings(&[">", "", "inner_key: units", "inner_key: owner"]))
        );
    }

    #[test]
    fn test_single_column_with_tag() {
        let header = TemplateHeader::synthesize(&strings(&["slot"]), &strings(&["units"])).unwrap();
        assert_eq!(header.directive_row, Some(strings(&[">", "inner_key: units"])));
    }

    #[test]
    fn test_empty_columns_rejected() {
        assert!(matches!(
            TemplateHeader::synthesize(&[], &strings(&["units"])),
            Err(LinkMLError::ConfigError(_))
        ));
    }
}
