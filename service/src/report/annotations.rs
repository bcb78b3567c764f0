//! Annotation tag discovery

use indexmap::IndexSet;
use linkml_core::annotations::Annotatable;
use tracing::debug;

use crate::schema_view::SchemaView;

/// Every annotation tag used anywhere in the schema or its imports.
///
/// Tags come back once each, in the order they are first met while walking
/// classes, slots (including class attributes), enums, types and subsets.
#[must_use]
pub fn discover_annotations(view: &SchemaView) -> Vec<String> {
    let mut tags: IndexSet<String> = IndexSet::new();

    for element in view.all_elements(true) {
        for tag in element.annotation_tags() {
            debug!("{} {} has annotation {tag}", element.kind(), element.name());
            tags.insert(tag.to_string());
        }
    }

    tags.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkml_core::types::SchemaDefinition;
    use pretty_assertions::assert_eq;

    fn view(yaml: &str) -> SchemaView {
        let schema: SchemaDefinition = serde_yaml::from_str(yaml).expect("valid schema");
        SchemaView::new(schema)
    }

    #[test]
    fn test_tags_deduplicated_in_discovery_order() {
        let view = view(
            r"
id: https://example.org/s
name: s
classes:
  Person:
    annotations:
      owner: team-a
    attributes:
      age:
        annotations:
          units: years
slots:
  height:
    annotations:
      units: cm
      owner: team-b
enums:
  Status:
    annotations:
      deprecated_in:
        tag: deprecated_in
        value: '2.0'
",
        );
        assert_eq!(
            discover_annotations(&view),
            vec!["owner", "units", "deprecated_in"]
        );
    }

    #[test]
    fn test_no_annotations() {
        let view = view("id: x\nname: s\nclasses:\n  A:\n    slots: [b]\nslots:\n  b:\n");
        assert!(discover_annotations(&view).is_empty());
    }
}
