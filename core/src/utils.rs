//! Serde helpers for the loose shapes LinkML YAML allows

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Deserialize a list of strings that may also be written as a single string
/// or left empty (`mixins: named_thing`, `slots:`).
///
/// # Errors
///
/// Returns the deserializer's error if the value is neither a string nor a
/// sequence of strings.
pub fn string_or_seq<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

/// Deserialize a name-keyed map whose values may be null.
///
/// LinkML schemas routinely declare elements without a body
/// (`attributes: {id: , name: }`); such entries become `T::default()`.
///
/// # Errors
///
/// Returns the deserializer's error if the value is not a map.
pub fn nullable_map<'de, D, T>(deserializer: D) -> std::result::Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let raw: Option<IndexMap<String, Option<T>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| (name, value.unwrap_or_default()))
        .collect())
}

/// Replace every space in a column name with an underscore
#[must_use]
pub fn underscore_spaces(name: &str) -> String {
    name.replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Body {
        #[serde(default)]
        range: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "string_or_seq")]
        mixins: Vec<String>,
        #[serde(default, deserialize_with = "nullable_map")]
        attributes: IndexMap<String, Body>,
    }

    #[test]
    fn test_single_string_becomes_list() {
        let holder: Holder = serde_yaml::from_str("mixins: named_thing").unwrap();
        assert_eq!(holder.mixins, vec!["named_thing".to_string()]);
    }

    #[test]
    fn test_null_values_become_defaults() {
        let holder: Holder =
            serde_yaml::from_str("attributes:\n  id:\n  age:\n    range: integer\n").unwrap();
        assert_eq!(holder.attributes["id"], Body::default());
        assert_eq!(holder.attributes["age"].range.as_deref(), Some("integer"));
        assert!(holder.mixins.is_empty());
    }

    #[test]
    fn test_null_map_is_empty() {
        let holder: Holder = serde_yaml::from_str("attributes:\nmixins:\n").unwrap();
        assert!(holder.attributes.is_empty());
        assert!(holder.mixins.is_empty());
    }

    #[test]
    fn test_underscore_spaces() {
        assert_eq!(underscore_spaces("is a"), "is_a");
        assert_eq!(underscore_spaces("range"), "range");
    }
}
