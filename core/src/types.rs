//! Core type definitions for LinkML schemas
//!
//! Only the metaslots the report generator reasons about are typed. Every
//! other metaslot on an element is preserved in its `extra` map, so a usage
//! report can still show columns such as `rank`, `status` or `examples`.

use crate::annotations::{Annotatable, Annotations};
use crate::utils::{nullable_map, string_or_seq};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema definition - the root of a `LinkML` schema
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaDefinition {
    /// Unique identifier for the schema
    #[serde(default)]
    pub id: String,

    /// Name of the schema
    #[serde(default)]
    pub name: String,

    /// Human-readable title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Description of the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Version of the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Default prefix for the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_prefix: Option<String>,

    /// Default range for slots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_range: Option<String>,

    /// Prefix declarations
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub prefixes: IndexMap<String, PrefixDefinition>,

    /// Import statements
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "string_or_seq"
    )]
    pub imports: Vec<String>,

    /// Class definitions
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "nullable_map"
    )]
    pub classes: IndexMap<String, ClassDefinition>,

    /// Slot definitions
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "nullable_map"
    )]
    pub slots: IndexMap<String, SlotDefinition>,

    /// Type definitions
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "nullable_map"
    )]
    pub types: IndexMap<String, TypeDefinition>,

    /// Enum definitions
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "nullable_map"
    )]
    pub enums: IndexMap<String, EnumDefinition>,

    /// Subset definitions
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "nullable_map"
    )]
    pub subsets: IndexMap<String, SubsetDefinition>,

    /// Annotations for the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

/// Class definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassDefinition {
    /// Name of the class
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Is this class abstract?
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_: Option<bool>,

    /// Is this a mixin?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixin: Option<bool>,

    /// Parent class (single inheritance)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_a: Option<String>,

    /// Mixin classes
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "string_or_seq"
    )]
    pub mixins: Vec<String>,

    /// Slots used by this class
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "string_or_seq"
    )]
    pub slots: Vec<String>,

    /// Slot usage overrides
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "nullable_map"
    )]
    pub slot_usage: IndexMap<String, SlotDefinition>,

    /// Attributes (inline slots)
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "nullable_map"
    )]
    pub attributes: IndexMap<String, SlotDefinition>,

    /// Class URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_uri: Option<String>,

    /// Tree root flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_root: Option<bool>,

    /// Annotations for the class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,

    /// Every other metaslot, verbatim
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Slot definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlotDefinition {
    /// Name of the slot
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parent slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_a: Option<String>,

    /// Mixin slots
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "string_or_seq"
    )]
    pub mixins: Vec<String>,

    /// Range (type) of the slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    /// Domain class of the slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Slot URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_uri: Option<String>,

    /// Is this slot required?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Is this slot multivalued?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multivalued: Option<bool>,

    /// Is this slot an identifier?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<bool>,

    /// Is this slot a key (unique within its container)?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<bool>,

    /// Inlining behaviour
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inlined: Option<bool>,

    /// Pattern for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Minimum value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_value: Option<Value>,

    /// Maximum value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_value: Option<Value>,

    /// Alternative names
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "string_or_seq"
    )]
    pub aliases: Vec<String>,

    /// Annotations for the slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,

    /// Every other metaslot, verbatim
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Type definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TypeDefinition {
    /// Name of the type
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Base type
    #[serde(skip_serializing_if = "Option::is_none", rename = "typeof")]
    pub base_type: Option<String>,

    /// Type URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Pattern constraint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Annotations for the type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,

    /// Every other metaslot, verbatim
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Enum definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnumDefinition {
    /// Name of the enum
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Permissible values
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_permissible_values"
    )]
    pub permissible_values: Vec<PermissibleValue>,

    /// Annotations for the enum
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,

    /// Every other metaslot, verbatim
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Permissible value metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PermissibleValueMetadata {
    /// Description of this permissible value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Meaning URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

/// Permissible value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PermissibleValue {
    /// Simple string value
    Simple(String),
    /// Complex value with metadata
    Complex {
        text: String,
        /// Description
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        /// Meaning URI
        #[serde(skip_serializing_if = "Option::is_none")]
        meaning: Option<String>,
    },
}

impl PermissibleValue {
    /// The literal text of the value
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            PermissibleValue::Simple(text) | PermissibleValue::Complex { text, .. } => text,
        }
    }
}

/// Prefix definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PrefixDefinition {
    /// Simple string expansion
    Simple(String),
    /// Complex prefix with reference
    Complex {
        /// Prefix name
        prefix_prefix: String,
        /// Expansion URL
        #[serde(skip_serializing_if = "Option::is_none")]
        prefix_reference: Option<String>,
    },
}

/// Subset definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SubsetDefinition {
    /// Name of the subset
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Annotations for the subset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,

    /// Every other metaslot, verbatim
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl SchemaDefinition {
    /// Create a new schema definition with the given name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: format!("https://example.org/{name}"),
            name,
            ..Default::default()
        }
    }

    /// Fill in every element's `name` from the key it is declared under.
    ///
    /// YAML schemas name elements by map key only; the body rarely repeats it.
    pub fn normalize_names(&mut self) {
        fn fill(name: &mut String, key: &str) {
            if name.is_empty() {
                *name = key.to_string();
            }
        }

        for (key, class) in &mut self.classes {
            fill(&mut class.name, key);
            for (slot_key, slot) in &mut class.attributes {
                fill(&mut slot.name, slot_key);
            }
            for (slot_key, slot) in &mut class.slot_usage {
                fill(&mut slot.name, slot_key);
            }
        }
        for (key, slot) in &mut self.slots {
            fill(&mut slot.name, key);
        }
        for (key, type_def) in &mut self.types {
            fill(&mut type_def.name, key);
        }
        for (key, enum_def) in &mut self.enums {
            fill(&mut enum_def.name, key);
        }
        for (key, subset) in &mut self.subsets {
            fill(&mut subset.name, key);
        }
    }
}

impl Annotatable for SchemaDefinition {
    fn annotations(&self) -> Option<&Annotations> {
        self.annotations.as_ref()
    }
}

impl ClassDefinition {
    /// Create a new class definition with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether the class can be instantiated directly
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        !self.abstract_.unwrap_or(false) && !self.mixin.unwrap_or(false)
    }
}

impl Annotatable for ClassDefinition {
    fn annotations(&self) -> Option<&Annotations> {
        self.annotations.as_ref()
    }
}

impl SlotDefinition {
    /// Create a new slot definition with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Annotatable for SlotDefinition {
    fn annotations(&self) -> Option<&Annotations> {
        self.annotations.as_ref()
    }
}

impl Annotatable for TypeDefinition {
    fn annotations(&self) -> Option<&Annotations> {
        self.annotations.as_ref()
    }
}

impl Annotatable for EnumDefinition {
    fn annotations(&self) -> Option<&Annotations> {
        self.annotations.as_ref()
    }
}

impl Annotatable for SubsetDefinition {
    fn annotations(&self) -> Option<&Annotations> {
        self.annotations.as_ref()
    }
}

/// Custom deserializer for `permissible_values` that handles both map and sequence formats
fn deserialize_permissible_values<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<PermissibleValue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct PermissibleValuesVisitor;

    impl<'de> Visitor<'de> for PermissibleValuesVisitor {
        type Value = Vec<PermissibleValue>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a sequence or map of permissible values")
        }

        fn visit_unit<E>(self) -> std::result::Result<Vec<PermissibleValue>, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        // ["value1", "value2"]
        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Vec<PermissibleValue>, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut values = Vec::new();
            while let Some(value) = seq.next_element::<PermissibleValue>()? {
                values.push(value);
            }
            Ok(values)
        }

        // { "value1": null, "value2": { "description": "..." } }
        fn visit_map<M>(self, mut map: M) -> std::result::Result<Vec<PermissibleValue>, M::Error>
        where
            M: de::MapAccess<'de>,
        {
            let mut values = Vec::new();
            while let Some((key, value)) =
                map.next_entry::<String, Option<PermissibleValueMetadata>>()?
            {
                let pv = if let Some(metadata) = value {
                    PermissibleValue::Complex {
                        text: key,
                        description: metadata.description,
                        meaning: metadata.meaning,
                    }
                } else {
                    PermissibleValue::Simple(key)
                };
                values.push(pv);
            }
            Ok(values)
        }
    }

    deserializer.deserialize_any(PermissibleValuesVisitor)
}
