//! Main `SchemaView` API for schema introspection

use indexmap::IndexSet;
use linkml_core::{
    annotations::{Annotatable, Annotations},
    error::{LinkMLError, Result},
    types::{
        ClassDefinition, EnumDefinition, SchemaDefinition, SlotDefinition, SubsetDefinition,
        TypeDefinition,
    },
};
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::parser::{ImportSettings, SchemaLoader};

/// Type of schema element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Class definition
    Class,
    /// Slot definition
    Slot,
    /// Type definition
    Type,
    /// Enum definition
    Enum,
    /// Subset definition
    Subset,
}

impl ElementType {
    /// Metamodel name of the element type (`class`, `slot`, ...)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Class => "class",
            ElementType::Slot => "slot",
            ElementType::Type => "type",
            ElementType::Enum => "enum",
            ElementType::Subset => "subset",
        }
    }

    /// Recognise a metaslot name that denotes an element type
    #[must_use]
    pub fn from_metaslot(name: &str) -> Option<Self> {
        match name.trim() {
            "class" => Some(ElementType::Class),
            "slot" => Some(ElementType::Slot),
            "type" => Some(ElementType::Type),
            "enum" => Some(ElementType::Enum),
            "subset" => Some(ElementType::Subset),
            _ => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed schema element, tagged with its kind.
///
/// Every kind carries an optional annotation map, so callers check for
/// annotations through [`Annotatable`] instead of probing for the field.
#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    /// Class
    Class(&'a ClassDefinition),
    /// Slot or class attribute
    Slot(&'a SlotDefinition),
    /// Type
    Type(&'a TypeDefinition),
    /// Enum
    Enum(&'a EnumDefinition),
    /// Subset
    Subset(&'a SubsetDefinition),
}

impl Element<'_> {
    /// Kind of the element
    #[must_use]
    pub fn kind(&self) -> ElementType {
        match self {
            Element::Class(_) => ElementType::Class,
            Element::Slot(_) => ElementType::Slot,
            Element::Type(_) => ElementType::Type,
            Element::Enum(_) => ElementType::Enum,
            Element::Subset(_) => ElementType::Subset,
        }
    }

    /// Declared name of the element
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Element::Class(c) => &c.name,
            Element::Slot(s) => &s.name,
            Element::Type(t) => &t.name,
            Element::Enum(e) => &e.name,
            Element::Subset(s) => &s.name,
        }
    }

    /// The element's metaslots as a JSON object
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the element cannot be represented as JSON.
    pub fn to_value(&self) -> Result<Value> {
        let value = match self {
            Element::Class(c) => serde_json::to_value(c),
            Element::Slot(s) => serde_json::to_value(s),
            Element::Type(t) => serde_json::to_value(t),
            Element::Enum(e) => serde_json::to_value(e),
            Element::Subset(s) => serde_json::to_value(s),
        };
        value.map_err(|e| LinkMLError::serialization(e.to_string()))
    }
}

impl Annotatable for Element<'_> {
    fn annotations(&self) -> Option<&Annotations> {
        match self {
            Element::Class(c) => c.annotations(),
            Element::Slot(s) => s.annotations(),
            Element::Type(t) => t.annotations(),
            Element::Enum(e) => e.annotations(),
            Element::Subset(s) => s.annotations(),
        }
    }
}

/// Error type for `SchemaView` operations
#[derive(Debug, thiserror::Error)]
pub enum SchemaViewError {
    /// Element not found in schema
    #[error("Element not found: {0}")]
    ElementNotFound(String),
}

impl From<SchemaViewError> for LinkMLError {
    fn from(err: SchemaViewError) -> Self {
        LinkMLError::service(err.to_string())
    }
}

/// High-level `API` for `LinkML` schema introspection
///
/// Holds the schema as written plus the merged view of everything it
/// imports. Element lookups that resolve inheritance go through the merged
/// schema; callers pick which one to enumerate.
#[derive(Clone, Debug)]
pub struct SchemaView {
    schema: Arc<SchemaDefinition>,

    /// Merged view of all imported schemas
    merged: Arc<SchemaDefinition>,
}

impl SchemaView {
    /// Create a view over a schema with no imports resolved
    #[must_use]
    pub fn new(mut schema: SchemaDefinition) -> Self {
        schema.normalize_names();
        let schema = Arc::new(schema);
        Self {
            merged: Arc::clone(&schema),
            schema,
        }
    }

    /// Create a view from a schema and its import-merged counterpart
    #[must_use]
    pub fn with_merged(mut schema: SchemaDefinition, mut merged: SchemaDefinition) -> Self {
        schema.normalize_names();
        merged.normalize_names();
        Self {
            schema: Arc::new(schema),
            merged: Arc::new(merged),
        }
    }

    /// Load a schema from a file path or `URL`, resolving its imports
    ///
    /// # Errors
    ///
    /// Returns an error if the schema or any of its imports cannot be fetched or parsed.
    pub async fn load(source: &str, settings: &ImportSettings) -> Result<Self> {
        let loader = SchemaLoader::new(settings.clone());
        let loaded = loader.load(source).await?;
        Ok(Self::with_merged(loaded.schema, loaded.merged))
    }

    /// The schema as written
    #[must_use]
    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    /// The schema merged with everything it imports
    #[must_use]
    pub fn merged(&self) -> &SchemaDefinition {
        &self.merged
    }

    /// Every element, in the order classes, slots (then class attributes),
    /// enums, types, subsets.
    #[must_use]
    pub fn all_elements(&self, imports: bool) -> Vec<Element<'_>> {
        let schema: &SchemaDefinition = if imports { &self.merged } else { &self.schema };

        let mut elements: Vec<Element<'_>> = schema.classes.values().map(Element::Class).collect();
        elements.extend(schema.slots.values().map(Element::Slot));
        for class in schema.classes.values() {
            elements.extend(class.attributes.values().map(Element::Slot));
        }
        elements.extend(schema.enums.values().map(Element::Enum));
        elements.extend(schema.types.values().map(Element::Type));
        elements.extend(schema.subsets.values().map(Element::Subset));
        elements
    }

    /// Get an enum by name (including imported)
    #[must_use]
    pub fn get_enum(&self, name: &str) -> Option<&EnumDefinition> {
        self.merged.enums.get(name)
    }

    /// Reflexive ancestors of a class: itself, then `is_a` and mixins,
    /// breadth-first. Unknown parents are skipped; cycles are tolerated.
    ///
    /// # Errors
    ///
    /// Returns an error if the class itself is not defined.
    pub fn class_ancestors(&self, name: &str) -> Result<Vec<String>> {
        if !self.merged.classes.contains_key(name) {
            return Err(SchemaViewError::ElementNotFound(name.to_string()).into());
        }

        let mut seen: IndexSet<String> = IndexSet::new();
        let mut queue = VecDeque::from([name.to_string()]);

        while let Some(current) = queue.pop_front() {
            if !seen.insert(current.clone()) {
                continue;
            }
            let Some(class_def) = self.merged.classes.get(&current) else {
                continue;
            };
            if let Some(parent) = &class_def.is_a {
                queue.push_back(parent.clone());
            }
            queue.extend(class_def.mixins.iter().cloned());
        }

        Ok(seen.into_iter().collect())
    }

    /// Names of every slot a class ends up with, own slots first, then
    /// inherited ones in ancestor order.
    ///
    /// # Errors
    ///
    /// Returns an error if the class is not defined.
    pub fn class_induced_slot_names(&self, class_name: &str) -> Result<Vec<String>> {
        let mut slots: IndexSet<String> = IndexSet::new();
        for ancestor in self.class_ancestors(class_name)? {
            if let Some(class_def) = self.merged.classes.get(&ancestor) {
                slots.extend(class_def.slots.iter().cloned());
                slots.extend(class_def.attributes.keys().cloned());
            }
        }
        Ok(slots.into_iter().collect())
    }

    /// The slot as seen from a class: its base definition (schema slot or the
    /// nearest attribute declaration) refined by `slot_usage` along the
    /// ancestry, nearest class last so it wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the class is not defined.
    pub fn induced_slot(&self, slot_name: &str, class_name: &str) -> Result<SlotDefinition> {
        let ancestors = self.class_ancestors(class_name)?;
        let classes: Vec<&ClassDefinition> = ancestors
            .iter()
            .filter_map(|name| self.merged.classes.get(name))
            .collect();

        let mut induced = classes
            .iter()
            .find_map(|c| c.attributes.get(slot_name))
            .or_else(|| self.merged.slots.get(slot_name))
            .cloned()
            .unwrap_or_else(|| SlotDefinition::new(slot_name));

        for class_def in classes.iter().rev() {
            if let Some(usage) = class_def.slot_usage.get(slot_name) {
                apply_slot_usage(&mut induced, usage);
            }
        }

        if induced.name.is_empty() {
            induced.name = slot_name.to_string();
        }
        Ok(induced)
    }
}

fn apply_slot_usage(base: &mut SlotDefinition, usage: &SlotDefinition) {
    if usage.description.is_some() {
        base.description.clone_from(&usage.description);
    }
    if usage.range.is_some() {
        base.range.clone_from(&usage.range);
    }
    if usage.required.is_some() {
        base.required = usage.required;
    }
    if usage.multivalued.is_some() {
        base.multivalued = usage.multivalued;
    }
    if usage.identifier.is_some() {
        base.identifier = usage.identifier;
    }
    if usage.pattern.is_some() {
        base.pattern.clone_from(&usage.pattern);
    }
    for (key, value) in &usage.extra {
        base.extra.insert(key.clone(), value.clone());
    }
}
