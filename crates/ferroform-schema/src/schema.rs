//! Schema representation types.
//!
//! These types describe the shape of a form: scalar properties, nested
//! object references, collection item descriptors, and the constraint
//! metadata attached to each. A `Schema` is usually deserialized from the
//! JSON document an external schema source emits (the dialect mirrors JSON
//! Schema spelling: `$defs`, `$ref`, `multipleOf`, `readOnly`, ...), but
//! every type also carries builder constructors so schemas can be
//! assembled directly in code.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::SchemaError;

/// The declared type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// True/false toggle.
    Boolean,
    /// Whole number.
    Integer,
    /// Floating point number.
    Number,
    /// Text, optionally refined by a [`PropertyFormat`].
    String,
    /// Ordered list of elements described by `items`.
    Array,
    /// Free-form key/value map described by `additionalProperties`.
    Object,
}

impl PropertyType {
    /// Returns the type name as it appears in schema documents.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// Format refinement for string-typed properties.
///
/// A format selects a specialized editor affordance; it has no meaning for
/// non-string types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyFormat {
    /// Swatch/hex color picker.
    Color,
    /// Calendar date picker.
    Date,
    /// Clock time picker.
    Time,
    /// Paired date+time pickers combined into one timestamp.
    DateTime,
    /// Masked text entry.
    Password,
}

/// Item descriptor for collection elements.
///
/// A restricted [`Property`]: collection items carry a type, an optional
/// enumeration and an optional string format, nothing more.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemType {
    /// Declared element type.
    #[serde(rename = "type")]
    pub kind: PropertyType,
    /// Allowed literal values; overrides type-based rendering.
    #[serde(rename = "enum", default)]
    pub choices: Option<Vec<Value>>,
    /// Format refinement for string elements.
    #[serde(default)]
    pub format: Option<PropertyFormat>,
}

impl ItemType {
    /// Creates an item descriptor of the given type.
    #[must_use]
    pub fn new(kind: PropertyType) -> Self {
        Self {
            kind,
            choices: None,
            format: None,
        }
    }

    /// Restricts items to the given literal values.
    #[must_use]
    pub fn choices(mut self, choices: Vec<Value>) -> Self {
        self.choices = Some(choices);
        self
    }

    /// Sets the string format.
    #[must_use]
    pub fn format(mut self, format: PropertyFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// A leaf field descriptor: scalar, collection, or free-form map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Display label.
    pub title: String,
    /// Help text shown next to the editor.
    #[serde(default)]
    pub description: Option<String>,
    /// Declared type.
    #[serde(rename = "type")]
    pub kind: PropertyType,
    /// Initial value when the field has not been edited yet.
    #[serde(default)]
    pub default: Option<Value>,
    /// Inclusive lower bound.
    #[serde(default)]
    pub minimum: Option<f64>,
    /// Inclusive upper bound.
    #[serde(default)]
    pub maximum: Option<f64>,
    /// Exclusive lower bound.
    #[serde(default)]
    pub exclusive_minimum: Option<f64>,
    /// Exclusive upper bound.
    #[serde(default)]
    pub exclusive_maximum: Option<f64>,
    /// Step constraint; doubles as the editor's step size.
    #[serde(default)]
    pub multiple_of: Option<f64>,
    /// Minimum string length (validator metadata).
    #[serde(default)]
    pub min_length: Option<usize>,
    /// Maximum string length; also caps the text editor.
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Regular expression the value must match (validator metadata).
    #[serde(default)]
    pub pattern: Option<String>,
    /// Format refinement for string properties.
    #[serde(default)]
    pub format: Option<PropertyFormat>,
    /// Allowed literal values; overrides type-based rendering.
    #[serde(rename = "enum", default)]
    pub choices: Option<Vec<Value>>,
    /// Element descriptor, required when `kind` is array.
    #[serde(default)]
    pub items: Option<ItemType>,
    /// Value descriptor, required when `kind` is object.
    #[serde(default)]
    pub additional_properties: Option<ItemType>,
    /// Render the editor disabled; the value passes through unchanged.
    #[serde(default)]
    pub read_only: bool,
    /// Minimum collection size (validator metadata).
    #[serde(default)]
    pub min_items: Option<usize>,
    /// Maximum collection size; suppresses the add control when reached.
    #[serde(default)]
    pub max_items: Option<usize>,
}

impl Property {
    /// Creates a property of the given type.
    #[must_use]
    pub fn new(title: impl Into<String>, kind: PropertyType) -> Self {
        Self {
            title: title.into(),
            description: None,
            kind,
            default: None,
            minimum: None,
            maximum: None,
            exclusive_minimum: None,
            exclusive_maximum: None,
            multiple_of: None,
            min_length: None,
            max_length: None,
            pattern: None,
            format: None,
            choices: None,
            items: None,
            additional_properties: None,
            read_only: false,
            min_items: None,
            max_items: None,
        }
    }

    /// Creates a boolean property.
    #[must_use]
    pub fn boolean(title: impl Into<String>) -> Self {
        Self::new(title, PropertyType::Boolean)
    }

    /// Creates an integer property.
    #[must_use]
    pub fn integer(title: impl Into<String>) -> Self {
        Self::new(title, PropertyType::Integer)
    }

    /// Creates a floating point property.
    #[must_use]
    pub fn number(title: impl Into<String>) -> Self {
        Self::new(title, PropertyType::Number)
    }

    /// Creates a string property.
    #[must_use]
    pub fn string(title: impl Into<String>) -> Self {
        Self::new(title, PropertyType::String)
    }

    /// Creates an array property with the given item descriptor.
    #[must_use]
    pub fn array(title: impl Into<String>, items: ItemType) -> Self {
        let mut property = Self::new(title, PropertyType::Array);
        property.items = Some(items);
        property
    }

    /// Creates a free-form map property with the given value descriptor.
    #[must_use]
    pub fn map(title: impl Into<String>, values: ItemType) -> Self {
        let mut property = Self::new(title, PropertyType::Object);
        property.additional_properties = Some(values);
        property
    }

    /// Sets the help text.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the inclusive lower bound.
    #[must_use]
    pub fn minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Sets the inclusive upper bound.
    #[must_use]
    pub fn maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Sets the exclusive lower bound.
    #[must_use]
    pub fn exclusive_minimum(mut self, minimum: f64) -> Self {
        self.exclusive_minimum = Some(minimum);
        self
    }

    /// Sets the exclusive upper bound.
    #[must_use]
    pub fn exclusive_maximum(mut self, maximum: f64) -> Self {
        self.exclusive_maximum = Some(maximum);
        self
    }

    /// Sets the step constraint.
    #[must_use]
    pub fn multiple_of(mut self, step: f64) -> Self {
        self.multiple_of = Some(step);
        self
    }

    /// Sets the minimum string length.
    #[must_use]
    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    /// Sets the maximum string length.
    #[must_use]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    /// Sets the pattern constraint.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the string format.
    #[must_use]
    pub fn format(mut self, format: PropertyFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Restricts the value to the given literals.
    #[must_use]
    pub fn choices(mut self, choices: Vec<Value>) -> Self {
        self.choices = Some(choices);
        self
    }

    /// Marks the field read-only.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Sets the minimum collection size.
    #[must_use]
    pub fn min_items(mut self, count: usize) -> Self {
        self.min_items = Some(count);
        self
    }

    /// Sets the maximum collection size.
    #[must_use]
    pub fn max_items(mut self, count: usize) -> Self {
        self.max_items = Some(count);
        self
    }
}

/// A forward reference to a named schema in `definitions`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NestedRef {
    /// Name of the referenced entry in the schema's `definitions`.
    #[serde(rename = "$ref")]
    pub reference: String,
}

impl NestedRef {
    /// Creates a reference to the named definition.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

/// One entry in a schema's `properties` map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PropertyKind {
    /// A reference to a nested object schema.
    Nested(NestedRef),
    /// An inline leaf descriptor.
    Leaf(Property),
}

/// Description of a form's shape.
///
/// `properties` preserves insertion order, which is the render order.
/// `definitions` holds the named sub-schemas that [`NestedRef`]s resolve
/// against; it is propagated unchanged onto resolved nested schemas so
/// transitively nested references still resolve.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Schema {
    /// Form title; also the source of the form's widget-key prefix.
    pub title: String,
    /// Field descriptors in render order.
    #[serde(default)]
    pub properties: IndexMap<String, PropertyKind>,
    /// Names of required fields.
    #[serde(default)]
    pub required: Vec<String>,
    /// Named sub-schemas for reference resolution.
    #[serde(rename = "$defs", alias = "definitions", default)]
    pub definitions: HashMap<String, Schema>,
}

impl Schema {
    /// Creates an empty schema with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            properties: IndexMap::new(),
            required: Vec::new(),
            definitions: HashMap::new(),
        }
    }

    /// Adds a leaf property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, property: Property) -> Self {
        self.properties
            .insert(key.into(), PropertyKind::Leaf(property));
        self
    }

    /// Adds a reference to a nested schema.
    #[must_use]
    pub fn nested(mut self, key: impl Into<String>, reference: impl Into<String>) -> Self {
        self.properties
            .insert(key.into(), PropertyKind::Nested(NestedRef::new(reference)));
        self
    }

    /// Marks a field as required.
    #[must_use]
    pub fn required(mut self, key: impl Into<String>) -> Self {
        self.required.push(key.into());
        self
    }

    /// Registers a named sub-schema.
    #[must_use]
    pub fn definition(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.definitions.insert(name.into(), schema);
        self
    }

    /// Whether the field is in the required set.
    #[must_use]
    pub fn is_required(&self, key: &str) -> bool {
        self.required.iter().any(|k| k == key)
    }

    /// Resolves a nested reference against `definitions`.
    ///
    /// The resolved schema inherits this schema's full `definitions` so a
    /// doubly-nested reference inside it still resolves.
    pub fn resolve(&self, reference: &str) -> Result<Schema, SchemaError> {
        let mut nested = self
            .definitions
            .get(reference)
            .cloned()
            .ok_or_else(|| SchemaError::UnresolvedReference {
                schema: self.title.clone(),
                reference: reference.to_string(),
            })?;
        nested.definitions = self.definitions.clone();
        Ok(nested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_builder() {
        let property = Property::integer("Age")
            .description("Age in years")
            .minimum(0.0)
            .maximum(130.0)
            .default_value(30);

        assert_eq!(property.title, "Age");
        assert_eq!(property.kind, PropertyType::Integer);
        assert_eq!(property.minimum, Some(0.0));
        assert_eq!(property.maximum, Some(130.0));
        assert_eq!(property.default, Some(json!(30)));
    }

    #[test]
    fn test_schema_builder_preserves_order() {
        let schema = Schema::new("Login")
            .property("username", Property::string("Username"))
            .property("password", Property::string("Password"))
            .required("username");

        let keys: Vec<_> = schema.properties.keys().cloned().collect();
        assert_eq!(keys, ["username", "password"]);
        assert!(schema.is_required("username"));
        assert!(!schema.is_required("password"));
    }

    #[test]
    fn test_deserialize_json_schema_dialect() {
        let schema: Schema = serde_json::from_value(json!({
            "title": "Person",
            "properties": {
                "name": {"title": "Name", "type": "string", "maxLength": 40},
                "score": {
                    "title": "Score",
                    "type": "integer",
                    "exclusiveMinimum": 0,
                    "multipleOf": 5,
                },
                "joined": {"title": "Joined", "type": "string", "format": "date-time"},
                "address": {"$ref": "Address"},
                "tags": {
                    "title": "Tags",
                    "type": "array",
                    "items": {"type": "string"},
                    "maxItems": 3,
                },
            },
            "required": ["name"],
            "$defs": {
                "Address": {
                    "title": "Address",
                    "properties": {
                        "street": {"title": "Street", "type": "string"},
                    },
                    "required": [],
                },
            },
        }))
        .expect("schema should deserialize");

        assert_eq!(schema.title, "Person");
        let keys: Vec<_> = schema.properties.keys().cloned().collect();
        assert_eq!(keys, ["name", "score", "joined", "address", "tags"]);

        match &schema.properties["score"] {
            PropertyKind::Leaf(p) => {
                assert_eq!(p.exclusive_minimum, Some(0.0));
                assert_eq!(p.multiple_of, Some(5.0));
            }
            PropertyKind::Nested(_) => panic!("score should be a leaf"),
        }
        match &schema.properties["joined"] {
            PropertyKind::Leaf(p) => assert_eq!(p.format, Some(PropertyFormat::DateTime)),
            PropertyKind::Nested(_) => panic!("joined should be a leaf"),
        }
        match &schema.properties["address"] {
            PropertyKind::Nested(r) => assert_eq!(r.reference, "Address"),
            PropertyKind::Leaf(_) => panic!("address should be a reference"),
        }
        match &schema.properties["tags"] {
            PropertyKind::Leaf(p) => {
                let items = p.items.as_ref().expect("tags should carry items");
                assert_eq!(items.kind, PropertyType::String);
                assert_eq!(p.max_items, Some(3));
            }
            PropertyKind::Nested(_) => panic!("tags should be a leaf"),
        }
    }

    #[test]
    fn test_resolve_propagates_definitions() {
        let inner = Schema::new("Inner").property("hobby", Property::string("Hobby"));
        let outer = Schema::new("Outer").nested("inner", "Inner");
        let root = Schema::new("Root")
            .nested("outer", "Outer")
            .definition("Outer", outer)
            .definition("Inner", inner);

        let resolved_outer = root.resolve("Outer").expect("Outer should resolve");
        // The nested schema inherits the root's full definitions, so the
        // doubly-nested reference still resolves.
        let resolved_inner = resolved_outer
            .resolve("Inner")
            .expect("Inner should resolve through propagation");
        assert_eq!(resolved_inner.title, "Inner");
    }

    #[test]
    fn test_resolve_missing_reference() {
        let schema = Schema::new("Root").nested("missing", "Nowhere");
        let err = schema.resolve("Nowhere").unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnresolvedReference {
                schema: "Root".to_string(),
                reference: "Nowhere".to_string(),
            }
        );
    }
}
