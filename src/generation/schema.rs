//! Structural schema tree and its tagged-variant view
//!
//! Schemas arrive from the description parser already `$ref`-resolved. The
//! conversion from raw JSON is total: fragments that do not fit the expected
//! shape are dropped field by field, so every input yields some `Schema`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, BTreeSet};

/// Nesting depth past which schema translation stops descending
pub const MAX_SCHEMA_DEPTH: usize = 32;

/// Structural description of a value (the subset of JSON Schema we translate)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<JsonValue>>,
    /// Kept verbatim; only its presence matters for translation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<JsonValue>,
}

/// Primitive value kinds. `integer` folds into `Number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Number,
    Boolean,
}

/// Tagged view over a [`Schema`] node, in translation priority order
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaShape<'a> {
    /// Closed set of stringified literals
    Enum(Vec<String>),
    Primitive(Primitive),
    /// Array with an optional element schema
    Array(Option<&'a Schema>),
    /// Object with declared properties
    Object {
        properties: &'a BTreeMap<String, Schema>,
        required: BTreeSet<&'a str>,
    },
    /// Object with no declared properties but `additionalProperties`
    Record,
    /// Object with neither properties nor `additionalProperties`
    EmptyObject,
    /// Anything else
    Any,
}

impl Schema {
    /// Permissive schema accepting anything
    pub fn any() -> Self {
        Self::default()
    }

    pub fn of_type(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Default::default()
        }
    }

    pub fn array_of(items: Schema) -> Self {
        Self {
            schema_type: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    pub fn object<I, K>(properties: I, required: &[&str]) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self {
            schema_type: Some("object".to_string()),
            properties: Some(
                properties
                    .into_iter()
                    .map(|(k, v)| (k.into(), v))
                    .collect(),
            ),
            required: (!required.is_empty())
                .then(|| required.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    pub fn with_enum(mut self, values: Vec<JsonValue>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Converts a raw JSON schema fragment, ignoring anything malformed
    pub fn from_json(value: &JsonValue) -> Self {
        Self::from_json_at(value, 0)
    }

    fn from_json_at(value: &JsonValue, depth: usize) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        if depth > MAX_SCHEMA_DEPTH {
            return Self::default();
        }

        let schema_type = obj
            .get("type")
            .and_then(JsonValue::as_str)
            .map(String::from);

        let items = obj
            .get("items")
            .filter(|v| v.is_object())
            .map(|v| Box::new(Self::from_json_at(v, depth + 1)));

        let properties = obj
            .get("properties")
            .and_then(JsonValue::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::from_json_at(v, depth + 1)))
                    .collect()
            });

        let required = obj.get("required").and_then(JsonValue::as_array).map(|arr| {
            arr.iter()
                .filter_map(JsonValue::as_str)
                .map(String::from)
                .collect()
        });

        let enum_values = obj.get("enum").and_then(JsonValue::as_array).cloned();
        let additional_properties = obj.get("additionalProperties").cloned();

        Self {
            schema_type,
            items,
            properties,
            required,
            enum_values,
            additional_properties,
        }
    }

    /// Names listed in `required`
    pub fn required_set(&self) -> BTreeSet<&str> {
        self.required
            .iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Classifies this node. Enum wins over type.
    pub fn shape(&self) -> SchemaShape<'_> {
        if let Some(values) = self.enum_values.as_ref().filter(|v| !v.is_empty()) {
            return SchemaShape::Enum(values.iter().map(enum_literal).collect());
        }

        match self.schema_type.as_deref() {
            Some("string") => SchemaShape::Primitive(Primitive::String),
            Some("number") | Some("integer") => SchemaShape::Primitive(Primitive::Number),
            Some("boolean") => SchemaShape::Primitive(Primitive::Boolean),
            Some("array") => SchemaShape::Array(self.items.as_deref()),
            Some("object") => match self.properties.as_ref().filter(|p| !p.is_empty()) {
                Some(properties) => SchemaShape::Object {
                    properties,
                    required: self.required_set(),
                },
                None if self.additional_properties.is_some() => SchemaShape::Record,
                None => SchemaShape::EmptyObject,
            },
            _ => SchemaShape::Any,
        }
    }
}

fn enum_literal(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
