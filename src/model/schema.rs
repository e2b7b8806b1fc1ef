//! Shallow, typed view over the JSON-Schema-like documents attached to
//! modules and tools.
//!
//! Schemas stay open-ended `serde_json::Value`s in the entity model. This view
//! only classifies the top level so the validator can check the shape without
//! turning into a JSON Schema engine.

use serde_json::{Map, Value};

/// JSON Schema primitive type names accepted in a `type` key.
pub const PRIMITIVE_TYPES: [&str; 7] = [
    "object", "array", "string", "number", "integer", "boolean", "null",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
    Unknown(String),
}

impl SchemaType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "object" => SchemaType::Object,
            "array" => SchemaType::Array,
            "string" => SchemaType::String,
            "number" => SchemaType::Number,
            "integer" => SchemaType::Integer,
            "boolean" => SchemaType::Boolean,
            "null" => SchemaType::Null,
            other => SchemaType::Unknown(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SchemaType::Unknown(_))
    }
}

/// Top-level classification of a schema document.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaShape<'a> {
    Object(ObjectSchema<'a>),
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl<'a> SchemaShape<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => SchemaShape::Object(ObjectSchema::new(map)),
            Value::Array(_) => SchemaShape::Array,
            Value::String(_) => SchemaShape::String,
            Value::Number(_) => SchemaShape::Number,
            Value::Bool(_) => SchemaShape::Boolean,
            Value::Null => SchemaShape::Null,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SchemaShape::Object(_) => "object",
            SchemaShape::Array => "array",
            SchemaShape::String => "string",
            SchemaShape::Number => "number",
            SchemaShape::Boolean => "boolean",
            SchemaShape::Null => "null",
        }
    }
}

/// The declared `type` of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredType<'a> {
    Absent,
    Single(SchemaType),
    /// `"type": ["string", "null"]`
    Union(Vec<SchemaType>),
    /// A `type` key that is neither a string nor an array of strings.
    Malformed(&'a Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> ObjectSchema<'a> {
    fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    pub fn declared_type(&self) -> DeclaredType<'a> {
        let Some(raw) = self.map.get("type") else {
            return DeclaredType::Absent;
        };
        match raw {
            Value::String(name) => DeclaredType::Single(SchemaType::from_name(name)),
            Value::Array(items) => {
                let mut types = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(name) => types.push(SchemaType::from_name(name)),
                        _ => return DeclaredType::Malformed(raw),
                    }
                }
                DeclaredType::Union(types)
            }
            other => DeclaredType::Malformed(other),
        }
    }

    /// Every key other than `type`.
    pub fn extras(&self) -> impl Iterator<Item = (&'a String, &'a Value)> {
        self.map.iter().filter(|(k, _)| k.as_str() != "type")
    }
}
