//! JSON value types.
//!
//! [`JsonValue`] is a closed tagged union over the six JSON types. Every
//! number is an `f64`; objects are sorted maps, so iteration follows key
//! order rather than source order and a repeated key keeps its last value.
//!
//! Typed accessors (`as_*`) never coerce: asking for the wrong variant fails
//! with [`ErrorCode::E200_TypeMismatch`].

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{ErrorCode, JsonResult};

/// Map type backing [`JsonValue::Object`].
pub type JsonObject = BTreeMap<String, JsonValue>;

/// A parsed JSON value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean (true/false)
    Bool(bool),
    /// JSON number, integer or fractional
    Number(f64),
    /// JSON string (well-formed UTF-8)
    String(String),
    /// JSON array of values
    Array(Vec<JsonValue>),
    /// JSON object with unique, sorted keys
    Object(JsonObject),
}

impl JsonValue {
    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }

    /// Returns true if this is a number value.
    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Returns the boolean, or E200 if this is not a Bool.
    pub fn as_bool(&self) -> JsonResult<bool> {
        match self {
            JsonValue::Bool(b) => Ok(*b),
            other => Err(other.mismatch("boolean")),
        }
    }

    /// Returns the number, or E200 if this is not a Number.
    pub fn as_f64(&self) -> JsonResult<f64> {
        match self {
            JsonValue::Number(n) => Ok(*n),
            other => Err(other.mismatch("number")),
        }
    }

    /// Returns the string slice, or E200 if this is not a String.
    pub fn as_str(&self) -> JsonResult<&str> {
        match self {
            JsonValue::String(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    /// Returns the elements, or E200 if this is not an Array.
    pub fn as_array(&self) -> JsonResult<&[JsonValue]> {
        match self {
            JsonValue::Array(a) => Ok(a),
            other => Err(other.mismatch("array")),
        }
    }

    /// Returns the map, or E200 if this is not an Object.
    pub fn as_object(&self) -> JsonResult<&JsonObject> {
        match self {
            JsonValue::Object(o) => Ok(o),
            other => Err(other.mismatch("object")),
        }
    }

    /// Get a value from an object by key.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Get a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        match self {
            JsonValue::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    fn mismatch(&self, expected: &'static str) -> ErrorCode {
        ErrorCode::E200_TypeMismatch(expected, self.type_name())
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Bool(value)
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Number(value)
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_owned())
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(value: Vec<JsonValue>) -> Self {
        JsonValue::Array(value)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(value: JsonObject) -> Self {
        JsonValue::Object(value)
    }
}

impl FromStr for JsonValue {
    type Err = ErrorCode;

    /// Parse with [`crate::json::Limits::strict`].
    fn from_str(s: &str) -> JsonResult<Self> {
        super::parser::parse(s.as_bytes())
    }
}
