use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use chroma_common::{ChromaError, Result};

/// Record metadata map
pub type Metadata = HashMap<String, MetadataValue>;

/// Scalar metadata value
///
/// Chroma metadata supports strings, integers, floats and booleans; nothing
/// nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl MetadataValue {
    /// Convert a JSON value into a metadata scalar
    ///
    /// `key` is used only for error reporting.
    pub fn from_value(key: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(MetadataValue::Str(s.clone())),
            Value::Bool(b) => Ok(MetadataValue::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(MetadataValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(MetadataValue::Float(f))
                } else {
                    Err(ChromaError::invalid_metadata(key, n.to_string()))
                }
            }
            other => Err(ChromaError::invalid_metadata(key, other.to_string())),
        }
    }

    /// Encode to the JSON wire form
    pub fn to_value(&self) -> Value {
        match self {
            MetadataValue::Str(s) => Value::String(s.clone()),
            MetadataValue::Bool(b) => Value::Bool(*b),
            MetadataValue::Int(i) => (*i).into(),
            MetadataValue::Float(f) => (*f).into(),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::Str(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::Str(s)
    }
}

impl From<i64> for MetadataValue {
    fn from(i: i64) -> Self {
        MetadataValue::Int(i)
    }
}

impl From<i32> for MetadataValue {
    fn from(i: i32) -> Self {
        MetadataValue::Int(i as i64)
    }
}

impl From<f64> for MetadataValue {
    fn from(f: f64) -> Self {
        MetadataValue::Float(f)
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        MetadataValue::Bool(b)
    }
}

/// Convert a raw JSON object into a typed metadata map
pub fn metadata_from_value(value: &Value) -> Result<Metadata> {
    let obj = value.as_object().ok_or_else(|| {
        ChromaError::invalid_metadata("<root>", format!("expected an object, got {}", value))
    })?;

    let mut metadata = Metadata::new();
    for (key, v) in obj {
        metadata.insert(key.clone(), MetadataValue::from_value(key, v)?);
    }
    Ok(metadata)
}
