use serde::{Deserialize, Serialize};
use serde_json::Value;

use chroma_common::{ChromaError, Result};

/// Dual-typed numeric vector
///
/// Holds either float32 or int32 components, never both. The wire form is a
/// plain JSON array of numbers; the element types decide which representation
/// a decoded value gets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Embedding {
    /// Float components
    #[serde(skip_serializing_if = "Option::is_none")]
    pub float32: Option<Vec<f32>>,

    /// Integer components
    #[serde(skip_serializing_if = "Option::is_none")]
    pub int32: Option<Vec<i32>>,
}

impl Embedding {
    /// Create embedding from float components
    pub fn from_float32(values: Vec<f32>) -> Self {
        Self {
            float32: Some(values),
            int32: None,
        }
    }

    /// Create embedding from integer components
    pub fn from_int32(values: Vec<i32>) -> Self {
        Self {
            float32: None,
            int32: Some(values),
        }
    }

    /// Create one embedding per row of float components
    pub fn from_float32_batch(rows: Vec<Vec<f32>>) -> Vec<Self> {
        rows.into_iter().map(Self::from_float32).collect()
    }

    /// Decode an embedding from its wire form
    ///
    /// The wire value must be an array of numbers. An all-integer array
    /// becomes the int32 representation; any float element promotes the whole
    /// array to float32. Non-numeric elements are rejected.
    pub fn from_wire(value: &Value) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| {
            ChromaError::invalid_embedding(format!("expected a numeric array, got {}", value))
        })?;

        let mut all_ints = true;
        for item in items {
            match item {
                Value::Number(n) => {
                    if n.as_i64().is_none() {
                        all_ints = false;
                    }
                }
                other => {
                    return Err(ChromaError::invalid_embedding(format!(
                        "non-numeric element in embedding: {}",
                        other
                    )));
                }
            }
        }

        if all_ints {
            let ints = items
                .iter()
                .map(|v| {
                    let n = v.as_i64().unwrap();
                    i32::try_from(n).map_err(|_| {
                        ChromaError::invalid_embedding(format!("integer out of i32 range: {}", n))
                    })
                })
                .collect::<Result<Vec<i32>>>()?;
            Ok(Self::from_int32(ints))
        } else {
            let floats = items
                .iter()
                .map(|v| v.as_f64().unwrap() as f32)
                .collect::<Vec<f32>>();
            Ok(Self::from_float32(floats))
        }
    }

    /// Float view, nil when the value holds integers
    pub fn float32(&self) -> Option<&[f32]> {
        self.float32.as_deref()
    }

    /// Integer view, nil when the value holds floats
    pub fn int32(&self) -> Option<&[i32]> {
        self.int32.as_deref()
    }

    /// Whether exactly one representation is present and non-empty
    pub fn is_defined(&self) -> bool {
        match (&self.float32, &self.int32) {
            (Some(f), None) => !f.is_empty(),
            (None, Some(i)) => !i.is_empty(),
            _ => false,
        }
    }

    /// Number of components in the populated representation
    pub fn dimension(&self) -> usize {
        match (&self.float32, &self.int32) {
            (Some(f), _) => f.len(),
            (_, Some(i)) => i.len(),
            _ => 0,
        }
    }

    /// Encode back to the wire form (JSON array of numbers)
    pub fn to_wire(&self) -> Value {
        match (&self.float32, &self.int32) {
            (Some(f), _) => Value::Array(f.iter().map(|v| (*v).into()).collect()),
            (_, Some(i)) => Value::Array(i.iter().map(|v| (*v).into()).collect()),
            _ => Value::Array(vec![]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_float32() {
        let e = Embedding::from_float32(vec![0.1, 0.2]);
        assert_eq!(e.float32(), Some(&[0.1f32, 0.2][..]));
        assert!(e.int32().is_none());
        assert!(e.is_defined());
        assert_eq!(e.dimension(), 2);
    }

    #[test]
    fn test_from_int32() {
        let e = Embedding::from_int32(vec![1, 2, 3]);
        assert_eq!(e.int32(), Some(&[1, 2, 3][..]));
        assert!(e.float32().is_none());
        assert!(e.is_defined());
    }

    #[test]
    fn test_empty_is_not_defined() {
        assert!(!Embedding::from_float32(vec![]).is_defined());
        assert!(!Embedding::from_int32(vec![]).is_defined());
        assert!(!Embedding::default().is_defined());
    }

    #[test]
    fn test_from_wire_all_ints() {
        let e = Embedding::from_wire(&json!([1, 2, 3])).unwrap();
        assert_eq!(e.int32(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn test_from_wire_floats() {
        let e = Embedding::from_wire(&json!([0.5, 1.25])).unwrap();
        assert_eq!(e.float32(), Some(&[0.5f32, 1.25][..]));
    }

    #[test]
    fn test_from_wire_mixed_promotes_to_float() {
        let e = Embedding::from_wire(&json!([1, 0.5])).unwrap();
        assert_eq!(e.float32(), Some(&[1.0f32, 0.5][..]));
    }

    #[test]
    fn test_from_wire_rejects_non_numeric() {
        let err = Embedding::from_wire(&json!([1, "two"])).unwrap_err();
        assert!(matches!(err, ChromaError::InvalidEmbeddingValue(_)));

        let err = Embedding::from_wire(&json!("nope")).unwrap_err();
        assert!(matches!(err, ChromaError::InvalidEmbeddingValue(_)));
    }

    #[test]
    fn test_wire_roundtrip() {
        let e = Embedding::from_int32(vec![4, 5]);
        let back = Embedding::from_wire(&e.to_wire()).unwrap();
        assert_eq!(back, e);

        let e = Embedding::from_float32(vec![0.25, 0.75]);
        let back = Embedding::from_wire(&e.to_wire()).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn test_batch_constructor_preserves_order() {
        let batch = Embedding::from_float32_batch(vec![vec![1.0], vec![2.0]]);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].float32(), Some(&[1.0f32][..]));
        assert_eq!(batch[1].float32(), Some(&[2.0f32][..]));
    }
}
