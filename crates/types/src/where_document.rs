use serde_json::{Map, Value};

use chroma_common::{ChromaError, Result};

/// Recursive boolean predicate over raw document text
///
/// Leaves are substring containment checks; composites AND/OR an ordered list
/// of children. Wire form: `{"$contains": "text"}`, `{"$not_contains": "text"}`,
/// `{"$and"|"$or": [child, ...]}`.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereDocumentOperation {
    Contains(String),
    NotContains(String),
    Composite {
        and: bool,
        children: Vec<WhereDocumentOperation>,
    },
}

impl WhereDocumentOperation {
    pub fn contains(text: impl Into<String>) -> Self {
        WhereDocumentOperation::Contains(text.into())
    }

    pub fn not_contains(text: impl Into<String>) -> Self {
        WhereDocumentOperation::NotContains(text.into())
    }

    pub fn and(children: Vec<WhereDocumentOperation>) -> Self {
        WhereDocumentOperation::Composite {
            and: true,
            children,
        }
    }

    pub fn or(children: Vec<WhereDocumentOperation>) -> Self {
        WhereDocumentOperation::Composite {
            and: false,
            children,
        }
    }

    /// Check structural invariants: non-empty literals and composites
    pub fn validate(&self) -> Result<()> {
        match self {
            WhereDocumentOperation::Contains(text) => {
                if text.is_empty() {
                    return Err(ChromaError::invalid_filter(
                        "$contains requires a non-empty literal",
                    ));
                }
                Ok(())
            }
            WhereDocumentOperation::NotContains(text) => {
                if text.is_empty() {
                    return Err(ChromaError::invalid_filter(
                        "$not_contains requires a non-empty literal",
                    ));
                }
                Ok(())
            }
            WhereDocumentOperation::Composite { and, children } => {
                if children.is_empty() {
                    let token = if *and { "$and" } else { "$or" };
                    return Err(ChromaError::invalid_filter(format!(
                        "{} must have at least one child",
                        token
                    )));
                }
                for child in children {
                    child.validate()?;
                }
                Ok(())
            }
        }
    }

    /// Render to the wire map structure
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        match self {
            WhereDocumentOperation::Contains(text) => {
                obj.insert("$contains".to_string(), Value::String(text.clone()));
            }
            WhereDocumentOperation::NotContains(text) => {
                obj.insert("$not_contains".to_string(), Value::String(text.clone()));
            }
            WhereDocumentOperation::Composite { and, children } => {
                let token = if *and { "$and" } else { "$or" };
                obj.insert(
                    token.to_string(),
                    Value::Array(
                        children
                            .iter()
                            .map(WhereDocumentOperation::to_value)
                            .collect(),
                    ),
                );
            }
        }
        Value::Object(obj)
    }

    /// Reconstruct a tree from its wire map structure
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            ChromaError::invalid_filter(format!(
                "expected a document filter object, got {}",
                value
            ))
        })?;
        if obj.len() != 1 {
            return Err(ChromaError::invalid_filter(format!(
                "document filter node must have exactly one key, got {}",
                obj.len()
            )));
        }
        let (key, inner) = obj.iter().next().unwrap();

        let op = match key.as_str() {
            "$contains" | "$not_contains" => {
                let text = inner.as_str().ok_or_else(|| {
                    ChromaError::invalid_filter(format!(
                        "{} expects a string literal, got {}",
                        key, inner
                    ))
                })?;
                if key == "$contains" {
                    WhereDocumentOperation::contains(text)
                } else {
                    WhereDocumentOperation::not_contains(text)
                }
            }
            "$and" | "$or" => {
                let items = inner.as_array().ok_or_else(|| {
                    ChromaError::invalid_filter(format!("{} expects an array of children", key))
                })?;
                let children = items
                    .iter()
                    .map(WhereDocumentOperation::from_value)
                    .collect::<Result<Vec<_>>>()?;
                WhereDocumentOperation::Composite {
                    and: key == "$and",
                    children,
                }
            }
            other => {
                return Err(ChromaError::invalid_filter(format!(
                    "unsupported document filter operator '{}'",
                    other
                )));
            }
        };
        op.validate()?;
        Ok(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaf_encoding() {
        assert_eq!(
            WhereDocumentOperation::contains("dogs").to_value(),
            json!({"$contains": "dogs"})
        );
        assert_eq!(
            WhereDocumentOperation::not_contains("cats").to_value(),
            json!({"$not_contains": "cats"})
        );
    }

    #[test]
    fn test_composite_roundtrip() {
        let op = WhereDocumentOperation::or(vec![
            WhereDocumentOperation::contains("dogs"),
            WhereDocumentOperation::and(vec![
                WhereDocumentOperation::contains("cats"),
                WhereDocumentOperation::not_contains("birds"),
            ]),
        ]);
        op.validate().unwrap();
        let decoded = WhereDocumentOperation::from_value(&op.to_value()).unwrap();
        assert_eq!(decoded, op);
    }

    #[test]
    fn test_empty_literal_rejected() {
        let err = WhereDocumentOperation::contains("").validate().unwrap_err();
        assert!(err.to_string().contains("$contains"));
    }

    #[test]
    fn test_empty_composite_rejected() {
        assert!(WhereDocumentOperation::and(vec![]).validate().is_err());
    }

    #[test]
    fn test_decode_rejects_metadata_style_leaf() {
        let err = WhereDocumentOperation::from_value(&json!({"field": {"$eq": 1}})).unwrap_err();
        assert!(err.to_string().contains("field"));
    }
}
