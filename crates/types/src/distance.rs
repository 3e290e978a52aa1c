use serde::{Deserialize, Serialize};

use chroma_common::{ChromaError, Result};

/// Distance metric used by a collection's similarity index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceFunction {
    #[default]
    #[serde(rename = "l2")]
    L2,
    #[serde(rename = "cosine")]
    Cosine,
    #[serde(rename = "ip")]
    InnerProduct,
}

impl DistanceFunction {
    /// Canonical wire token
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceFunction::L2 => "l2",
            DistanceFunction::Cosine => "cosine",
            DistanceFunction::InnerProduct => "ip",
        }
    }
}

impl TryFrom<&str> for DistanceFunction {
    type Error = ChromaError;

    // tokens are case-sensitive
    fn try_from(value: &str) -> Result<Self> {
        match value {
            "l2" => Ok(DistanceFunction::L2),
            "cosine" => Ok(DistanceFunction::Cosine),
            "ip" => Ok(DistanceFunction::InnerProduct),
            other => Err(ChromaError::UnsupportedDistanceFunction(other.to_string())),
        }
    }
}

/// Values the distance resolver accepts: raw tokens or already-resolved
/// enumeration values.
pub trait IntoDistanceFunction {
    fn into_distance_function(self) -> Result<DistanceFunction>;
}

impl IntoDistanceFunction for DistanceFunction {
    // resolving an already-resolved value is a no-op
    fn into_distance_function(self) -> Result<DistanceFunction> {
        Ok(self)
    }
}

impl IntoDistanceFunction for &str {
    fn into_distance_function(self) -> Result<DistanceFunction> {
        DistanceFunction::try_from(self)
    }
}

impl IntoDistanceFunction for String {
    fn into_distance_function(self) -> Result<DistanceFunction> {
        DistanceFunction::try_from(self.as_str())
    }
}

/// Resolve a distance-metric identifier into the closed enumeration
pub fn to_distance_function<T: IntoDistanceFunction>(value: T) -> Result<DistanceFunction> {
    value.into_distance_function()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_canonical_tokens() {
        assert_eq!(to_distance_function("l2").unwrap(), DistanceFunction::L2);
        assert_eq!(
            to_distance_function("cosine").unwrap(),
            DistanceFunction::Cosine
        );
        assert_eq!(
            to_distance_function("ip").unwrap(),
            DistanceFunction::InnerProduct
        );
    }

    #[test]
    fn test_rejects_unknown_token_naming_it() {
        let err = to_distance_function("bogus").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported distance function: bogus");
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert!(to_distance_function("L2").is_err());
        assert!(to_distance_function("Cosine").is_err());
    }

    #[test]
    fn test_already_resolved_is_noop() {
        assert_eq!(
            to_distance_function(DistanceFunction::Cosine).unwrap(),
            DistanceFunction::Cosine
        );
        assert_eq!(
            to_distance_function("ip".to_string()).unwrap(),
            DistanceFunction::InnerProduct
        );
    }

    #[test]
    fn test_wire_serialization() {
        assert_eq!(
            serde_json::to_string(&DistanceFunction::InnerProduct).unwrap(),
            "\"ip\""
        );
        let back: DistanceFunction = serde_json::from_str("\"ip\"").unwrap();
        assert_eq!(back, DistanceFunction::InnerProduct);
    }
}
