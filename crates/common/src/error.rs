/// Chroma client error types
#[derive(Debug, thiserror::Error)]
pub enum ChromaError {
    /// Required text input was empty
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed or mistyped numeric vector
    #[error("Invalid embedding value: {0}")]
    InvalidEmbeddingValue(String),

    /// Unsupported metadata value type for a key
    #[error("Invalid metadata value for key '{key}': {value}")]
    InvalidMetadataValue { key: String, value: String },

    /// Query builder validation failure
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Structurally invalid where / where-document expression
    #[error("Invalid filter expression: {0}")]
    InvalidFilter(String),

    /// Unknown distance function token
    #[error("Unsupported distance function: {0}")]
    UnsupportedDistanceFunction(String),

    /// Embedding call was cancelled through its cancellation token
    #[error("Operation cancelled")]
    Cancelled,

    /// Batch embedding failed for a specific record
    #[error("Embedding failed for record '{id}': {reason}")]
    RecordEmbedding { id: String, reason: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChromaError {
    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create invalid embedding value error
    pub fn invalid_embedding<S: Into<String>>(msg: S) -> Self {
        Self::InvalidEmbeddingValue(msg.into())
    }

    /// Create invalid metadata value error
    pub fn invalid_metadata<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Self::InvalidMetadataValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create invalid query error
    pub fn invalid_query<S: Into<String>>(msg: S) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create invalid filter expression error
    pub fn invalid_filter<S: Into<String>>(msg: S) -> Self {
        Self::InvalidFilter(msg.into())
    }

    /// Create per-record embedding error
    pub fn record_embedding<I: Into<String>, R: Into<String>>(id: I, reason: R) -> Self {
        Self::RecordEmbedding {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = ChromaError::invalid_metadata("color", "[1,2]");
        assert_eq!(
            err.to_string(),
            "Invalid metadata value for key 'color': [1,2]"
        );

        let err = ChromaError::record_embedding("ID1", "no document content");
        assert_eq!(
            err.to_string(),
            "Embedding failed for record 'ID1': no document content"
        );

        let err = ChromaError::UnsupportedDistanceFunction("bogus".to_string());
        assert_eq!(err.to_string(), "Unsupported distance function: bogus");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ChromaError = parse_err.into();
        assert!(matches!(err, ChromaError::Json(_)));
    }
}
