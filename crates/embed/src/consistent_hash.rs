use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio_util::sync::CancellationToken;

use chroma_common::{ChromaError, Result};
use chroma_types::Embedding;

use crate::function::EmbeddingFunction;

/// Default output dimensionality when none is configured
const DEFAULT_DIM: usize = 384;

/// Deterministic, provider-free embedding function
///
/// Maps text to a float vector of exactly `dim` components in [0, 1]: the
/// text is SHA-256 hashed, the hex digest is tiled to `dim` characters, and
/// each hex digit becomes `digit / 15.0`. The same text always yields the
/// identical vector, which makes embedding-dependent logic testable without a
/// live provider. The outputs are not meaningful similarity vectors.
#[derive(Debug, Clone, Copy)]
pub struct ConsistentHashEmbeddingFunction {
    dim: usize,
}

impl ConsistentHashEmbeddingFunction {
    /// Create a generator with the given output dimensionality
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    /// Create a generator sized from the client configuration
    pub fn from_config(config: &chroma_common::ClientConfig) -> Self {
        Self::new(config.embedding_dim)
    }

    /// Output dimensionality
    pub fn dim(&self) -> usize {
        self.dim
    }

    fn embed_text(&self, text: &str) -> Embedding {
        let digest = hex::encode(Sha256::digest(text.as_bytes()));
        let digits = digest.as_bytes();

        let values = (0..self.dim)
            .map(|i| {
                let c = digits[i % digits.len()] as char;
                let digit = c.to_digit(16).unwrap_or(0);
                digit as f32 / 15.0
            })
            .collect();
        Embedding::from_float32(values)
    }
}

impl Default for ConsistentHashEmbeddingFunction {
    fn default() -> Self {
        Self::new(DEFAULT_DIM)
    }
}

#[async_trait]
impl EmbeddingFunction for ConsistentHashEmbeddingFunction {
    async fn embed_documents(
        &self,
        ctx: &CancellationToken,
        documents: &[String],
    ) -> Result<Vec<Embedding>> {
        if ctx.is_cancelled() {
            return Err(ChromaError::Cancelled);
        }
        Ok(documents.iter().map(|d| self.embed_text(d)).collect())
    }

    async fn embed_query(&self, ctx: &CancellationToken, text: &str) -> Result<Embedding> {
        if ctx.is_cancelled() {
            return Err(ChromaError::Cancelled);
        }
        if text.is_empty() {
            return Err(ChromaError::invalid_input("query text must not be empty"));
        }
        Ok(self.embed_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_vector() {
        let ef = ConsistentHashEmbeddingFunction::new(10);
        let ctx = CancellationToken::new();
        let embedding = ef.embed_query(&ctx, "test document").await.unwrap();
        let expected: Vec<f32> = vec![
            0.26666668, 0.53333336, 0.2, 0.46666667, 0.26666668, 0.46666667, 0.6, 0.06666667,
            0.13333334, 0.33333334,
        ];
        assert_eq!(embedding.float32(), Some(&expected[..]));
    }

    #[tokio::test]
    async fn test_deterministic() {
        let ef = ConsistentHashEmbeddingFunction::new(64);
        let ctx = CancellationToken::new();
        let a = ef.embed_query(&ctx, "same text").await.unwrap();
        let b = ef.embed_query(&ctx, "same text").await.unwrap();
        assert_eq!(a, b);

        let other = ef.embed_query(&ctx, "different text").await.unwrap();
        assert_ne!(a, other);
    }

    #[tokio::test]
    async fn test_dimension_and_range() {
        let ctx = CancellationToken::new();
        for dim in [1usize, 10, 100, 500] {
            let ef = ConsistentHashEmbeddingFunction::new(dim);
            let embedding = ef.embed_query(&ctx, "x").await.unwrap();
            let values = embedding.float32().unwrap();
            assert_eq!(values.len(), dim);
            assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[tokio::test]
    async fn test_different_dims_differ() {
        let ctx = CancellationToken::new();
        let small = ConsistentHashEmbeddingFunction::new(10)
            .embed_query(&ctx, "text")
            .await
            .unwrap();
        let large = ConsistentHashEmbeddingFunction::new(100)
            .embed_query(&ctx, "text")
            .await
            .unwrap();
        assert_ne!(small.dimension(), large.dimension());
    }

    #[tokio::test]
    async fn test_empty_query_text_rejected() {
        let ef = ConsistentHashEmbeddingFunction::new(10);
        let ctx = CancellationToken::new();
        let err = ef.embed_query(&ctx, "").await.unwrap_err();
        assert!(matches!(err, ChromaError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_embed_documents_preserves_order_and_count() {
        let ef = ConsistentHashEmbeddingFunction::new(10);
        let ctx = CancellationToken::new();

        let empty = ef.embed_documents(&ctx, &[]).await.unwrap();
        assert!(empty.is_empty());

        let docs = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let embeddings = ef.embed_documents(&ctx, &docs).await.unwrap();
        assert_eq!(embeddings.len(), 3);
        assert_eq!(embeddings[0], embeddings[2]);
        assert_ne!(embeddings[0], embeddings[1]);
    }

    #[tokio::test]
    async fn test_cancelled_token() {
        let ef = ConsistentHashEmbeddingFunction::default();
        let ctx = CancellationToken::new();
        ctx.cancel();
        assert!(matches!(
            ef.embed_query(&ctx, "text").await.unwrap_err(),
            ChromaError::Cancelled
        ));
        assert!(matches!(
            ef.embed_documents(&ctx, &["d".to_string()]).await.unwrap_err(),
            ChromaError::Cancelled
        ));
    }

    #[test]
    fn test_from_config() {
        let config = chroma_common::ClientConfig::default();
        let ef = ConsistentHashEmbeddingFunction::from_config(&config);
        assert_eq!(ef.dim(), config.embedding_dim);
    }

    #[tokio::test]
    async fn test_default_dim() {
        let ef = ConsistentHashEmbeddingFunction::default();
        assert_eq!(ef.dim(), 384);
        let ctx = CancellationToken::new();
        let embedding = ef.embed_query(&ctx, "text").await.unwrap();
        assert_eq!(embedding.dimension(), 384);
    }
}
