//! Chroma Embedding Functions
//!
//! Pluggable text-to-vector contract plus the deterministic hash-based
//! generator used for testing and offline development.

mod consistent_hash;
mod function;

pub use consistent_hash::ConsistentHashEmbeddingFunction;
pub use function::{embed_records_default, EmbeddingFunction};
