use serde::{Deserialize, Serialize};

use crate::embedding::Embedding;
use crate::id::IdGenerator;
use crate::metadata::Metadata;

/// A unit of content to be stored in a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Record {
    /// Record identifier, generated before upload when empty
    pub id: String,

    /// Document text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    /// Metadata map
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,

    /// Embedding vector, filled by an embedding function when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Embedding>,
}

impl Record {
    /// Create a record from document text
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            ..Default::default()
        }
    }

    /// Set the record id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the metadata map
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the embedding
    pub fn with_embedding(mut self, embedding: Embedding) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Document text, None when absent or empty
    pub fn document_content(&self) -> Option<&str> {
        self.document.as_deref().filter(|d| !d.is_empty())
    }

    /// Whether an embedding function should produce a vector for this record
    pub fn needs_embedding(&self, force: bool) -> bool {
        force || self.embedding.as_ref().map_or(true, |e| !e.is_defined())
    }

    /// Fill the id from a generator when empty, seeded by the document text
    pub fn ensure_id(&mut self, generator: &dyn IdGenerator) {
        if self.id.is_empty() {
            self.id = generator.generate(self.document.as_deref().unwrap_or(""));
        }
    }
}
