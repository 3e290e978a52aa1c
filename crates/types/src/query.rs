use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use chroma_common::{ChromaError, ClientConfig, Result};

use crate::embedding::Embedding;
use crate::where_clause::WhereOperation;
use crate::where_document::WhereDocumentOperation;

/// Default number of results for a similarity query when none is configured
pub const DEFAULT_N_RESULTS: i32 = 10;

/// Result attributes a query asks to have returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncludeEnum {
    Documents,
    Metadatas,
    Distances,
    Embeddings,
}

impl IncludeEnum {
    /// Wire token
    pub fn as_str(&self) -> &'static str {
        match self {
            IncludeEnum::Documents => "documents",
            IncludeEnum::Metadatas => "metadatas",
            IncludeEnum::Distances => "distances",
            IncludeEnum::Embeddings => "embeddings",
        }
    }

    /// Default selection: documents, metadatas and distances
    pub fn default_include() -> Vec<IncludeEnum> {
        vec![
            IncludeEnum::Documents,
            IncludeEnum::Metadatas,
            IncludeEnum::Distances,
        ]
    }
}

/// Discrete configuration step applied to a query builder
pub type CollectionQueryOption = Box<dyn FnOnce(&mut CollectionQueryBuilder) -> Result<()>>;

/// Accumulator for query intent
///
/// Options fill the slots; `build` validates their combination and produces
/// the canonical request value. Query texts and query embeddings are mutually
/// exclusive; with neither present the builder describes a plain filtered
/// read instead of a similarity query.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionQueryBuilder {
    pub query_texts: Vec<String>,
    pub query_embeddings: Vec<Embedding>,
    pub n_results: Option<i32>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
    pub ids: Vec<String>,
    pub include: Vec<IncludeEnum>,
    pub where_clause: Option<Value>,
    pub where_document: Option<Value>,
    default_n_results: i32,
}

impl Default for CollectionQueryBuilder {
    fn default() -> Self {
        Self {
            query_texts: Vec::new(),
            query_embeddings: Vec::new(),
            n_results: None,
            limit: None,
            offset: None,
            ids: Vec::new(),
            include: Vec::new(),
            where_clause: None,
            where_document: None,
            default_n_results: DEFAULT_N_RESULTS,
        }
    }
}

/// Append a single query text
pub fn with_query_text(text: impl Into<String>) -> CollectionQueryOption {
    let text = text.into();
    Box::new(move |b| {
        if text.is_empty() {
            return Err(ChromaError::invalid_query("query text must not be empty"));
        }
        b.query_texts.push(text);
        Ok(())
    })
}

/// Replace the query texts
pub fn with_query_texts(texts: Vec<String>) -> CollectionQueryOption {
    Box::new(move |b| {
        if texts.iter().any(String::is_empty) {
            return Err(ChromaError::invalid_query("query texts must not be empty"));
        }
        b.query_texts = texts;
        Ok(())
    })
}

/// Append a single query embedding
pub fn with_query_embedding(embedding: Embedding) -> CollectionQueryOption {
    Box::new(move |b| {
        if !embedding.is_defined() {
            return Err(ChromaError::invalid_query(
                "query embedding must be defined and non-empty",
            ));
        }
        b.query_embeddings.push(embedding);
        Ok(())
    })
}

/// Replace the query embeddings
pub fn with_query_embeddings(embeddings: Vec<Embedding>) -> CollectionQueryOption {
    Box::new(move |b| {
        if embeddings.iter().any(|e| !e.is_defined()) {
            return Err(ChromaError::invalid_query(
                "query embeddings must be defined and non-empty",
            ));
        }
        b.query_embeddings = embeddings;
        Ok(())
    })
}

/// Set the similarity result count (must be positive)
pub fn with_n_results(n_results: i32) -> CollectionQueryOption {
    Box::new(move |b| {
        if n_results <= 0 {
            return Err(ChromaError::invalid_query(format!(
                "nResults must be positive, got {}",
                n_results
            )));
        }
        b.n_results = Some(n_results);
        Ok(())
    })
}

/// Set the read limit (must be non-negative)
pub fn with_limit(limit: i32) -> CollectionQueryOption {
    Box::new(move |b| {
        if limit < 0 {
            return Err(ChromaError::invalid_query(format!(
                "limit must be non-negative, got {}",
                limit
            )));
        }
        b.limit = Some(limit);
        Ok(())
    })
}

/// Set the read offset (must be non-negative)
pub fn with_offset(offset: i32) -> CollectionQueryOption {
    Box::new(move |b| {
        if offset < 0 {
            return Err(ChromaError::invalid_query(format!(
                "offset must be non-negative, got {}",
                offset
            )));
        }
        b.offset = Some(offset);
        Ok(())
    })
}

/// Replace the identifier filter
pub fn with_ids(ids: Vec<String>) -> CollectionQueryOption {
    Box::new(move |b| {
        b.ids = ids;
        Ok(())
    })
}

/// Replace the include-field selection
pub fn with_include(include: Vec<IncludeEnum>) -> CollectionQueryOption {
    Box::new(move |b| {
        b.include = include;
        Ok(())
    })
}

/// Set the metadata filter from a typed operation tree
///
/// The tree is validated, then stored in its encoded wire form. A later
/// assignment to the same slot replaces this one.
pub fn with_where(operation: WhereOperation) -> CollectionQueryOption {
    Box::new(move |b| {
        operation.validate()?;
        b.where_clause = Some(operation.to_value());
        Ok(())
    })
}

/// Set the metadata filter from a raw map, stored exactly as given
pub fn with_where_map(where_map: Value) -> CollectionQueryOption {
    Box::new(move |b| {
        b.where_clause = Some(where_map);
        Ok(())
    })
}

/// Set the document filter from a typed operation tree
pub fn with_where_document(operation: WhereDocumentOperation) -> CollectionQueryOption {
    Box::new(move |b| {
        operation.validate()?;
        b.where_document = Some(operation.to_value());
        Ok(())
    })
}

/// Set the document filter from a raw map, stored exactly as given
pub fn with_where_document_map(where_map: Value) -> CollectionQueryOption {
    Box::new(move |b| {
        b.where_document = Some(where_map);
        Ok(())
    })
}

impl CollectionQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder whose similarity-query result count defaults from the client
    /// configuration instead of [`DEFAULT_N_RESULTS`]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            default_n_results: config.default_n_results,
            ..Self::default()
        }
    }

    /// Apply configuration options in order
    pub fn apply(mut self, options: Vec<CollectionQueryOption>) -> Result<Self> {
        for option in options {
            option(&mut self)?;
        }
        Ok(self)
    }

    /// Whether the accumulated intent is a similarity query rather than a
    /// plain filtered read
    pub fn is_similarity_query(&self) -> bool {
        !self.query_texts.is_empty() || !self.query_embeddings.is_empty()
    }

    /// Validate the accumulated options and produce the canonical request
    ///
    /// Pure and idempotent; the builder is left untouched and repeated calls
    /// return the same request.
    pub fn build(&self) -> Result<QueryRequest> {
        if !self.query_texts.is_empty() && !self.query_embeddings.is_empty() {
            return Err(ChromaError::invalid_query(
                "query texts and query embeddings are mutually exclusive",
            ));
        }

        let similarity = self.is_similarity_query();
        let n_results = match self.n_results {
            Some(n) => Some(n),
            None if similarity => Some(self.default_n_results),
            None => None,
        };

        let include = if self.include.is_empty() {
            IncludeEnum::default_include()
        } else {
            self.include.clone()
        };

        debug!(
            similarity,
            texts = self.query_texts.len(),
            embeddings = self.query_embeddings.len(),
            "query built"
        );

        Ok(QueryRequest {
            query_texts: self.query_texts.clone(),
            query_embeddings: self
                .query_embeddings
                .iter()
                .map(Embedding::to_wire)
                .collect(),
            n_results,
            limit: self.limit,
            offset: self.offset,
            ids: self.ids.clone(),
            include,
            where_clause: self.where_clause.clone(),
            where_document: self.where_document.clone(),
        })
    }
}

/// Canonical, validated query request ready for the transport layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub query_texts: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub query_embeddings: Vec<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_results: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i32>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub ids: Vec<String>,

    pub include: Vec<IncludeEnum>,

    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<Value>,

    #[serde(rename = "where_document", skip_serializing_if = "Option::is_none")]
    pub where_document: Option<Value>,
}
