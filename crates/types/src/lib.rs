//! Chroma Client Core Types
//!
//! Query construction, filter expressions and value types for talking to a
//! Chroma vector store.

mod api;
mod distance;
mod embedding;
mod id;
mod metadata;
mod query;
mod record;
mod where_clause;
mod where_document;

pub use api::{CollectionTransport, QueryResult};
pub use distance::{to_distance_function, DistanceFunction, IntoDistanceFunction};
pub use embedding::Embedding;
pub use id::{IdGenerator, Sha256Generator, UlidGenerator, UuidGenerator};
pub use metadata::{metadata_from_value, Metadata, MetadataValue};
pub use query::{
    with_ids, with_include, with_limit, with_n_results, with_offset, with_query_embedding,
    with_query_embeddings, with_query_text, with_query_texts, with_where, with_where_document,
    with_where_document_map, with_where_map, CollectionQueryBuilder, CollectionQueryOption,
    IncludeEnum, QueryRequest, DEFAULT_N_RESULTS,
};
pub use record::Record;
pub use where_clause::{WhereOperand, WhereOperation, WhereOperator};
pub use where_document::WhereDocumentOperation;
