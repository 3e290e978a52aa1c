use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use chroma_common::Result;

use crate::embedding::Embedding;
use crate::metadata::Metadata;
use crate::query::QueryRequest;
use crate::record::Record;

/// Matched records for a query, one inner sequence per query index
///
/// Inner sequences are populated according to the request's include selection;
/// unselected attributes stay empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    pub ids: Vec<Vec<String>>,

    #[serde(default)]
    pub documents: Vec<Vec<String>>,

    #[serde(default)]
    pub metadatas: Vec<Vec<Metadata>>,

    #[serde(default)]
    pub distances: Vec<Vec<f32>>,

    #[serde(default)]
    pub embeddings: Vec<Vec<Embedding>>,
}

/// Contract the core consumes from the transport/CRUD layer
///
/// Implementations own the HTTP client and wire encoding; the core only hands
/// them finalized requests and records.
#[async_trait]
pub trait CollectionTransport: Send + Sync {
    /// Submit a finalized query request and return matched records
    async fn query(&self, request: QueryRequest) -> Result<QueryResult>;

    /// Submit records for upsert; records are expected to carry embeddings
    async fn upsert(&self, records: Vec<Record>) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{with_query_text, CollectionQueryBuilder};
    use std::sync::Mutex;

    /// Transport stub that records what it was handed
    struct RecordingTransport {
        seen: Mutex<Vec<QueryRequest>>,
    }

    #[async_trait]
    impl CollectionTransport for RecordingTransport {
        async fn query(&self, request: QueryRequest) -> Result<QueryResult> {
            self.seen.lock().unwrap().push(request);
            Ok(QueryResult {
                ids: vec![vec!["ID1".to_string()]],
                ..Default::default()
            })
        }

        async fn upsert(&self, _records: Vec<Record>) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_transport_receives_finalized_request() {
        let transport = RecordingTransport {
            seen: Mutex::new(vec![]),
        };
        let request = CollectionQueryBuilder::new()
            .apply(vec![with_query_text("I love dogs")])
            .unwrap()
            .build()
            .unwrap();

        let result = transport.query(request.clone()).await.unwrap();
        assert_eq!(result.ids.len(), 1);

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], request);
    }

    #[test]
    fn test_result_deserializes_with_missing_fields() {
        let result: QueryResult =
            serde_json::from_str(r#"{"ids": [["ID1", "ID2"]]}"#).unwrap();
        assert_eq!(result.ids[0].len(), 2);
        assert!(result.documents.is_empty());
        assert!(result.distances.is_empty());
    }
}
