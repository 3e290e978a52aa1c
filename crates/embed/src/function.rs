use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use chroma_common::{ChromaError, Result};
use chroma_types::{Embedding, Record};

/// Pluggable text-to-vector strategy
///
/// Implementations map document text to embeddings: external provider
/// adapters on one side, the deterministic consistent-hash generator on the
/// other. A cancelled token makes every method return
/// [`ChromaError::Cancelled`] promptly.
#[async_trait]
pub trait EmbeddingFunction: Send + Sync {
    /// Embed a batch of documents, preserving input order and count
    ///
    /// An empty input yields an empty output without error.
    async fn embed_documents(
        &self,
        ctx: &CancellationToken,
        documents: &[String],
    ) -> Result<Vec<Embedding>>;

    /// Embed a single query text; empty text is an error
    async fn embed_query(&self, ctx: &CancellationToken, text: &str) -> Result<Embedding>;

    /// Fill missing embeddings on records in place
    ///
    /// Records that already carry an embedding are skipped unless `force` is
    /// set. A record needing an embedding but lacking document content fails
    /// the whole batch, naming the record.
    async fn embed_records(
        &self,
        ctx: &CancellationToken,
        records: &mut [Record],
        force: bool,
    ) -> Result<()> {
        embed_records_default(self, ctx, records, force).await
    }
}

/// Default batch implementation behind [`EmbeddingFunction::embed_records`]
///
/// Collects every record that needs a vector, embeds their documents with one
/// `embed_documents` call, and distributes the results back in input order.
pub async fn embed_records_default<E>(
    embedder: &E,
    ctx: &CancellationToken,
    records: &mut [Record],
    force: bool,
) -> Result<()>
where
    E: EmbeddingFunction + ?Sized,
{
    if ctx.is_cancelled() {
        return Err(ChromaError::Cancelled);
    }

    let mut pending: Vec<usize> = Vec::new();
    let mut documents: Vec<String> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        if !record.needs_embedding(force) {
            continue;
        }
        match record.document_content() {
            Some(document) => {
                pending.push(index);
                documents.push(document.to_string());
            }
            None => {
                return Err(ChromaError::record_embedding(
                    record.id.clone(),
                    "record has no document content and no embedding",
                ));
            }
        }
    }

    if pending.is_empty() {
        return Ok(());
    }

    debug!(
        total = records.len(),
        pending = pending.len(),
        force,
        "embedding records"
    );

    let embeddings = embedder.embed_documents(ctx, &documents).await?;
    if embeddings.len() != pending.len() {
        return Err(ChromaError::invalid_embedding(format!(
            "embedder returned {} vectors for {} documents",
            embeddings.len(),
            pending.len()
        )));
    }

    for (index, embedding) in pending.into_iter().zip(embeddings) {
        records[index].embedding = Some(embedding);
    }
    Ok(())
}
