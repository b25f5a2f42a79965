//! One-shot ingestion pipeline.
//!
//! Runs once before the conversation loop starts: load the source document,
//! chunk it, embed the chunks, and upsert everything into the vector index
//! in fixed-size batches. Empty chunks are filtered out; a document that
//! yields zero valid chunks is an error before anything is upserted.

use crate::config::RagConfig;
use crate::db::vectorstore::VectorStore;
use crate::rag::chunker::Chunker;
use crate::rag::embeddings::Embedder;
use crate::rag::loader;
use crate::types::{AppError, Document, DocumentMetadata, Result};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// What an ingestion run produced.
#[derive(Debug, Clone, Copy)]
pub struct IngestReport {
    /// Pages loaded from the source document.
    pub pages: usize,
    /// Non-empty chunks produced.
    pub chunks: usize,
    /// Chunks stored in the vector index.
    pub stored: usize,
}

/// Drives load, chunk, embed, upsert.
pub struct IngestionPipeline {
    chunker: Chunker,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    batch_size: usize,
}

impl IngestionPipeline {
    /// Build a pipeline over the given embedder and index.
    pub fn new(
        config: &RagConfig,
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
    ) -> Result<Self> {
        Ok(Self {
            chunker: Chunker::new(config.chunk_size, config.chunk_overlap)?,
            embedder,
            store,
            batch_size: config.batch_size,
        })
    }

    /// Ingest one source document. Any failure here is fatal for the RAG
    /// variant; the caller exits rather than starting the conversation loop.
    pub async fn run(&self, path: &Path) -> Result<IngestReport> {
        let pages = loader::load(path)?;
        tracing::info!(pages = pages.len(), source = %path.display(), "loaded document");

        let mut documents = Vec::new();
        for page in &pages {
            for chunk in self.chunker.chunk(&page.text) {
                documents.push(Document {
                    id: Uuid::new_v4().to_string(),
                    content: chunk,
                    metadata: DocumentMetadata {
                        source: page.source.clone(),
                        page: page.page,
                    },
                    embedding: None,
                });
            }
        }

        if documents.is_empty() {
            return Err(AppError::Document(format!(
                "no valid chunks produced from {}",
                path.display()
            )));
        }
        tracing::info!(chunks = documents.len(), "chunked document");

        let total = documents.len();
        let mut stored = 0;
        for start in (0..total).step_by(self.batch_size) {
            let end = (start + self.batch_size).min(total);
            let batch = &documents[start..end];

            let texts: Vec<String> = batch.iter().map(|d| d.content.clone()).collect();
            let embeddings = self.embedder.embed_batch(&texts).await?;
            if embeddings.len() != batch.len() {
                return Err(AppError::Embedding(format!(
                    "embedded {} of {} chunks in batch",
                    embeddings.len(),
                    batch.len()
                )));
            }

            let embedded: Vec<Document> = batch
                .iter()
                .zip(embeddings)
                .map(|(doc, embedding)| Document {
                    embedding: Some(embedding),
                    ..doc.clone()
                })
                .collect();

            stored += self.store.upsert(&embedded).await?;
            tracing::debug!(from = start, to = end, "stored batch");
        }

        Ok(IngestReport {
            pages: pages.len(),
            chunks: total,
            stored,
        })
    }
}
