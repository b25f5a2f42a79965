//! Vector store abstraction.
//!
//! A single index per process: documents are upserted with their embeddings
//! and queried by embedding similarity. Backends implement [`VectorStore`];
//! [`VectorStoreProvider`] selects and builds one from the environment at
//! startup.

use crate::types::{AppError, Document, Result, SearchResult};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// Vector Store Provider Configuration
// ============================================================================

/// Configuration for vector store backends.
#[derive(Debug, Clone)]
pub enum VectorStoreProvider {
    /// Pinecone managed index (cloud).
    Pinecone {
        /// Pinecone API key.
        api_key: String,
        /// Data-plane host of the index.
        index_host: String,
    },

    /// In-memory store; data is lost when the process exits. The index is
    /// repopulated by ingestion on every run, so this is a workable default
    /// for keyless local use as well as for tests.
    InMemory,
}

impl VectorStoreProvider {
    /// Create a vector store instance from this provider configuration.
    pub fn create_store(&self) -> Arc<dyn VectorStore> {
        match self {
            VectorStoreProvider::Pinecone { api_key, index_host } => Arc::new(
                super::pinecone::PineconeStore::new(api_key.clone(), index_host.clone()),
            ),
            VectorStoreProvider::InMemory => Arc::new(InMemoryVectorStore::new()),
        }
    }

    /// Resolve a provider from environment variables.
    ///
    /// `PINECONE_API_KEY` selects Pinecone, in which case
    /// `PINECONE_INDEX_HOST` must also be set; otherwise the in-memory store
    /// is used.
    pub fn from_env() -> Result<Self> {
        match std::env::var("PINECONE_API_KEY") {
            Ok(api_key) if !api_key.trim().is_empty() => {
                let index_host = std::env::var("PINECONE_INDEX_HOST").map_err(|_| {
                    AppError::Configuration(
                        "PINECONE_INDEX_HOST is not set (required with PINECONE_API_KEY)"
                            .to_string(),
                    )
                })?;
                Ok(VectorStoreProvider::Pinecone {
                    api_key,
                    index_host,
                })
            }
            _ => Ok(VectorStoreProvider::InMemory),
        }
    }
}

// ============================================================================
// Vector Store Trait
// ============================================================================

/// Abstract interface to the vector index.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Name of this backend.
    fn provider_name(&self) -> &'static str;

    /// Upsert documents with their embeddings.
    ///
    /// Documents are identified by their `id`; an existing id is replaced.
    /// Every document must carry an embedding.
    async fn upsert(&self, documents: &[Document]) -> Result<usize>;

    /// Search for the `limit` most similar documents, ordered by descending
    /// similarity. Returned documents omit their embeddings.
    async fn search(&self, embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>>;

    /// Number of documents in the index.
    async fn count(&self) -> Result<usize>;
}

// ============================================================================
// In-Memory Vector Store
// ============================================================================

/// In-memory vector store using a cosine-similarity scan.
pub struct InMemoryVectorStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl InMemoryVectorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn provider_name(&self) -> &'static str {
        "in-memory"
    }

    async fn upsert(&self, documents: &[Document]) -> Result<usize> {
        let mut store = self.documents.write();

        let mut count = 0;
        for doc in documents {
            if doc.embedding.is_none() {
                return Err(AppError::InvalidInput(format!(
                    "document '{}' is missing an embedding",
                    doc.id
                )));
            }
            store.insert(doc.id.clone(), doc.clone());
            count += 1;
        }

        Ok(count)
    }

    async fn search(&self, embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        let store = self.documents.read();

        let mut results: Vec<SearchResult> = store
            .values()
            .filter_map(|doc| {
                let doc_embedding = doc.embedding.as_ref()?;
                let score = Self::cosine_similarity(embedding, doc_embedding);
                Some(SearchResult {
                    document: Document {
                        id: doc.id.clone(),
                        content: doc.content.clone(),
                        metadata: doc.metadata.clone(),
                        embedding: None,
                    },
                    score,
                })
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);

        Ok(results)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.documents.read().len())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentMetadata;

    fn test_document(id: &str, content: &str, embedding: Vec<f32>) -> Document {
        Document {
            id: id.to_string(),
            content: content.to_string(),
            metadata: DocumentMetadata {
                source: "test.txt".to_string(),
                page: None,
            },
            embedding: Some(embedding),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_search_orders_by_similarity() {
        let store = InMemoryVectorStore::new();

        let doc1 = test_document("doc1", "Hello world", vec![1.0, 0.0, 0.0]);
        let doc2 = test_document("doc2", "Goodbye world", vec![0.0, 1.0, 0.0]);
        let doc3 = test_document("doc3", "Hello again", vec![0.9, 0.1, 0.0]);

        store.upsert(&[doc1, doc2, doc3]).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 3);

        let results = store.search(&[1.0, 0.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document.id, "doc1");
        assert_eq!(results[1].document.id, "doc3");
        // Embeddings are not returned in results.
        assert!(results[0].document.embedding.is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_id() {
        let store = InMemoryVectorStore::new();

        store
            .upsert(&[test_document("doc1", "old", vec![1.0, 0.0])])
            .await
            .unwrap();
        store
            .upsert(&[test_document("doc1", "new", vec![1.0, 0.0])])
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        let results = store.search(&[1.0, 0.0], 1).await.unwrap();
        assert_eq!(results[0].document.content, "new");
    }

    #[tokio::test]
    async fn test_upsert_requires_embedding() {
        let store = InMemoryVectorStore::new();
        let mut doc = test_document("doc1", "text", vec![]);
        doc.embedding = None;

        let result = store.upsert(&[doc]).await;
        assert!(result.is_err());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[test]
    fn test_cosine_similarity() {
        // Identical vectors
        assert!(
            (InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 0.001
        );

        // Orthogonal vectors
        assert!(InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 0.001);

        // Opposite vectors
        assert!(
            (InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 0.001
        );
    }

    #[test]
    fn test_provider_creates_in_memory_store() {
        let store = VectorStoreProvider::InMemory.create_store();
        assert_eq!(store.provider_name(), "in-memory");
    }
}
