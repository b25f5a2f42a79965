//! Pinecone vector database integration.
//!
//! Talks to the data plane of a single Pinecone index over its REST API:
//! `/vectors/upsert` for ingestion, `/query` with `includeMetadata` for
//! similarity search, `/describe_index_stats` for counts. Chunk text and
//! provenance travel in vector metadata so search results can be
//! reconstructed without a second lookup.

use crate::db::vectorstore::VectorStore;
use crate::types::{AppError, Document, DocumentMetadata, Result, SearchResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Client for one Pinecone index.
pub struct PineconeStore {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PineconeStore {
    /// Create a client for the index behind `index_host`.
    ///
    /// The host is the per-index data-plane endpoint shown in the Pinecone
    /// console (e.g. `my-index-abc1234.svc.us-east-1.pinecone.io`); a scheme
    /// prefix is added when missing.
    pub fn new(api_key: String, index_host: String) -> Self {
        let base_url = if index_host.starts_with("http://") || index_host.starts_with("https://") {
            index_host
        } else {
            format!("https://{}", index_host)
        };

        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("Api-Key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::VectorStore(format!("Pinecone request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::VectorStore(format!(
                "Pinecone returned HTTP {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::VectorStore(format!("Pinecone returned malformed JSON: {}", e)))
    }
}

#[async_trait]
impl VectorStore for PineconeStore {
    fn provider_name(&self) -> &'static str {
        "pinecone"
    }

    async fn upsert(&self, documents: &[Document]) -> Result<usize> {
        let mut vectors = Vec::with_capacity(documents.len());
        for doc in documents {
            let values = doc.embedding.as_ref().ok_or_else(|| {
                AppError::InvalidInput(format!("document '{}' is missing an embedding", doc.id))
            })?;

            let mut metadata = json!({
                "source": doc.metadata.source,
                "content": doc.content,
            });
            if let Some(page) = doc.metadata.page {
                metadata["page"] = json!(page);
            }

            vectors.push(PineconeVector {
                id: doc.id.clone(),
                values: values.clone(),
                metadata,
            });
        }

        let response: UpsertResponse = self
            .post("/vectors/upsert", &UpsertRequest { vectors })
            .await?;

        Ok(response.upserted_count)
    }

    async fn search(&self, embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        let request = QueryRequest {
            vector: embedding.to_vec(),
            top_k: limit,
            include_metadata: true,
        };
        let response: QueryResponse = self.post("/query", &request).await?;

        Ok(response
            .matches
            .into_iter()
            .map(|m| {
                let metadata = m.metadata.unwrap_or_default();
                SearchResult {
                    document: Document {
                        id: m.id,
                        content: metadata.content,
                        metadata: DocumentMetadata {
                            source: metadata.source,
                            page: metadata.page,
                        },
                        embedding: None,
                    },
                    score: m.score,
                }
            })
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        let response: StatsResponse = self.post("/describe_index_stats", &json!({})).await?;
        Ok(response.total_vector_count)
    }
}

// Pinecone API wire types

#[derive(Debug, Serialize)]
struct UpsertRequest {
    vectors: Vec<PineconeVector>,
}

#[derive(Debug, Serialize)]
struct PineconeVector {
    id: String,
    values: Vec<f32>,
    metadata: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    upserted_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    vector: Vec<f32>,
    top_k: usize,
    include_metadata: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: String,
    score: f32,
    metadata: Option<MatchMetadata>,
}

#[derive(Debug, Deserialize, Default)]
struct MatchMetadata {
    #[serde(default)]
    source: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    page: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    #[serde(default)]
    total_vector_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_scheme_normalization() {
        let store = PineconeStore::new(
            "key".to_string(),
            "my-index.svc.us-east-1.pinecone.io".to_string(),
        );
        assert_eq!(
            store.base_url,
            "https://my-index.svc.us-east-1.pinecone.io"
        );

        let store = PineconeStore::new("key".to_string(), "http://localhost:5080/".to_string());
        assert_eq!(store.base_url, "http://localhost:5080");
    }

    #[test]
    fn test_query_request_wire_format() {
        let request = QueryRequest {
            vector: vec![0.1, 0.2],
            top_k: 2,
            include_metadata: true,
        };
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["topK"], 2);
        assert_eq!(wire["includeMetadata"], true);
    }
}
