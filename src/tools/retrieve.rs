//! Retrieval tool for the RAG variant.
//!
//! Embeds the model's free-text query, runs a similarity search against the
//! populated vector index, and returns the top matches both as a serialized
//! `Source`/`Content` block for the model and as raw documents for
//! programmatic use.

use crate::db::vectorstore::VectorStore;
use crate::rag::embeddings::Embedder;
use crate::tools::registry::Tool;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Number of documents returned per query.
pub const TOP_K: usize = 2;

#[derive(Debug, Deserialize)]
struct RetrieveArgs {
    query: String,
}

/// Similarity search over the ingested document index.
pub struct RetrieveTool {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    description: String,
}

impl RetrieveTool {
    /// Create a retrieval tool over the given embedder and index.
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedder,
            store,
            description: "Retrieve relevant passages from the ingested document.".to_string(),
        }
    }

    /// Replace the tool description shown to the model, e.g. to name the
    /// document's subject matter.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[async_trait]
impl Tool for RetrieveTool {
    fn name(&self) -> &str {
        "retrieve"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: RetrieveArgs = serde_json::from_value(args)
            .map_err(|e| AppError::InvalidInput(format!("retrieve arguments: {}", e)))?;

        let embedding = self.embedder.embed(&args.query).await?;
        let results = self.store.search(&embedding, TOP_K).await?;

        let serialized = results
            .iter()
            .map(|r| {
                format!(
                    "Source: {}\nContent: {}",
                    r.document.metadata.source, r.document.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let documents: Vec<Value> = results
            .iter()
            .map(|r| {
                json!({
                    "source": r.document.metadata.source,
                    "page": r.document.metadata.page,
                    "content": r.document.content,
                    "score": r.score,
                })
            })
            .collect();

        Ok(json!({
            "content": serialized,
            "documents": documents,
        }))
    }
}
