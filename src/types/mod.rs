//! Core types shared across the crate: conversation messages, tool
//! declarations, retrieval documents, and the error taxonomy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============= Conversation Types =============

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User input.
    User,
    /// Model response.
    Assistant,
    /// Tool execution result.
    Tool,
}

/// A single entry in the conversation transcript.
///
/// Messages are append-only: once committed to a
/// [`Conversation`](crate::session::Conversation) they are never mutated or
/// removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The text content of the message.
    pub content: String,
    /// Tool calls requested by the model (assistant messages only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Name of the tool that produced this result (tool messages only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_name: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message with optional tool calls.
    pub fn assistant(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            tool_calls,
            tool_name: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a tool result message, tagged with the originating tool name
    /// so the model can correlate it with its request.
    pub fn tool_result(tool_name: impl Into<String>, result: &serde_json::Value) -> Self {
        Self {
            role: MessageRole::Tool,
            content: serde_json::to_string(result).unwrap_or_else(|_| "{}".to_string()),
            tool_calls: Vec::new(),
            tool_name: Some(tool_name.into()),
            timestamp: Utc::now(),
        }
    }
}

// ============= Tool Types =============

/// Declaration of a tool, consumed by the model to decide applicability.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolDefinition {
    /// Unique tool name (the registry key).
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON-schema parameter specification.
    pub parameters: serde_json::Value,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// Identifier for the call within its response.
    pub id: String,
    /// Name of the requested tool.
    pub name: String,
    /// Concrete argument values supplied by the model.
    pub arguments: serde_json::Value,
}

// ============= Retrieval Types =============

/// A chunk of a source document, the unit of embedding and indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document id.
    pub id: String,
    /// The chunk text.
    pub content: String,
    /// Provenance of the chunk.
    pub metadata: DocumentMetadata,
    /// Embedding vector, set once the chunk has been embedded.
    pub embedding: Option<Vec<f32>>,
}

/// Where a document chunk came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Originating file.
    pub source: String,
    /// Page within the file, when the format has pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
}

/// A document matched by a similarity search, with its score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched document (embedding omitted).
    pub document: Document,
    /// Similarity score; result sets are ordered by descending score.
    pub score: f32,
}

// ============= Error Types =============

/// Crate-wide error taxonomy.
///
/// Setup errors (`Configuration`, `Document`) are fatal at startup; `Model`
/// and `UnknownTool` abort the current turn; `Tool` and `InvalidInput` are
/// recovered inside a turn by feeding the failure back to the model.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed environment configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Model inference failed (network, auth, malformed response).
    #[error("model error: {0}")]
    Model(String),

    /// Embedding request failed.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Vector index operation failed.
    #[error("vector store error: {0}")]
    VectorStore(String),

    /// Tool execution failed.
    #[error("tool error: {0}")]
    Tool(String),

    /// The model requested a tool that is not registered.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments did not match the tool's schema.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Source document could not be loaded or yielded nothing to index.
    #[error("document error: {0}")]
    Document(String),

    /// Terminal I/O failure.
    #[error("io error: {0}")]
    Io(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AppError>;
