//! Model inference abstraction.
//!
//! The [`ChatModel`] trait is the single seam between the conversation logic
//! and the inference endpoint: implementations receive the full ordered
//! message history plus the registered tool schemas and reply with either
//! final text or tool-call requests. The production implementation is the
//! Gemini REST client in [`gemini`]; tests substitute scripted mocks.

/// Gemini generateContent client.
pub mod gemini;

use crate::types::{Message, Result, ToolCall, ToolDefinition};
use async_trait::async_trait;

pub use gemini::GeminiClient;

/// Client for a chat model with function-calling support.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one inference round over the full conversation history.
    ///
    /// `system` is an optional system instruction kept outside the message
    /// sequence. `tools` are attached so the model can emit tool-call
    /// requests instead of text.
    async fn complete(
        &self,
        system: Option<&str>,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<ModelResponse>;

    /// The model identifier used by this client.
    fn model_name(&self) -> &str;
}

/// Response from a single inference round.
#[derive(Debug, Clone)]
pub struct ModelResponse {
    /// Text content of the response (may be empty when tools are called).
    pub content: String,
    /// Tool calls requested by the model, in the order it returned them.
    pub tool_calls: Vec<ToolCall>,
    /// Why generation stopped, as reported by the endpoint.
    pub finish_reason: String,
}

/// Inference provider selection, resolved once at startup.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Google Gemini via the generateContent REST API.
    Gemini {
        /// API key.
        api_key: String,
        /// Model identifier, e.g. `gemini-2.5-flash`.
        model: String,
    },
}

impl Provider {
    /// Create a client instance for this provider.
    pub fn create_client(&self) -> Box<dyn ChatModel> {
        match self {
            Provider::Gemini { api_key, model } => {
                Box::new(GeminiClient::new(api_key.clone(), model.clone()))
            }
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Gemini { .. } => "Gemini",
        }
    }
}
