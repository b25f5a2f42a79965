//! Per-turn resolution loop.
//!
//! One turn takes the committed conversation plus new user input and runs
//! the model until it produces a final text answer:
//!
//! 1. Send the full history with the registered tool schemas to the model.
//! 2. If the model requests a tool call, validate it against the registry,
//!    execute it, record the request and its result, and re-query. At most
//!    one call is processed per inference round.
//! 3. A response with no tool calls is the final answer for the turn.
//!
//! Messages produced during the turn are staged and only committed to the
//! conversation when the turn completes, so an inference failure or an
//! unknown tool leaves no partial entries behind.

use crate::llm::ChatModel;
use crate::session::Conversation;
use crate::tools::registry::ToolRegistry;
use crate::types::{AppError, Message, Result};
use std::sync::Arc;

/// Tuning for the resolution loop.
#[derive(Debug, Clone)]
pub struct TurnConfig {
    /// Maximum inference round-trips per turn. A model that keeps calling
    /// tools past this aborts the turn instead of hanging the process.
    pub max_iterations: usize,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self { max_iterations: 10 }
    }
}

/// Resolves one user input into a final answer, executing tools as needed.
pub struct TurnProcessor {
    model: Box<dyn ChatModel>,
    registry: Arc<ToolRegistry>,
    config: TurnConfig,
}

impl TurnProcessor {
    /// Create a processor with the default configuration.
    pub fn new(model: Box<dyn ChatModel>, registry: Arc<ToolRegistry>) -> Self {
        Self::with_config(model, registry, TurnConfig::default())
    }

    /// Create a processor with an explicit configuration.
    pub fn with_config(
        model: Box<dyn ChatModel>,
        registry: Arc<ToolRegistry>,
        config: TurnConfig,
    ) -> Self {
        Self {
            model,
            registry,
            config,
        }
    }

    /// Process one user input against the conversation.
    ///
    /// On success the user message, any tool exchanges, and the final answer
    /// are committed to `conversation` and the answer is returned. On error
    /// the conversation is left exactly as it was.
    pub async fn process(&self, conversation: &mut Conversation, input: &str) -> Result<String> {
        let tools = self.registry.definitions();
        let mut staged = vec![Message::user(input)];

        for iteration in 0..self.config.max_iterations {
            let history: Vec<Message> = conversation
                .messages()
                .iter()
                .chain(staged.iter())
                .cloned()
                .collect();

            let response = self
                .model
                .complete(conversation.system_prompt(), &history, &tools)
                .await?;

            let Some(call) = response.tool_calls.into_iter().next() else {
                // Final answer: commit the whole turn.
                staged.push(Message::assistant(&response.content, Vec::new()));
                for message in staged {
                    conversation.push(message);
                }
                return Ok(response.content);
            };

            if !self.registry.has_tool(&call.name) {
                return Err(AppError::UnknownTool(call.name));
            }

            tracing::debug!(tool = %call.name, iteration, "executing tool call");
            let result = match self.registry.execute(&call.name, call.arguments.clone()).await {
                Ok(value) => value,
                // Tool failures are fed back to the model as a result rather
                // than aborting the turn.
                Err(e) => {
                    tracing::warn!(tool = %call.name, error = %e, "tool execution failed");
                    serde_json::json!({ "error": e.to_string() })
                }
            };

            let tool_name = call.name.clone();
            staged.push(Message::assistant(&response.content, vec![call]));
            staged.push(Message::tool_result(tool_name, &result));
        }

        Err(AppError::Model(format!(
            "no final answer after {} inference rounds",
            self.config.max_iterations
        )))
    }
}
