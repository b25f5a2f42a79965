//! Google Gemini provider implementation.
//!
//! Speaks the v1beta `generateContent` REST contract directly: conversation
//! history becomes `contents` with `user`/`model` roles, tool schemas become
//! `functionDeclarations`, and tool results travel back as
//! `functionResponse` parts.

use crate::llm::{ChatModel, ModelResponse};
use crate::types::{AppError, Message, MessageRole, Result, ToolCall, ToolDefinition};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini chat client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client against the public Gemini API.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the endpoint base URL (used by tests against a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }

    fn translate_request(
        system: Option<&str>,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> GeminiRequest {
        let system_instruction = system.map(|text| GeminiContent {
            role: None,
            parts: vec![GeminiPart::Text {
                text: text.to_string(),
            }],
        });

        let mut contents = Vec::with_capacity(messages.len());
        for message in messages {
            let (role, parts) = match message.role {
                MessageRole::User => (
                    "user",
                    vec![GeminiPart::Text {
                        text: message.content.clone(),
                    }],
                ),
                MessageRole::Assistant => {
                    let mut parts = Vec::new();
                    if !message.content.is_empty() {
                        parts.push(GeminiPart::Text {
                            text: message.content.clone(),
                        });
                    }
                    for call in &message.tool_calls {
                        parts.push(GeminiPart::FunctionCall {
                            function_call: GeminiFunctionCall {
                                name: call.name.clone(),
                                args: call.arguments.clone(),
                            },
                        });
                    }
                    ("model", parts)
                }
                // Tool results are sent back under the user role, wrapped the
                // way the functionResponse contract expects.
                MessageRole::Tool => {
                    let result: serde_json::Value = serde_json::from_str(&message.content)
                        .unwrap_or_else(|_| serde_json::Value::String(message.content.clone()));
                    (
                        "user",
                        vec![GeminiPart::FunctionResponse {
                            function_response: GeminiFunctionResponse {
                                name: message
                                    .tool_name
                                    .clone()
                                    .unwrap_or_else(|| "function".to_string()),
                                response: serde_json::json!({ "result": result }),
                            },
                        }],
                    )
                }
            };
            if !parts.is_empty() {
                contents.push(GeminiContent {
                    role: Some(role.to_string()),
                    parts,
                });
            }
        }

        let tools = if tools.is_empty() {
            None
        } else {
            Some(vec![GeminiTool {
                function_declarations: tools
                    .iter()
                    .map(|tool| GeminiFunctionDeclaration {
                        name: tool.name.clone(),
                        description: tool.description.clone(),
                        parameters: tool.parameters.clone(),
                    })
                    .collect(),
            }])
        };

        GeminiRequest {
            contents,
            system_instruction,
            tools,
        }
    }

    fn normalize_response(response: GeminiResponse) -> Result<ModelResponse> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Model("no candidates in response".to_string()))?;

        let mut content = String::new();
        let mut tool_calls = Vec::new();
        for (index, part) in candidate.content.parts.into_iter().enumerate() {
            match part {
                GeminiPart::Text { text } => content.push_str(&text),
                GeminiPart::FunctionCall { function_call } => {
                    tool_calls.push(ToolCall {
                        id: format!("call_{}", index),
                        name: function_call.name,
                        arguments: function_call.args,
                    });
                }
                GeminiPart::FunctionResponse { .. } => {}
            }
        }

        Ok(ModelResponse {
            content,
            tool_calls,
            finish_reason: candidate
                .finish_reason
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn complete(
        &self,
        system: Option<&str>,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<ModelResponse> {
        let request = Self::translate_request(system, messages, tools);

        let response = self
            .client
            .post(self.request_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Model(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Model(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<GeminiErrorResponse>(&body) {
                return Err(AppError::Model(format!(
                    "HTTP {}: {}",
                    status, error.error.message
                )));
            }
            return Err(AppError::Model(format!("HTTP {}: {}", status, body)));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::Model(format!("failed to parse response: {}", e)))?;

        Self::normalize_response(parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// Gemini API wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: GeminiFunctionCall,
    },
    FunctionResponse {
        #[serde(rename = "functionResponse")]
        function_response: GeminiFunctionResponse,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiFunctionCall {
    name: String,
    args: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiFunctionResponse {
    name: String,
    response: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTool {
    function_declarations: Vec<GeminiFunctionDeclaration>,
}

#[derive(Debug, Serialize)]
struct GeminiFunctionDeclaration {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: GeminiContent,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_translate_roles_and_tool_results() {
        let messages = vec![
            Message::user("What is the weather in Delhi?"),
            Message::assistant(
                "",
                vec![ToolCall {
                    id: "call_0".to_string(),
                    name: "getWeather".to_string(),
                    arguments: json!({"location": "Delhi"}),
                }],
            ),
            Message::tool_result("getWeather", &json!({"temp_c": 31.0})),
        ];

        let request = GeminiClient::translate_request(Some("be helpful"), &messages, &[]);

        assert!(request.system_instruction.is_some());
        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[0].role.as_deref(), Some("user"));
        assert_eq!(request.contents[1].role.as_deref(), Some("model"));
        // Tool results go back under the user role.
        assert_eq!(request.contents[2].role.as_deref(), Some("user"));

        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(
            wire["contents"][1]["parts"][0]["functionCall"]["name"],
            "getWeather"
        );
        assert_eq!(
            wire["contents"][2]["parts"][0]["functionResponse"]["response"]["result"]["temp_c"],
            31.0
        );
    }

    #[test]
    fn test_translate_attaches_tool_declarations() {
        let tools = vec![ToolDefinition {
            name: "getBitcoin".to_string(),
            description: "Get the current price of the given cryptocurrency.".to_string(),
            parameters: json!({"type": "object", "properties": {"coin": {"type": "string"}}}),
        }];
        let request = GeminiClient::translate_request(None, &[Message::user("hi")], &tools);

        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(
            wire["tools"][0]["functionDeclarations"][0]["name"],
            "getBitcoin"
        );
        assert!(wire.get("systemInstruction").is_none());
    }

    #[test]
    fn test_normalize_text_response() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "The price is "}, {"text": "42."}]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        let normalized = GeminiClient::normalize_response(response).unwrap();
        assert_eq!(normalized.content, "The price is 42.");
        assert!(normalized.tool_calls.is_empty());
        assert_eq!(normalized.finish_reason, "STOP");
    }

    #[test]
    fn test_normalize_function_call_response() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"functionCall": {"name": "getBitcoin", "args": {"coin": "bitcoin"}}}
                ]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        let normalized = GeminiClient::normalize_response(response).unwrap();
        assert_eq!(normalized.tool_calls.len(), 1);
        assert_eq!(normalized.tool_calls[0].name, "getBitcoin");
        assert_eq!(normalized.tool_calls[0].arguments["coin"], "bitcoin");
    }

    #[test]
    fn test_normalize_empty_candidates_is_error() {
        let response: GeminiResponse = serde_json::from_value(json!({"candidates": []})).unwrap();
        assert!(GeminiClient::normalize_response(response).is_err());
    }
}
