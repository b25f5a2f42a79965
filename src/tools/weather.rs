use crate::tools::registry::Tool;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

const WEATHERAPI_BASE_URL: &str = "https://api.weatherapi.com";

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    location: String,
}

/// Current weather conditions via the WeatherAPI current.json endpoint.
pub struct WeatherTool {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherTool {
    /// Create a tool against the public WeatherAPI endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: WEATHERAPI_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Override the endpoint base URL (used by tests against a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "getWeather"
    }

    fn description(&self) -> &str {
        "Get the weather for the given location."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "The name of the location. e.g. New York, Mumbai, Delhi etc."
                }
            },
            "required": ["location"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: WeatherArgs = serde_json::from_value(args)
            .map_err(|e| AppError::InvalidInput(format!("getWeather arguments: {}", e)))?;

        let response = self
            .client
            .get(format!("{}/v1/current.json", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", args.location.as_str()),
                ("aqi", "no"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Tool(format!("WeatherAPI request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Tool(format!("WeatherAPI returned HTTP {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Tool(format!("WeatherAPI returned malformed JSON: {}", e)))
    }
}
