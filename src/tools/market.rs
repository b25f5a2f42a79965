//! Market data tools backed by public HTTP APIs.
//!
//! Both tools issue a single GET and hand the parsed JSON body back to the
//! model verbatim. No retries, timeouts or rate limiting; a failure becomes
//! a plain tool error for the turn processor to report back to the model.

use crate::tools::registry::Tool;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

const COINGECKO_BASE_URL: &str = "https://api.coingecko.com";
const API_NINJAS_BASE_URL: &str = "https://api.api-ninjas.com";

async fn read_json(request: reqwest::RequestBuilder, provider: &str) -> Result<Value> {
    let response = request
        .send()
        .await
        .map_err(|e| AppError::Tool(format!("{} request failed: {}", provider, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Tool(format!(
            "{} returned HTTP {}",
            provider, status
        )));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Tool(format!("{} returned malformed JSON: {}", provider, e)))
}

// ============= Crypto Price =============

#[derive(Debug, Deserialize)]
struct CoinPriceArgs {
    coin: String,
}

/// Current cryptocurrency price via the CoinGecko markets endpoint.
pub struct CoinPriceTool {
    client: Client,
    base_url: String,
}

impl CoinPriceTool {
    /// Create a tool against the public CoinGecko API.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: COINGECKO_BASE_URL.to_string(),
        }
    }

    /// Override the endpoint base URL (used by tests against a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for CoinPriceTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CoinPriceTool {
    fn name(&self) -> &str {
        "getBitcoin"
    }

    fn description(&self) -> &str {
        "Get the current price of the given cryptocurrency."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "coin": {
                    "type": "string",
                    "description": "The name of cryptocurrency e.g. bitcoin, ethereum, dogecoin etc."
                }
            },
            "required": ["coin"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: CoinPriceArgs = serde_json::from_value(args)
            .map_err(|e| AppError::InvalidInput(format!("getBitcoin arguments: {}", e)))?;

        let request = self
            .client
            .get(format!("{}/api/v3/coins/markets", self.base_url))
            .query(&[("vs_currency", "inr"), ("ids", args.coin.as_str())]);

        read_json(request, "CoinGecko").await
    }
}

// ============= Stock Price =============

#[derive(Debug, Deserialize)]
struct StockPriceArgs {
    ticker: String,
}

/// Current stock price via the API Ninjas stockprice endpoint.
pub struct StockPriceTool {
    client: Client,
    base_url: String,
    api_key: String,
}

impl StockPriceTool {
    /// Create a tool against the public API Ninjas endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: API_NINJAS_BASE_URL.to_string(),
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
impl Tool for StockPriceTool {
    fn name(&self) -> &str {
        "getStockPrice"
    }

    fn description(&self) -> &str {
        "Get the current price of the given stock."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "The ticker symbol of the stock. e.g. MSFT, AAPL, GOOGL etc."
                }
            },
            "required": ["ticker"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: StockPriceArgs = serde_json::from_value(args)
            .map_err(|e| AppError::InvalidInput(format!("getStockPrice arguments: {}", e)))?;

        let request = self
            .client
            .get(format!("{}/v1/stockprice", self.base_url))
            .query(&[("ticker", args.ticker.as_str())])
            .header("X-Api-Key", &self.api_key);

        read_json(request, "API Ninjas").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemas_declare_required_fields() {
        let coin = CoinPriceTool::new();
        assert_eq!(coin.name(), "getBitcoin");
        assert_eq!(coin.parameters_schema()["required"][0], "coin");

        let stock = StockPriceTool::new("test-key");
        assert_eq!(stock.name(), "getStockPrice");
        assert_eq!(stock.parameters_schema()["required"][0], "ticker");
    }

    #[tokio::test]
    async fn test_missing_argument_is_invalid_input() {
        let tool = CoinPriceTool::new();
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
