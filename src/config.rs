//! Environment-driven configuration.
//!
//! Every section has a `from_env` constructor; required variables that are
//! absent fail fast at startup with an error naming the variable, instead of
//! surfacing later as an obscure request failure. `.env` files are honored
//! via `dotenvy` (loaded once in `main`).

use crate::types::{AppError, Result};
use std::env;
use std::str::FromStr;

/// Default chat model, matching the Gemini generateContent API.
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash";
/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-001";

fn required(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Configuration(format!("{} is not set", name))),
    }
}

fn parse_or<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| AppError::Configuration(format!("{} is not a valid number: {}", name, value))),
        Err(_) => Ok(default),
    }
}

/// Gemini inference and embedding configuration.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// API key for the Gemini endpoints.
    pub api_key: String,
    /// Chat model identifier.
    pub chat_model: String,
    /// Embedding model identifier.
    pub embedding_model: String,
}

impl ModelConfig {
    /// Read `GEMINI_API_KEY` (required), `GEMINI_MODEL` and
    /// `GEMINI_EMBEDDING_MODEL` (defaulted).
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: required("GEMINI_API_KEY")?,
            chat_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            embedding_model: env::var("GEMINI_EMBEDDING_MODEL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string()),
        })
    }
}

/// API keys for the external data-provider tools.
#[derive(Debug, Clone)]
pub struct DataProviderConfig {
    /// API Ninjas key for the stock price tool.
    pub ninja_api_key: String,
    /// WeatherAPI key for the weather tool.
    pub weather_api_key: String,
}

impl DataProviderConfig {
    /// Read `NINJA_API_KEY` and `WEATHER_API_KEY`, both required.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            ninja_api_key: required("NINJA_API_KEY")?,
            weather_api_key: required("WEATHER_API_KEY")?,
        })
    }
}

/// Ingestion parameters for the RAG variant.
#[derive(Debug, Clone)]
pub struct RagConfig {
    /// Target chunk size in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters.
    pub chunk_overlap: usize,
    /// Number of chunks embedded and upserted per batch.
    pub batch_size: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            batch_size: 50,
        }
    }
}

impl RagConfig {
    /// Read `CHUNK_SIZE`, `CHUNK_OVERLAP` and `INGEST_BATCH_SIZE`, all
    /// optional with the defaults above.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            chunk_size: parse_or("CHUNK_SIZE", defaults.chunk_size)?,
            chunk_overlap: parse_or("CHUNK_OVERLAP", defaults.chunk_overlap)?,
            batch_size: parse_or("INGEST_BATCH_SIZE", defaults.batch_size)?,
        };
        if config.chunk_overlap >= config.chunk_size {
            return Err(AppError::Configuration(format!(
                "CHUNK_OVERLAP ({}) must be smaller than CHUNK_SIZE ({})",
                config.chunk_overlap, config.chunk_size
            )));
        }
        if config.batch_size == 0 {
            return Err(AppError::Configuration(
                "INGEST_BATCH_SIZE must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}
