//! # Delphi
//!
//! A terminal chatbot in two flavors sharing one conversational core:
//!
//! - **`chat`** - function calling over live data APIs: the model can fetch
//!   crypto prices, stock prices, and current weather mid-conversation.
//! - **`rag`** - retrieval-augmented generation: a source document is
//!   chunked, embedded, and upserted into a vector index at startup, and the
//!   model answers questions with a `retrieve` tool over that index.
//!
//! ## Architecture
//!
//! The core is a sequential tool-augmented conversation loop:
//!
//! ```text
//! terminal line ──► TurnProcessor ──► model inference (tool schemas attached)
//!                        ▲                      │
//!                        │        ┌─────────────┴─────────────┐
//!                        │   tool-call request           final answer
//!                        │        │                           │
//!                        └── ToolRegistry::execute        printed, loop
//! ```
//!
//! Conversation state is an explicit append-only transcript
//! ([`session::Conversation`]) passed into every turn; tools implement the
//! [`tools::Tool`] trait and are resolved by name through a registry fixed
//! at startup. Everything external - inference, embeddings, the vector
//! index, the data providers - sits behind a trait or a documented REST
//! contract.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use delphi::llm::Provider;
//! use delphi::session::{Conversation, TurnProcessor};
//! use delphi::tools::ToolRegistry;
//! use std::sync::Arc;
//!
//! let provider = Provider::Gemini {
//!     api_key: std::env::var("GEMINI_API_KEY")?,
//!     model: "gemini-2.5-flash".to_string(),
//! };
//! let processor = TurnProcessor::new(provider.create_client(), Arc::new(registry));
//!
//! let mut conversation = Conversation::new();
//! let answer = processor.process(&mut conversation, "What is the price of bitcoin?").await?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Command-line interface and terminal output.
pub mod cli;
/// Environment-driven configuration.
pub mod config;
/// Vector index backends.
pub mod db;
/// Model inference clients.
pub mod llm;
/// Retrieval Augmented Generation components.
pub mod rag;
/// Conversation state, turn resolution, and the terminal loop.
pub mod session;
/// Tools the model can invoke.
pub mod tools;
/// Core types and error handling.
pub mod types;

// Re-export commonly used types
pub use db::{VectorStore, VectorStoreProvider};
pub use llm::{ChatModel, GeminiClient, ModelResponse, Provider};
pub use rag::{Embedder, GeminiEmbedder, IngestionPipeline};
pub use session::{ChatLoop, Conversation, TurnConfig, TurnProcessor};
pub use tools::{Tool, ToolRegistry};
pub use types::{AppError, Result};
