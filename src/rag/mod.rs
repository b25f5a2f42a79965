//! Retrieval Augmented Generation components.
//!
//! Ingestion is a one-shot batch job that runs before the conversation loop:
//!
//! 1. [`loader`] reads the source document into pages
//! 2. [`chunker`] splits pages into overlapping windows, dropping empty ones
//! 3. [`embeddings`] turns each window into a vector
//! 4. [`ingest`] drives the pipeline and upserts batches into the index
//!
//! A failure anywhere here is fatal: the application is unusable without a
//! populated index.

/// Overlapping text windows.
pub mod chunker;
/// Embedding generation.
pub mod embeddings;
/// One-shot ingestion pipeline.
pub mod ingest;
/// Source document loading.
pub mod loader;

pub use chunker::Chunker;
pub use embeddings::{Embedder, GeminiEmbedder};
pub use ingest::{IngestReport, IngestionPipeline};
