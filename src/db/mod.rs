//! Vector index backends.
//!
//! The index is an external collaborator accessed through
//! [`vectorstore::VectorStore`]: upsert embedded documents, search by
//! embedding similarity. The backend is resolved once at startup from the
//! environment; [`pinecone::PineconeStore`] talks to a managed index, the
//! in-memory store backs tests and keyless local runs.

/// Pinecone data-plane client.
pub mod pinecone;
/// Vector store trait, provider selection, and the in-memory backend.
pub mod vectorstore;

pub use pinecone::PineconeStore;
pub use vectorstore::{InMemoryVectorStore, VectorStore, VectorStoreProvider};
