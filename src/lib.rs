//! # vecsearch - Exhaustive Vector Search
//!
//! vecsearch keeps labeled vectors in memory and answers top-k queries by
//! scoring every stored vector against the query with cosine similarity.
//! There is no index: each query is a full scan followed by a stable sort.
//!
//! Degenerate input never fails. Vectors of a different dimension than the
//! query, or with zero magnitude, score `0.0`.
//!
//! ## Example
//!
//! ```
//! use vecsearch::{Vector, VectorStore};
//!
//! let mut store = VectorStore::new();
//!
//! // Insert vectors
//! store.insert(Vector::new("1", vec![1.0, 0.1, 0.0], "King"));
//! store.insert(Vector::new("2", vec![0.9, 0.2, 0.0], "Queen"));
//! store.insert(Vector::new("3", vec![0.0, 0.8, 0.9], "Apple"));
//!
//! // Search for similar vectors
//! let results = store.query(&[0.95, 0.15, 0.0], 2);
//! assert_eq!(results[0].vector.id, "1"); // Most similar vector
//! assert_eq!(results[1].vector.id, "2");
//! ```

pub mod config;
pub mod error;
pub mod server;
pub mod similarity;
mod store;

// Re-export the store types as the primary public API
pub use error::{Result, VecError};
pub use similarity::cosine_similarity;
pub use store::{SearchResult, Vector, VectorStore};
