//! The store module
//! Provide append and exhaustive top-k search over labeled vectors

use crate::similarity::cosine_similarity;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use tracing::debug;

/// A labeled embedding.
///
/// `id` is unique by convention only; the store does not check it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: String,
}

impl Vector {
    pub fn new(id: impl Into<String>, values: Vec<f32>, metadata: impl Into<String>) -> Vector {
        Vector { id: id.into(), values, metadata: metadata.into() }
    }
}

/// One ranked match: an owned copy of the stored vector and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub vector: Vector,
    pub similarity: f64,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID: {} | Name: {} | Score: {:.4}",
            self.vector.id, self.vector.metadata, self.similarity)
    }
}

/// Score of a stored vector, ordered best first.
///
/// Higher scores come first; equal scores fall back to insertion index so a
/// stable ranking does not depend on the sort algorithm. NaN scores rank
/// after every number.
#[derive(Debug, Clone, Copy)]
struct Ranked {
    score: f64,
    index: usize,
}

impl Ranked {
    fn key(&self) -> f64 {
        if self.score.is_nan() { f64::NEG_INFINITY } else { self.score }
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().total_cmp(&self.key())
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

/// Append-only, in-memory collection of vectors searched by brute force.
///
/// Dimensionality is not enforced. A stored vector whose length differs from
/// the query simply scores `0.0`.
#[derive(Debug, Clone, Default)]
pub struct VectorStore {
    vectors: Vec<Vector>,
}

impl VectorStore {
    /// Creates a new empty store.
    ///
    /// # Examples
    ///
    /// ```
    /// use vecsearch::VectorStore;
    ///
    /// let store = VectorStore::new();
    /// assert_eq!(store.len(), 0);
    /// ```
    pub fn new() -> VectorStore {
        VectorStore { vectors: Vec::new() }
    }

    /// Appends a vector to the store.
    ///
    /// There is no validation and no deduplication: inserting the same id
    /// twice keeps both entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use vecsearch::{Vector, VectorStore};
    ///
    /// let mut store = VectorStore::new();
    /// store.insert(Vector::new("1", vec![1.0, 0.1, 0.0], "King"));
    /// store.insert(Vector::new("1", vec![0.0, 1.0], "Duplicate id, other dims"));
    /// assert_eq!(store.len(), 2);
    /// ```
    pub fn insert(&mut self, vector: Vector) {
        debug!(id = %vector.id, dims = vector.values.len(), "insert vector");
        self.vectors.push(vector);
    }

    /// Returns the `top_k` stored vectors most similar to `query`.
    ///
    /// Every stored vector is scored with [`cosine_similarity`], the scores
    /// are sorted descending, and the first `min(top_k, len)` are returned.
    /// Equal scores keep insertion order. The store is not modified.
    ///
    /// Degenerate input never fails: an empty store or `top_k == 0` yields an
    /// empty result, and vectors of a different dimension score `0.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vecsearch::{Vector, VectorStore};
    ///
    /// let mut store = VectorStore::new();
    /// store.insert(Vector::new("1", vec![1.0, 0.1, 0.0], "King"));
    /// store.insert(Vector::new("2", vec![0.9, 0.2, 0.0], "Queen"));
    /// store.insert(Vector::new("3", vec![0.0, 0.8, 0.9], "Apple"));
    ///
    /// let results = store.query(&[0.95, 0.15, 0.0], 2);
    /// assert_eq!(results.len(), 2);
    /// assert_eq!(results[0].vector.metadata, "King");
    /// assert_eq!(results[1].vector.metadata, "Queen");
    /// ```
    pub fn query(&self, query: &[f32], top_k: usize) -> Vec<SearchResult> {
        let mut ranked: Vec<Ranked> = self.vectors.iter()
            .enumerate()
            .map(|(index, v)| Ranked { score: cosine_similarity(query, &v.values), index })
            .collect();

        ranked.sort();
        ranked.truncate(top_k);

        debug!(
            scanned = self.vectors.len(),
            returned = ranked.len(),
            top_k,
            "query complete"
        );

        ranked.into_iter()
            .map(|r| SearchResult { vector: self.vectors[r.index].clone(), similarity: r.score })
            .collect()
    }

    /// Retrieves the first vector inserted under `id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vecsearch::{Vector, VectorStore};
    ///
    /// let mut store = VectorStore::new();
    /// store.insert(Vector::new("vec1", vec![3.0, 4.0], "a"));
    ///
    /// assert_eq!(store.get("vec1").unwrap().values, vec![3.0, 4.0]);
    /// assert!(store.get("vec2").is_none());
    /// ```
    pub fn get(&self, id: &str) -> Option<&Vector> {
        self.vectors.iter().find(|v| v.id == id)
    }

    /// Returns all vectors in insertion order.
    pub fn list(&self) -> &[Vector] {
        &self.vectors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vector> {
        self.vectors.iter()
    }

    /// Returns the number of vectors in the store.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Length of the first inserted vector.
    ///
    /// Informational only; later inserts are not checked against it.
    pub fn dimension(&self) -> Option<usize> {
        self.vectors.first().map(|v| v.values.len())
    }
}

impl Extend<Vector> for VectorStore {
    fn extend<I: IntoIterator<Item = Vector>>(&mut self, iter: I) {
        for vector in iter {
            self.insert(vector);
        }
    }
}

impl FromIterator<Vector> for VectorStore {
    fn from_iter<I: IntoIterator<Item = Vector>>(iter: I) -> Self {
        let mut store = VectorStore::new();
        store.extend(iter);
        store
    }
}
