//! This is the vector math module
//! Provide cosine similarity, dot product and magnitude

use crate::error::{Result, VecError};

/// Cosine Similarity
/// sim = dot(a, b) / (||a|| * ||b||)
///
/// Degenerate inputs never fail: vectors of different length, or a vector
/// with zero magnitude (including the empty vector), score `0.0`. A score of
/// zero is therefore indistinguishable from genuine orthogonality.
///
/// Elements are widened to `f64` before multiplying and summed left to right
/// over `0..len`, so the result is reproducible for a given input.
///
/// # Examples
///
/// ```
/// use vecsearch::similarity::cosine_similarity;
///
/// let sim = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]);
/// assert!((sim - 1.0).abs() < 1e-12);
///
/// // Mismatched dimensions score zero
/// assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let Ok(dot) = dot_product(a, b) else {
        return 0.0;
    };

    let norm_a = magnitude(a);
    let norm_b = magnitude(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Strict Cosine Similarity
///
/// Same as [`cosine_similarity`] but reports a dimension mismatch as an
/// error instead of scoring it `0.0`. Zero-magnitude vectors still score
/// `0.0`.
pub fn try_cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(VecError::DimensionMismatch { left: a.len(), right: b.len() });
    }

    Ok(cosine_similarity(a, b))
}

/// Dot Product
/// dot_prod = sum(a[i] * b[i]) for i = 0..a.len()
/// Can only process vectors with same dimensions
pub fn dot_product(left: &[f32], right: &[f32]) -> Result<f64> {
    if left.len() != right.len() {
        return Err(VecError::DimensionMismatch { left: left.len(), right: right.len() });
    }

    let dot_prod = left.iter()
        .zip(right.iter())
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();

    Ok(dot_prod)
}

/// Euclidean magnitude, ||vec||
pub fn magnitude(vector: &[f32]) -> f64 {
    vector.iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt()
}
