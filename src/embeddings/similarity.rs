use thiserror::Error;

/// Reasons two vectors cannot be compared
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimilarityError {
    #[error("Vector dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Cannot compute cosine similarity of a zero vector")]
    ZeroVector,

    #[error("Vector contains non-finite values")]
    NonFinite,
}

/// Computes the cosine similarity of two vectors
///
/// Accumulates in `f64` and clamps the result to [-1, 1] so rounding never
/// pushes a score out of range.
///
/// # Returns
///
/// * `Ok(f64)` - Similarity in [-1, 1]
/// * `Err(SimilarityError)` - Unequal lengths, a zero (or empty) vector, or NaN/infinite input
///
/// # Examples
///
/// ```
/// use site_gleaner::embeddings::cosine_similarity;
///
/// assert!((cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]).unwrap() - 1.0).abs() < 1e-9);
/// assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.0);
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let x = f64::from(x);
        let y = f64::from(y);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if !(dot.is_finite() && norm_a.is_finite() && norm_b.is_finite()) {
        return Err(SimilarityError::NonFinite);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(SimilarityError::ZeroVector);
    }

    // Norms are divided out one at a time so tiny magnitudes do not underflow
    let score = dot / norm_a.sqrt() / norm_b.sqrt();
    if !score.is_finite() {
        return Err(SimilarityError::ZeroVector);
    }

    Ok(score.clamp(-1.0, 1.0))
}
