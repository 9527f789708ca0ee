// Cosine similarity between sparse frequency vectors.
//
//   cos(a, b) = sum(a_t * b_t) / (|a| * |b|)
//
// The dot product runs over the union of keys with missing terms weighing 0,
// which in practice means iterating the smaller vector and probing the larger.
// If either magnitude is exactly 0 the score is 0.0 rather than NaN.

use std::hash::Hash;

use crate::vector::frequency::FrequencyVector;

/// Dot product over the key union (absent keys contribute nothing).
pub fn dot<K: Eq + Hash + Clone>(a: &FrequencyVector<K>, b: &FrequencyVector<K>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().map(|(term, w)| w * large.get(term)).sum()
}

/// Cosine similarity in [0, 1] for non-negative vectors.
///
/// Returns 0.0 when either vector has zero magnitude (empty, or every weight
/// zero, as happens to TF-IDF vectors of two identical documents).
pub fn cosine_similarity<K: Eq + Hash + Clone>(
    a: &FrequencyVector<K>,
    b: &FrequencyVector<K>,
) -> f64 {
    let mag_a = a.magnitude();
    let mag_b = b.magnitude();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    (dot(a, b) / (mag_a * mag_b)).clamp(0.0, 1.0)
}
