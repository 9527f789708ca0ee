// Jaccard similarity: set overlap, plain and weighted.
//
// Plain Jaccard ignores weights and compares the sets of distinct terms:
//
//   |A ∩ B| / |A ∪ B|
//
// Weighted Jaccard takes, for each term in either vector, the minimum and the
// maximum weight from both sides:
//
//   sum(min(a_t, b_t)) / sum(max(a_t, b_t))
//
// Both give 0.0 for no overlap and 1.0 for identical inputs. An empty union
// (or an all-zero weighted union) scores 0.0.

use std::collections::HashSet;
use std::hash::Hash;

use crate::vector::frequency::FrequencyVector;

/// Jaccard similarity of two term sets.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Jaccard similarity over the distinct terms of two vectors.
pub fn jaccard_from_vectors<K: Eq + Hash + Clone>(
    a: &FrequencyVector<K>,
    b: &FrequencyVector<K>,
) -> f64 {
    jaccard(&a.key_set(), &b.key_set())
}

/// Weighted Jaccard similarity of two frequency vectors.
pub fn weighted_jaccard<K: Eq + Hash + Clone>(
    a: &FrequencyVector<K>,
    b: &FrequencyVector<K>,
) -> f64 {
    let all_keys: HashSet<&K> = a.keys().chain(b.keys()).collect();

    if all_keys.is_empty() {
        return 0.0;
    }

    let mut min_sum = 0.0;
    let mut max_sum = 0.0;

    for key in all_keys {
        let wa = a.get(key);
        let wb = b.get(key);
        min_sum += wa.min(wb);
        max_sum += wa.max(wb);
    }

    if max_sum == 0.0 {
        0.0
    } else {
        min_sum / max_sum
    }
}
