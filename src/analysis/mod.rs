// Document comparison analyses.
//
// Each analysis takes already-loaded documents, runs the text -> vector ->
// score chain with its own preprocessing choices, and returns a plain data
// report. Rendering and file output live in `crate::output`.

pub mod chunks;
pub mod compare;
pub mod cooccurrence;
pub mod shared;

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use serde::Serialize;

use crate::document::Document;
use crate::text::tokenizer::tokenize;
use crate::vector::frequency::FrequencyVector;

/// Two documents tokenized once (unfiltered) and shared across analyses.
#[derive(Debug, Clone)]
pub struct TokenizedPair {
    pub doc1_label: String,
    pub doc2_label: String,
    pub doc1: Vec<String>,
    pub doc2: Vec<String>,
}

impl TokenizedPair {
    pub fn new(doc1: &Document, doc2: &Document) -> Self {
        Self {
            doc1_label: doc1.label.clone(),
            doc2_label: doc2.label.clone(),
            doc1: tokenize(&doc1.text),
            doc2: tokenize(&doc2.text),
        }
    }
}

/// A term present in both documents with its count in each.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedTerm {
    pub term: String,
    pub doc1_count: usize,
    pub doc2_count: usize,
}

/// Terms present in both count vectors, most frequent in doc2 first,
/// ties broken alphabetically.
pub fn shared_terms<K>(doc1: &FrequencyVector<K>, doc2: &FrequencyVector<K>) -> Vec<SharedTerm>
where
    K: Eq + Hash + Clone + Display,
{
    let common: HashSet<&K> = doc1.keys().filter(|k| doc2.contains(k)).collect();
    let mut shared: Vec<SharedTerm> = common
        .into_iter()
        .map(|k| SharedTerm {
            term: k.to_string(),
            doc1_count: doc1.get(k) as usize,
            doc2_count: doc2.get(k) as usize,
        })
        .collect();
    shared.sort_by(|a, b| {
        b.doc2_count
            .cmp(&a.doc2_count)
            .then_with(|| a.term.cmp(&b.term))
    });
    shared
}

/// `part / whole` as a fraction, 0.0 when `whole` is zero.
pub fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Descending float order for sort_by, NaN-tolerant.
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
