// Inverse document frequency.
//
// Two flavours:
//
//   plain:    idf(t) = ln(N / df(t))
//   smoothed: idf(t) = ln((1 + N) / (1 + df(t))) + 1
//
// With N = 2 the plain form is exactly the two-document formula
// ln(2 / df), where df is 1 (term confined to one document) or 2 (shared).
// A shared term therefore gets idf = ln(1) = 0 and vanishes from TF-IDF
// vectors. The smoothed form never reaches zero, so shared terms still
// contribute to similarity across larger corpora.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Which IDF formula to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdfSmoothing {
    /// `ln(N / df)`
    Plain,
    /// `ln((1 + N) / (1 + df)) + 1`
    Smoothed,
}

/// IDF weights fitted on a fixed corpus.
#[derive(Debug, Clone)]
pub struct Idf<K: Eq + Hash> {
    document_frequency: HashMap<K, usize>,
    num_docs: usize,
    smoothing: IdfSmoothing,
}

impl<K: Eq + Hash + Clone> Idf<K> {
    /// Fit IDF on a corpus of term sequences. Each document counts a term at
    /// most once, however often it repeats.
    pub fn fit<D>(documents: &[D], smoothing: IdfSmoothing) -> Self
    where
        D: AsRef<[K]>,
    {
        let mut document_frequency: HashMap<K, usize> = HashMap::new();
        for doc in documents {
            let distinct: HashSet<&K> = doc.as_ref().iter().collect();
            for term in distinct {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
        }

        Self {
            document_frequency,
            num_docs: documents.len(),
            smoothing,
        }
    }

    /// The two-document IDF: `ln(2 / df)`.
    pub fn two_document(doc_a: &[K], doc_b: &[K]) -> Self {
        Self::fit(&[doc_a, doc_b], IdfSmoothing::Plain)
    }

    /// Number of documents containing `term` at least once.
    pub fn document_frequency(&self, term: &K) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    /// IDF weight for a term. Terms absent from the fitted corpus weigh 0.
    pub fn weight(&self, term: &K) -> f64 {
        let df = self.document_frequency(term);
        if df == 0 {
            return 0.0;
        }
        let n = self.num_docs as f64;
        let df = df as f64;
        match self.smoothing {
            IdfSmoothing::Plain => (n / df).ln(),
            IdfSmoothing::Smoothed => ((1.0 + n) / (1.0 + df)).ln() + 1.0,
        }
    }
}
