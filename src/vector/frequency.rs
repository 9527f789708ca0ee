// FrequencyVector: sparse term -> weight map built from a term sequence.
//
// A vector's keys are exactly the distinct terms of its source sequence and
// its weights are never negative. Vectors are built once and never mutated;
// switching weighting means building a new vector from the same terms.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::idf::{Idf, IdfSmoothing};

/// How raw term occurrences become vector weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Weighting {
    /// Raw occurrence count
    Count,
    /// Count divided by the document's total term count
    Tf,
    /// TF times `ln(N / df)`; with two documents a shared term weighs 0
    TfIdf,
    /// TF times `ln((1 + N) / (1 + df)) + 1`
    SmoothedTfIdf,
}

impl Weighting {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "count" => Some(Self::Count),
            "tf" => Some(Self::Tf),
            "tfidf" | "tf-idf" => Some(Self::TfIdf),
            "smoothed-tfidf" | "smoothed" => Some(Self::SmoothedTfIdf),
            _ => None,
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Count => "count",
            Self::Tf => "tf",
            Self::TfIdf => "tfidf",
            Self::SmoothedTfIdf => "smoothed-tfidf",
        };
        f.write_str(name)
    }
}

/// Sparse frequency vector keyed by term (a word or an n-gram).
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyVector<K: Eq + Hash> {
    weights: HashMap<K, f64>,
}

impl<K: Eq + Hash> Default for FrequencyVector<K> {
    fn default() -> Self {
        Self {
            weights: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyVector<K> {
    /// Raw occurrence counts.
    pub fn counts<'a, I>(terms: I) -> Self
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut weights: HashMap<K, f64> = HashMap::new();
        for term in terms {
            *weights.entry(term.clone()).or_insert(0.0) += 1.0;
        }
        Self { weights }
    }

    /// Counts normalized by the total number of terms. Empty input gives an
    /// empty vector rather than dividing by zero.
    pub fn term_frequencies<'a, I>(terms: I) -> Self
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let counts = Self::counts(terms);
        let total = counts.total();
        if total == 0.0 {
            return counts;
        }
        Self {
            weights: counts
                .weights
                .into_iter()
                .map(|(term, count)| (term, count / total))
                .collect(),
        }
    }

    /// Multiply each weight by the term's IDF. Keys are kept even when the
    /// IDF is zero.
    pub fn reweighted(&self, idf: &Idf<K>) -> Self {
        Self {
            weights: self
                .weights
                .iter()
                .map(|(term, w)| (term.clone(), w * idf.weight(term)))
                .collect(),
        }
    }

    /// Build from explicit weights. Negative weights are clamped to zero.
    pub fn from_weights(weights: HashMap<K, f64>) -> Self {
        Self {
            weights: weights
                .into_iter()
                .map(|(term, w)| (term, w.max(0.0)))
                .collect(),
        }
    }

    /// Weight of a term; absent terms weigh 0.
    pub fn get(&self, term: &K) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, term: &K) -> bool {
        self.weights.contains_key(term)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.weights.iter().map(|(k, w)| (k, *w))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.weights.keys()
    }

    pub fn key_set(&self) -> HashSet<&K> {
        self.weights.keys().collect()
    }

    pub fn weights(&self) -> &HashMap<K, f64> {
        &self.weights
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Euclidean magnitude.
    pub fn magnitude(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }
}

impl<K: Eq + Hash + Clone + Ord> FrequencyVector<K> {
    /// The `n` heaviest terms, descending by weight, ties broken by term.
    pub fn top(&self, n: usize) -> Vec<(K, f64)> {
        let mut ranked: Vec<(K, f64)> = self.iter().map(|(k, w)| (k.clone(), w)).collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(n);
        ranked
    }
}

/// Turns term sequences into comparable vectors under one weighting scheme.
///
/// All documents in a call share the same IDF fit and the same vocabulary
/// cap, so their vectors live in the same space.
#[derive(Debug, Clone, Copy)]
pub struct Vectorizer {
    pub weighting: Weighting,
    /// Keep only the `k` terms with the highest total count across the
    /// corpus. `None` keeps everything.
    pub max_features: Option<usize>,
}

impl Default for Vectorizer {
    fn default() -> Self {
        Self {
            weighting: Weighting::TfIdf,
            max_features: None,
        }
    }
}

impl Vectorizer {
    pub fn new(weighting: Weighting) -> Self {
        Self {
            weighting,
            max_features: None,
        }
    }

    pub fn with_max_features(mut self, max_features: Option<usize>) -> Self {
        self.max_features = max_features;
        self
    }

    /// Vectorize every document of a corpus.
    pub fn fit_transform<K, D>(&self, documents: &[D]) -> Vec<FrequencyVector<K>>
    where
        K: Eq + Hash + Clone + Ord,
        D: AsRef<[K]>,
    {
        let restricted: Vec<Vec<K>> = match self.max_features {
            Some(k) => {
                let vocabulary = select_vocabulary(documents, k);
                documents
                    .iter()
                    .map(|doc| {
                        doc.as_ref()
                            .iter()
                            .filter(|t| vocabulary.contains(*t))
                            .cloned()
                            .collect()
                    })
                    .collect()
            }
            None => documents.iter().map(|doc| doc.as_ref().to_vec()).collect(),
        };

        match self.weighting {
            Weighting::Count => restricted
                .iter()
                .map(|doc| FrequencyVector::counts(doc))
                .collect(),
            Weighting::Tf => restricted
                .iter()
                .map(|doc| FrequencyVector::term_frequencies(doc))
                .collect(),
            Weighting::TfIdf | Weighting::SmoothedTfIdf => {
                let smoothing = if self.weighting == Weighting::TfIdf {
                    IdfSmoothing::Plain
                } else {
                    IdfSmoothing::Smoothed
                };
                let idf = Idf::fit(&restricted, smoothing);
                restricted
                    .iter()
                    .map(|doc| FrequencyVector::term_frequencies(doc).reweighted(&idf))
                    .collect()
            }
        }
    }

    /// Vectorize exactly two documents against each other.
    pub fn fit_pair<K>(&self, doc_a: &[K], doc_b: &[K]) -> (FrequencyVector<K>, FrequencyVector<K>)
    where
        K: Eq + Hash + Clone + Ord,
    {
        let mut vectors = self.fit_transform(&[doc_a, doc_b]).into_iter();
        let a = vectors.next().unwrap_or_default();
        let b = vectors.next().unwrap_or_default();
        (a, b)
    }
}

/// The `k` terms with the highest total count across all documents, ties
/// broken by term order.
fn select_vocabulary<K, D>(documents: &[D], k: usize) -> HashSet<K>
where
    K: Eq + Hash + Clone + Ord,
    D: AsRef<[K]>,
{
    let mut totals: HashMap<&K, usize> = HashMap::new();
    for doc in documents {
        for term in doc.as_ref() {
            *totals.entry(term).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&K, usize)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.into_iter().take(k).map(|(t, _)| t.clone()).collect()
}
