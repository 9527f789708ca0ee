// SimilarityScorer trait over the scoring metrics.
//
// Analyses take a `&dyn SimilarityScorer` so a new metric can be plugged in
// without touching the pipelines that produce the vectors.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cosine::cosine_similarity;
use super::jaccard::{jaccard_from_vectors, weighted_jaccard};
use crate::vector::frequency::FrequencyVector;

/// Trait for scoring the similarity of two word vectors.
pub trait SimilarityScorer {
    /// Short metric name for report headers.
    fn name(&self) -> &'static str;

    /// Score two word-keyed vectors, in [0, 1].
    fn score(&self, a: &FrequencyVector<String>, b: &FrequencyVector<String>) -> f64;
}

/// Cosine of the angle between the vectors.
pub struct Cosine;

impl SimilarityScorer for Cosine {
    fn name(&self) -> &'static str {
        "cosine"
    }

    fn score(&self, a: &FrequencyVector<String>, b: &FrequencyVector<String>) -> f64 {
        cosine_similarity(a, b)
    }
}

/// Overlap of the distinct term sets; weights are ignored.
pub struct Jaccard;

impl SimilarityScorer for Jaccard {
    fn name(&self) -> &'static str {
        "jaccard"
    }

    fn score(&self, a: &FrequencyVector<String>, b: &FrequencyVector<String>) -> f64 {
        jaccard_from_vectors(a, b)
    }
}

/// Sum of per-term minimums over sum of per-term maximums.
pub struct WeightedJaccard;

impl SimilarityScorer for WeightedJaccard {
    fn name(&self) -> &'static str {
        "weighted-jaccard"
    }

    fn score(&self, a: &FrequencyVector<String>, b: &FrequencyVector<String>) -> f64 {
        weighted_jaccard(a, b)
    }
}

/// Metric selector, used by the CLI to pick a scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    Cosine,
    Jaccard,
    WeightedJaccard,
}

impl Metric {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cosine" => Some(Self::Cosine),
            "jaccard" => Some(Self::Jaccard),
            "weighted-jaccard" | "weighted" => Some(Self::WeightedJaccard),
            _ => None,
        }
    }

    pub fn scorer(self) -> Box<dyn SimilarityScorer> {
        match self {
            Self::Cosine => Box::new(Cosine),
            Self::Jaccard => Box::new(Jaccard),
            Self::WeightedJaccard => Box::new(WeightedJaccard),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scorer().name())
    }
}
