// Frequency vectors: counting, term frequency, and TF-IDF weighting.

pub mod frequency;
pub mod idf;
