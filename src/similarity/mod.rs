// Similarity scoring: cosine, Jaccard, and weighted Jaccard.

pub mod cosine;
pub mod jaccard;
pub mod traits;
