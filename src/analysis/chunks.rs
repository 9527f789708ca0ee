// Partial-document comparisons.
//
// A long document can be dissimilar to a short one overall while one section
// of it matches closely. Two views of that:
//
//   - chunk ranking: split doc1 into k equal chunks, score each against the
//     whole of doc2, rank them, and compare the best chunk with the whole.
//   - halves cross-matrix: {full, first half, second half} of each document,
//     all nine pairings scored and sorted.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use super::{descending, TokenizedPair};
use crate::similarity::traits::SimilarityScorer;
use crate::text::chunk::{split_halves, split_into_chunks};
use crate::text::tokenizer::TokenFilter;
use crate::vector::frequency::Vectorizer;

/// Score of one doc1 chunk against the whole of doc2.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkScore {
    /// 1-based chunk number in document order
    pub index: usize,
    pub tokens: usize,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChunkReport {
    pub metric: String,
    /// Whole doc1 vs whole doc2
    pub whole: f64,
    /// Chunks in document order
    pub chunks: Vec<ChunkScore>,
}

impl ChunkReport {
    /// Chunks from most to least similar; ties keep document order.
    pub fn ranked(&self) -> Vec<&ChunkScore> {
        let mut ranked: Vec<&ChunkScore> = self.chunks.iter().collect();
        ranked.sort_by(|a, b| descending(a.score, b.score));
        ranked
    }

    pub fn best(&self) -> Option<&ChunkScore> {
        self.ranked().into_iter().next()
    }

    /// Best chunk score minus the whole-document score.
    pub fn improvement(&self) -> f64 {
        self.best().map(|c| c.score - self.whole).unwrap_or(0.0)
    }
}

/// One cell of the halves cross-matrix.
#[derive(Debug, Clone, Serialize)]
pub struct CrossScore {
    pub left: String,
    pub right: String,
    pub score: f64,
}

fn progress_bar(len: usize, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("  {msg} [{bar:30}] {pos}/{len}") {
        pb.set_style(style);
    }
    pb.set_message(label.to_string());
    pb
}

/// Vectorize two token sequences together and score them.
fn score_tokens(
    a: &[String],
    b: &[String],
    vectorizer: &Vectorizer,
    scorer: &dyn SimilarityScorer,
) -> f64 {
    let (va, vb) = vectorizer.fit_pair(a, b);
    scorer.score(&va, &vb)
}

/// Split doc1 into `count` chunks and score each against all of doc2.
pub fn rank_chunks(
    pair: &TokenizedPair,
    count: usize,
    filter: &TokenFilter,
    vectorizer: &Vectorizer,
    scorer: &dyn SimilarityScorer,
) -> Result<ChunkReport> {
    let tokens1 = filter.apply(&pair.doc1);
    let tokens2 = filter.apply(&pair.doc2);

    let chunks = split_into_chunks(&tokens1, count)?;
    let pb = progress_bar(chunks.len(), "Chunks");

    let mut scores = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        let score = score_tokens(chunk, &tokens2, vectorizer, scorer);
        debug!(chunk = i + 1, tokens = chunk.len(), score, "Scored chunk");
        scores.push(ChunkScore {
            index: i + 1,
            tokens: chunk.len(),
            score,
        });
        pb.inc(1);
    }
    pb.finish_and_clear();

    let whole = score_tokens(&tokens1, &tokens2, vectorizer, scorer);
    info!(chunks = count, whole, metric = scorer.name(), "Chunk ranking complete");

    Ok(ChunkReport {
        metric: scorer.name().to_string(),
        whole,
        chunks: scores,
    })
}

/// Score every pairing of {full, first half, second half} across the two
/// documents, highest first, ties by label.
pub fn halves_cross_matrix(
    pair: &TokenizedPair,
    filter: &TokenFilter,
    vectorizer: &Vectorizer,
    scorer: &dyn SimilarityScorer,
) -> Vec<CrossScore> {
    let tokens1 = filter.apply(&pair.doc1);
    let tokens2 = filter.apply(&pair.doc2);
    let (first1, second1) = split_halves(&tokens1);
    let (first2, second2) = split_halves(&tokens2);

    let parts1 = [
        (format!("{} full", pair.doc1_label), &tokens1),
        (format!("{} first half", pair.doc1_label), &first1),
        (format!("{} second half", pair.doc1_label), &second1),
    ];
    let parts2 = [
        (format!("{} full", pair.doc2_label), &tokens2),
        (format!("{} first half", pair.doc2_label), &first2),
        (format!("{} second half", pair.doc2_label), &second2),
    ];

    let pb = progress_bar(parts1.len() * parts2.len(), "Pairings");
    let mut scores = Vec::with_capacity(parts1.len() * parts2.len());
    for (label2, part2) in &parts2 {
        for (label1, part1) in &parts1 {
            scores.push(CrossScore {
                left: label1.clone(),
                right: label2.clone(),
                score: score_tokens(part1, part2, vectorizer, scorer),
            });
            pb.inc(1);
        }
    }
    pb.finish_and_clear();

    scores.sort_by(|a, b| {
        descending(a.score, b.score)
            .then_with(|| a.left.cmp(&b.left))
            .then_with(|| a.right.cmp(&b.right))
    });
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::similarity::traits::Cosine;
    use crate::vector::frequency::Weighting;

    fn pair(a: &str, b: &str) -> TokenizedPair {
        TokenizedPair::new(&Document::from_text("doc", a), &Document::from_text("yt", b))
    }

    #[test]
    fn test_matching_chunk_ranks_first() {
        let p = pair(
            "apples oranges pears plums rockets engines fuel orbit",
            "rockets engines fuel orbit launch",
        );
        let report = rank_chunks(
            &p,
            2,
            &TokenFilter::keep_all(),
            &Vectorizer::new(Weighting::Count),
            &Cosine,
        )
        .unwrap();

        assert_eq!(report.chunks.len(), 2);
        assert_eq!(report.chunks[0].score, 0.0);
        assert_eq!(report.best().unwrap().index, 2);
        assert!(report.improvement() > 0.0);
    }

    #[test]
    fn test_zero_chunks_is_error() {
        let p = pair("a b", "c d");
        let result = rank_chunks(
            &p,
            0,
            &TokenFilter::keep_all(),
            &Vectorizer::default(),
            &Cosine,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_cross_matrix_has_nine_sorted_cells() {
        let p = pair("a b c d", "c d e f");
        let cells = halves_cross_matrix(
            &p,
            &TokenFilter::keep_all(),
            &Vectorizer::new(Weighting::Count),
            &Cosine,
        );
        assert_eq!(cells.len(), 9);
        assert!(cells.windows(2).all(|w| w[0].score >= w[1].score));
        // doc second half "c d" == yt first half "c d"
        assert_eq!(cells[0].left, "doc second half");
        assert_eq!(cells[0].right, "yt first half");
        assert!((cells[0].score - 1.0).abs() < 1e-12);
    }
}
