// Shared content vocabulary between two documents.
//
// Lists every content word (stopwords and very short tokens removed) that
// both documents use, with its count in each, sorted three ways.

use serde::Serialize;
use tracing::info;

use super::{ratio, shared_terms, SharedTerm, TokenizedPair};
use crate::text::stopwords::StopwordSet;
use crate::text::tokenizer::TokenFilter;
use crate::vector::frequency::FrequencyVector;

/// Tokens shorter than this are dropped before comparing vocabularies.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct SharedVocabulary {
    pub doc1_label: String,
    pub doc2_label: String,
    /// Distinct content words in doc1
    pub doc1_vocabulary: usize,
    /// Distinct content words in doc2
    pub doc2_vocabulary: usize,
    /// Shared words, most frequent in doc2 first
    pub words: Vec<SharedTerm>,
}

impl SharedVocabulary {
    pub fn build(pair: &TokenizedPair, filter: &TokenFilter) -> Self {
        let v1 = FrequencyVector::counts(&filter.apply(&pair.doc1));
        let v2 = FrequencyVector::counts(&filter.apply(&pair.doc2));
        let words = shared_terms(&v1, &v2);

        info!(
            shared = words.len(),
            doc1_vocabulary = v1.len(),
            doc2_vocabulary = v2.len(),
            "Built shared vocabulary"
        );

        Self {
            doc1_label: pair.doc1_label.clone(),
            doc2_label: pair.doc2_label.clone(),
            doc1_vocabulary: v1.len(),
            doc2_vocabulary: v2.len(),
            words,
        }
    }

    /// Default content filter: given stopwords removed, tokens of 3+ chars.
    pub fn content_filter(stopwords: StopwordSet) -> TokenFilter {
        TokenFilter::without_stopwords(stopwords).with_min_len(DEFAULT_MIN_TOKEN_LEN)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn by_doc2_frequency(&self) -> &[SharedTerm] {
        &self.words
    }

    /// Most frequent in doc1 first, ties alphabetical.
    pub fn by_doc1_frequency(&self) -> Vec<SharedTerm> {
        let mut words = self.words.clone();
        words.sort_by(|a, b| {
            b.doc1_count
                .cmp(&a.doc1_count)
                .then_with(|| a.term.cmp(&b.term))
        });
        words
    }

    pub fn alphabetical(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(|w| w.term.as_str()).collect();
        words.sort_unstable();
        words
    }

    /// Fraction of doc1's vocabulary that doc2 also uses.
    pub fn doc1_coverage(&self) -> f64 {
        ratio(self.words.len(), self.doc1_vocabulary)
    }

    /// Fraction of doc2's vocabulary that doc1 also uses.
    pub fn doc2_coverage(&self) -> f64 {
        ratio(self.words.len(), self.doc2_vocabulary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn vocab(a: &str, b: &str) -> SharedVocabulary {
        let pair = TokenizedPair::new(&Document::from_text("a", a), &Document::from_text("b", b));
        SharedVocabulary::build(&pair, &SharedVocabulary::content_filter(StopwordSet::builtin()))
    }

    #[test]
    fn test_orderings() {
        let v = vocab(
            "culture culture culture freedom freedom speech the an ox",
            "speech speech speech freedom culture and an ox",
        );
        // "the", "and", "an" are stopwords; "ox" is too short
        assert_eq!(v.len(), 3);
        let by_doc2: Vec<&str> = v.by_doc2_frequency().iter().map(|w| w.term.as_str()).collect();
        assert_eq!(by_doc2, vec!["speech", "culture", "freedom"]);
        let by_doc1: Vec<String> = v.by_doc1_frequency().into_iter().map(|w| w.term).collect();
        assert_eq!(by_doc1, vec!["culture", "freedom", "speech"]);
        assert_eq!(v.alphabetical(), vec!["culture", "freedom", "speech"]);
    }

    #[test]
    fn test_coverage() {
        let v = vocab("alpha beta gamma delta", "alpha beta");
        assert!((v.doc1_coverage() - 0.5).abs() < 1e-12);
        assert!((v.doc2_coverage() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_documents_have_zero_coverage() {
        let v = vocab("", "");
        assert!(v.is_empty());
        assert_eq!(v.doc1_coverage(), 0.0);
        assert_eq!(v.doc2_coverage(), 0.0);
    }
}
