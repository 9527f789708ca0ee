// Full two-document comparison suite.
//
// Runs the same pair of documents through every vectorization the analysis
// supports and reports each score side by side:
//
//   1. bag-of-words counts, stopwords kept
//   2. bag-of-words counts, stopwords removed
//   3. TF-IDF over words
//   4. bigram counts
//   5. trigram counts
//   6. TF-IDF over the configured n-gram range, vocabulary capped
//
// Raw counts over-reward shared function words; removing stopwords and
// TF-IDF weighting both push the score toward shared content vocabulary.

use serde::Serialize;
use tracing::info;

use super::{ratio, shared_terms, SharedTerm, TokenizedPair};
use crate::config::Config;
use crate::similarity::cosine::cosine_similarity;
use crate::similarity::jaccard::{jaccard_from_vectors, weighted_jaccard};
use crate::text::ngram::{ngrams, NGram, NGramRange};
use crate::text::stopwords::StopwordSet;
use crate::text::tokenizer::TokenFilter;
use crate::vector::frequency::{FrequencyVector, Vectorizer, Weighting};

/// Options for the comparison suite.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub stopwords: StopwordSet,
    /// Word-level TF-IDF weighting
    pub weighting: Weighting,
    /// Weighting for the n-gram range comparison
    pub segment_weighting: Weighting,
    pub ngram_range: NGramRange,
    pub max_features: Option<usize>,
    /// How many terms to list in "top" tables
    pub top_n: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            stopwords: StopwordSet::builtin(),
            weighting: Weighting::TfIdf,
            segment_weighting: Weighting::SmoothedTfIdf,
            ngram_range: NGramRange::default(),
            max_features: Some(10_000),
            top_n: 20,
        }
    }
}

impl CompareOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            stopwords: config.stopwords.load(),
            weighting: config.weighting,
            segment_weighting: config.segment_weighting,
            ngram_range: config.ngram_range,
            max_features: config.max_features,
            ..Self::default()
        }
    }

    fn content_filter(&self) -> TokenFilter {
        TokenFilter::without_stopwords(self.stopwords.clone())
    }
}

/// One named score set.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityResult {
    pub label: String,
    pub cosine: f64,
    pub jaccard: f64,
    pub weighted_jaccard: f64,
}

impl SimilarityResult {
    pub fn measure<K>(label: &str, a: &FrequencyVector<K>, b: &FrequencyVector<K>) -> Self
    where
        K: Eq + std::hash::Hash + Clone,
    {
        Self {
            label: label.to_string(),
            cosine: cosine_similarity(a, b),
            jaccard: jaccard_from_vectors(a, b),
            weighted_jaccard: weighted_jaccard(a, b),
        }
    }
}

/// Token and vocabulary sizes for one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentStats {
    pub label: String,
    pub tokens: usize,
    pub unique_terms: usize,
}

/// Bag-of-words result: score plus the shared vocabulary behind it.
#[derive(Debug, Clone, Serialize)]
pub struct BagOfWordsReport {
    pub result: SimilarityResult,
    pub doc1: DocumentStats,
    pub doc2: DocumentStats,
    pub common_terms: usize,
    /// Common terms as a fraction of doc2's vocabulary
    pub vocabulary_overlap: f64,
    pub top_shared: Vec<SharedTerm>,
}

/// A heavily weighted doc2 term and whether doc1 uses it at all.
#[derive(Debug, Clone, Serialize)]
pub struct TopTerm {
    pub term: String,
    pub weight: f64,
    pub in_doc1: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TfIdfReport {
    pub weighting: Weighting,
    pub result: SimilarityResult,
    pub top_doc2: Vec<TopTerm>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NGramReport {
    pub n: usize,
    pub doc1: DocumentStats,
    pub doc2: DocumentStats,
    pub result: SimilarityResult,
    pub common: usize,
    pub top_common: Vec<SharedTerm>,
}

/// Everything the suite computes for one pair of documents.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub bag_of_words: BagOfWordsReport,
    pub bag_of_words_content: BagOfWordsReport,
    pub tfidf: TfIdfReport,
    pub bigrams: NGramReport,
    pub trigrams: NGramReport,
    pub ngram_range: NGramRange,
    pub ngram_tfidf: SimilarityResult,
}

impl ComparisonReport {
    /// Every headline score, in suite order.
    pub fn summary(&self) -> Vec<&SimilarityResult> {
        vec![
            &self.bag_of_words.result,
            &self.bag_of_words_content.result,
            &self.tfidf.result,
            &self.bigrams.result,
            &self.trigrams.result,
            &self.ngram_tfidf,
        ]
    }
}

/// Raw-count bag-of-words comparison after applying `filter`.
pub fn bag_of_words(
    pair: &TokenizedPair,
    filter: &TokenFilter,
    label: &str,
    top_n: usize,
) -> BagOfWordsReport {
    let tokens1 = filter.apply(&pair.doc1);
    let tokens2 = filter.apply(&pair.doc2);

    let v1 = FrequencyVector::counts(&tokens1);
    let v2 = FrequencyVector::counts(&tokens2);

    let shared = shared_terms(&v1, &v2);
    let common_terms = shared.len();

    BagOfWordsReport {
        result: SimilarityResult::measure(label, &v1, &v2),
        doc1: DocumentStats {
            label: pair.doc1_label.clone(),
            tokens: tokens1.len(),
            unique_terms: v1.len(),
        },
        doc2: DocumentStats {
            label: pair.doc2_label.clone(),
            tokens: tokens2.len(),
            unique_terms: v2.len(),
        },
        common_terms,
        vocabulary_overlap: ratio(common_terms, v2.len()),
        top_shared: shared.into_iter().take(top_n).collect(),
    }
}

/// Word-level TF-IDF comparison.
pub fn tfidf(
    pair: &TokenizedPair,
    filter: &TokenFilter,
    weighting: Weighting,
    top_n: usize,
) -> TfIdfReport {
    let tokens1 = filter.apply(&pair.doc1);
    let tokens2 = filter.apply(&pair.doc2);

    let (v1, v2) = Vectorizer::new(weighting).fit_pair(&tokens1, &tokens2);

    let top_doc2 = v2
        .top(top_n)
        .into_iter()
        .map(|(term, weight)| TopTerm {
            in_doc1: v1.contains(&term),
            term,
            weight,
        })
        .collect();

    TfIdfReport {
        weighting,
        result: SimilarityResult::measure(&format!("TF-IDF ({weighting})"), &v1, &v2),
        top_doc2,
    }
}

/// Fixed-length n-gram comparison on raw counts.
pub fn ngram(pair: &TokenizedPair, n: usize, top_n: usize) -> NGramReport {
    let grams1: Vec<NGram> = ngrams(&pair.doc1, n).map(NGram::from).collect();
    let grams2: Vec<NGram> = ngrams(&pair.doc2, n).map(NGram::from).collect();

    let v1 = FrequencyVector::counts(&grams1);
    let v2 = FrequencyVector::counts(&grams2);
    let shared = shared_terms(&v1, &v2);

    NGramReport {
        n,
        doc1: DocumentStats {
            label: pair.doc1_label.clone(),
            tokens: grams1.len(),
            unique_terms: v1.len(),
        },
        doc2: DocumentStats {
            label: pair.doc2_label.clone(),
            tokens: grams2.len(),
            unique_terms: v2.len(),
        },
        result: SimilarityResult::measure(&format!("{n}-gram counts"), &v1, &v2),
        common: shared.len(),
        top_common: shared.into_iter().take(top_n).collect(),
    }
}

/// TF-IDF over every n-gram length in `range`, with an optional vocabulary cap.
pub fn ngram_range_tfidf(
    pair: &TokenizedPair,
    filter: &TokenFilter,
    range: NGramRange,
    weighting: Weighting,
    max_features: Option<usize>,
) -> SimilarityResult {
    let grams1 = range.generate(&filter.apply(&pair.doc1));
    let grams2 = range.generate(&filter.apply(&pair.doc2));

    let (v1, v2) = Vectorizer::new(weighting)
        .with_max_features(max_features)
        .fit_pair(&grams1, &grams2);

    SimilarityResult::measure(&format!("TF-IDF n-grams ({range})"), &v1, &v2)
}

/// Run the whole suite.
pub fn run(pair: &TokenizedPair, options: &CompareOptions) -> ComparisonReport {
    let content = options.content_filter();

    let report = ComparisonReport {
        bag_of_words: bag_of_words(
            pair,
            &TokenFilter::keep_all(),
            "Bag-of-words",
            options.top_n,
        ),
        bag_of_words_content: bag_of_words(
            pair,
            &content,
            "Bag-of-words (no stopwords)",
            options.top_n,
        ),
        tfidf: tfidf(pair, &content, options.weighting, options.top_n),
        bigrams: ngram(pair, 2, options.top_n),
        trigrams: ngram(pair, 3, options.top_n),
        ngram_range: options.ngram_range,
        ngram_tfidf: ngram_range_tfidf(
            pair,
            &content,
            options.ngram_range,
            options.segment_weighting,
            options.max_features,
        ),
    };

    info!(
        bag_of_words = report.bag_of_words.result.cosine,
        tfidf = report.tfidf.result.cosine,
        bigram = report.bigrams.result.cosine,
        "Comparison suite complete"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn pair(a: &str, b: &str) -> TokenizedPair {
        TokenizedPair::new(&Document::from_text("a", a), &Document::from_text("b", b))
    }

    #[test]
    fn test_bag_of_words_with_stopwords_removed() {
        let p = pair("the cat sat", "a cat ran");
        let filter = TokenFilter::without_stopwords(StopwordSet::from_words(["the", "a"]));
        let report = bag_of_words(&p, &filter, "bow", 10);

        assert!((report.result.cosine - 0.5).abs() < 1e-12);
        assert!((report.result.jaccard - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.common_terms, 1);
        assert!((report.vocabulary_overlap - 0.5).abs() < 1e-12);
        assert_eq!(report.top_shared[0].term, "cat");
    }

    #[test]
    fn test_tfidf_shared_terms_weigh_zero() {
        let p = pair("cat cat dog", "cat fish");
        let report = tfidf(&p, &TokenFilter::keep_all(), Weighting::TfIdf, 10);
        // Only shared term is "cat", which has idf 0, so nothing lines up
        assert_eq!(report.result.cosine, 0.0);
        let cat = report.top_doc2.iter().find(|t| t.term == "cat").unwrap();
        assert_eq!(cat.weight, 0.0);
        assert!(cat.in_doc1);
        assert_eq!(report.top_doc2[0].term, "fish");
        assert!(!report.top_doc2[0].in_doc1);
    }

    #[test]
    fn test_ngram_report_counts() {
        let p = pair("one two three four", "two three four five");
        let report = ngram(&p, 3, 5);
        assert_eq!(report.doc1.tokens, 2);
        assert_eq!(report.common, 1);
        assert_eq!(report.top_common[0].term, "two three four");
        assert!((report.result.jaccard - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_run_on_empty_document_scores_zero() {
        let p = pair("", "some words here");
        let report = run(&p, &CompareOptions::default());
        for result in report.summary() {
            assert_eq!(result.cosine, 0.0, "{} should be 0", result.label);
            assert_eq!(result.jaccard, 0.0);
        }
    }
}
