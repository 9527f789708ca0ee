// Unit tests for frequency vectors and IDF.
//
// Covers count and TF construction, the two-document IDF (including the
// zeroing of shared terms), smoothed IDF, vocabulary capping, and the
// deterministic ordering of top-weighted terms.

use docsim::vector::frequency::{FrequencyVector, Vectorizer, Weighting};
use docsim::vector::idf::{Idf, IdfSmoothing};

const EPS: f64 = 1e-12;

fn toks(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn key(word: &str) -> String {
    word.to_string()
}

// ============================================================
// Counts and term frequency
// ============================================================

#[test]
fn counts_tally_occurrences() {
    let v = FrequencyVector::counts(&toks(&["a", "b", "a", "a"]));
    assert_eq!(v.get(&key("a")), 3.0);
    assert_eq!(v.get(&key("b")), 1.0);
    assert_eq!(v.get(&key("z")), 0.0);
    assert_eq!(v.len(), 2);
}

#[test]
fn term_frequencies_sum_to_one() {
    let v = FrequencyVector::term_frequencies(&toks(&["a", "b", "a", "c"]));
    assert!((v.total() - 1.0).abs() < EPS);
    assert!((v.get(&key("a")) - 0.5).abs() < EPS);
}

#[test]
fn term_frequencies_of_empty_input() {
    let v: FrequencyVector<String> = FrequencyVector::term_frequencies(&Vec::<String>::new());
    assert!(v.is_empty());
    assert_eq!(v.magnitude(), 0.0);
}

#[test]
fn magnitude_is_euclidean_norm() {
    let v = FrequencyVector::counts(&toks(&["a", "a", "a", "b", "b", "b", "b"]));
    assert!((v.magnitude() - 5.0).abs() < EPS);
}

#[test]
fn top_breaks_ties_by_term() {
    let v = FrequencyVector::counts(&toks(&["b", "a", "c", "c"]));
    let top = v.top(3);
    assert_eq!(top[0], (key("c"), 2.0));
    assert_eq!(top[1], (key("a"), 1.0));
    assert_eq!(top[2], (key("b"), 1.0));
}

// ============================================================
// IDF
// ============================================================

#[test]
fn shared_term_idf_is_zero() {
    let idf = Idf::two_document(&toks(&["cat", "sat"]), &toks(&["cat", "ran"]));
    assert_eq!(idf.document_frequency(&key("cat")), 2);
    assert_eq!(idf.weight(&key("cat")), 0.0);
}

#[test]
fn unique_term_idf_is_ln_two() {
    let idf = Idf::two_document(&toks(&["cat", "sat"]), &toks(&["cat", "ran"]));
    assert!((idf.weight(&key("sat")) - 2f64.ln()).abs() < EPS);
    assert!((idf.weight(&key("ran")) - 2f64.ln()).abs() < EPS);
}

#[test]
fn repeated_term_counts_once_per_document() {
    let idf = Idf::two_document(&toks(&["x", "x", "x"]), &toks(&["y"]));
    assert_eq!(idf.document_frequency(&key("x")), 1);
}

#[test]
fn unseen_term_weighs_zero() {
    let idf = Idf::two_document(&toks(&["a"]), &toks(&["b"]));
    assert_eq!(idf.weight(&key("zzz")), 0.0);
}

#[test]
fn smoothed_idf_never_reaches_zero() {
    let docs = [toks(&["a", "b"]), toks(&["a"])];
    let idf = Idf::fit(&docs, IdfSmoothing::Smoothed);
    // ln(3/3) + 1
    assert!((idf.weight(&key("a")) - 1.0).abs() < EPS);
    // ln(3/2) + 1
    assert!((idf.weight(&key("b")) - (1.5f64.ln() + 1.0)).abs() < EPS);
}

// ============================================================
// Vectorizer
// ============================================================

#[test]
fn tfidf_zeroes_terms_in_both_documents() {
    let (a, b) = Vectorizer::new(Weighting::TfIdf)
        .fit_pair(&toks(&["cat", "cat", "cat", "sat"]), &toks(&["cat", "ran"]));
    // The key survives with weight 0, however frequent
    assert!(a.contains(&key("cat")));
    assert_eq!(a.get(&key("cat")), 0.0);
    assert_eq!(b.get(&key("cat")), 0.0);
    assert!((a.get(&key("sat")) - 0.25 * 2f64.ln()).abs() < EPS);
}

#[test]
fn tfidf_of_identical_documents_is_all_zero() {
    let doc = toks(&["same", "words", "here"]);
    let (a, b) = Vectorizer::new(Weighting::TfIdf).fit_pair(&doc, &doc);
    assert_eq!(a.magnitude(), 0.0);
    assert_eq!(b.magnitude(), 0.0);
}

#[test]
fn smoothed_tfidf_keeps_shared_terms() {
    let (a, _) = Vectorizer::new(Weighting::SmoothedTfIdf)
        .fit_pair(&toks(&["cat", "sat"]), &toks(&["cat", "ran"]));
    assert!(a.get(&key("cat")) > 0.0);
}

#[test]
fn count_weighting_ignores_other_document() {
    let (a, _) = Vectorizer::new(Weighting::Count).fit_pair(&toks(&["a", "a"]), &toks(&["a"]));
    assert_eq!(a.get(&key("a")), 2.0);
}

#[test]
fn max_features_keeps_most_frequent_terms() {
    let (a, b) = Vectorizer::new(Weighting::Count)
        .with_max_features(Some(1))
        .fit_pair(&toks(&["a", "a", "b"]), &toks(&["a", "c"]));
    assert_eq!(a.len(), 1);
    assert_eq!(a.get(&key("a")), 2.0);
    assert_eq!(b.get(&key("a")), 1.0);
    assert!(!b.contains(&key("c")));
}

#[test]
fn fit_transform_shares_one_idf() {
    let docs = vec![toks(&["a", "b"]), toks(&["a", "c"]), toks(&["a", "d"])];
    let vectors: Vec<FrequencyVector<String>> =
        Vectorizer::new(Weighting::TfIdf).fit_transform(&docs);
    assert_eq!(vectors.len(), 3);
    for v in &vectors {
        assert_eq!(v.get(&key("a")), 0.0);
    }
    assert!((vectors[0].get(&key("b")) - 0.5 * 3f64.ln()).abs() < EPS);
}

// ============================================================
// Weighting names
// ============================================================

#[test]
fn weighting_parse_and_display() {
    assert_eq!(Weighting::parse("TFIDF"), Some(Weighting::TfIdf));
    assert_eq!(Weighting::parse("smoothed-tfidf"), Some(Weighting::SmoothedTfIdf));
    assert_eq!(Weighting::parse("bm25"), None);
    assert_eq!(Weighting::Tf.to_string(), "tf");
}
