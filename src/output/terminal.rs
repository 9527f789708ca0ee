// Colored terminal output for comparison results.
//
// This module handles terminal-specific formatting.
// main.rs delegates here after running an analysis.

use colored::Colorize;

use super::{percent, truncate_chars};
use crate::analysis::chunks::{ChunkReport, CrossScore};
use crate::analysis::compare::{
    BagOfWordsReport, ComparisonReport, NGramReport, SimilarityResult, TfIdfReport,
};
use crate::analysis::cooccurrence::NetworkSummary;
use crate::analysis::shared::SharedVocabulary;
use crate::analysis::SharedTerm;

const BAR_WIDTH: usize = 20;

/// A fixed-width bar for a [0, 1] score, colored by magnitude.
fn score_bar(score: f64) -> colored::ColoredString {
    let filled = (score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    let empty = BAR_WIDTH.saturating_sub(filled);
    let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

    if score >= 0.5 {
        bar.bright_green()
    } else if score >= 0.2 {
        bar.bright_yellow()
    } else {
        bar.bright_blue()
    }
}

fn heading(title: &str) {
    println!("\n{}", format!("=== {title} ===").bold());
}

fn display_result(result: &SimilarityResult) {
    println!(
        "  {:<34} {} {:>7}  {}",
        result.label.bold(),
        score_bar(result.cosine),
        percent(result.cosine),
        format!(
            "jaccard {:.4}  weighted {:.4}",
            result.jaccard, result.weighted_jaccard
        )
        .dimmed()
    );
}

fn display_shared_terms(terms: &[SharedTerm], doc1_label: &str, doc2_label: &str) {
    if terms.is_empty() {
        println!("  {}", "(no shared terms)".dimmed());
        return;
    }
    println!(
        "  {:<40} {:>10} {:>10}",
        "Term".dimmed(),
        truncate_chars(doc2_label, 10).dimmed(),
        truncate_chars(doc1_label, 10).dimmed()
    );
    for term in terms {
        println!(
            "  {:<40} {:>10} {:>10}",
            truncate_chars(&term.term, 40),
            term.doc2_count,
            term.doc1_count
        );
    }
}

/// Bag-of-words result with the top shared terms.
pub fn display_bag_of_words(report: &BagOfWordsReport) {
    heading(&report.result.label);
    println!(
        "  {}: {} tokens, {} unique terms",
        report.doc1.label, report.doc1.tokens, report.doc1.unique_terms
    );
    println!(
        "  {}: {} tokens, {} unique terms",
        report.doc2.label, report.doc2.tokens, report.doc2.unique_terms
    );
    println!();
    display_result(&report.result);
    println!(
        "\n  Common terms: {} ({} of {} vocabulary)",
        report.common_terms,
        percent(report.vocabulary_overlap),
        report.doc2.label
    );
    println!();
    display_shared_terms(&report.top_shared, &report.doc1.label, &report.doc2.label);
}

/// TF-IDF result with the heaviest doc2 terms.
pub fn display_tfidf(report: &TfIdfReport, doc2_label: &str) {
    heading(&report.result.label);
    display_result(&report.result);
    println!("\n  Top terms in {doc2_label} by weight:");
    for term in &report.top_doc2 {
        let mark = if term.in_doc1 {
            "in both".green()
        } else {
            "only here".yellow()
        };
        println!("    {:<30} {:.6}  [{}]", term.term, term.weight, mark);
    }
}

/// Fixed-n n-gram result with the top shared n-grams.
pub fn display_ngram(report: &NGramReport) {
    heading(&report.result.label);
    println!(
        "  {}: {} n-grams ({} unique)",
        report.doc1.label, report.doc1.tokens, report.doc1.unique_terms
    );
    println!(
        "  {}: {} n-grams ({} unique)",
        report.doc2.label, report.doc2.tokens, report.doc2.unique_terms
    );
    println!();
    display_result(&report.result);
    println!(
        "\n  Common n-grams: {} of {}",
        report.common, report.doc2.unique_terms
    );
    println!();
    display_shared_terms(&report.top_common, &report.doc1.label, &report.doc2.label);
}

/// The whole suite: details for each analysis, then the summary chart.
pub fn display_comparison(report: &ComparisonReport) {
    display_bag_of_words(&report.bag_of_words);
    display_bag_of_words(&report.bag_of_words_content);
    display_tfidf(&report.tfidf, &report.bag_of_words.doc2.label);
    display_ngram(&report.bigrams);
    display_ngram(&report.trigrams);

    heading("Summary (cosine)");
    for result in report.summary() {
        display_result(result);
    }
    println!();
}

/// Shared vocabulary counts and the top words each way.
pub fn display_shared(vocab: &SharedVocabulary, top_n: usize) {
    heading(&format!("Shared vocabulary ({} words)", vocab.len()));
    println!(
        "  {} unique content words: {}",
        vocab.doc1_label, vocab.doc1_vocabulary
    );
    println!(
        "  {} unique content words: {}",
        vocab.doc2_label, vocab.doc2_vocabulary
    );
    println!(
        "  Coverage: {} of {}, {} of {}",
        percent(vocab.doc2_coverage()),
        vocab.doc2_label,
        percent(vocab.doc1_coverage()),
        vocab.doc1_label
    );
    println!("\n  Top {top_n} by {} frequency:", vocab.doc2_label);
    let top: Vec<SharedTerm> = vocab.by_doc2_frequency().iter().take(top_n).cloned().collect();
    display_shared_terms(&top, &vocab.doc1_label, &vocab.doc2_label);
}

/// Chunk ranking with the whole-document comparison.
pub fn display_chunks(report: &ChunkReport) {
    heading(&format!("Chunks ranked by {} similarity", report.metric));
    for chunk in report.ranked() {
        println!(
            "  Chunk {:>2} ({:>7} tokens) {} {:>7}",
            chunk.index,
            chunk.tokens,
            score_bar(chunk.score),
            percent(chunk.score)
        );
    }

    println!("\n  Whole document: {}", percent(report.whole));
    if let Some(best) = report.best() {
        let delta = report.improvement() * 100.0;
        let delta_str = format!("{delta:+.2} percentage points");
        let colored_delta = if delta > 0.0 {
            delta_str.green()
        } else {
            delta_str.normal()
        };
        println!(
            "  Best chunk ({}): {}  {}",
            best.index,
            percent(best.score),
            colored_delta
        );
    }
}

/// Halves cross-matrix, highest first.
pub fn display_cross(scores: &[CrossScore]) {
    heading("Split comparison (all pairings)");
    for (i, cell) in scores.iter().enumerate() {
        println!(
            "  {:>2}. {:<28} vs {:<28} {} {:>7}",
            i + 1,
            cell.left,
            cell.right,
            score_bar(cell.score),
            percent(cell.score)
        );
    }
}

/// Co-occurrence network metrics for one document.
pub fn display_network(summary: &NetworkSummary) {
    heading(&format!("{}: co-occurrence network", summary.label));
    if summary.nodes == 0 {
        println!("  {}", "No tracked keywords found".dimmed());
        return;
    }
    println!("  Nodes (concepts): {}", summary.nodes);
    println!("  Edges (co-occurrences): {}", summary.edges);
    println!("  Density: {:.4}", summary.density);
    println!("  Average clustering: {:.4}", summary.average_clustering);

    println!("\n  Most connected concepts:");
    for (term, centrality) in &summary.top_central {
        println!("    {:<20} {:.3}", term, centrality);
    }

    println!("\n  Strongest associations:");
    for edge in &summary.strongest_pairs {
        println!(
            "    {:<30} {}",
            format!("{} <-> {}", edge.a, edge.b),
            edge.weight.to_string().bold()
        );
    }
}
