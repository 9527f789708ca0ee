// Plain-text report files.
//
// Each render_* function builds the full report text so it can be tested
// without touching the filesystem; write_report puts it on disk. Reports at
// the same path are overwritten on every run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use super::percent;
use crate::analysis::chunks::{ChunkReport, CrossScore};
use crate::analysis::compare::{ComparisonReport, SimilarityResult};
use crate::analysis::cooccurrence::NetworkSummary;
use crate::analysis::shared::SharedVocabulary;
use crate::analysis::SharedTerm;

const RULE_WIDTH: usize = 70;

fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

fn header(title: &str) -> String {
    format!(
        "{}\n{}\nGenerated: {}\n\n",
        title,
        rule('='),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

fn result_line(result: &SimilarityResult) -> String {
    format!(
        "{:<36} cosine {:>8}  jaccard {:.6}  weighted {:.6}\n",
        result.label,
        percent(result.cosine),
        result.jaccard,
        result.weighted_jaccard
    )
}

fn shared_table(terms: &[SharedTerm], doc1_label: &str, doc2_label: &str) -> String {
    let mut out = format!("{:<30} {:>12} {:>12}\n", "Term", doc2_label, doc1_label);
    out.push_str(&rule('-'));
    out.push('\n');
    for term in terms {
        out.push_str(&format!(
            "{:<30} {:>12} {:>12}\n",
            term.term, term.doc2_count, term.doc1_count
        ));
    }
    out
}

/// Create `dir` if needed and write `contents` to `dir/file_name`,
/// replacing any previous report.
pub fn write_report(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dir.join(file_name);
    fs::write(&path, contents)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "Wrote report");
    Ok(path)
}

/// Full comparison suite report.
pub fn render_comparison(report: &ComparisonReport) -> String {
    let doc1 = &report.bag_of_words.doc1;
    let doc2 = &report.bag_of_words.doc2;

    let mut out = header("DOCUMENT SIMILARITY REPORT");
    out.push_str(&format!(
        "{}: {} tokens, {} unique terms\n",
        doc1.label, doc1.tokens, doc1.unique_terms
    ));
    out.push_str(&format!(
        "{}: {} tokens, {} unique terms\n\n",
        doc2.label, doc2.tokens, doc2.unique_terms
    ));

    out.push_str("SCORES\n");
    out.push_str(&rule('-'));
    out.push('\n');
    for result in report.summary() {
        out.push_str(&result_line(result));
    }

    let content = &report.bag_of_words_content;
    out.push_str(&format!(
        "\nCommon content terms: {} ({} of {} vocabulary)\n",
        content.common_terms,
        percent(content.vocabulary_overlap),
        doc2.label
    ));
    out.push_str(&format!(
        "Stopword effect: {:+.2} percentage points\n\n",
        (report.bag_of_words.result.cosine - content.result.cosine) * 100.0
    ));

    out.push_str("TOP SHARED CONTENT TERMS\n");
    out.push_str(&shared_table(&content.top_shared, &doc1.label, &doc2.label));

    out.push_str(&format!(
        "\nTOP {} TERMS BY {}\n",
        doc2.label.to_uppercase(),
        report.tfidf.result.label.to_uppercase()
    ));
    out.push_str(&rule('-'));
    out.push('\n');
    for term in &report.tfidf.top_doc2 {
        out.push_str(&format!(
            "{:<30} {:>12.6}  in {}: {}\n",
            term.term,
            term.weight,
            doc1.label,
            if term.in_doc1 { "yes" } else { "no" }
        ));
    }

    for ngram in [&report.bigrams, &report.trigrams] {
        out.push_str(&format!(
            "\nTOP COMMON {}-GRAMS ({} shared)\n",
            ngram.n, ngram.common
        ));
        out.push_str(&shared_table(&ngram.top_common, &doc1.label, &doc2.label));
    }

    out
}

/// The four shared-vocabulary files, as (file name, contents).
pub fn render_shared(vocab: &SharedVocabulary, top_n: usize) -> Vec<(String, String)> {
    let doc1 = &vocab.doc1_label;
    let doc2 = &vocab.doc2_label;
    let total = format!("Total: {} words\n\n", vocab.len());

    let by_doc2 = {
        let mut out = header(&format!("SHARED WORDS SORTED BY {} FREQUENCY", doc2.to_uppercase()));
        out.push_str(&total);
        out.push_str(&shared_table(vocab.by_doc2_frequency(), doc1, doc2));
        out
    };

    let by_doc1_sorted = vocab.by_doc1_frequency();
    let by_doc1 = {
        let mut out = header(&format!("SHARED WORDS SORTED BY {} FREQUENCY", doc1.to_uppercase()));
        out.push_str(&total);
        out.push_str(&shared_table(&by_doc1_sorted, doc1, doc2));
        out
    };

    let alphabetical = {
        let mut out = header("SHARED WORDS - ALPHABETICAL LIST");
        out.push_str(&total);
        for word in vocab.alphabetical() {
            out.push_str(word);
            out.push('\n');
        }
        out
    };

    let summary = {
        let mut out = header("SHARED VOCABULARY SUMMARY");
        out.push_str(&format!(
            "{doc1} unique content words: {}\n",
            vocab.doc1_vocabulary
        ));
        out.push_str(&format!(
            "{doc2} unique content words: {}\n",
            vocab.doc2_vocabulary
        ));
        out.push_str(&format!("Shared content words: {}\n", vocab.len()));
        out.push_str(&format!(
            "{doc2} vocabulary coverage: {}\n",
            percent(vocab.doc2_coverage())
        ));
        out.push_str(&format!(
            "{doc1} vocabulary coverage: {}\n\n",
            percent(vocab.doc1_coverage())
        ));
        out.push_str(&format!("TOP {top_n} SHARED WORDS (by {doc2} frequency)\n"));
        let top2: Vec<SharedTerm> = vocab.by_doc2_frequency().iter().take(top_n).cloned().collect();
        out.push_str(&shared_table(&top2, doc1, doc2));
        out.push_str(&format!("\nTOP {top_n} SHARED WORDS (by {doc1} frequency)\n"));
        let top1: Vec<SharedTerm> = by_doc1_sorted.iter().take(top_n).cloned().collect();
        out.push_str(&shared_table(&top1, doc1, doc2));
        out
    };

    vec![
        ("shared_words_by_doc2_frequency.txt".to_string(), by_doc2),
        ("shared_words_by_doc1_frequency.txt".to_string(), by_doc1),
        ("shared_words_alphabetical.txt".to_string(), alphabetical),
        ("shared_words_summary.txt".to_string(), summary),
    ]
}

/// Write all shared-vocabulary files into `dir`.
pub fn write_shared_reports(
    dir: &Path,
    vocab: &SharedVocabulary,
    top_n: usize,
) -> Result<Vec<PathBuf>> {
    render_shared(vocab, top_n)
        .into_iter()
        .map(|(name, contents)| write_report(dir, &name, &contents))
        .collect()
}

pub fn render_chunks(report: &ChunkReport) -> String {
    let mut out = header("CHUNK SIMILARITY ANALYSIS");
    out.push_str(&format!("Metric: {}\n\n", report.metric));
    out.push_str("Chunks ranked by similarity:\n");
    out.push_str(&rule('-'));
    out.push('\n');
    for chunk in report.ranked() {
        out.push_str(&format!(
            "Chunk {:>3} ({:>8} tokens): {:>8}\n",
            chunk.index,
            chunk.tokens,
            percent(chunk.score)
        ));
    }
    out.push_str(&format!("\nWhole document: {}\n", percent(report.whole)));
    if let Some(best) = report.best() {
        out.push_str(&format!(
            "Best chunk (Chunk {}): {}\nImprovement over whole: {:+.2} percentage points\n",
            best.index,
            percent(best.score),
            report.improvement() * 100.0
        ));
    }
    out
}

pub fn render_cross(scores: &[CrossScore]) -> String {
    let mut out = header("SPLIT DOCUMENT SIMILARITY ANALYSIS");
    out.push_str("All combinations (sorted by similarity):\n");
    out.push_str(&rule('-'));
    out.push('\n');
    for cell in scores {
        out.push_str(&format!(
            "{:<30} vs {:<30} = {:>8}\n",
            cell.left,
            cell.right,
            percent(cell.score)
        ));
    }
    out
}

pub fn render_network(summaries: &[NetworkSummary]) -> String {
    let mut out = header("KEYWORD CO-OCCURRENCE NETWORKS");
    for summary in summaries {
        out.push_str(&format!("{}\n", summary.label));
        out.push_str(&rule('-'));
        out.push('\n');
        out.push_str(&format!("Nodes (concepts): {}\n", summary.nodes));
        out.push_str(&format!("Edges (co-occurrences): {}\n", summary.edges));
        out.push_str(&format!("Density: {:.4}\n", summary.density));
        out.push_str(&format!(
            "Average clustering coefficient: {:.4}\n",
            summary.average_clustering
        ));
        out.push_str("\nMost connected concepts:\n");
        for (term, centrality) in &summary.top_central {
            out.push_str(&format!("  {term:<20} {centrality:.3}\n"));
        }
        out.push_str("\nStrongest associations:\n");
        for edge in &summary.strongest_pairs {
            out.push_str(&format!("  {} <-> {}: {}\n", edge.a, edge.b, edge.weight));
        }
        out.push_str("\nKeyword frequencies:\n");
        for (term, count) in &summary.frequencies {
            out.push_str(&format!("  {term:<20} {count}\n"));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::chunks::ChunkScore;

    #[test]
    fn test_write_report_overwrites() {
        let dir = std::env::temp_dir().join("docsim_report_overwrite");
        let path = write_report(&dir, "r.txt", "first").unwrap();
        write_report(&dir, "r.txt", "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_render_chunks_ranks_and_reports_improvement() {
        let report = ChunkReport {
            metric: "cosine".to_string(),
            whole: 0.25,
            chunks: vec![
                ChunkScore { index: 1, tokens: 10, score: 0.1 },
                ChunkScore { index: 2, tokens: 10, score: 0.4 },
            ],
        };
        let text = render_chunks(&report);
        let pos2 = text.find("Chunk   2").unwrap();
        let pos1 = text.find("Chunk   1").unwrap();
        assert!(pos2 < pos1, "higher-scoring chunk should be listed first");
        assert!(text.contains("Best chunk (Chunk 2): 40.00%"));
        assert!(text.contains("+15.00 percentage points"));
    }
}
