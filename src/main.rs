use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use docsim::analysis::chunks::{halves_cross_matrix, rank_chunks};
use docsim::analysis::compare::{self, CompareOptions};
use docsim::analysis::cooccurrence::{
    self, CooccurrenceNetwork, NetworkSummary, DEFAULT_KEYWORDS, DEFAULT_MIN_EDGE_WEIGHT,
    DEFAULT_WINDOW,
};
use docsim::analysis::shared::SharedVocabulary;
use docsim::analysis::TokenizedPair;
use docsim::config::Config;
use docsim::document::Document;
use docsim::output::{report, terminal};
use docsim::similarity::traits::Metric;
use docsim::text::ngram::NGramRange;
use docsim::text::stopwords::StopwordList;
use docsim::text::tokenizer::TokenFilter;
use docsim::vector::frequency::{Vectorizer, Weighting};

/// docsim: compare two text documents.
///
/// Scores how similar two documents are with bag-of-words, TF-IDF, n-gram,
/// and keyword co-occurrence statistics, and writes plain-text reports.
#[derive(Parser)]
#[command(name = "docsim", version, about)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonArgs {
    /// First document (overrides DOCSIM_DOC1)
    #[arg(long, global = true)]
    doc1: Option<PathBuf>,

    /// Second document (overrides DOCSIM_DOC2)
    #[arg(long, global = true)]
    doc2: Option<PathBuf>,

    /// Directory for report files (overrides DOCSIM_OUTPUT_DIR)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Stopword list: builtin, english, or none (overrides DOCSIM_STOPWORDS)
    #[arg(long, global = true, value_parser = parse_stopwords)]
    stopwords: Option<StopwordList>,

    /// Weighting: count, tf, tfidf, or smoothed-tfidf (overrides DOCSIM_WEIGHTING)
    #[arg(long, global = true, value_parser = parse_weighting)]
    weighting: Option<Weighting>,

    /// Weighting for chunks, split, and n-gram range TF-IDF
    /// (overrides DOCSIM_SEGMENT_WEIGHTING)
    #[arg(long, global = true, value_parser = parse_weighting)]
    segment_weighting: Option<Weighting>,

    /// N-gram range like 1-3 (overrides DOCSIM_NGRAM_RANGE)
    #[arg(long, global = true, value_parser = parse_ngram_range)]
    ngram_range: Option<NGramRange>,

    /// How many entries to show in "top" lists
    #[arg(long, global = true, default_value = "20")]
    top: usize,

    /// Print results as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every comparison and write similarity_report.txt
    Compare,

    /// Bag-of-words cosine similarity, with and without stopwords
    Bow,

    /// Word-level TF-IDF similarity
    Tfidf,

    /// Fixed-length n-gram similarity (cosine and Jaccard)
    Ngram {
        /// N-gram lengths to compare, comma separated
        #[arg(long, value_delimiter = ',', default_value = "2,3")]
        n: Vec<usize>,
    },

    /// List the content words both documents share
    Shared {
        /// Drop tokens shorter than this many characters
        #[arg(long, default_value = "3")]
        min_len: usize,
    },

    /// Split doc1 into chunks and rank each against doc2
    Chunks {
        /// Number of chunks (default: 4)
        #[arg(long, default_value = "4")]
        count: usize,

        /// Similarity metric: cosine, jaccard, or weighted-jaccard
        #[arg(long, default_value = "cosine", value_parser = parse_metric)]
        metric: Metric,
    },

    /// Compare full and half documents in every pairing
    Split {
        /// Similarity metric: cosine, jaccard, or weighted-jaccard
        #[arg(long, default_value = "cosine", value_parser = parse_metric)]
        metric: Metric,
    },

    /// Build keyword co-occurrence networks for both documents
    Cooccur {
        /// Window size in words (default: 10)
        #[arg(long, default_value_t = DEFAULT_WINDOW)]
        window: usize,

        /// Minimum co-occurrences for an edge (default: 2)
        #[arg(long, default_value_t = DEFAULT_MIN_EDGE_WEIGHT)]
        min_edge: usize,

        /// Keywords to track, comma separated (default: built-in list)
        #[arg(long, value_delimiter = ',')]
        keywords: Vec<String>,
    },
}

fn parse_stopwords(value: &str) -> Result<StopwordList, String> {
    StopwordList::parse(value).ok_or_else(|| format!("unknown stopword list '{value}'"))
}

fn parse_weighting(value: &str) -> Result<Weighting, String> {
    Weighting::parse(value).ok_or_else(|| format!("unknown weighting '{value}'"))
}

fn parse_ngram_range(value: &str) -> Result<NGramRange, String> {
    NGramRange::parse(value).map_err(|e| e.to_string())
}

fn parse_metric(value: &str) -> Result<Metric, String> {
    Metric::parse(value).ok_or_else(|| format!("unknown metric '{value}'"))
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging on stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("docsim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.common)?;
    let common = &cli.common;

    let (doc1, doc2) = load_documents(&config)?;
    let pair = TokenizedPair::new(&doc1, &doc2);
    info!(
        doc1_tokens = pair.doc1.len(),
        doc2_tokens = pair.doc2.len(),
        "Tokenized documents"
    );

    match cli.command {
        Commands::Compare => {
            let options = CompareOptions {
                top_n: common.top,
                ..CompareOptions::from_config(&config)
            };
            let result = compare::run(&pair, &options);
            let path = report::write_report(
                &config.output_dir,
                "similarity_report.txt",
                &report::render_comparison(&result),
            )?;
            emit(common.json, &result, || terminal::display_comparison(&result))?;
            saved(&[path]);
        }

        Commands::Bow => {
            let with_stops =
                compare::bag_of_words(&pair, &TokenFilter::keep_all(), "Bag-of-words", common.top);
            let without_stops = compare::bag_of_words(
                &pair,
                &TokenFilter::without_stopwords(config.stopwords.load()),
                "Bag-of-words (no stopwords)",
                common.top,
            );
            let both = [&with_stops, &without_stops];
            emit(common.json, &both, || {
                terminal::display_bag_of_words(&with_stops);
                terminal::display_bag_of_words(&without_stops);
                let delta = (with_stops.result.cosine - without_stops.result.cosine) * 100.0;
                println!("\n  Stopword effect: {delta:+.2} percentage points");
            })?;
        }

        Commands::Tfidf => {
            let result = compare::tfidf(
                &pair,
                &TokenFilter::without_stopwords(config.stopwords.load()),
                config.weighting,
                common.top,
            );
            emit(common.json, &result, || {
                terminal::display_tfidf(&result, &pair.doc2_label)
            })?;
        }

        Commands::Ngram { n } => {
            let mut reports = Vec::with_capacity(n.len());
            for len in n {
                if len == 0 {
                    anyhow::bail!("n-gram length must be at least 1");
                }
                reports.push(compare::ngram(&pair, len, common.top));
            }
            emit(common.json, &reports, || {
                for r in &reports {
                    terminal::display_ngram(r);
                }
            })?;
        }

        Commands::Shared { min_len } => {
            let filter =
                TokenFilter::without_stopwords(config.stopwords.load()).with_min_len(min_len);
            let vocab = SharedVocabulary::build(&pair, &filter);
            let paths = report::write_shared_reports(&config.output_dir, &vocab, 50)?;
            emit(common.json, &vocab, || terminal::display_shared(&vocab, common.top))?;
            saved(&paths);
        }

        Commands::Chunks { count, metric } => {
            let result = rank_chunks(
                &pair,
                count,
                &TokenFilter::without_stopwords(config.stopwords.load()),
                &Vectorizer::new(config.segment_weighting),
                metric.scorer().as_ref(),
            )?;
            let path = report::write_report(
                &config.output_dir,
                "chunk_analysis_results.txt",
                &report::render_chunks(&result),
            )?;
            emit(common.json, &result, || terminal::display_chunks(&result))?;
            saved(&[path]);
        }

        Commands::Split { metric } => {
            let scores = halves_cross_matrix(
                &pair,
                &TokenFilter::without_stopwords(config.stopwords.load()),
                &Vectorizer::new(config.segment_weighting),
                metric.scorer().as_ref(),
            );
            let path = report::write_report(
                &config.output_dir,
                "split_analysis_results.txt",
                &report::render_cross(&scores),
            )?;
            emit(common.json, &scores, || terminal::display_cross(&scores))?;
            saved(&[path]);
        }

        Commands::Cooccur {
            window,
            min_edge,
            keywords,
        } => {
            let keywords: HashSet<String> = if keywords.is_empty() {
                DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
            } else {
                keywords.iter().map(|k| k.trim().to_lowercase()).collect()
            };

            let mut summaries = Vec::with_capacity(2);
            for doc in [&doc1, &doc2] {
                let words = cooccurrence::words(&doc.text);
                let network = CooccurrenceNetwork::build(&words, &keywords, window, min_edge)?;
                summaries.push(NetworkSummary::from_network(&doc.label, &network, common.top));
            }

            let path = report::write_report(
                &config.output_dir,
                "cooccurrence_network.txt",
                &report::render_network(&summaries),
            )?;
            emit(common.json, &summaries, || {
                for s in &summaries {
                    terminal::display_network(s);
                }
            })?;
            saved(&[path]);
        }
    }

    Ok(())
}

/// Load env configuration and apply CLI overrides on top.
fn load_config(args: &CommonArgs) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(path) = &args.doc1 {
        config.doc1_path = path.clone();
    }
    if let Some(path) = &args.doc2 {
        config.doc2_path = path.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(stopwords) = args.stopwords {
        config.stopwords = stopwords;
    }
    if let Some(weighting) = args.weighting {
        config.weighting = weighting;
    }
    if let Some(weighting) = args.segment_weighting {
        config.segment_weighting = weighting;
    }
    if let Some(range) = args.ngram_range {
        config.ngram_range = range;
    }
    Ok(config)
}

/// Load both documents. The first missing file aborts the run.
fn load_documents(config: &Config) -> Result<(Document, Document)> {
    let doc1 = Document::load(&label_for(&config.doc1_path, "doc1"), &config.doc1_path)?;
    let doc2 = Document::load(&label_for(&config.doc2_path, "doc2"), &config.doc2_path)?;
    for doc in [&doc1, &doc2] {
        info!(
            label = %doc.label,
            path = %doc.path.display(),
            words = doc.word_count(),
            "Loaded document"
        );
    }
    Ok((doc1, doc2))
}

/// Short display label from the file stem, falling back to `fallback`.
fn label_for(path: &std::path::Path, fallback: &str) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// Print `value` as JSON, or run the terminal display.
fn emit<T: Serialize, F: FnOnce()>(json: bool, value: &T, display: F) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        display();
    }
    Ok(())
}

fn saved(paths: &[PathBuf]) {
    for path in paths {
        eprintln!("{} {}", "Saved:".dimmed(), path.display());
    }
}
