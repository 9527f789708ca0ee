use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::text::ngram::NGramRange;
use crate::text::stopwords::StopwordList;
use crate::vector::frequency::Weighting;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every field
/// can be overridden by a CLI flag; main.rs applies the overrides after
/// loading.
#[derive(Debug, Clone)]
pub struct Config {
    /// First document, the one that gets chunked and split
    pub doc1_path: PathBuf,
    /// Second document (the one being compared against doc1)
    pub doc2_path: PathBuf,
    /// Directory plain-text reports are written into (overwritten each run)
    pub output_dir: PathBuf,
    /// N-gram lengths used by the combined n-gram TF-IDF comparison
    pub ngram_range: NGramRange,
    /// Weighting for the word-level TF-IDF comparison
    pub weighting: Weighting,
    /// Weighting for chunk, split, and n-gram range comparisons. These score
    /// overlapping text, so the default IDF never zeroes shared terms.
    pub segment_weighting: Weighting,
    /// Which stopword list "stopwords removed" analyses use
    pub stopwords: StopwordList,
    /// Vocabulary cap for the n-gram TF-IDF comparison (None = unlimited)
    pub max_features: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            doc1_path: PathBuf::from("txt/document1.txt"),
            doc2_path: PathBuf::from("txt/document2.txt"),
            output_dir: PathBuf::from("reports"),
            ngram_range: NGramRange::default(),
            weighting: Weighting::TfIdf,
            segment_weighting: Weighting::SmoothedTfIdf,
            stopwords: StopwordList::Builtin,
            max_features: Some(10_000),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; only malformed values are errors.
    pub fn load() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. `load` passes the
    /// process environment; tests pass a map.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let ngram_range = match lookup("DOCSIM_NGRAM_RANGE") {
            Some(v) => NGramRange::parse(&v)
                .map_err(|e| anyhow::anyhow!("DOCSIM_NGRAM_RANGE: {e}"))?,
            None => defaults.ngram_range,
        };

        let weighting = match lookup("DOCSIM_WEIGHTING") {
            Some(v) => parse_weighting("DOCSIM_WEIGHTING", &v)?,
            None => defaults.weighting,
        };

        let segment_weighting = match lookup("DOCSIM_SEGMENT_WEIGHTING") {
            Some(v) => parse_weighting("DOCSIM_SEGMENT_WEIGHTING", &v)?,
            None => defaults.segment_weighting,
        };

        let stopwords = match lookup("DOCSIM_STOPWORDS") {
            Some(v) => StopwordList::parse(&v).ok_or_else(|| {
                anyhow::anyhow!(
                    "DOCSIM_STOPWORDS: unknown stopword list '{v}' \
                     (expected builtin, english, or none)"
                )
            })?,
            None => defaults.stopwords,
        };

        let max_features = match lookup("DOCSIM_MAX_FEATURES") {
            Some(v) => {
                let n: usize = v.trim().parse().map_err(|_| {
                    anyhow::anyhow!("DOCSIM_MAX_FEATURES: '{v}' is not a non-negative integer")
                })?;
                // 0 means no cap
                (n > 0).then_some(n)
            }
            None => defaults.max_features,
        };

        Ok(Self {
            doc1_path: lookup("DOCSIM_DOC1")
                .map(PathBuf::from)
                .unwrap_or(defaults.doc1_path),
            doc2_path: lookup("DOCSIM_DOC2")
                .map(PathBuf::from)
                .unwrap_or(defaults.doc2_path),
            output_dir: lookup("DOCSIM_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            ngram_range,
            weighting,
            segment_weighting,
            stopwords,
            max_features,
        })
    }
}

fn parse_weighting(var: &str, value: &str) -> Result<Weighting> {
    Weighting::parse(value).ok_or_else(|| {
        anyhow::anyhow!(
            "{var}: unknown weighting '{value}' \
             (expected count, tf, tfidf, or smoothed-tfidf)"
        )
    })
}
