// Keyword co-occurrence networks.
//
// Slides a fixed-size window across the word sequence, starting at every
// position. Within each window, every keyword occurrence bumps that keyword's
// frequency, and every unordered pair of distinct keywords present bumps the
// pair's co-occurrence count. A keyword therefore counts once per window that
// contains it, so frequencies scale with the window size.
//
// Pairs seen at least `min_edge_weight` times become edges of an undirected
// graph whose nodes are the keywords that appeared at all. Graph metrics
// (density, degree centrality, clustering) describe how tightly the concepts
// hang together in each document.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::LazyLock;

use anyhow::Result;
use regex_lite::Regex;
use serde::Serialize;
use tracing::info;

use super::descending;

/// Candidate words: maximal runs of ASCII lowercase letters. `words` drops
/// runs that touch another word character, since `\b` here is ASCII-only.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]+").expect("word pattern is valid"));

/// Default tracked keywords: ideological, institutional, and identity terms.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "marx", "marxism", "marxist", "postmodern", "postmodernism", "feminism", "feminist",
    "islam", "muslim", "identity", "politics", "power", "oppression", "oppressive",
    "western", "civilization", "culture", "radical", "progressive", "university",
    "universities", "campus", "professor", "student", "students", "education", "political",
    "correctness", "freedom", "speech", "race", "gender", "sex", "sexual", "class",
    "diversity", "equity", "equality", "war", "conflict", "struggle", "fight", "rights",
    "truth",
];

pub const DEFAULT_WINDOW: usize = 10;
pub const DEFAULT_MIN_EDGE_WEIGHT: usize = 2;

/// Lowercase the text and extract alphabetic words. A run touching a digit,
/// an underscore, or a non-ASCII letter ("marx2freud", "café") is not a word
/// and yields nothing.
pub fn words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower)
        .filter(|m| {
            let before = lower[..m.start()].chars().next_back();
            let after = lower[m.end()..].chars().next();
            !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
        })
        .map(|m| m.as_str().to_string())
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A weighted undirected edge; `a < b` lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub a: String,
    pub b: String,
    pub weight: usize,
}

#[derive(Debug, Clone)]
pub struct CooccurrenceNetwork {
    keyword_counts: BTreeMap<String, usize>,
    pair_counts: BTreeMap<(String, String), usize>,
    min_edge_weight: usize,
}

impl CooccurrenceNetwork {
    /// Count keyword occurrences and co-occurrences over sliding windows.
    pub fn build(
        words: &[String],
        keywords: &HashSet<String>,
        window: usize,
        min_edge_weight: usize,
    ) -> Result<Self> {
        if window == 0 {
            anyhow::bail!("co-occurrence window must be at least 1 word");
        }

        let mut keyword_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut pair_counts: BTreeMap<(String, String), usize> = BTreeMap::new();

        for start in 0..words.len() {
            let end = (start + window).min(words.len());
            let mut present: BTreeSet<&str> = BTreeSet::new();
            for word in &words[start..end] {
                if keywords.contains(word) {
                    *keyword_counts.entry(word.clone()).or_insert(0) += 1;
                    present.insert(word.as_str());
                }
            }

            // BTreeSet iterates sorted, so (a, b) always has a < b
            let present: Vec<&str> = present.into_iter().collect();
            for (i, a) in present.iter().enumerate() {
                for b in &present[i + 1..] {
                    *pair_counts
                        .entry((a.to_string(), b.to_string()))
                        .or_insert(0) += 1;
                }
            }
        }

        Ok(Self {
            keyword_counts,
            pair_counts,
            min_edge_weight,
        })
    }

    /// Keywords that appeared at least once, alphabetical.
    pub fn nodes(&self) -> Vec<&str> {
        self.keyword_counts.keys().map(String::as_str).collect()
    }

    pub fn frequency(&self, keyword: &str) -> usize {
        self.keyword_counts.get(keyword).copied().unwrap_or(0)
    }

    /// Pairs co-occurring at least `min_edge_weight` times.
    pub fn edges(&self) -> Vec<Edge> {
        self.pair_counts
            .iter()
            .filter(|(_, &count)| count >= self.min_edge_weight)
            .map(|((a, b), &weight)| Edge {
                a: a.clone(),
                b: b.clone(),
                weight,
            })
            .collect()
    }

    /// Every co-occurring pair regardless of threshold, strongest first.
    pub fn strongest_pairs(&self, n: usize) -> Vec<Edge> {
        let mut pairs: Vec<Edge> = self
            .pair_counts
            .iter()
            .map(|((a, b), &weight)| Edge {
                a: a.clone(),
                b: b.clone(),
                weight,
            })
            .collect();
        // BTreeMap order is alphabetical, and sort_by is stable
        pairs.sort_by(|x, y| y.weight.cmp(&x.weight));
        pairs.truncate(n);
        pairs
    }

    fn adjacency(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        let mut adjacency: BTreeMap<&str, BTreeSet<&str>> =
            self.nodes().into_iter().map(|n| (n, BTreeSet::new())).collect();
        for ((a, b), &count) in &self.pair_counts {
            if count >= self.min_edge_weight {
                adjacency.entry(a.as_str()).or_default().insert(b.as_str());
                adjacency.entry(b.as_str()).or_default().insert(a.as_str());
            }
        }
        adjacency
    }

    /// `2E / (N (N - 1))`, 0 for fewer than two nodes.
    pub fn density(&self) -> f64 {
        let n = self.keyword_counts.len();
        if n < 2 {
            return 0.0;
        }
        let e = self.edges().len();
        (2 * e) as f64 / (n * (n - 1)) as f64
    }

    /// `degree / (N - 1)` per node, highest first, ties alphabetical.
    /// A single-node graph gives that node centrality 1.
    pub fn degree_centrality(&self) -> Vec<(String, f64)> {
        let adjacency = self.adjacency();
        let n = adjacency.len();
        let mut centrality: Vec<(String, f64)> = adjacency
            .iter()
            .map(|(node, neighbours)| {
                let score = if n <= 1 {
                    1.0
                } else {
                    neighbours.len() as f64 / (n - 1) as f64
                };
                (node.to_string(), score)
            })
            .collect();
        centrality.sort_by(|a, b| descending(a.1, b.1));
        centrality
    }

    /// Mean local clustering coefficient over all nodes. Nodes with fewer
    /// than two neighbours contribute 0.
    pub fn average_clustering(&self) -> f64 {
        let adjacency = self.adjacency();
        if adjacency.is_empty() {
            return 0.0;
        }

        let total: f64 = adjacency
            .values()
            .map(|neighbours| {
                let k = neighbours.len();
                if k < 2 {
                    return 0.0;
                }
                let neighbours: Vec<&&str> = neighbours.iter().collect();
                let mut links = 0usize;
                for (i, u) in neighbours.iter().enumerate() {
                    for v in &neighbours[i + 1..] {
                        if adjacency.get(**u).is_some_and(|adj| adj.contains(**v)) {
                            links += 1;
                        }
                    }
                }
                (2 * links) as f64 / (k * (k - 1)) as f64
            })
            .sum();

        total / adjacency.len() as f64
    }
}

/// Headline metrics for one document's network.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSummary {
    pub label: String,
    pub nodes: usize,
    pub edges: usize,
    pub density: f64,
    pub average_clustering: f64,
    pub top_central: Vec<(String, f64)>,
    pub strongest_pairs: Vec<Edge>,
    /// Node frequencies, highest first
    pub frequencies: Vec<(String, usize)>,
}

impl NetworkSummary {
    pub fn from_network(label: &str, network: &CooccurrenceNetwork, top_n: usize) -> Self {
        let mut frequencies: Vec<(String, usize)> = network
            .keyword_counts
            .iter()
            .map(|(k, &c)| (k.clone(), c))
            .collect();
        frequencies.sort_by(|a, b| b.1.cmp(&a.1));

        let mut top_central = network.degree_centrality();
        top_central.truncate(top_n);

        let summary = Self {
            label: label.to_string(),
            nodes: network.keyword_counts.len(),
            edges: network.edges().len(),
            density: network.density(),
            average_clustering: network.average_clustering(),
            top_central,
            strongest_pairs: network.strongest_pairs(top_n),
            frequencies,
        };

        info!(
            label,
            nodes = summary.nodes,
            edges = summary.edges,
            density = summary.density,
            "Built co-occurrence network"
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_words_regex() {
        assert_eq!(words("Free-Speech 2083 rights!"), vec!["free", "speech", "rights"]);
    }

    #[test]
    fn test_words_reject_non_ascii_letter_neighbours() {
        assert_eq!(words("café truth naïve power"), vec!["truth", "power"]);
        assert_eq!(words("Émile snake_case ok"), vec!["ok"]);
    }

    #[test]
    fn test_window_counts() {
        let text = words("a x b");
        let net = CooccurrenceNetwork::build(&text, &kw(&["a", "b"]), 3, 1).unwrap();
        // windows: [a x b], [x b], [b]
        assert_eq!(net.frequency("a"), 1);
        assert_eq!(net.frequency("b"), 3);
        assert_eq!(
            net.edges(),
            vec![Edge {
                a: "a".into(),
                b: "b".into(),
                weight: 1
            }]
        );
    }

    #[test]
    fn test_min_edge_weight_filters() {
        let text = words("a b");
        let net = CooccurrenceNetwork::build(&text, &kw(&["a", "b"]), 2, 2).unwrap();
        assert!(net.edges().is_empty());
        assert_eq!(net.nodes(), vec!["a", "b"]);
        assert_eq!(net.density(), 0.0);
        assert_eq!(net.strongest_pairs(5).len(), 1);
    }

    #[test]
    fn test_triangle_metrics() {
        let text = words("a b c");
        let net = CooccurrenceNetwork::build(&text, &kw(&["a", "b", "c"]), 3, 1).unwrap();
        assert_eq!(net.edges().len(), 3);
        assert!((net.density() - 1.0).abs() < 1e-12);
        assert!((net.average_clustering() - 1.0).abs() < 1e-12);
        assert!(net
            .degree_centrality()
            .iter()
            .all(|(_, c)| (c - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_path_clustering_is_zero() {
        // only a and b ever share a window
        let text = words("a b x x c");
        let net = CooccurrenceNetwork::build(&text, &kw(&["a", "b", "c"]), 2, 1).unwrap();
        let edges = net.edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(net.average_clustering(), 0.0);
    }

    #[test]
    fn test_zero_window_is_error() {
        assert!(CooccurrenceNetwork::build(&[], &kw(&["a"]), 0, 1).is_err());
    }

    #[test]
    fn test_empty_text() {
        let net = CooccurrenceNetwork::build(&[], &kw(&["a"]), 10, 2).unwrap();
        assert!(net.nodes().is_empty());
        assert_eq!(net.density(), 0.0);
        assert_eq!(net.average_clustering(), 0.0);
        assert!(net.degree_centrality().is_empty());
    }
}
