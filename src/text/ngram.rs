// N-gram generation over token sequences.
//
// `ngrams` borrows the token slice and yields contiguous windows without
// copying. Callers that need owned, hashable keys convert windows into
// `NGram` values.

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// An owned n-gram: an ordered tuple of tokens used as a frequency-map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NGram(pub Vec<String>);

impl NGram {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }
}

impl From<&[String]> for NGram {
    fn from(window: &[String]) -> Self {
        Self(window.to_vec())
    }
}

impl fmt::Display for NGram {
    /// Tokens never contain whitespace, so a space join is unambiguous.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// Lazy iterator over the contiguous `n`-length windows of a token slice.
///
/// Cloning restarts nothing; it copies the cursor. Call `ngrams` again to
/// iterate from the start.
#[derive(Debug, Clone)]
pub struct NGrams<'a> {
    tokens: &'a [String],
    n: usize,
    pos: usize,
}

impl<'a> Iterator for NGrams<'a> {
    type Item = &'a [String];

    fn next(&mut self) -> Option<Self::Item> {
        if self.n == 0 || self.pos + self.n > self.tokens.len() {
            return None;
        }
        let window = &self.tokens[self.pos..self.pos + self.n];
        self.pos += 1;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.n == 0 {
            0
        } else {
            (self.tokens.len() + 1).saturating_sub(self.pos + self.n)
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for NGrams<'_> {}

/// All contiguous windows of length `n`, in document order.
///
/// Yields `max(0, len - n + 1)` windows; nothing when `n == 0` or the
/// sequence is shorter than `n`.
pub fn ngrams(tokens: &[String], n: usize) -> NGrams<'_> {
    NGrams { tokens, n, pos: 0 }
}

/// Inclusive range of n-gram lengths, e.g. 1-3 for unigrams through trigrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NGramRange {
    pub min: usize,
    pub max: usize,
}

impl Default for NGramRange {
    fn default() -> Self {
        Self { min: 1, max: 3 }
    }
}

impl NGramRange {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min == 0 {
            anyhow::bail!("n-gram length must be at least 1");
        }
        if min > max {
            anyhow::bail!("invalid n-gram range {min}-{max}: min is greater than max");
        }
        Ok(Self { min, max })
    }

    /// A range covering exactly one length.
    pub fn single(n: usize) -> Result<Self> {
        Self::new(n, n)
    }

    /// Parse "1-3" or a single "2".
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let (min, max) = match value.split_once('-') {
            Some((lo, hi)) => (lo.trim(), hi.trim()),
            None => (value, value),
        };
        let min: usize = min
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid n-gram range '{value}'"))?;
        let max: usize = max
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid n-gram range '{value}'"))?;
        Self::new(min, max)
    }

    /// Every n-gram for every length in the range, shortest lengths first.
    pub fn generate(self, tokens: &[String]) -> Vec<NGram> {
        (self.min..=self.max)
            .flat_map(|n| ngrams(tokens, n).map(NGram::from))
            .collect()
    }
}

impl fmt::Display for NGramRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_bigrams_in_order() {
        let tokens = toks(&["a", "b", "c", "d"]);
        let grams: Vec<&[String]> = ngrams(&tokens, 2).collect();
        assert_eq!(grams.len(), 3);
        assert_eq!(grams[0], &tokens[0..2]);
        assert_eq!(grams[2], &tokens[2..4]);
    }

    #[test]
    fn test_too_short_yields_nothing() {
        let tokens = toks(&["a", "b"]);
        assert_eq!(ngrams(&tokens, 3).count(), 0);
        assert_eq!(ngrams(&[], 1).count(), 0);
    }

    #[test]
    fn test_zero_length_yields_nothing() {
        let tokens = toks(&["a", "b"]);
        assert_eq!(ngrams(&tokens, 0).count(), 0);
        assert_eq!(ngrams(&tokens, 0).len(), 0);
    }

    #[test]
    fn test_exact_size_hint() {
        let tokens = toks(&["a", "b", "c", "d", "e"]);
        let mut it = ngrams(&tokens, 2);
        assert_eq!(it.len(), 4);
        it.next();
        assert_eq!(it.len(), 3);
    }

    #[test]
    fn test_restartable() {
        let tokens = toks(&["x", "y", "z"]);
        let first: Vec<_> = ngrams(&tokens, 2).collect();
        let second: Vec<_> = ngrams(&tokens, 2).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_range_generate() {
        let tokens = toks(&["a", "b", "c"]);
        let grams = NGramRange::new(1, 2).unwrap().generate(&tokens);
        let shown: Vec<String> = grams.iter().map(|g| g.to_string()).collect();
        assert_eq!(shown, vec!["a", "b", "c", "a b", "b c"]);
    }

    #[test]
    fn test_range_parse() {
        assert_eq!(NGramRange::parse("1-3").unwrap(), NGramRange { min: 1, max: 3 });
        assert_eq!(NGramRange::parse("2").unwrap(), NGramRange { min: 2, max: 2 });
        assert!(NGramRange::parse("0-2").is_err());
        assert!(NGramRange::parse("3-1").is_err());
        assert!(NGramRange::parse("x").is_err());
    }
}
