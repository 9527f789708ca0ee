// Tokenizer: raw text to a normalized token sequence.
//
// Normalization: lowercase, drop every character that is
// not an ASCII lowercase letter, digit, or whitespace, then split on runs of
// whitespace. Punctuation inside a word is removed rather than treated as a
// boundary, so "don't" becomes "dont" and "post-modern" becomes "postmodern".

use super::stopwords::StopwordSet;

/// Normalize a string into the character set the tokenizer keeps.
///
/// Shared with the stopword loader so that list entries like "don't"
/// normalize the same way document text does.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect()
}

/// Split text into lowercase alphanumeric tokens in document order.
///
/// Never fails: empty or fully-stripped input yields an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Post-tokenization filter: stopword removal plus a minimum token length.
#[derive(Debug, Clone)]
pub struct TokenFilter {
    pub remove_stopwords: bool,
    pub stopwords: StopwordSet,
    /// Tokens shorter than this many characters are dropped (1 keeps everything)
    pub min_token_len: usize,
}

impl Default for TokenFilter {
    fn default() -> Self {
        Self {
            remove_stopwords: false,
            stopwords: StopwordSet::builtin(),
            min_token_len: 1,
        }
    }
}

impl TokenFilter {
    /// Filter that keeps every token.
    pub fn keep_all() -> Self {
        Self {
            remove_stopwords: false,
            stopwords: StopwordSet::empty(),
            min_token_len: 1,
        }
    }

    /// Filter that removes the given stopwords.
    pub fn without_stopwords(stopwords: StopwordSet) -> Self {
        Self {
            remove_stopwords: true,
            stopwords,
            min_token_len: 1,
        }
    }

    pub fn with_min_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }

    /// Whether a single token survives the filter.
    pub fn keeps(&self, token: &str) -> bool {
        if token.chars().count() < self.min_token_len {
            return false;
        }
        !(self.remove_stopwords && self.stopwords.contains(token))
    }

    /// Apply the filter, returning a new sequence in the original order.
    pub fn apply(&self, tokens: &[String]) -> Vec<String> {
        tokens.iter().filter(|t| self.keeps(t)).cloned().collect()
    }

    /// Tokenize and filter in one step.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text).into_iter().filter(|t| self.keeps(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_punctuation_and_case() {
        let tokens = tokenize("The Cat's hat -- isn't RED!");
        assert_eq!(tokens, vec!["the", "cats", "hat", "isnt", "red"]);
    }

    #[test]
    fn test_tokenize_keeps_digits() {
        assert_eq!(tokenize("Year 2083, page 12"), vec!["year", "2083", "page", "12"]);
    }

    #[test]
    fn test_tokenize_drops_non_ascii_letters() {
        // Accented letters are outside a-z and are removed, not transliterated
        assert_eq!(tokenize("café naïve"), vec!["caf", "nave"]);
    }

    #[test]
    fn test_tokenize_empty_and_symbols_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
        assert!(tokenize("!!! ??? ...").is_empty());
    }

    #[test]
    fn test_filter_min_len() {
        let filter = TokenFilter::keep_all().with_min_len(3);
        let tokens = filter.tokenize("an ox ran far away");
        assert_eq!(tokens, vec!["ran", "far", "away"]);
    }

    #[test]
    fn test_filter_removes_stopwords_case_insensitively() {
        let filter = TokenFilter::without_stopwords(StopwordSet::from_words(["The", "A"]));
        let tokens = vec!["the".to_string(), "cat".to_string(), "a".to_string()];
        assert_eq!(filter.apply(&tokens), vec!["cat"]);
    }
}
