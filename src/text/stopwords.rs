// Stopword sets: closed lists of common function words.
//
// Two lists ship with the crate: a built-in English list with apostrophes
// already stripped (matching how the tokenizer normalizes contractions), and
// the `stop-words` crate's English list, normalized the same way.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use stop_words::{get, LANGUAGE};

use super::tokenizer::normalize;

/// Built-in English stopwords, contraction-stripped ("don't" -> "dont").
const BUILTIN_ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "arent", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "cant", "cannot", "could", "couldnt", "did", "didnt", "do", "does", "doesnt",
    "doing", "dont", "down", "during", "each", "few", "for", "from", "further", "had", "hadnt",
    "has", "hasnt", "have", "havent", "having", "he", "hed", "hell", "hes", "her", "here",
    "heres", "hers", "herself", "him", "himself", "his", "how", "hows", "i", "id", "ill", "im",
    "ive", "if", "in", "into", "is", "isnt", "it", "its", "itself", "lets", "me", "more", "most",
    "mustnt", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "same", "shant", "she",
    "shed", "shell", "shes", "should", "shouldnt", "so", "some", "such", "than", "that", "thats",
    "the", "their", "theirs", "them", "themselves", "then", "there", "theres", "these", "they",
    "theyd", "theyll", "theyre", "theyve", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "wasnt", "we", "wed", "well", "were", "weve", "werent", "what",
    "whats", "when", "whens", "where", "wheres", "which", "while", "who", "whos", "whom", "why",
    "whys", "with", "wont", "would", "wouldnt", "you", "youd", "youll", "youre", "youve", "your",
    "yours", "yourself", "yourselves",
];

/// Which stopword list to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwordList {
    /// The crate's built-in contraction-stripped list
    Builtin,
    /// The `stop-words` crate English list
    English,
    /// No stopwords at all
    None,
}

impl StopwordList {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "builtin" => Some(Self::Builtin),
            "english" => Some(Self::English),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn load(self) -> StopwordSet {
        match self {
            Self::Builtin => StopwordSet::builtin(),
            Self::English => StopwordSet::english(),
            Self::None => StopwordSet::empty(),
        }
    }
}

/// A closed set of lowercase stopwords. Membership test only.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Self::from_words(BUILTIN_ENGLISH.iter().copied())
    }

    /// English list from the `stop-words` crate.
    ///
    /// Entries are run through the tokenizer's normalization so "don't"
    /// matches the token "dont". Entries that normalize to nothing are dropped.
    pub fn english() -> Self {
        let raw: Vec<String> = get(LANGUAGE::English);
        Self::from_words(raw)
    }

    /// Build a set from arbitrary words. Words are lowercased and stripped of
    /// anything the tokenizer would strip.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| normalize(w.as_ref()).split_whitespace().collect::<String>())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, token: &str) -> bool {
        if token.bytes().any(|b| b.is_ascii_uppercase()) {
            self.words.contains(&token.to_ascii_lowercase())
        } else {
            self.words.contains(token)
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_contractions_without_apostrophes() {
        let set = StopwordSet::builtin();
        assert!(set.contains("dont"));
        assert!(set.contains("theyre"));
        assert!(set.contains("The"));
        assert!(!set.contains("culture"));
    }

    #[test]
    fn test_builtin_has_no_duplicates_lost() {
        // "its" appears once; the set size matches the distinct entries
        let distinct: HashSet<&str> = BUILTIN_ENGLISH.iter().copied().collect();
        assert_eq!(StopwordSet::builtin().len(), distinct.len());
    }

    #[test]
    fn test_english_list_is_normalized() {
        let set = StopwordSet::english();
        assert!(!set.is_empty());
        assert!(set.contains("the"));
        assert!(set.words.iter().all(|w| w
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())));
    }

    #[test]
    fn test_parse_list_names() {
        assert_eq!(StopwordList::parse("English"), Some(StopwordList::English));
        assert_eq!(StopwordList::parse(" none "), Some(StopwordList::None));
        assert_eq!(StopwordList::parse("french"), None);
        assert!(StopwordList::None.load().is_empty());
    }
}
