// Document loading.
//
// Documents are read fully into memory. Invalid UTF-8 is replaced rather than
// rejected, since the inputs are scraped transcripts and PDF dumps that often
// carry stray bytes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// A loaded document: a display label, where it came from, and its text.
#[derive(Debug, Clone)]
pub struct Document {
    pub label: String,
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    /// Read a document from disk, replacing invalid UTF-8 sequences.
    ///
    /// A missing or unreadable file is an error naming the path.
    pub fn load(label: &str, path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read document {}", path.display()))?;

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), "Document is not valid UTF-8, replacing bad bytes");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        debug!(label, path = %path.display(), chars = text.len(), "Read document");

        Ok(Self {
            label: label.to_string(),
            path: path.to_path_buf(),
            text,
        })
    }

    /// Build a document from in-memory text (no file behind it).
    pub fn from_text(label: &str, text: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            path: PathBuf::new(),
            text: text.into(),
        }
    }

    /// Whitespace-separated word count of the raw text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_names_path() {
        let path = Path::new("/nonexistent/docsim/missing.txt");
        let err = Document::load("doc1", path).unwrap_err();
        assert!(format!("{err:#}").contains("missing.txt"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let path = std::env::temp_dir().join("docsim_invalid_utf8.txt");
        fs::write(&path, b"caf\xff hello").unwrap();
        let doc = Document::load("doc", &path).unwrap();
        assert!(doc.text.ends_with(" hello"));
        assert!(doc.text.contains('\u{FFFD}'));
        assert_eq!(doc.path, path);
        assert_eq!(doc.word_count(), 2);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_word_count() {
        let doc = Document::from_text("d", "one  two\nthree");
        assert_eq!(doc.word_count(), 3);
    }
}
