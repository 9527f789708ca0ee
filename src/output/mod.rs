// Output formatting: terminal display and report files.

pub mod report;
pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Format a [0, 1] score as a percentage with two decimals.
pub fn percent(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("naïve text", 3), "naï...");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.5), "50.00%");
        assert_eq!(percent(0.0), "0.00%");
        assert_eq!(percent(1.0 / 3.0), "33.33%");
    }
}
