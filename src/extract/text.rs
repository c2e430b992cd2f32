// src/extract/text.rs

use regex::Regex;
use std::sync::OnceLock;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Collapses runs of whitespace (including newlines) into single spaces
/// and trims the ends. Listing markup is full of layout whitespace that
/// would otherwise leak into the CSV.
pub fn clean_text(text: &str) -> String {
    whitespace_re().replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_newlines_and_runs() {
        assert_eq!(
            clean_text("  Villa \n  3 chambres\t\t200 m²  "),
            "Villa 3 chambres 200 m²"
        );
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(clean_text("   \n  "), "");
    }
}
