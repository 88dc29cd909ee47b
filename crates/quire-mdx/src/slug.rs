//! GitHub-compatible slugs for heading anchors and tag names.

use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;

/// Convert text to a GitHub-style slug.
///
/// Lowercases the input, keeps letters, numbers, `-` and `_` (with any
/// combining marks attached to them), turns each space into `-` and drops
/// everything else. Runs of spaces are not collapsed, matching the anchors
/// GitHub renders.
///
/// ```
/// use quire_mdx::slug;
///
/// assert_eq!(slug("Hello World"), "hello-world");
/// assert_eq!(slug("Next.js"), "nextjs");
/// assert_eq!(slug("Web开发"), "web开发");
/// ```
pub fn slug(text: &str) -> String {
    text.to_lowercase()
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if g == " " {
                Some("-")
            } else if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(g)
            } else {
                None
            }
        })
        .collect()
}

/// Stateful slugger that keeps anchors unique within one document.
///
/// Repeated slugs get a numeric suffix: `intro`, `intro-1`, `intro-2`.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug `text`, suffixing it if the same slug was already handed out.
    pub fn slug(&mut self, text: &str) -> String {
        let original = slug(text);
        let mut result = original.clone();

        while self.occurrences.contains_key(&result) {
            let count = self.occurrences.entry(original.clone()).or_insert(0);
            *count += 1;
            result = format!("{}-{}", original, count);
        }

        self.occurrences.insert(result.clone(), 0);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_basic_text() {
        assert_eq!(slug("Hello World"), "hello-world");
        assert_eq!(slug("API Reference"), "api-reference");
        assert_eq!(slug("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn drops_punctuation() {
        assert_eq!(slug("Button (Primary)"), "button-primary");
        assert_eq!(slug("What's new?"), "whats-new");
        assert_eq!(slug("C++ & Rust"), "c--rust");
    }

    #[test]
    fn keeps_unicode_letters() {
        assert_eq!(slug("博客开发"), "博客开发");
        assert_eq!(slug("Café Crème"), "café-crème");
    }

    #[test]
    fn does_not_collapse_or_trim() {
        assert_eq!(slug("a  b"), "a--b");
        assert_eq!(slug(" lead"), "-lead");
    }

    #[test]
    fn slugger_deduplicates() {
        let mut slugger = Slugger::new();

        assert_eq!(slugger.slug("Intro"), "intro");
        assert_eq!(slugger.slug("Intro"), "intro-1");
        assert_eq!(slugger.slug("Intro"), "intro-2");
        assert_eq!(slugger.slug("Other"), "other");
    }

    #[test]
    fn slugger_skips_taken_suffixes() {
        let mut slugger = Slugger::new();

        assert_eq!(slugger.slug("Intro 1"), "intro-1");
        assert_eq!(slugger.slug("Intro"), "intro");
        assert_eq!(slugger.slug("Intro"), "intro-2");
    }
}
