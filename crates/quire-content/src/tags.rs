//! Tag aggregation.

use std::collections::{BTreeMap, BTreeSet};

use quire_mdx::{slug, HeadingSummary};

use crate::document::Document;
use crate::mode::BuildMode;

/// Normalized tag name -> number of occurrences.
///
/// Keys are sorted so the persisted table is byte-stable between builds.
pub type TagCount = BTreeMap<String, usize>;

/// Normalize a tag to its slug form (`Next.js` -> `nextjs`).
pub fn normalize_tag(tag: &str) -> String {
    slug(tag.trim())
}

/// Where a document's tags come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TagSource<'a> {
    /// The document is tagged as a whole.
    TopLevel(&'a [String]),
    /// The document has no top-level tags; its sections carry them.
    Sections(&'a [HeadingSummary]),
    /// Nothing to count.
    Untagged,
}

impl Document {
    /// Decide which tags represent this document.
    ///
    /// Top-level tags win outright. Section tags are only consulted when there
    /// are no top-level tags at all.
    pub fn tag_source(&self) -> TagSource<'_> {
        if !self.tags.is_empty() {
            TagSource::TopLevel(&self.tags)
        } else if !self.heading_summaries.is_empty() {
            TagSource::Sections(&self.heading_summaries)
        } else {
            TagSource::Untagged
        }
    }

    /// Whether the document is listed under `tag` (already normalized).
    ///
    /// Tags that normalize to nothing are never counted, so they never match.
    pub fn has_tag(&self, tag: &str) -> bool {
        if tag.is_empty() {
            return false;
        }
        match self.tag_source() {
            TagSource::TopLevel(tags) => tags.iter().any(|t| normalize_tag(t) == tag),
            TagSource::Sections(sections) => sections
                .iter()
                .any(|section| section.tags().iter().any(|t| normalize_tag(t) == tag)),
            TagSource::Untagged => false,
        }
    }
}

/// Count tag occurrences across all visible documents.
///
/// A top-level tag counts once per document however often it is listed.
/// Section tags count once per section, so a tag used by three sections of one
/// post counts three times.
pub fn count_tags(documents: &[Document], mode: BuildMode) -> TagCount {
    let mut counts = TagCount::new();

    for doc in documents.iter().filter(|d| d.is_visible(mode)) {
        match doc.tag_source() {
            TagSource::TopLevel(tags) => {
                let unique: BTreeSet<String> = tags.iter().map(|t| normalize_tag(t)).collect();
                for tag in unique {
                    bump(&mut counts, tag);
                }
            }
            TagSource::Sections(sections) => {
                for tag in sections.iter().flat_map(|s| s.tags()) {
                    bump(&mut counts, normalize_tag(tag));
                }
            }
            TagSource::Untagged => {}
        }
    }

    counts
}

fn bump(counts: &mut TagCount, tag: String) {
    if tag.is_empty() {
        return;
    }
    *counts.entry(tag).or_insert(0) += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::test_support::doc;
    use pretty_assertions::assert_eq;

    fn counts(pairs: &[(&str, usize)]) -> TagCount {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn section_tags_count_per_section() {
        let a = doc("blog/a.mdx", "title: A\ndate: 2024-01-01\ntags: [go]", "");
        let b = doc(
            "blog/b.mdx",
            r#"title: B
date: 2024-01-02
tags: []
headingSummaries:
  - heading: Intro
    summary: s
    tags: [go, rust]
  - heading: Outro
    summary: s
    tags: [go]"#,
            "## Intro\n\n## Outro\n",
        );

        let result = count_tags(&[a, b], BuildMode::Development);

        assert_eq!(result, counts(&[("go", 3), ("rust", 1)]));
    }

    #[test]
    fn top_level_tags_count_once_per_document() {
        let a = doc(
            "blog/a.mdx",
            "title: A\ndate: 2024-01-01\ntags: [Rust, rust, RUST, Next.js]",
            "",
        );

        let result = count_tags(&[a], BuildMode::Development);

        assert_eq!(result, counts(&[("nextjs", 1), ("rust", 1)]));
    }

    #[test]
    fn top_level_tags_shadow_section_tags() {
        let a = doc(
            "blog/a.mdx",
            r#"title: A
date: 2024-01-01
tags: [web]
headingSummaries:
  - heading: Intro
    summary: s
    tags: [rust]"#,
            "## Intro\n",
        );

        let result = count_tags(&[a], BuildMode::Development);

        assert_eq!(result, counts(&[("web", 1)]));
    }

    #[test]
    fn drafts_excluded_in_production() {
        let a = doc("blog/a.mdx", "title: A\ndate: 2024-01-01\ntags: [go]\ndraft: true", "");
        let b = doc("blog/b.mdx", "title: B\ndate: 2024-01-01\ntags: [go]", "");
        let docs = vec![a, b];

        assert_eq!(count_tags(&docs, BuildMode::Development), counts(&[("go", 2)]));
        assert_eq!(count_tags(&docs, BuildMode::Production), counts(&[("go", 1)]));
    }

    #[test]
    fn untagged_documents_contribute_nothing() {
        let a = doc("blog/a.mdx", "title: A\ndate: 2024-01-01", "## Intro\n");
        assert!(count_tags(&[a], BuildMode::Development).is_empty());
    }

    #[test]
    fn document_never_counts_through_both_paths() {
        let d = doc(
            "blog/a.mdx",
            r#"title: A
date: 2024-01-01
tags: [go]
headingSummaries:
  - heading: Intro
    summary: s
    tags: [go]"#,
            "## Intro\n",
        );

        assert!(matches!(d.tag_source(), TagSource::TopLevel(_)));
        assert_eq!(count_tags(&[d], BuildMode::Development), counts(&[("go", 1)]));
    }

    #[test]
    fn unsluggable_tags_neither_count_nor_match() {
        let d = doc("blog/a.mdx", "title: A\ndate: 2024-01-01\ntags: ['🎉', '???']", "");

        assert!(count_tags(std::slice::from_ref(&d), BuildMode::Development).is_empty());
        assert!(!d.has_tag(""));
        assert!(!d.has_tag(&normalize_tag("?")));
    }

    #[test]
    fn normalizes_tags() {
        assert_eq!(normalize_tag("Web开发"), "web开发");
        assert_eq!(normalize_tag(" Tailwind CSS "), "tailwind-css");
    }
}
