//! Local search index.
//!
//! The index is a flat list of records, one per post and one per level-2
//! section that can be deep-linked. Every record's `path` points at a page or
//! an anchor that exists in the rendered site; sections whose heading cannot
//! be found are left out rather than pointing nowhere.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::document::{compare_posts, serialize_date, Document};
use crate::mode::BuildMode;

/// One searchable record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchEntry {
    /// Unique key: the post path, or `path#anchor` for a section
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub title: String,
    #[serde(serialize_with = "serialize_date")]
    pub date: DateTime<Utc>,
    pub summary: String,
    pub tags: Vec<String>,
    pub kind: EntryKind,
    pub path: String,
}

/// What a search record points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    Article,
    #[serde(rename = "Heading 2")]
    Heading2,
}

/// Build the search index for all visible documents.
///
/// Entries come out newest first; entries sharing a date are ordered by title.
pub fn build_index(documents: &[Document], mode: BuildMode) -> Vec<SearchEntry> {
    let mut posts: Vec<&Document> = documents.iter().filter(|d| d.is_visible(mode)).collect();
    posts.sort_by(|a, b| compare_posts(a, b));

    let mut entries = Vec::new();
    for doc in posts {
        document_entries(doc, &mut entries);
    }

    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title)));
    entries
}

fn document_entries(doc: &Document, entries: &mut Vec<SearchEntry>) {
    if doc.heading_summaries.is_empty() {
        entries.push(SearchEntry {
            object_id: doc.path.clone(),
            title: doc.title.clone(),
            date: doc.date,
            summary: sanitize_summary(doc.summary.as_deref()),
            tags: sanitize_tags(&doc.tags),
            kind: EntryKind::Article,
            path: doc.path.clone(),
        });
    }

    if !doc.heading_summaries.is_empty() && !doc.headings.is_empty() {
        let anchors: HashMap<String, &str> = doc
            .headings
            .iter()
            .filter(|h| h.depth == 2)
            .map(|h| (h.value.to_lowercase(), h.anchor()))
            .collect();

        for section in &doc.heading_summaries {
            let Some(anchor) = anchors.get(&section.heading.to_lowercase()) else {
                tracing::warn!(
                    "Skipping section '{}' in {}: no level-2 heading with that text",
                    section.heading,
                    doc.file_path
                );
                continue;
            };

            let tags = section.tags.as_deref().unwrap_or(&doc.tags);
            entries.push(section_entry(
                doc,
                anchor,
                &section.heading,
                sanitize_summary(Some(&section.summary)),
                sanitize_tags(tags),
            ));
        }
    } else if doc.heading_summaries.is_empty() {
        for heading in doc.headings.iter().filter(|h| h.depth == 2) {
            entries.push(section_entry(
                doc,
                heading.anchor(),
                &heading.value,
                String::new(),
                sanitize_tags(&doc.tags),
            ));
        }
    }
}

fn section_entry(
    doc: &Document,
    anchor: &str,
    title: &str,
    summary: String,
    tags: Vec<String>,
) -> SearchEntry {
    let path = format!("{}#{}", doc.path, anchor);
    SearchEntry {
        object_id: path.clone(),
        title: title.to_string(),
        date: doc.date,
        summary,
        tags,
        kind: EntryKind::Heading2,
        path,
    }
}

static MARKUP_RE: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

/// Strip markup tags, collapse whitespace runs to one space and trim.
pub fn sanitize_summary(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let markup = MARKUP_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid markup regex"));
    let whitespace = WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"));

    let stripped = markup.replace_all(text, "");
    whitespace.replace_all(&stripped, " ").trim().to_string()
}

/// Trim tags and drop the ones left empty.
pub fn sanitize_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
