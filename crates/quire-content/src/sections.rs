//! Section summaries attached to the table of contents.

use serde::Serialize;

use quire_mdx::{Heading, HeadingSummary};

use crate::document::Document;

/// A heading annotated with its authored section summary, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocHeading {
    #[serde(flatten)]
    pub heading: Heading,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Find the summary written for `heading_text`, ignoring case.
///
/// The first matching summary wins. Matching is exact after case folding;
/// punctuation and whitespace must agree.
pub fn find_summary<'a>(
    summaries: &'a [HeadingSummary],
    heading_text: &str,
) -> Option<&'a HeadingSummary> {
    let wanted = heading_text.to_lowercase();
    summaries
        .iter()
        .find(|summary| summary.heading.to_lowercase() == wanted)
}

/// Annotate each heading with its matching section summary.
///
/// Headings without a summary pass through unchanged. A matched summary that
/// lists no tags yields an empty tag list.
pub fn summarize_headings(headings: &[Heading], summaries: &[HeadingSummary]) -> Vec<TocHeading> {
    headings
        .iter()
        .map(|heading| match find_summary(summaries, &heading.value) {
            Some(summary) => TocHeading {
                heading: heading.clone(),
                summary: Some(summary.summary.clone()),
                tags: Some(summary.tags().to_vec()),
            },
            None => TocHeading {
                heading: heading.clone(),
                summary: None,
                tags: None,
            },
        })
        .collect()
}

/// Headings shown in a table of contents: every level-2 heading, or every
/// level-3 heading when there are none, or nothing.
pub fn toc_headings(headings: &[Heading]) -> Vec<&Heading> {
    for depth in [2, 3] {
        let selected: Vec<&Heading> = headings.iter().filter(|h| h.depth == depth).collect();
        if !selected.is_empty() {
            return selected;
        }
    }
    Vec::new()
}

/// Summaries whose heading text matches none of `headings`.
pub fn unmatched_summaries<'a>(
    headings: &[Heading],
    summaries: &'a [HeadingSummary],
) -> Vec<&'a HeadingSummary> {
    summaries
        .iter()
        .filter(|summary| {
            let wanted = summary.heading.to_lowercase();
            !headings.iter().any(|h| h.value.to_lowercase() == wanted)
        })
        .collect()
}

impl Document {
    /// The annotated table of contents for this post.
    ///
    /// Summaries whose heading is missing from the body are left out and logged.
    pub fn toc(&self) -> Vec<TocHeading> {
        for summary in unmatched_summaries(&self.headings, &self.heading_summaries) {
            tracing::debug!(
                "Summary for '{}' in {} matches no heading",
                summary.heading,
                self.file_path
            );
        }
        summarize_headings(&self.headings, &self.heading_summaries)
    }
}
