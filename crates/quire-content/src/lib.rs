//! Content model and derived artifacts for a quire blog.
//!
//! Everything here is a pure function over an immutable collection of
//! [`Document`]s. The build driver loads the collection once and then derives:
//!
//! - the tag table ([`count_tags`]), persisted as `tag-data.json`
//! - the search index ([`build_index`]), persisted when a static-index search
//!   provider is configured
//! - per-page views: the annotated table of contents ([`summarize_headings`])
//!   and tag listings with pagination ([`TagListing`])
//!
//! Tags are owned either by the whole document or by its sections, never both.
//! [`Document::tag_source`] is the single place that decides which, so the tag
//! table and the tag listings always agree.

pub mod document;
pub mod layout;
pub mod listing;
pub mod mode;
pub mod search;
pub mod sections;
pub mod tags;

pub use document::{sort_posts, Document, DocumentError, SiteMetadata, StructuredData};
pub use layout::Layout;
pub use listing::{
    filter_by_tag, fully_decode_uri, latest, paginate, parse_page_number, static_tag_params,
    tag_title, total_pages, visible_posts, ListingError, Page, TagListing, TagPageParam,
};
pub use mode::BuildMode;
pub use search::{build_index, EntryKind, SearchEntry};
pub use sections::{summarize_headings, toc_headings, TocHeading};
pub use tags::{count_tags, normalize_tag, TagCount, TagSource};

pub use quire_mdx::{Heading, HeadingSummary, ReadingTime};

/// Serialize an artifact the way it is persisted: two-space pretty JSON with a
/// trailing newline.
pub fn to_artifact_json<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
