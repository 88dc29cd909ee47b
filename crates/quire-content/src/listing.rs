//! Tag listings and pagination.

use crate::document::{sort_posts, Document};
use crate::mode::BuildMode;
use crate::tags::{normalize_tag, TagCount};

/// Errors surfaced to the page layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    /// The requested page does not exist; render a not-found page.
    #[error("page `{page}` not found ({total_pages} pages)")]
    NotFound { page: String, total_pages: usize },
}

/// Decode percent-escapes until decoding stops changing the string.
///
/// Tag route segments can arrive encoded more than once (`%2520` -> `%20` -> ` `).
/// Decoding also stops if a pass produces invalid UTF-8.
pub fn fully_decode_uri(uri: &str) -> String {
    let mut current = uri.to_string();
    loop {
        match urlencoding::decode(&current) {
            Ok(decoded) if decoded != current => current = decoded.into_owned(),
            _ => return current,
        }
    }
}

/// Visible posts, newest first.
pub fn visible_posts(documents: &[Document], mode: BuildMode) -> Vec<&Document> {
    let mut posts: Vec<&Document> = documents.iter().filter(|d| d.is_visible(mode)).collect();
    sort_posts(&mut posts);
    posts
}

/// The `n` most recent visible posts.
pub fn latest(documents: &[Document], mode: BuildMode, n: usize) -> Vec<&Document> {
    let mut posts = visible_posts(documents, mode);
    posts.truncate(n);
    posts
}

/// Visible posts listed under `tag`, newest first.
///
/// A post with top-level tags is matched on those alone; only a post without
/// any top-level tags is matched on its section tags.
pub fn filter_by_tag<'a>(documents: &'a [Document], tag: &str, mode: BuildMode) -> Vec<&'a Document> {
    let tag = normalize_tag(tag);
    if tag.is_empty() {
        return Vec::new();
    }
    let mut posts: Vec<&Document> = documents
        .iter()
        .filter(|d| d.is_visible(mode) && d.has_tag(&tag))
        .collect();
    sort_posts(&mut posts);
    posts
}

/// Number of pages needed for `count` items; zero when there are none.
pub fn total_pages(count: usize, per_page: usize) -> usize {
    count.div_ceil(per_page.max(1))
}

/// Parse a 1-based page number from a route segment.
pub fn parse_page_number(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|&n| n > 0)
}

/// One page of a paginated list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based
    pub current_page: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Select page `page` of `items`.
///
/// A page number that is not a positive integer, or that lies past the last
/// page, is [`ListingError::NotFound`]; pages are never clamped.
pub fn paginate<'a, T>(items: &'a [T], per_page: usize, page: &str) -> Result<Page<'a, T>, ListingError> {
    let per_page = per_page.max(1);
    let total = total_pages(items.len(), per_page);

    let current = parse_page_number(page)
        .filter(|&n| n <= total)
        .ok_or_else(|| ListingError::NotFound {
            page: page.to_string(),
            total_pages: total,
        })?;

    let start = (current - 1) * per_page;
    let end = (start + per_page).min(items.len());

    Ok(Page {
        items: &items[start..end],
        current_page: current,
        total_pages: total,
    })
}

/// A tag page: every matching post plus the slice shown on this page.
#[derive(Debug, Clone)]
pub struct TagListing<'a> {
    /// Fully decoded tag from the route
    pub tag: String,
    /// Display title derived from the tag
    pub title: String,
    pub posts: Vec<&'a Document>,
    pub current_page: usize,
    pub total_pages: usize,
    pub per_page: usize,
}

impl<'a> TagListing<'a> {
    /// The first page of a tag listing.
    ///
    /// Never fails: an unknown tag yields an empty listing, which renders as
    /// "nothing found".
    pub fn first_page(
        documents: &'a [Document],
        raw_tag: &str,
        mode: BuildMode,
        per_page: usize,
    ) -> Self {
        let tag = fully_decode_uri(raw_tag);
        let posts = filter_by_tag(documents, &tag, mode);
        let per_page = per_page.max(1);

        Self {
            title: tag_title(&tag),
            total_pages: total_pages(posts.len(), per_page),
            current_page: 1,
            tag,
            posts,
            per_page,
        }
    }

    /// Page `page` of a tag listing; out-of-range or malformed pages are not found.
    pub fn page(
        documents: &'a [Document],
        raw_tag: &str,
        page: &str,
        mode: BuildMode,
        per_page: usize,
    ) -> Result<Self, ListingError> {
        let mut listing = Self::first_page(documents, raw_tag, mode, per_page);
        let current = paginate(&listing.posts, listing.per_page, page)?.current_page;
        listing.current_page = current;
        Ok(listing)
    }

    /// Posts shown on the current page.
    pub fn display_posts(&self) -> &[&'a Document] {
        let start = ((self.current_page - 1) * self.per_page).min(self.posts.len());
        let end = (start + self.per_page).min(self.posts.len());
        &self.posts[start..end]
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Title shown on a tag page: first letter uppercased, spaces turned into `-`.
pub fn tag_title(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => {
            let rest: String = chars.as_str().split(' ').collect::<Vec<_>>().join("-");
            first.to_uppercase().collect::<String>() + &rest
        }
        None => String::new(),
    }
}

/// A statically generated tag route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPageParam {
    /// Percent-encoded tag segment
    pub tag: String,
    /// 1-based page number
    pub page: usize,
}

/// Enumerate every tag page route, at least one page per tag.
pub fn static_tag_params(counts: &TagCount, per_page: usize) -> Vec<TagPageParam> {
    counts
        .iter()
        .flat_map(|(tag, &count)| {
            let pages = total_pages(count, per_page).max(1);
            let encoded = urlencoding::encode(tag).into_owned();
            (1..=pages).map(move |page| TagPageParam {
                tag: encoded.clone(),
                page,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::test_support::doc;
    use crate::tags::count_tags;
    use pretty_assertions::assert_eq;

    fn tagged(name: &str, date: &str, tags: &str) -> Document {
        doc(
            &format!("blog/{}.mdx", name),
            &format!("title: {}\ndate: {}\ntags: [{}]", name, date, tags),
            "",
        )
    }

    fn sectioned(name: &str, section_tags: &str) -> Document {
        doc(
            &format!("blog/{}.mdx", name),
            &format!(
                "title: {}\ndate: 2024-01-01\nheadingSummaries:\n  - heading: Intro\n    summary: s\n    tags: [{}]",
                name, section_tags
            ),
            "## Intro\n",
        )
    }

    fn paths<'a>(posts: &[&'a Document]) -> Vec<&'a str> {
        posts.iter().map(|d| d.path.as_str()).collect()
    }

    #[test]
    fn decodes_until_stable() {
        assert_eq!(fully_decode_uri("%2520"), " ");
        assert_eq!(fully_decode_uri("web%E5%BC%80%E5%8F%91"), "web开发");
        assert_eq!(fully_decode_uri("plain"), "plain");
        assert_eq!(fully_decode_uri("%25E5%25BC%2580"), "开");
    }

    #[test]
    fn top_level_tags_take_precedence() {
        let a = tagged("a", "2024-01-01", "Go");
        let b = doc(
            "blog/b.mdx",
            "title: b\ndate: 2024-01-02\ntags: [web]\nheadingSummaries:\n  - heading: Intro\n    summary: s\n    tags: [go]",
            "## Intro\n",
        );
        let docs = vec![a, b];

        assert_eq!(paths(&filter_by_tag(&docs, "go", BuildMode::Development)), vec!["blog/a"]);
        assert_eq!(paths(&filter_by_tag(&docs, "web", BuildMode::Development)), vec!["blog/b"]);
    }

    #[test]
    fn section_tags_used_without_top_level_tags() {
        let docs = vec![sectioned("a", "go, rust"), sectioned("b", "python")];

        assert_eq!(paths(&filter_by_tag(&docs, "rust", BuildMode::Development)), vec!["blog/a"]);
        assert!(filter_by_tag(&docs, "java", BuildMode::Development).is_empty());
    }

    #[test]
    fn query_tag_is_normalized() {
        let docs = vec![tagged("a", "2024-01-01", "Next.js")];
        assert_eq!(filter_by_tag(&docs, "Next.js", BuildMode::Development).len(), 1);
        assert_eq!(filter_by_tag(&docs, "nextjs", BuildMode::Development).len(), 1);
    }

    #[test]
    fn punctuation_query_matches_nothing() {
        let docs = vec![tagged("a", "2024-01-01", "'🎉'"), tagged("b", "2024-01-02", "go")];

        assert!(count_tags(&docs, BuildMode::Development).get("").is_none());
        assert!(filter_by_tag(&docs, "?", BuildMode::Development).is_empty());
        assert!(filter_by_tag(&docs, "🎉", BuildMode::Development).is_empty());
        assert!(TagListing::first_page(&docs, "%3F", BuildMode::Development, 5).is_empty());
    }

    #[test]
    fn results_are_newest_first_without_production_drafts() {
        let old = tagged("old", "2023-01-01", "go");
        let new = tagged("new", "2024-01-01", "go");
        let draft = doc("blog/draft.mdx", "title: d\ndate: 2025-01-01\ntags: [go]\ndraft: true", "");
        let docs = vec![old, draft, new];

        assert_eq!(
            paths(&filter_by_tag(&docs, "go", BuildMode::Development)),
            vec!["blog/draft", "blog/new", "blog/old"]
        );
        assert_eq!(
            paths(&filter_by_tag(&docs, "go", BuildMode::Production)),
            vec!["blog/new", "blog/old"]
        );
    }

    #[test]
    fn pagination_boundaries() {
        let items: Vec<u32> = (1..=12).collect();

        assert_eq!(total_pages(items.len(), 5), 3);

        let third = paginate(&items, 5, "3").unwrap();
        assert_eq!(third.items, &[11, 12]);
        assert_eq!(third.total_pages, 3);
        assert!(third.has_previous());
        assert!(!third.has_next());

        let first = paginate(&items, 5, "1").unwrap();
        assert_eq!(first.items, &[1, 2, 3, 4, 5]);

        for bad in ["4", "0", "-1", "abc", "", "1.5"] {
            assert!(
                matches!(paginate(&items, 5, bad), Err(ListingError::NotFound { .. })),
                "page {:?} should be not found",
                bad
            );
        }
    }

    #[test]
    fn empty_list_has_no_pages() {
        let items: Vec<u32> = Vec::new();
        assert_eq!(total_pages(0, 5), 0);
        assert!(paginate(&items, 5, "1").is_err());
    }

    #[test]
    fn tag_listing_pages() {
        let docs: Vec<Document> = (1..=12)
            .map(|i| tagged(&format!("p{:02}", i), &format!("2024-01-{:02}", i), "go"))
            .collect();

        let first = TagListing::first_page(&docs, "go", BuildMode::Development, 5);
        assert_eq!(first.total_pages, 3);
        assert_eq!(paths(first.display_posts())[0], "blog/p12");

        let last = TagListing::page(&docs, "go", "3", BuildMode::Development, 5).unwrap();
        assert_eq!(paths(last.display_posts()), vec!["blog/p02", "blog/p01"]);

        assert!(TagListing::page(&docs, "go", "4", BuildMode::Development, 5).is_err());
        assert!(TagListing::page(&docs, "go", "0", BuildMode::Development, 5).is_err());
        assert!(TagListing::page(&docs, "go", "abc", BuildMode::Development, 5).is_err());
    }

    #[test]
    fn unknown_tag_first_page_is_empty_not_error() {
        let docs = vec![tagged("a", "2024-01-01", "go")];

        let listing = TagListing::first_page(&docs, "missing", BuildMode::Development, 5);

        assert!(listing.is_empty());
        assert!(listing.display_posts().is_empty());
        assert_eq!(listing.title, "Missing");
    }

    #[test]
    fn encoded_tag_routes_resolve() {
        let docs = vec![tagged("a", "2024-01-01", "Web开发")];

        let listing = TagListing::first_page(&docs, "web%25E5%25BC%2580%25E5%258F%2591", BuildMode::Development, 5);

        assert_eq!(listing.tag, "web开发");
        assert_eq!(listing.posts.len(), 1);
    }

    #[test]
    fn builds_tag_titles() {
        assert_eq!(tag_title("rust"), "Rust");
        assert_eq!(tag_title("machine learning basics"), "Machine-learning-basics");
        assert_eq!(tag_title(""), "");
    }

    #[test]
    fn enumerates_static_routes() {
        let counts: TagCount = [("go".to_string(), 12), ("rust".to_string(), 0), ("博客开发".to_string(), 1)]
            .into_iter()
            .collect();

        let params = static_tag_params(&counts, 5);

        let go_pages: Vec<_> = params.iter().filter(|p| p.tag == "go").map(|p| p.page).collect();
        assert_eq!(go_pages, vec![1, 2, 3]);
        assert!(params.contains(&TagPageParam { tag: "rust".to_string(), page: 1 }));
        assert!(params.iter().any(|p| p.tag == "%E5%8D%9A%E5%AE%A2%E5%BC%80%E5%8F%91"));
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn latest_limits_results() {
        let docs: Vec<Document> = (1..=7)
            .map(|i| tagged(&format!("p{}", i), &format!("2024-02-0{}", i), "x"))
            .collect();

        assert_eq!(paths(&latest(&docs, BuildMode::Development, 5)), vec![
            "blog/p7", "blog/p6", "blog/p5", "blog/p4", "blog/p3"
        ]);
    }
}
