//! Document model.

use std::cmp::Ordering;
use std::path::{Component, Path};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use quire_mdx::{parse_mdx, FrontmatterError, Heading, HeadingSummary, ParseError, ReadingTime};

use crate::layout::Layout;
use crate::mode::BuildMode;

/// Site-wide values that feed computed document fields.
#[derive(Debug, Clone)]
pub struct SiteMetadata {
    /// Absolute site URL without a trailing slash
    pub site_url: String,

    /// Fallback social image for posts without `images`
    pub social_banner: String,
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            site_url: "https://example.com".to_string(),
            social_banner: "/static/images/twitter-card.png".to_string(),
        }
    }
}

/// A loaded blog post with every computed field filled in.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path without the first segment (`blog/a/b` -> `a/b`)
    pub slug: String,

    /// Flattened path relative to the content root, e.g. `blog/hello-world`
    pub path: String,

    /// Source file relative to the content root, e.g. `blog/hello-world.mdx`
    pub file_path: String,

    pub title: String,
    pub date: DateTime<Utc>,
    pub lastmod: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub draft: bool,
    pub cover: Option<String>,
    pub images: Vec<String>,
    pub authors: Vec<String>,
    pub layout: Layout,
    pub bibliography: Option<String>,
    pub canonical_url: Option<String>,

    pub headings: Vec<Heading>,
    pub heading_summaries: Vec<HeadingSummary>,
    pub reading_time: ReadingTime,
    pub structured_data: StructuredData,

    /// MDX body without frontmatter
    pub body: String,
}

/// schema.org `BlogPosting` record embedded in each post page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredData {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub headline: String,
    #[serde(serialize_with = "serialize_date")]
    pub date_published: DateTime<Utc>,
    #[serde(serialize_with = "serialize_date")]
    pub date_modified: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image: String,
    pub url: String,
}

/// Errors that can occur while building a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("{path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error("{path}: missing frontmatter (title and date are required)")]
    MissingFrontmatter { path: String },

    #[error("{path}: unknown layout `{layout}`")]
    UnknownLayout { path: String, layout: String },
}

impl DocumentError {
    /// Whether the error is a missing required frontmatter field.
    pub fn is_missing_field(&self) -> bool {
        match self {
            Self::MissingFrontmatter { .. } => true,
            Self::Parse {
                source: ParseError::Frontmatter(FrontmatterError::MissingField(_)),
                ..
            } => true,
            _ => false,
        }
    }
}

impl Document {
    /// Build a document from its source text.
    ///
    /// `file_path` is relative to the content root. Every computed field is
    /// derived here, once; nothing depends on other documents.
    pub fn from_source(
        file_path: &Path,
        source: &str,
        site: &SiteMetadata,
    ) -> Result<Self, DocumentError> {
        let file_path = to_slash(file_path);

        let parsed = parse_mdx(source).map_err(|source| DocumentError::Parse {
            path: file_path.clone(),
            source,
        })?;

        let Some(fm) = parsed.frontmatter else {
            return Err(DocumentError::MissingFrontmatter { path: file_path });
        };

        let layout = match fm.layout.as_deref() {
            Some(name) => name.parse().map_err(|layout| DocumentError::UnknownLayout {
                path: file_path.clone(),
                layout,
            })?,
            None => Layout::default(),
        };

        let path = flattened_path(&file_path);
        let slug = slug_from_path(&path);

        let structured_data = StructuredData {
            context: "https://schema.org".to_string(),
            kind: "BlogPosting".to_string(),
            headline: fm.title.clone(),
            date_published: fm.date,
            date_modified: fm.lastmod.unwrap_or(fm.date),
            description: fm.summary.clone(),
            image: fm
                .images
                .first()
                .cloned()
                .unwrap_or_else(|| site.social_banner.clone()),
            url: format!("{}/{}", site.site_url.trim_end_matches('/'), path),
        };

        Ok(Self {
            slug,
            path,
            file_path,
            title: fm.title,
            date: fm.date,
            lastmod: fm.lastmod,
            tags: fm.tags,
            summary: fm.summary,
            draft: fm.draft,
            cover: fm.cover,
            images: fm.images,
            authors: fm.authors,
            layout,
            bibliography: fm.bibliography,
            canonical_url: fm.canonical_url,
            headings: parsed.headings,
            heading_summaries: fm.heading_summaries,
            reading_time: parsed.reading_time,
            structured_data,
            body: parsed.content,
        })
    }

    /// Whether the document appears in a build of the given mode.
    pub fn is_visible(&self, mode: BuildMode) -> bool {
        !(mode.is_production() && self.draft)
    }

    /// Site-relative URL of the post page.
    pub fn url(&self) -> String {
        format!("/{}", self.path)
    }
}

/// Join path components with `/` regardless of platform.
fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Drop the extension and a trailing `index` segment.
///
/// `blog/post.mdx` -> `blog/post`, `blog/series/index.mdx` -> `blog/series`.
pub fn flattened_path(file_path: &str) -> String {
    let without_ext = match file_path.rfind('.') {
        Some(dot) if !file_path[dot..].contains('/') => &file_path[..dot],
        _ => file_path,
    };

    if without_ext == "index" {
        return String::new();
    }

    without_ext
        .strip_suffix("/index")
        .unwrap_or(without_ext)
        .to_string()
}

/// Strip everything up to and including the first `/`.
pub fn slug_from_path(path: &str) -> String {
    match path.find('/') {
        Some(pos) if pos > 0 => path[pos + 1..].to_string(),
        _ => path.to_string(),
    }
}

/// Order posts newest first, breaking date ties by path.
pub fn sort_posts(posts: &mut [&Document]) {
    posts.sort_by(|a, b| compare_posts(a, b));
}

pub(crate) fn compare_posts(a: &Document, b: &Document) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.path.cmp(&b.path))
}

/// Serialize a date as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub(crate) fn serialize_date<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Build a document from frontmatter lines and a body.
    pub fn doc(file_path: &str, frontmatter: &str, body: &str) -> Document {
        let source = format!("---\n{}\n---\n{}", frontmatter.trim(), body);
        Document::from_source(Path::new(file_path), &source, &SiteMetadata::default())
            .expect("test document should parse")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::doc;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derives_path_fields() {
        let d = doc(
            "blog/2024/hello-world.mdx",
            "title: Hello\ndate: 2024-01-02",
            "# Hello\n",
        );

        assert_eq!(d.file_path, "blog/2024/hello-world.mdx");
        assert_eq!(d.path, "blog/2024/hello-world");
        assert_eq!(d.slug, "2024/hello-world");
        assert_eq!(d.url(), "/blog/2024/hello-world");
    }

    #[test]
    fn index_files_flatten_to_directory() {
        assert_eq!(flattened_path("blog/series/index.mdx"), "blog/series");
        assert_eq!(flattened_path("index.mdx"), "");
        assert_eq!(flattened_path("blog/v1.2/post.mdx"), "blog/v1.2/post");
        assert_eq!(slug_from_path("blog/series"), "series");
        assert_eq!(slug_from_path("about"), "about");
    }

    #[test]
    fn fills_computed_fields() {
        let d = doc(
            "blog/post.mdx",
            "title: Post\ndate: 2024-03-04\nsummary: A post\nlastmod: 2024-04-01",
            "# Post\n\n## First\n\nSome words here.\n\n## Second\n",
        );

        assert_eq!(d.headings.len(), 3);
        assert_eq!(d.headings[1].url, "#first");
        assert_eq!(d.reading_time.words, 6);
        assert_eq!(d.layout, Layout::PostLayout);

        let json = serde_json::to_value(&d.structured_data).unwrap();
        assert_eq!(json["@type"], "BlogPosting");
        assert_eq!(json["headline"], "Post");
        assert_eq!(json["datePublished"], "2024-03-04T00:00:00.000Z");
        assert_eq!(json["dateModified"], "2024-04-01T00:00:00.000Z");
        assert_eq!(json["description"], "A post");
        assert_eq!(json["image"], "/static/images/twitter-card.png");
        assert_eq!(json["url"], "https://example.com/blog/post");
    }

    #[test]
    fn first_image_wins_for_structured_data() {
        let d = doc(
            "blog/post.mdx",
            "title: Post\ndate: 2024-03-04\nimages: [/a.png, /b.png]",
            "",
        );
        assert_eq!(d.structured_data.image, "/a.png");
        assert_eq!(d.structured_data.date_modified, d.date);
    }

    #[test]
    fn missing_frontmatter_is_fatal() {
        let err = Document::from_source(
            Path::new("blog/bare.mdx"),
            "# No frontmatter",
            &SiteMetadata::default(),
        )
        .unwrap_err();

        assert!(err.is_missing_field());
        assert!(err.to_string().contains("blog/bare.mdx"));
    }

    #[test]
    fn missing_date_is_fatal() {
        let err = Document::from_source(
            Path::new("blog/undated.mdx"),
            "---\ntitle: Undated\n---\nbody",
            &SiteMetadata::default(),
        )
        .unwrap_err();

        assert!(err.is_missing_field());
    }

    #[test]
    fn unknown_layout_is_fatal() {
        let err = Document::from_source(
            Path::new("blog/post.mdx"),
            "---\ntitle: T\ndate: 2024-01-01\nlayout: Fancy\n---\n",
            &SiteMetadata::default(),
        )
        .unwrap_err();

        assert!(matches!(err, DocumentError::UnknownLayout { layout, .. } if layout == "Fancy"));
    }

    #[test]
    fn drafts_hidden_only_in_production() {
        let d = doc("blog/d.mdx", "title: D\ndate: 2024-01-01\ndraft: true", "");

        assert!(d.is_visible(BuildMode::Development));
        assert!(!d.is_visible(BuildMode::Production));
    }

    #[test]
    fn sorts_newest_first_then_by_path() {
        let a = doc("blog/a.mdx", "title: A\ndate: 2024-01-01", "");
        let b = doc("blog/b.mdx", "title: B\ndate: 2024-02-01", "");
        let c = doc("blog/c.mdx", "title: C\ndate: 2024-01-01", "");

        let mut posts = vec![&c, &a, &b];
        sort_posts(&mut posts);

        let paths: Vec<_> = posts.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["blog/b", "blog/a", "blog/c"]);
    }
}
