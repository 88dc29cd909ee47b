//! Frontmatter extraction and parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Parsed frontmatter from a blog post.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    /// Post title (required)
    pub title: String,

    /// Publication date (required)
    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,

    /// Post-level tags
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub tags: Vec<String>,

    /// Last modification date
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub lastmod: Option<DateTime<Utc>>,

    /// Drafts are hidden from production builds
    #[serde(default)]
    pub draft: bool,

    /// Short description shown in listings and search
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub cover: Option<String>,

    /// Social images; a single string is accepted as a one-element list
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub images: Vec<String>,

    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub authors: Vec<String>,

    /// Page layout name
    #[serde(default)]
    pub layout: Option<String>,

    #[serde(default)]
    pub bibliography: Option<String>,

    #[serde(default)]
    pub canonical_url: Option<String>,

    /// Per-section summaries keyed by heading text
    #[serde(default)]
    pub heading_summaries: Vec<HeadingSummary>,
}

/// An authored summary for one level-2 section of a post.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct HeadingSummary {
    /// Heading text this summary belongs to
    pub heading: String,

    #[serde(default)]
    pub summary: String,

    /// Section tags; `None` when the section does not specify any
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Vec<String>>,
}

impl HeadingSummary {
    /// Section tags, empty when none were given.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

/// Extract frontmatter from MDX content.
///
/// Returns the parsed frontmatter and the remaining content after the frontmatter block.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let frontmatter: Frontmatter = serde_yaml::from_str(yaml_content).map_err(classify_yaml_error)?;

    if frontmatter.title.trim().is_empty() {
        return Err(FrontmatterError::MissingField("title".to_string()));
    }

    Ok((Some(frontmatter), remaining.trim_start()))
}

fn classify_yaml_error(err: serde_yaml::Error) -> FrontmatterError {
    let message = err.to_string();
    for field in ["title", "date"] {
        if message.contains(&format!("missing field `{}`", field)) {
            return FrontmatterError::MissingField(field.to_string());
        }
    }
    FrontmatterError::InvalidYaml(message)
}

/// Parse a frontmatter date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` and RFC 3339.
/// Values without an offset are taken as UTC.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date `{}`", raw)))
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date `{}`", raw))),
        None => Ok(None),
    }
}

/// A YAML list in which only string entries are kept.
fn string_list(value: serde_yaml::Value) -> Vec<String> {
    match value {
        serde_yaml::Value::String(s) => vec![s],
        serde_yaml::Value::Sequence(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_yaml::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(string_list(value))
}

fn deserialize_optional_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(None),
        value => Ok(Some(string_list(value))),
    }
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),

    #[error("Missing required frontmatter field: {0}")]
    MissingField(String),
}
