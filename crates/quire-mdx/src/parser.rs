//! MDX document parser.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
use crate::reading_time::{reading_time, ReadingTime};
use crate::slug::Slugger;

/// A parsed MDX document.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Markdown content (without frontmatter)
    pub content: String,

    /// Headings in document order
    pub headings: Vec<Heading>,

    /// Reading time of the body
    pub reading_time: ReadingTime,
}

/// A heading extracted from the document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading text
    pub value: String,
    /// Anchor URL, `#` followed by a slug unique within the document
    pub url: String,
    /// Heading level (1-6)
    pub depth: u8,
}

impl Heading {
    /// Anchor without the leading `#`.
    pub fn anchor(&self) -> &str {
        self.url.strip_prefix('#').unwrap_or(&self.url)
    }
}

/// Errors that can occur when parsing MDX.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Parse an MDX document.
///
/// Extracts frontmatter, collects the heading outline and estimates reading time.
pub fn parse_mdx(source: &str) -> Result<ParsedDoc, ParseError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    let headings = extract_headings(content);

    Ok(ParsedDoc {
        frontmatter,
        content: content.to_string(),
        headings,
        reading_time: reading_time(content),
    })
}

/// Collect every heading in `content` with a unique anchor.
pub fn extract_headings(content: &str) -> Vec<Heading> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(content, options);

    let mut slugger = Slugger::new();
    let mut headings = Vec::new();
    let mut current_heading: Option<(u8, String)> = None; // (level, text)

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current_heading = Some((level as u8, String::new()));
            }

            Event::Text(text) | Event::Code(text) => {
                if let Some((_, ref mut heading_text)) = current_heading {
                    heading_text.push_str(&text);
                }
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((depth, value)) = current_heading.take() {
                    let url = format!("#{}", slugger.slug(&value));
                    headings.push(Heading { value, url, depth });
                }
            }

            _ => {}
        }
    }

    headings
}
