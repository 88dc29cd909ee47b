//! MDX front end for quire.
//!
//! This crate parses MDX blog posts: it splits off and validates the YAML
//! frontmatter, extracts the heading outline with GitHub-compatible anchors,
//! and estimates reading time from the body text.

pub mod frontmatter;
pub mod parser;
pub mod reading_time;
pub mod slug;

pub use frontmatter::{parse_date, Frontmatter, FrontmatterError, HeadingSummary};
pub use parser::{parse_mdx, Heading, ParseError, ParsedDoc};
pub use reading_time::{reading_time, ReadingTime};
pub use slug::{slug, Slugger};
