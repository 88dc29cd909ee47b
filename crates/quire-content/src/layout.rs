//! Post layouts.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// The layout a post is rendered with, chosen by the frontmatter `layout` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Layout {
    /// Two-column post with a table of contents
    #[default]
    PostLayout,
    /// Single column, no sidebar
    PostSimple,
    /// Full-width banner image above the post
    PostBanner,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Self::PostLayout, Self::PostSimple, Self::PostBanner];

    pub fn name(self) -> &'static str {
        match self {
            Self::PostLayout => "PostLayout",
            Self::PostSimple => "PostSimple",
            Self::PostBanner => "PostBanner",
        }
    }

    /// Whether the layout renders the section table of contents.
    pub fn shows_toc(self) -> bool {
        matches!(self, Self::PostLayout)
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|layout| layout.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_layouts() {
        for layout in Layout::ALL {
            assert_eq!(layout.name().parse::<Layout>(), Ok(layout));
        }
    }

    #[test]
    fn rejects_unknown_layout() {
        assert_eq!("ListLayout".parse::<Layout>(), Err("ListLayout".to_string()));
        assert_eq!("postlayout".parse::<Layout>(), Err("postlayout".to_string()));
    }
}
