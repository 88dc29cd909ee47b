//! Scaffold a new quire site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config;

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing quire...");
    scaffold(config_path, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'quire build' to generate the tag table and search index.");
    Ok(())
}

fn scaffold(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    let blog_dir = config::site_root(config_path).join("data").join("blog");
    fs::create_dir_all(&blog_dir).context("Failed to create content directory")?;

    let post_path = blog_dir.join("hello-world.mdx");
    if !post_path.exists() || yes {
        fs::write(&post_path, DEFAULT_POST).context("Failed to write hello-world.mdx")?;
        tracing::info!("Created {}", post_path.display());
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Quire Configuration

[site]
# Absolute site URL, used in structured data
url = "https://example.com"

# Social image for posts without their own images
social_banner = "/static/images/twitter-card.png"

[content]
# Content directory and the blog directory inside it
dir = "data"
blog_dir = "blog"

[search]
# "kbar" writes public/<documents_path>; "algolia" writes nothing
provider = "kbar"
documents_path = "search.json"

[build]
# "production" hides drafts
mode = "development"
posts_per_page = 5
"#;

const DEFAULT_POST: &str = r#"---
title: Hello, World
date: 2024-01-01
tags: [meta]
summary: The first post on this blog.
headingSummaries:
  - heading: Writing posts
    summary: Frontmatter fields every post needs.
    tags: [writing]
---

# Hello, World

Welcome to your new blog.

## Writing posts

Every post needs a `title` and a `date`. Tag whole posts with `tags`, or tag
individual sections with `headingSummaries`.

## Building

Run `quire build` to regenerate `app/tag-data.json` and the search index.
"#;
