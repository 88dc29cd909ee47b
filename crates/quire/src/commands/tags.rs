//! Tag table and tag listing pages.

use std::path::Path;

use anyhow::{Context, Result};
use quire_content::{count_tags, BuildMode, TagCount, TagListing};

/// Run the tags command.
pub async fn run(
    config_path: &Path,
    tag: Option<String>,
    page: Option<String>,
    mode: Option<BuildMode>,
) -> Result<()> {
    let (builder, per_page) = super::load_builder(config_path, mode)?;
    let mode = builder.config().mode;
    let documents = builder.load_documents()?;

    let Some(tag) = tag else {
        let counts = count_tags(&documents, mode);
        if counts.is_empty() {
            println!("No tags found.");
        }
        for (tag, count) in sorted_by_count(&counts) {
            println!("{:>4}  {}", count, tag);
        }
        return Ok(());
    };

    let listing = match page.as_deref() {
        None => TagListing::first_page(&documents, &tag, mode, per_page),
        Some(page) => TagListing::page(&documents, &tag, page, mode, per_page)
            .with_context(|| format!("Not found: tag '{}' page {}", tag, page))?,
    };

    print_listing(&listing);
    Ok(())
}

/// Tags by descending count, ties by name.
fn sorted_by_count(counts: &TagCount) -> Vec<(&str, usize)> {
    let mut tags: Vec<(&str, usize)> = counts.iter().map(|(t, &c)| (t.as_str(), c)).collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    tags
}

fn print_listing(listing: &TagListing<'_>) {
    println!("{}", listing.title);

    if listing.is_empty() {
        println!("No posts found.");
        return;
    }

    for doc in listing.display_posts() {
        println!(
            "  {}  {}  {}",
            doc.date.format("%Y-%m-%d"),
            doc.title,
            doc.url()
        );
    }

    if listing.total_pages > 1 {
        println!("Page {} of {}", listing.current_page, listing.total_pages);
    }
}
