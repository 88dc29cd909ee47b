//! Query the search index from the terminal.

use std::path::Path;

use anyhow::Result;
use quire_content::{build_index, BuildMode, EntryKind, SearchEntry};

/// Run the search command.
pub async fn run(config_path: &Path, query: Option<String>, mode: Option<BuildMode>) -> Result<()> {
    let (builder, _) = super::load_builder(config_path, mode)?;
    let documents = builder.load_documents()?;
    let index = build_index(&documents, builder.config().mode);

    let query = query.unwrap_or_default();
    let hits: Vec<&SearchEntry> = index.iter().filter(|e| matches(e, &query)).collect();

    for entry in &hits {
        let kind = match entry.kind {
            EntryKind::Article => "post",
            EntryKind::Heading2 => "section",
        };
        println!(
            "{}  {:<7}  {}  /{}",
            entry.date.format("%Y-%m-%d"),
            kind,
            entry.title,
            entry.path
        );
    }

    tracing::info!("{} of {} entries matched", hits.len(), index.len());
    Ok(())
}

/// Case-insensitive match against title, summary and tags. An empty query matches everything.
fn matches(entry: &SearchEntry, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    entry.title.to_lowercase().contains(&query)
        || entry.summary.to_lowercase().contains(&query)
        || entry.tags.iter().any(|t| t.to_lowercase().contains(&query))
}
