//! Build command.

use std::path::Path;

use anyhow::Result;
use quire_content::BuildMode;
use quire_static::BuildResult;

/// Run the build command.
pub async fn run(config_path: &Path, mode: Option<BuildMode>) -> Result<()> {
    tracing::info!("Building content artifacts...");

    let (builder, _) = super::load_builder(config_path, mode)?;
    let result = builder.build().await?;

    report(&result);
    Ok(())
}

/// Log a summary of a finished build.
pub fn report(result: &BuildResult) {
    tracing::info!(
        "Built {} posts, {} tags, {} search entries in {}ms",
        result.documents.len(),
        result.tags.len(),
        result.search_entries.len(),
        result.duration_ms
    );

    tracing::info!("Tags: {}", result.tag_data_path.display());

    match (&result.search_index_path, result.search_index_written) {
        (Some(path), true) => tracing::info!("Search index: {}", path.display()),
        (Some(path), false) => tracing::warn!("Search index not written: {}", path.display()),
        (None, _) => tracing::debug!("No static search index configured"),
    }
}
