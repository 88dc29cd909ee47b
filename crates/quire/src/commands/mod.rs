pub mod build;
pub mod dev;
pub mod init;
pub mod search;
pub mod tags;

use std::path::Path;

use anyhow::Result;
use quire_content::BuildMode;
use quire_static::StaticBuilder;

use crate::config;

/// Load the config file and set up a builder for the site it describes.
///
/// Also returns the configured posts-per-page for listing commands.
pub fn load_builder(config_path: &Path, mode: Option<BuildMode>) -> Result<(StaticBuilder, usize)> {
    let file_config = config::load(config_path)?;
    let build_config = file_config.build_config(config::site_root(config_path), mode);
    Ok((StaticBuilder::new(build_config), file_config.build.posts_per_page))
}
