//! Configuration file (quire.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use quire_content::{BuildMode, SiteMetadata};
use quire_static::{BuildConfig, SearchConfig, SearchProvider};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub content: ContentSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct SiteSettings {
    #[serde(default = "default_site_url")]
    pub url: String,
    #[serde(default = "default_social_banner")]
    pub social_banner: String,
}

#[derive(Debug, Deserialize)]
pub struct ContentSettings {
    #[serde(default = "default_content_dir")]
    pub dir: String,
    #[serde(default = "default_blog_dir")]
    pub blog_dir: String,
}

/// Search settings; only `kbar` gets a static index.
#[derive(Debug, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_search_provider")]
    pub provider: Option<SearchProvider>,
    #[serde(default = "default_documents_path")]
    pub documents_path: String,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    pub mode: Option<BuildMode>,
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: usize,
}

fn default_site_url() -> String {
    SiteMetadata::default().site_url
}
fn default_social_banner() -> String {
    SiteMetadata::default().social_banner
}
fn default_content_dir() -> String {
    "data".to_string()
}
fn default_blog_dir() -> String {
    "blog".to_string()
}
fn default_search_provider() -> Option<SearchProvider> {
    SearchConfig::default().provider
}
fn default_documents_path() -> String {
    "search.json".to_string()
}
fn default_posts_per_page() -> usize {
    5
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            url: default_site_url(),
            social_banner: default_social_banner(),
        }
    }
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            blog_dir: default_blog_dir(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            provider: default_search_provider(),
            documents_path: default_documents_path(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            mode: None,
            posts_per_page: default_posts_per_page(),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::debug!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::debug!("No {} found, using defaults", path.display());
    Ok(ConfigFile::default())
}

/// The site root is the directory holding the config file.
pub fn site_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Pick the build mode: command line, then config file, then environment.
pub fn resolve_mode(
    cli: Option<BuildMode>,
    file: Option<BuildMode>,
    env: impl FnOnce() -> BuildMode,
) -> BuildMode {
    cli.or(file).unwrap_or_else(env)
}

impl ConfigFile {
    /// Assemble the builder configuration for a site rooted at `site_root`.
    pub fn build_config(&self, site_root: PathBuf, mode: Option<BuildMode>) -> BuildConfig {
        BuildConfig {
            site_root,
            content_dir: PathBuf::from(&self.content.dir),
            blog_dir: PathBuf::from(&self.content.blog_dir),
            mode: resolve_mode(mode, self.build.mode, BuildMode::from_env),
            site: SiteMetadata {
                site_url: self.site.url.clone(),
                social_banner: self.site.social_banner.clone(),
            },
            search: SearchConfig {
                provider: self.search.provider,
                documents_path: self.search.documents_path.clone(),
            },
        }
    }
}
