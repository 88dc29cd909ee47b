//! Content build driver.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::Deserialize;
use walkdir::WalkDir;

use quire_content::{
    build_index, count_tags, to_artifact_json, BuildMode, Document, DocumentError, SearchEntry,
    SiteMetadata, TagCount,
};

/// Tag table location, relative to the site root.
pub const TAG_DATA_PATH: &str = "app/tag-data.json";

/// Directory the static search index is served from, relative to the site root.
const PUBLIC_DIR: &str = "public";

/// Search backend used by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    /// Client-side search over a statically served index
    Kbar,
    /// Hosted search; the index is pushed elsewhere
    Algolia,
}

/// Search settings.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub provider: Option<SearchProvider>,

    /// Where the client fetches the index from; only the file name is used
    pub documents_path: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: Some(SearchProvider::Kbar),
            documents_path: "search.json".to_string(),
        }
    }
}

impl SearchConfig {
    /// File name of the static index under `public/`, if one should be written.
    pub fn static_index_path(&self) -> Option<&str> {
        match self.provider {
            Some(SearchProvider::Kbar) => Path::new(&self.documents_path)
                .file_name()
                .and_then(|name| name.to_str())
                .filter(|name| !name.is_empty()),
            _ => None,
        }
    }
}

/// Configuration for building a site's content artifacts.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Site root; artifacts are written beneath it
    pub site_root: PathBuf,

    /// Content directory, relative to the site root
    pub content_dir: PathBuf,

    /// Blog posts directory, relative to the content directory
    pub blog_dir: PathBuf,

    /// Drafts are dropped in production builds
    pub mode: BuildMode,

    pub site: SiteMetadata,

    pub search: SearchConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("."),
            content_dir: PathBuf::from("data"),
            blog_dir: PathBuf::from("blog"),
            mode: BuildMode::default(),
            site: SiteMetadata::default(),
            search: SearchConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Absolute (or cwd-relative) content root.
    pub fn content_root(&self) -> PathBuf {
        self.site_root.join(&self.content_dir)
    }

    /// Directory scanned for posts.
    pub fn blog_root(&self) -> PathBuf {
        self.content_root().join(&self.blog_dir)
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Every loaded document, ordered by file path
    pub documents: Vec<Document>,

    pub tags: TagCount,

    pub search_entries: Vec<SearchEntry>,

    pub tag_data_path: PathBuf,

    /// Where the static search index goes, when the provider wants one
    pub search_index_path: Option<PathBuf>,

    /// False when there was no index to write or writing it failed
    pub search_index_written: bool,

    /// Total build time in milliseconds
    pub duration_ms: u64,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read content: {0}")]
    ReadError(String),

    #[error("Failed to load document: {0}")]
    DocumentError(#[from] DocumentError),

    #[error("Duplicate post path `{path}`: {first} and {second}")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("Failed to serialize {artifact}: {message}")]
    SerializeError { artifact: String, message: String },

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Content build driver.
pub struct StaticBuilder {
    config: BuildConfig,
}

impl StaticBuilder {
    /// Create a new builder.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Load every document, then write the tag table and search index.
    ///
    /// Nothing is written unless every document loads.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let mode = self.config.mode;

        let documents = self.load_documents()?;
        tracing::debug!("Loaded {} documents ({} mode)", documents.len(), mode);

        let (tags, search_entries) = rayon::join(
            || count_tags(&documents, mode),
            || build_index(&documents, mode),
        );

        let tag_json = to_artifact_json(&tags).map_err(|e| BuildError::SerializeError {
            artifact: TAG_DATA_PATH.to_string(),
            message: e.to_string(),
        })?;

        let search_index_path = self.search_index_path();
        let search_json = match &search_index_path {
            Some(path) => Some(to_artifact_json(&search_entries).map_err(|e| {
                BuildError::SerializeError {
                    artifact: path.display().to_string(),
                    message: e.to_string(),
                }
            })?),
            None => None,
        };

        let tag_data_path = self.config.site_root.join(TAG_DATA_PATH);
        write_artifact(&tag_data_path, &tag_json)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", tag_data_path.display(), e)))?;
        tracing::info!("Wrote {} tags to {}", tags.len(), tag_data_path.display());

        let mut search_index_written = false;
        if let (Some(path), Some(json)) = (&search_index_path, &search_json) {
            match write_artifact(path, json) {
                Ok(()) => {
                    search_index_written = true;
                    tracing::info!(
                        "Wrote {} search entries to {}",
                        search_entries.len(),
                        path.display()
                    );
                }
                Err(e) => {
                    tracing::error!("Failed to write search index {}: {}", path.display(), e);
                }
            }
        }

        Ok(BuildResult {
            documents,
            tags,
            search_entries,
            tag_data_path,
            search_index_path,
            search_index_written,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Discover and parse every post, in parallel.
    ///
    /// The first failing document aborts the load.
    pub fn load_documents(&self) -> Result<Vec<Document>, BuildError> {
        let content_root = self.config.content_root();
        let files = self.discover_files()?;

        let mut documents = files
            .par_iter()
            .map(|path| -> Result<Document, BuildError> {
                let source = fs::read_to_string(path)
                    .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

                let relative = path.strip_prefix(&content_root).unwrap_or(path);
                Ok(Document::from_source(relative, &source, &self.config.site)?)
            })
            .collect::<Result<Vec<_>, BuildError>>()?;

        documents.sort_by(|a, b| a.file_path.cmp(&b.file_path));
        check_unique_paths(&documents)?;
        Ok(documents)
    }

    /// Find all `.mdx` files under the blog directory.
    ///
    /// Any entry that cannot be walked or read (an unreadable directory, a
    /// dangling or looping link) fails discovery.
    fn discover_files(&self) -> Result<Vec<PathBuf>, BuildError> {
        let blog_root = self.config.blog_root();

        if !blog_root.is_dir() {
            return Err(BuildError::ReadError(format!(
                "Content directory not found: {}",
                blog_root.display()
            )));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&blog_root).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(blog_root.as_path()).display().to_string();
                BuildError::ReadError(format!("{}: {}", path, e))
            })?;
            let path = entry.path();

            if entry.file_type().is_dir() {
                continue;
            }

            if path.extension().and_then(|e| e.to_str()) != Some("mdx") {
                continue;
            }

            if !path.is_file() {
                return Err(BuildError::ReadError(format!(
                    "{}: not a readable file",
                    path.display()
                )));
            }

            files.push(path.to_path_buf());
        }

        Ok(files)
    }

    fn search_index_path(&self) -> Option<PathBuf> {
        self.config
            .search
            .static_index_path()
            .map(|name| self.config.site_root.join(PUBLIC_DIR).join(name))
    }
}

/// `blog/a.mdx` and `blog/a/index.mdx` both flatten to `blog/a`.
fn check_unique_paths(documents: &[Document]) -> Result<(), BuildError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for doc in documents {
        if let Some(first) = seen.insert(&doc.path, &doc.file_path) {
            return Err(BuildError::DuplicatePath {
                path: doc.path.clone(),
                first: first.to_string(),
                second: doc.file_path.clone(),
            });
        }
    }
    Ok(())
}

/// Write a fully serialized artifact, creating parent directories.
fn write_artifact(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
