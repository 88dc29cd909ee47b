//! Build driver for quire blogs.
//!
//! Discovers MDX posts under the content directory, loads them in parallel and
//! writes the derived artifacts (`app/tag-data.json` and the static search
//! index) beneath the site root. [`ContentWatcher`] feeds rebuilds in dev mode.

pub mod builder;
pub mod watcher;

pub use builder::{
    BuildConfig, BuildError, BuildResult, SearchConfig, SearchProvider, StaticBuilder,
    TAG_DATA_PATH,
};
pub use watcher::{ContentWatcher, WatchEvent};
