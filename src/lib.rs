pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod parse;
pub mod refresh;
pub mod source;
pub mod types;
pub mod viewer;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::catalog::{Catalog, FEATURED_LIMIT};
    pub use crate::config::Config;
    pub use crate::error::LoadError;
    pub use crate::loader::{ContentLoader, LoadReport, LoaderStatus};
    pub use crate::refresh::RefreshHandle;
    pub use crate::source::{ContentSource, HttpSource};
    pub use crate::types::{Category, ContentItem, ContentType, ALL_CATEGORY};
    pub use crate::viewer::{Activation, LinkOpener, SystemBrowser};
    pub use crate::Academy;
}

use anyhow::{anyhow, Result};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::loader::ContentLoader;
use crate::refresh::RefreshHandle;
use crate::source::{source_from_config, ContentSource};
use crate::viewer::{Activation, LinkOpener, SystemBrowser};

/// Library entry point. Owns the loader and the link opener; the refresh task is
/// owned by whoever calls [`Academy::start_refresh`].
pub struct Academy {
    loader: Arc<ContentLoader>,
    opener: Box<dyn LinkOpener>,
    refresh_interval: Duration,
}

impl Academy {
    /// Wire an HTTP source from `cfg`. An unconfigured sheet is not an error here;
    /// it is reported by the first load.
    pub fn from_config(cfg: &Config) -> Self {
        Self::with_parts(source_from_config(cfg), Box::new(SystemBrowser), cfg.refresh_interval())
    }

    pub fn with_parts(source: Box<dyn ContentSource>, opener: Box<dyn LinkOpener>, refresh_interval: Duration) -> Self {
        Self { loader: Arc::new(ContentLoader::new(source)), opener, refresh_interval }
    }

    pub fn loader(&self) -> &Arc<ContentLoader> { &self.loader }
    pub fn refresh_interval(&self) -> Duration { self.refresh_interval }

    /// Load now and keep reloading in the background until the handle is dropped.
    pub fn start_refresh(&self) -> RefreshHandle {
        RefreshHandle::spawn(self.loader.clone(), self.refresh_interval)
    }

    /// Open a video link with the host's opener. Returns false for an empty url.
    pub fn open_video(&self, url: &str) -> Result<bool> {
        viewer::open_video(self.opener.as_ref(), url)
    }

    /// Run the click action for the item with `item_id` in the current catalog.
    pub fn activate(&self, item_id: &str) -> Result<Activation> {
        let item = self.loader.item(item_id).ok_or_else(|| anyhow!("no content item with id {item_id:?}"))?;
        viewer::activate(self.opener.as_ref(), &item)
    }
}
