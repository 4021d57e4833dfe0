use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::catalog::Catalog;
use crate::error::LoadError;
use crate::parse::parse;
use crate::source::ContentSource;
use crate::types::{Category, ContentItem};

/// What a successful load produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub items: usize,
    pub skipped_rows: usize,
}

/// Flags the presentation layer checks before trusting the items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoaderStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub items: usize,
    pub skipped_rows: usize,
    /// Unix seconds of the last successful load.
    pub last_loaded_at: Option<i64>,
}

#[derive(Default)]
struct State {
    catalog: Arc<Catalog>,
    loading: bool,
    error: Option<String>,
    last_loaded_at: Option<i64>,
}

/// Raises the loading flag and lowers it again on every exit path,
/// including when the load future is dropped mid-fetch.
struct LoadingFlag<'a>(&'a RwLock<State>);

impl<'a> LoadingFlag<'a> {
    fn raise(state: &'a RwLock<State>) -> Self {
        write_state(state).loading = true;
        Self(state)
    }
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        write_state(self.0).loading = false;
    }
}

/// Holds the current catalog and replaces it wholesale on every successful load.
pub struct ContentLoader {
    source: Box<dyn ContentSource>,
    state: RwLock<State>,
    // serializes loads: the one that starts last also finishes last
    load_lock: tokio::sync::Mutex<()>,
}

impl ContentLoader {
    pub fn new(source: Box<dyn ContentSource>) -> Self {
        Self { source, state: RwLock::new(State::default()), load_lock: tokio::sync::Mutex::new(()) }
    }

    /// Fetch, parse and swap in a new catalog.
    ///
    /// On failure the previous catalog stays in place and the error flag carries a
    /// user-facing message; the error is also returned for callers that want it.
    pub async fn load(&self) -> Result<LoadReport, LoadError> {
        let _serial = self.load_lock.lock().await;
        let flag = LoadingFlag::raise(&self.state);

        let result = match self.source.fetch_csv().await {
            Ok(csv) => parse(&csv).map(Catalog::from),
            Err(e) => Err(e),
        };

        drop(flag);
        let mut st = self.write();
        match result {
            Ok(catalog) => {
                let report = LoadReport { items: catalog.len(), skipped_rows: catalog.skipped_rows() };
                if report.skipped_rows > 0 {
                    warn!(skipped = report.skipped_rows, "dropped sheet rows without a title");
                }
                info!(items = report.items, "content loaded");
                st.catalog = Arc::new(catalog);
                st.error = None;
                st.last_loaded_at = Some(current_epoch());
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, "content load failed");
                st.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Reload and report the resulting state. Errors end up in [`LoaderStatus::error`].
    pub async fn refresh(&self) -> LoaderStatus {
        let _ = self.load().await;
        self.status()
    }

    /// The current catalog. Cheap; later loads do not affect the returned snapshot.
    pub fn snapshot(&self) -> Arc<Catalog> { self.read().catalog.clone() }

    pub fn items(&self) -> Vec<ContentItem> { self.snapshot().items().to_vec() }
    pub fn categories(&self) -> Vec<Category> { self.snapshot().categories().to_vec() }
    pub fn category(&self, id: &str) -> Option<Category> { self.snapshot().category(id).cloned() }
    pub fn item(&self, id: &str) -> Option<ContentItem> { self.snapshot().item(id).cloned() }

    pub fn featured_content(&self) -> Vec<ContentItem> {
        self.snapshot().featured().into_iter().cloned().collect()
    }

    pub fn by_category(&self, category_id: &str) -> Vec<ContentItem> {
        self.snapshot().by_category(category_id).into_iter().cloned().collect()
    }

    pub fn search(&self, category_id: &str, query: &str) -> Vec<ContentItem> {
        self.snapshot().search(category_id, query).into_iter().cloned().collect()
    }

    pub fn is_loading(&self) -> bool { self.read().loading }
    pub fn error(&self) -> Option<String> { self.read().error.clone() }

    pub fn status(&self) -> LoaderStatus {
        let st = self.read();
        LoaderStatus {
            loading: st.loading,
            error: st.error.clone(),
            items: st.catalog.len(),
            skipped_rows: st.catalog.skipped_rows(),
            last_loaded_at: st.last_loaded_at,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, State> { self.state.read().unwrap_or_else(PoisonError::into_inner) }
    fn write(&self) -> RwLockWriteGuard<'_, State> { write_state(&self.state) }
}

fn write_state(state: &RwLock<State>) -> RwLockWriteGuard<'_, State> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

fn current_epoch() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
