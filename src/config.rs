use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::LoadError;
use crate::refresh::DEFAULT_REFRESH_INTERVAL;

/// Value the sheet id ships with until someone fills it in.
pub const SHEET_ID_PLACEHOLDER: &str = "YOUR_GOOGLE_SHEET_ID";

const CONFIG_FILE: &str = "academy.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub sheet_id: Option<String>,
    pub sheet_name: String,
    /// Full CSV endpoint; takes precedence over `sheet_id`.
    pub csv_url: Option<String>,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_id: None,
            sheet_name: "Sheet1".to_string(),
            csv_url: None,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL.as_secs(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Defaults, then the TOML file, then `ACADEMY_*` environment variables.
    ///
    /// With no explicit path the platform config dir is tried and may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        cfg.apply_env(|k| std::env::var(k).ok());
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading config: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config: {}", path.display()))
    }

    pub(crate) fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("ACADEMY_SHEET_ID") { self.sheet_id = Some(v); }
        if let Some(v) = var("ACADEMY_SHEET_NAME") { self.sheet_name = v; }
        if let Some(v) = var("ACADEMY_CSV_URL") { self.csv_url = Some(v); }
        if let Some(v) = var("ACADEMY_REFRESH_SECS").and_then(|s| s.parse().ok()) { self.refresh_interval_secs = v; }
        if let Some(v) = var("ACADEMY_TIMEOUT_SECS").and_then(|s| s.parse().ok()) { self.request_timeout_secs = v; }
    }

    /// The CSV endpoint, or a configuration error when neither a URL nor a real sheet id is set.
    pub fn endpoint(&self) -> Result<Url, LoadError> {
        if let Some(raw) = self.csv_url.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            return Url::parse(raw).map_err(|e| LoadError::Configuration(format!("invalid csv_url {raw:?}: {e}")));
        }
        let sheet_id = match self.sheet_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() && id != SHEET_ID_PLACEHOLDER => id,
            _ => return Err(LoadError::Configuration("sheet_id is not set".to_string())),
        };
        let mut url = Url::parse("https://docs.google.com/spreadsheets/d/")
            .map_err(|e| LoadError::Configuration(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| LoadError::Configuration("cannot build sheet url".to_string()))?
            .pop_if_empty()
            .extend([sheet_id, "gviz", "tq"]);
        url.query_pairs_mut().append_pair("tqx", "out:csv").append_pair("sheet", &self.sheet_name);
        Ok(url)
    }

    pub fn refresh_interval(&self) -> Duration { Duration::from_secs(self.refresh_interval_secs.max(1)) }
    pub fn request_timeout(&self) -> Duration { Duration::from_secs(self.request_timeout_secs.max(1)) }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "academy", "academy").map(|p| p.config_dir().join(CONFIG_FILE))
}
