use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::LoadError;

/// Where the sheet export comes from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_csv(&self) -> Result<String, LoadError>;
}

/// Fetches the published CSV over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: Url, timeout: std::time::Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Fetch { url: url.to_string(), source: e })?;
        Ok(Self { client, url })
    }

    /// Fails with a configuration error when no endpoint is set.
    pub fn from_config(cfg: &Config) -> Result<Self, LoadError> {
        Self::new(cfg.endpoint()?, cfg.request_timeout())
    }

    pub fn url(&self) -> &Url { &self.url }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch_csv(&self) -> Result<String, LoadError> {
        let url = self.url.to_string();
        debug!(%url, "fetching content sheet");
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| LoadError::Fetch { url: url.clone(), source: e })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Http { url, status: status.as_u16() });
        }
        resp.text().await.map_err(|e| LoadError::Fetch { url, source: e })
    }
}

/// Source that is known to be unusable; every fetch reports the same configuration problem.
/// Lets a loader exist (and report its error) before the sheet is set up.
#[derive(Debug, Clone)]
pub struct Unconfigured(pub String);

#[async_trait]
impl ContentSource for Unconfigured {
    async fn fetch_csv(&self) -> Result<String, LoadError> {
        Err(LoadError::Configuration(self.0.clone()))
    }
}

/// Build the source described by `cfg`, falling back to [`Unconfigured`] so that
/// the configuration error surfaces on the first load instead of at startup.
pub fn source_from_config(cfg: &Config) -> Box<dyn ContentSource> {
    match HttpSource::from_config(cfg) {
        Ok(s) => Box::new(s),
        Err(LoadError::Configuration(msg)) => Box::new(Unconfigured(msg)),
        Err(e) => Box::new(Unconfigured(e.to_string())),
    }
}
