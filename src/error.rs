//! Failures a content load can end in.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The data source has not been set up.
    #[error("content source is not configured: {0}")]
    Configuration(String),

    /// Transport failure or unreadable body.
    #[error("failed to fetch content from {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with the document.
    #[error("content request to {url} returned HTTP {status}")]
    Http { url: String, status: u16 },

    /// Any other source failure (custom sources).
    #[error("failed to fetch content: {0}")]
    Source(String),

    /// The document is not a content sheet at all.
    #[error("content sheet could not be parsed: {0}")]
    Parse(String),
}

impl LoadError {
    /// Message shown to the user next to the retry affordance.
    pub fn user_message(&self) -> String {
        match self {
            LoadError::Configuration(_) => "Please configure the content spreadsheet (sheet id or CSV URL) before loading".to_string(),
            LoadError::Fetch { .. } | LoadError::Http { .. } | LoadError::Source(_) => "Failed to fetch content from the spreadsheet".to_string(),
            LoadError::Parse(_) => "The content spreadsheet is not in the expected format".to_string(),
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, LoadError::Fetch { .. } | LoadError::Http { .. } | LoadError::Source(_))
    }
}
