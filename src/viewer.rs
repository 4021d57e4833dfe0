//! Opening content outside the catalog.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::{ContentItem, ContentType};

/// The host's "open this link" facility.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens links in the user's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        webbrowser::open(url).with_context(|| format!("opening {url} in browser"))
    }
}

/// What activating an item did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "url", rename_all = "snake_case")]
pub enum Activation {
    OpenedVideo(String),
    DocumentUnavailable,
    Nothing,
}

/// Hand `url` to the opener. Empty urls are ignored.
pub fn open_video(opener: &dyn LinkOpener, url: &str) -> Result<bool> {
    let url = url.trim();
    if url.is_empty() {
        return Ok(false);
    }
    opener.open(url)?;
    Ok(true)
}

/// Click action for an item: videos with a link open it, documents have no viewer yet.
pub fn activate(opener: &dyn LinkOpener, item: &ContentItem) -> Result<Activation> {
    match item.kind {
        ContentType::Video => {
            let url = item.video_url.as_deref().unwrap_or("");
            if open_video(opener, url)? {
                Ok(Activation::OpenedVideo(url.trim().to_string()))
            } else {
                Ok(Activation::Nothing)
            }
        }
        ContentType::Document => Ok(Activation::DocumentUnavailable),
        _ => Ok(Activation::Nothing),
    }
}
