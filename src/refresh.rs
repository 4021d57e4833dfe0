use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::loader::ContentLoader;

/// Default period between background reloads.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Background reload task. Loads once immediately, then every `interval`.
/// Stops when [`RefreshHandle::stop`] is called or the handle is dropped.
pub struct RefreshHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Must be called from within a tokio runtime.
    pub fn spawn(loader: Arc<ContentLoader>, interval: Duration) -> Self {
        let token = CancellationToken::new();
        let cancel = token.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                // an abandoned load lowers its own loading flag;
                // failures are already logged and recorded on the loader
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = loader.load() => {}
                }
            }
            debug!("content refresh task stopped");
        });
        Self { token, task: Some(task) }
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled() && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel the task and wait for it to wind down.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
