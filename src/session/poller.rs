//! Repeating refresh task owned by a view

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::core::SyncError;

/// Something a view keeps fresh by polling
#[async_trait]
pub trait Pollable: Send + Sync + 'static {
    /// Short name used in logs
    fn label(&self) -> &'static str;

    async fn poll(&self) -> Result<(), SyncError>;
}

/// Handle to a running poll loop
///
/// The loop ticks immediately, then every `interval`, and each tick's poll runs
/// as its own task so a stalled request never delays the next one. Failures are
/// logged; the next tick is the retry. Stopping (or dropping the handle) ends
/// the tick loop at once and leaves polls already in flight to finish alone.
pub struct Poller {
    stop_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn spawn<P: Pollable>(target: Arc<P>, interval: Duration) -> Self {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let target = Arc::clone(&target);
                        tokio::spawn(async move {
                            if let Err(err) = target.poll().await {
                                warn!(poller = target.label(), error = %err, "poll failed");
                            }
                        });
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!(poller = target.label(), "poller stopped");
        });

        Self { stop_tx, handle: Some(handle) }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stops the tick loop and waits for it to exit; polls in flight are not
    /// awaited
    pub async fn stop(mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(true);
    }
}
