//! Event-loop messages and debounced task scheduling.
//!
//! Background work never touches application state directly: fetch tasks and
//! debounce timers post an [`AppMessage`] into the main loop's channel and
//! the loop applies it on its own turn.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;

use crate::error::ApiError;
use crate::models::ItemPage;

/// Messages delivered into the main event loop.
#[derive(Debug)]
pub enum AppMessage {
    /// A page fetch finished, successfully or not. `page` is the page number
    /// that was requested, applied only on the success arm.
    PageLoaded {
        page: u64,
        result: Result<ItemPage, ApiError>,
    },
    /// The search debounce window elapsed with no further keystrokes.
    SearchSettled,
    /// The scroll debounce window elapsed with no further scroll events.
    ScrollSettled,
}

/// Cancel-and-reschedule delayed delivery of a single message.
///
/// Each call to [`Debouncer::reschedule`] aborts the previously scheduled
/// task and starts a fresh delay, so a burst of triggers collapses into one
/// message sent after the configured quiet period.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Restart the quiet period; `message` is sent when it elapses.
    pub fn reschedule(&mut self, tx: &mpsc::UnboundedSender<AppMessage>, message: AppMessage) {
        self.cancel();
        let tx = tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(message);
        }));
    }

    /// Drop the scheduled message, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
