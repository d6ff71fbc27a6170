//! Polling chat refresh and the call-duration timer.
//!
//! There is no push channel: a deal's conversation is kept current by
//! re-reading the message collection on a fixed interval.  Both background
//! tasks stop when their handle is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use handee_shared::{DealId, UserId};
use handee_store::{Message, RecordStore};

/// Refresh one deal's conversation for `viewer`.
///
/// Unread messages addressed to the viewer are marked read as part of the
/// fetch.
pub fn poll_once(store: &RecordStore, deal: &DealId, viewer: &UserId) -> Vec<Message> {
    let marked = store.mark_deal_messages_read(deal, viewer);
    if marked > 0 {
        tracing::debug!(deal = %deal, viewer = %viewer, marked, "marked messages read");
    }
    store.deal_messages(deal)
}

/// Background refresh of a deal's messages.
pub struct ChatPoller {
    rx: watch::Receiver<Vec<Message>>,
    task: JoinHandle<()>,
}

impl ChatPoller {
    /// Start polling.  Must be called inside a tokio runtime.
    pub fn spawn(store: Arc<RecordStore>, deal: DealId, viewer: UserId, every: Duration) -> Self {
        let (tx, rx) = watch::channel(poll_once(&store, &deal, &viewer));

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately and the initial snapshot
            // is already published
            interval.tick().await;

            loop {
                interval.tick().await;
                if tx.is_closed() {
                    break;
                }

                let snapshot = poll_once(&store, &deal, &viewer);
                tx.send_if_modified(|current| {
                    if *current == snapshot {
                        false
                    } else {
                        *current = snapshot;
                        true
                    }
                });
            }
            tracing::debug!(deal = %deal, "chat poller stopped");
        });

        Self { rx, task }
    }

    /// Latest snapshot, oldest message first.
    pub fn messages(&self) -> Vec<Message> {
        self.rx.borrow().clone()
    }

    /// Wait until a refresh changes the conversation.
    pub async fn changed(&mut self) -> Vec<Message> {
        if self.rx.changed().await.is_err() {
            tracing::debug!("chat poller ended");
        }
        self.rx.borrow_and_update().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Message>> {
        self.rx.clone()
    }
}

impl Drop for ChatPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Counts whole seconds while a call is active.
pub struct CallTimer {
    elapsed: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl CallTimer {
    /// Start counting.  Must be called inside a tokio runtime.
    pub fn start(tick: Duration) -> Self {
        let elapsed = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&elapsed);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.tick().await;
            loop {
                interval.tick().await;
                counter.fetch_add(1, Ordering::Relaxed);
            }
        });

        Self { elapsed, task }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }

    /// Elapsed time as `mm:ss`.
    pub fn display(&self) -> String {
        format_call_duration(self.elapsed_secs())
    }
}

impl Drop for CallTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub fn format_call_duration(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
