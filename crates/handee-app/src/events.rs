//! Transient user notifications.
//!
//! A [`Notifier`] is an explicit service instance owned by
//! [`AppState`](crate::state::AppState).  Every change to the set of visible
//! notifications is published as a full snapshot on a `watch` channel, so a
//! subscriber only ever needs the latest value.
//!
//! Each notification carries its own deadline.  Expired entries are pruned
//! on every `show` and `active` call; inside a tokio runtime a timer also
//! publishes the removal as soon as the deadline passes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::watch;

use handee_shared::NotificationKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub kind: NotificationKind,
    pub duration_ms: u64,
    #[serde(skip)]
    expires_at: Instant,
}

impl Notification {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

struct Inner {
    next_id: AtomicU64,
    default_duration: Duration,
    tx: watch::Sender<Vec<Notification>>,
}

impl Notifier {
    pub fn new(default_duration: Duration) -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                next_id: AtomicU64::new(0),
                default_duration,
                tx,
            }),
        }
    }

    /// Receive a snapshot of the visible notifications on every change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.inner.tx.subscribe()
    }

    /// Currently visible notifications, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.inner.prune();
        self.inner.tx.borrow().clone()
    }

    /// Publish a notification and return its id.
    ///
    /// The notification disappears once `duration` (or the default) has
    /// elapsed.
    pub fn show(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> String {
        let duration = duration.unwrap_or(self.inner.default_duration);
        let id = format!("toast-{}", self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let notification = Notification {
            id: id.clone(),
            message: message.into(),
            kind,
            duration_ms: duration.as_millis() as u64,
            expires_at: Instant::now() + duration,
        };

        tracing::debug!(id = %id, ?kind, message = %notification.message, "notification");
        let now = Instant::now();
        self.inner.tx.send_modify(|list| {
            list.retain(|n| n.is_live(now));
            list.push(notification);
        });

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let weak = Arc::downgrade(&self.inner);
            let expired = id.clone();
            handle.spawn(async move {
                tokio::time::sleep(duration).await;
                dismiss_weak(&weak, &expired);
            });
        }

        id
    }

    pub fn success(&self, message: impl Into<String>) -> String {
        self.show(NotificationKind::Success, message, None)
    }

    pub fn error(&self, message: impl Into<String>) -> String {
        self.show(NotificationKind::Error, message, None)
    }

    pub fn info(&self, message: impl Into<String>) -> String {
        self.show(NotificationKind::Info, message, None)
    }

    pub fn warning(&self, message: impl Into<String>) -> String {
        self.show(NotificationKind::Warning, message, None)
    }

    /// Remove a notification early.  Returns `false` if it was already gone.
    pub fn dismiss(&self, id: &str) -> bool {
        self.inner.dismiss(id)
    }
}

impl Inner {
    fn prune(&self) {
        let now = Instant::now();
        self.tx.send_if_modified(|list| {
            let before = list.len();
            list.retain(|n| n.is_live(now));
            list.len() != before
        });
    }

    fn dismiss(&self, id: &str) -> bool {
        self.tx.send_if_modified(|list| {
            let before = list.len();
            list.retain(|n| n.id != id);
            list.len() != before
        })
    }
}

fn dismiss_weak(inner: &Weak<Inner>, id: &str) {
    if let Some(inner) = inner.upgrade() {
        inner.dismiss(id);
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("active", &self.inner.tx.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_per_notifier() {
        let a = Notifier::new(Duration::from_secs(5));
        let b = Notifier::new(Duration::from_secs(5));
        assert_eq!(a.info("one"), "toast-0");
        assert_eq!(a.info("two"), "toast-1");
        assert_eq!(b.info("other"), "toast-0");
    }

    #[test]
    fn show_and_dismiss() {
        let notifier = Notifier::new(Duration::from_secs(5));
        let id = notifier.success("Deal accepted!");
        notifier.error("Something failed");

        let active = notifier.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].kind, NotificationKind::Success);
        assert_eq!(active[0].duration_ms, 5000);

        assert!(notifier.dismiss(&id));
        assert!(!notifier.dismiss(&id));
        assert_eq!(notifier.active().len(), 1);
    }

    #[test]
    fn subscribers_see_snapshots() {
        let notifier = Notifier::new(Duration::from_secs(5));
        let mut rx = notifier.subscribe();
        assert!(!rx.has_changed().unwrap());

        notifier.warning("Careful");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update()[0].message, "Careful");
    }

    #[test]
    fn dropping_notifier_closes_subscriptions() {
        let notifier = Notifier::new(Duration::from_secs(5));
        let rx = notifier.subscribe();
        drop(notifier);
        assert!(rx.has_changed().is_err());
    }

    #[test]
    fn notifications_expire_without_runtime() {
        let notifier = Notifier::new(Duration::from_millis(1));
        for i in 0..100 {
            notifier.info(format!("note {i}"));
        }
        std::thread::sleep(Duration::from_millis(20));

        // expired entries are dropped when the next one is shown
        let rx = notifier.subscribe();
        notifier.show(NotificationKind::Info, "fresh", Some(Duration::from_secs(60)));
        assert_eq!(rx.borrow().len(), 1);

        std::thread::sleep(Duration::from_millis(5));
        notifier.info("short");
        std::thread::sleep(Duration::from_millis(20));
        let active = notifier.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "fresh");
    }

    #[tokio::test]
    async fn notifications_expire() {
        let notifier = Notifier::new(Duration::from_secs(60));
        let mut rx = notifier.subscribe();
        notifier.show(NotificationKind::Info, "brief", Some(Duration::from_millis(20)));
        let _ = rx.borrow_and_update();

        tokio::time::timeout(Duration::from_secs(2), rx.changed())
            .await
            .expect("expiry should publish")
            .unwrap();
        assert!(notifier.active().is_empty());
    }
}
