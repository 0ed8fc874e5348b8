// ── Reactive toast store ──
//
// Ordered in-memory queue of transient notifications. Every toast
// dismisses itself after a fixed delay; mutations are broadcast to
// subscribers via a `watch` channel.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::debug;
use uuid::Uuid;

use crate::stream::ToastStream;

/// How long a toast stays in the queue before dismissing itself.
const DISMISS_AFTER: Duration = Duration::from_millis(3500);

// ── ToastId ─────────────────────────────────────────────────────────

/// Opaque handle to a queued toast, returned by [`ToastStore::push`].
///
/// Uniqueness is best effort: ids mix wall-clock millis with a random
/// offset, so a collision is possible but vanishingly unlikely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToastId(u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn next_id() -> ToastId {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let offset = u64::try_from(Uuid::new_v4().as_u128() % 1_000_000).unwrap_or(0);
    ToastId(millis + offset)
}

// ── Toast record ────────────────────────────────────────────────────

/// Severity of a toast. Consumers map this to presentation style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
    #[default]
    Info,
}

/// A single transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub level: ToastLevel,
}

// ── ToastStore ──────────────────────────────────────────────────────

struct ToastInner {
    /// Live toasts in arrival order. Arrival order is display order.
    items: Mutex<Vec<Toast>>,

    /// Pending auto-dismiss timers, keyed by toast id, so a manual
    /// `remove` can also cancel the scheduled one.
    timers: DashMap<ToastId, tokio::task::AbortHandle>,

    /// Full snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Arc<Vec<Toast>>>,
}

/// Ordered queue of transient notifications with auto-dismiss.
///
/// Cloning is cheap and every clone shares the same queue, so the
/// store can be handed to each part of an application that raises or
/// renders notifications. Nothing here is global: lifetime is whatever
/// the owning session decides.
#[derive(Clone)]
pub struct ToastStore {
    inner: Arc<ToastInner>,
}

impl ToastStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            inner: Arc::new(ToastInner {
                items: Mutex::new(Vec::new()),
                timers: DashMap::new(),
                snapshot,
            }),
        }
    }

    /// Queue a toast and schedule its dismissal 3.5 s out.
    ///
    /// Returns the id of the queued toast so callers can dismiss it
    /// early via [`remove`](Self::remove). Must be called from within a
    /// tokio runtime; the dismissal timer is a spawned task.
    pub fn push(&self, message: impl Into<String>, level: ToastLevel) -> ToastId {
        let id = next_id();
        let toast = Toast {
            id,
            message: message.into(),
            level,
        };

        {
            let mut items = self.inner.items.lock().expect("toast list poisoned");
            items.push(toast);
            self.publish(&items);
        }

        let store = self.clone();
        let handle = tokio::spawn(async move {
            sleep(DISMISS_AFTER).await;
            store.remove(id);
        });
        // On an id collision the new timer replaces the old one, and the
        // stale one is aborted so it cannot dismiss the newer toast early.
        if let Some(stale) = self.inner.timers.insert(id, handle.abort_handle()) {
            stale.abort();
        }

        debug!(%id, ?level, "toast queued");
        id
    }

    /// Dismiss a toast and cancel its pending expiry timer.
    ///
    /// Idempotent: returns `false` when the id is not in the queue.
    pub fn remove(&self, id: ToastId) -> bool {
        if let Some((_, timer)) = self.inner.timers.remove(&id) {
            timer.abort();
        }

        let mut items = self.inner.items.lock().expect("toast list poisoned");
        let before = items.len();
        items.retain(|toast| toast.id != id);
        let removed = items.len() != before;
        if removed {
            self.publish(&items);
            debug!(%id, "toast dismissed");
        }
        removed
    }

    /// Get the current queue contents (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Toast>> {
        self.inner.snapshot.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.items.lock().expect("toast list poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to queue changes.
    pub fn subscribe(&self) -> ToastStream {
        ToastStream::new(self.inner.snapshot.subscribe())
    }

    /// Broadcast the queue state to subscribers. Called with the items
    /// lock held so snapshots are published in mutation order.
    fn publish(&self, items: &[Toast]) {
        let snap = Arc::new(items.to_vec());
        // `send_modify` updates unconditionally, even with zero receivers.
        self.inner.snapshot.send_modify(|current| *current = snap);
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test(start_paused = true)]
    async fn push_with_default_level_is_info() {
        let store = ToastStore::new();
        store.push("hi", ToastLevel::default());

        let snap = store.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].level, ToastLevel::Info);
    }

    #[tokio::test(start_paused = true)]
    async fn push_preserves_arrival_order() {
        let store = ToastStore::new();
        store.push("saved", ToastLevel::Success);
        store.push("rejected", ToastLevel::Error);
        store.push("heads up", ToastLevel::Info);

        let snap = store.snapshot();
        let messages: Vec<&str> = snap.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["saved", "rejected", "heads up"]);
    }

    #[tokio::test(start_paused = true)]
    async fn toasts_dismiss_themselves() {
        let store = ToastStore::new();
        store.push("short-lived", ToastLevel::Info);
        assert_eq!(store.len(), 1);

        // Just before the deadline the toast is still there.
        sleep(Duration::from_millis(3400)).await;
        assert_eq!(store.len(), 1);

        sleep(Duration::from_millis(200)).await;
        assert!(store.is_empty());
        assert!(store.inner.timers.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn remove_cancels_the_expiry_timer() {
        let store = ToastStore::new();
        let id = store.push("dismiss me", ToastLevel::Info);

        assert!(store.remove(id));
        assert!(store.is_empty());
        assert!(store.inner.timers.is_empty());

        // Removing again is a no-op.
        assert!(!store.remove(id));

        // Nothing left for the timer to fire on.
        sleep(Duration::from_millis(4000)).await;
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn removing_middle_toast_keeps_order() {
        let store = ToastStore::new();
        let first = store.push("first", ToastLevel::Info);
        let second = store.push("second", ToastLevel::Info);
        let third = store.push("third", ToastLevel::Info);
        assert_ne!(first, second);
        assert_ne!(second, third);

        assert!(store.remove(second));

        let snap = store.snapshot();
        let messages: Vec<&str> = snap.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "third"]);
    }

    #[tokio::test(start_paused = true)]
    async fn into_stream_yields_snapshots() {
        use tokio_test::{assert_pending, assert_ready, task};

        let store = ToastStore::new();
        let mut stream = task::spawn(store.subscribe().into_stream());

        // The watch adapter yields the current snapshot up front.
        let first = assert_ready!(stream.poll_next()).unwrap();
        assert!(first.is_empty());
        assert_pending!(stream.poll_next());

        store.push("fresh", ToastLevel::Info);
        assert!(stream.is_woken());
        let next = assert_ready!(stream.poll_next()).unwrap();
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].message, "fresh");
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_push_and_remove() {
        let store = ToastStore::new();
        let mut stream = store.subscribe();
        assert!(stream.current().is_empty());

        let id = store.push("hello", ToastLevel::Success);
        let snap = stream.changed().await.unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].message, "hello");
        assert_eq!(snap[0].level, ToastLevel::Success);

        store.remove(id);
        let snap = stream.changed().await.unwrap();
        assert!(snap.is_empty());
    }
}
