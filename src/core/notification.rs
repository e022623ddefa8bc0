//! Transient "Copied to clipboard!" notification.
//!
//! Each successful copy opens a new cycle and starts a detached timer. Every
//! timer hides the notification [`NOTIFICATION_DURATION`] after its own copy,
//! whatever happened in between, so a burst of copies cannot keep it up.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::store::{lock_store, FormStore};
use crate::shared::emit::{emit_event, EventSink};
use crate::shared::events::AppEvent;
use crate::shared::types::NotificationState;

/// How long the notification stays visible.
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

impl NotificationState {
    /// Open the next cycle, visible until `now + NOTIFICATION_DURATION`.
    pub fn show(&self, now: DateTime<Utc>) -> NotificationState {
        let ttl = chrono::Duration::from_std(NOTIFICATION_DURATION)
            .unwrap_or_else(|_| chrono::Duration::milliseconds(3000));
        NotificationState {
            visible: true,
            expires_at: Some(now + ttl),
            cycle: self.cycle + 1,
        }
    }

    /// Hide the notification. Returns whether anything changed.
    pub fn dismiss(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        self.visible = false;
        self.expires_at = None;
        true
    }
}

/// Hide the notification once the delay for cycle `cycle` has elapsed.
///
/// Holds only a weak reference to the store, so a controller dropped in the
/// meantime simply ends the task.
pub(crate) fn spawn_dismissal(store: Weak<Mutex<FormStore>>, cycle: u64, sink: Arc<dyn EventSink>) {
    tokio::spawn(async move {
        tokio::time::sleep(NOTIFICATION_DURATION).await;

        let Some(store) = store.upgrade() else {
            debug!(cycle, "form dropped before notification expired");
            return;
        };

        let hidden = {
            let mut guard = lock_store(&store);
            if guard.notification.dismiss() {
                Some(guard.notification.clone())
            } else {
                None
            }
        };

        match hidden {
            Some(state) => {
                debug!(cycle, "notification dismissed");
                emit_event(sink.as_ref(), AppEvent::NotificationChanged(state));
            }
            None => debug!(cycle, "notification already hidden"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::emit::testing::RecordingSink;

    #[test]
    fn test_show_opens_new_cycle() {
        let now = Utc::now();
        let state = NotificationState::default().show(now);

        assert!(state.visible);
        assert_eq!(state.cycle, 1);
        assert_eq!(state.expires_at, Some(now + chrono::Duration::milliseconds(3000)));

        let next = state.show(now);
        assert_eq!(next.cycle, 2);
    }

    #[test]
    fn test_dismiss_hides_regardless_of_cycle() {
        let mut state = NotificationState::default().show(Utc::now()).show(Utc::now());
        assert!(state.dismiss());
        assert!(!state.visible);
        assert_eq!(state.expires_at, None);
        assert_eq!(state.cycle, 2);
        assert!(!state.dismiss());
    }

    #[tokio::test(start_paused = true)]
    async fn test_older_timer_hides_newer_cycle() {
        let store = Arc::new(Mutex::new(FormStore::default()));
        let sink = Arc::new(RecordingSink::default());
        {
            let mut guard = store.lock().unwrap();
            guard.notification = guard.notification.show(Utc::now());
        }
        spawn_dismissal(Arc::downgrade(&store), 1, sink.clone());

        tokio::time::sleep(Duration::from_millis(1000)).await;
        {
            let mut guard = store.lock().unwrap();
            guard.notification = guard.notification.show(Utc::now());
        }
        spawn_dismissal(Arc::downgrade(&store), 2, sink.clone());

        tokio::time::sleep(Duration::from_millis(2001)).await;
        assert!(!store.lock().unwrap().notification.visible);

        tokio::time::sleep(NOTIFICATION_DURATION).await;
        assert_eq!(sink.events().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_hides_after_duration() {
        let store = Arc::new(Mutex::new(FormStore::default()));
        let sink = Arc::new(RecordingSink::default());
        let cycle = {
            let mut guard = store.lock().unwrap();
            guard.notification = guard.notification.show(Utc::now());
            guard.notification.cycle
        };

        spawn_dismissal(Arc::downgrade(&store), cycle, sink.clone());

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(store.lock().unwrap().notification.visible);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!store.lock().unwrap().notification.visible);
        assert_eq!(sink.events().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_survives_dropped_store() {
        let store = Arc::new(Mutex::new(FormStore::default()));
        let sink = Arc::new(RecordingSink::default());
        spawn_dismissal(Arc::downgrade(&store), 1, sink.clone());
        drop(store);

        tokio::time::sleep(NOTIFICATION_DURATION * 2).await;
        assert!(sink.events().is_empty());
    }
}
