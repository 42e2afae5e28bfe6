//! Owned state container for the plugin.
//!
//! All writes go through [`Store::dispatch`]. Subscribers are notified with a
//! snapshot after the state lock has been released, so a subscriber is free
//! to read the store or dispatch again.

use log::{debug, warn};
use npscore::confirm::PendingConfirmation;
use npscore::state::{Action, PluginState, StateError, StateSnapshot};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

pub trait StateSubscriber: Send + Sync {
    fn on_state_change(&self, snapshot: &StateSnapshot);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct Store {
    state: Mutex<PluginState>,
    subscribers: RwLock<Vec<(SubscriptionId, Arc<dyn StateSubscriber>)>>,
    next_subscription: AtomicU64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self, action: Action) -> Result<Option<PendingConfirmation>, StateError> {
        debug!("Dispatching {}", action.name());
        let (result, snapshot) = {
            let mut state = self.state.lock().expect("Mutex should not be poisoned");
            let result = state.reduce(action);
            (result, state.snapshot())
        };

        if result.is_ok() {
            self.notify(&snapshot);
        }
        result
    }

    pub fn window_resized(&self, width: u32) {
        if let Err(e) = self.dispatch(Action::WindowResized(width)) {
            warn!("Failed to record window width {width}: {e}");
        }
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.state
            .lock()
            .expect("Mutex should not be poisoned")
            .snapshot()
    }

    pub fn window_width(&self) -> u32 {
        self.snapshot().window_width
    }

    pub fn is_confirmation_open(&self) -> bool {
        self.snapshot().confirmation_open
    }

    pub fn subscribe(&self, subscriber: Arc<dyn StateSubscriber>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .write()
            .expect("RwLock should not be poisoned")
            .push((id, subscriber));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .subscribers
            .write()
            .expect("RwLock should not be poisoned");
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    fn notify(&self, snapshot: &StateSnapshot) {
        let subscribers: Vec<Arc<dyn StateSubscriber>> = self
            .subscribers
            .read()
            .expect("RwLock should not be poisoned")
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();

        for subscriber in subscribers {
            subscriber.on_state_change(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<StateSnapshot>>,
    }

    impl StateSubscriber for Recorder {
        fn on_state_change(&self, snapshot: &StateSnapshot) {
            self.seen.lock().unwrap().push(*snapshot);
        }
    }

    #[test]
    fn test_subscribers_see_every_update_in_order() {
        let store = Store::new();
        let recorder = Arc::new(Recorder::default());
        store.subscribe(recorder.clone());

        store.window_resized(1000);
        store.window_resized(700);

        let widths: Vec<u32> = recorder
            .seen
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.window_width)
            .collect();
        assert_eq!(widths, vec![1000, 700]);
        assert_eq!(store.window_width(), 700);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = Store::new();
        let recorder = Arc::new(Recorder::default());
        let id = store.subscribe(recorder.clone());

        store.window_resized(900);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.window_resized(901);

        assert_eq!(recorder.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_rejected_action_does_not_notify() {
        let store = Store::new();
        store
            .dispatch(Action::ShowConfirmationModal(PendingConfirmation::new(
                |_| {},
                || {},
            )))
            .unwrap();

        let recorder = Arc::new(Recorder::default());
        store.subscribe(recorder.clone());

        let err = store.dispatch(Action::ShowConfirmationModal(PendingConfirmation::new(
            |_| {},
            || {},
        )));
        assert!(err.is_err());
        assert!(recorder.seen.lock().unwrap().is_empty());
        assert!(store.is_confirmation_open());
    }

    #[test]
    fn test_resize_while_confirmation_pending_is_recorded() {
        let store = Store::new();
        store
            .dispatch(Action::ShowConfirmationModal(PendingConfirmation::new(
                |_| {},
                || {},
            )))
            .unwrap();
        let recorder = Arc::new(Recorder::default());
        store.subscribe(recorder.clone());

        store.window_resized(1300);

        assert_eq!(store.window_width(), 1300);
        assert!(store.is_confirmation_open());
        assert_eq!(recorder.seen.lock().unwrap().len(), 1);
    }

    struct Redispatcher {
        store: Arc<Store>,
    }

    impl StateSubscriber for Redispatcher {
        fn on_state_change(&self, snapshot: &StateSnapshot) {
            if snapshot.window_width == 1 {
                self.store.window_resized(2);
            }
        }
    }

    #[test]
    fn test_subscriber_may_dispatch() {
        let store = Arc::new(Store::new());
        store.subscribe(Arc::new(Redispatcher {
            store: store.clone(),
        }));

        store.window_resized(1);
        assert_eq!(store.window_width(), 2);
    }
}
