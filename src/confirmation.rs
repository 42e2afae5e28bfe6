use crate::store::Store;
use log::{debug, info, warn};
use npscore::confirm::PendingConfirmation;
use npscore::state::{Action, StateError};
use std::sync::{Arc, Mutex, Weak};
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Debug, Error)]
pub enum ConfirmationError {
    #[error(transparent)]
    State(#[from] StateError),
}

/// Outcome of a confirmation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Confirmed(String),
    Cancelled,
}

/// Opens and resolves the feedback confirmation held in the store.
///
/// At most one request can be pending. The wait for a decision has no
/// timeout: it ends only when the user confirms or cancels.
#[derive(Clone)]
pub struct ConfirmationCoordinator {
    store: Arc<Store>,
}

impl ConfirmationCoordinator {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn is_open(&self) -> bool {
        self.store.is_confirmation_open()
    }

    pub fn request_confirmation<C, X>(&self, on_confirm: C, on_cancel: X) -> Result<(), ConfirmationError>
    where
        C: FnOnce(String) + Send + 'static,
        X: FnOnce() + Send + 'static,
    {
        let pending = PendingConfirmation::new(on_confirm, on_cancel);
        self.store.dispatch(Action::ShowConfirmationModal(pending))?;
        info!("Opened feedback confirmation");
        Ok(())
    }

    /// Resolves the pending request with the collected email, which may be empty.
    /// Returns false when nothing was pending.
    pub fn confirm(&self, email: impl Into<String>) -> bool {
        match self.release() {
            Some(pending) => {
                info!("Feedback confirmed");
                pending.confirm(email.into());
                true
            }
            None => false,
        }
    }

    /// Resolves the pending request as declined. Returns false when nothing was pending.
    pub fn cancel(&self) -> bool {
        match self.release() {
            Some(pending) => {
                info!("Feedback cancelled");
                pending.cancel();
                true
            }
            None => false,
        }
    }

    /// Opens a request and waits for the user's decision.
    ///
    /// If the request cannot be opened, or its callbacks are dropped without
    /// firing, the outcome is [`Decision::Cancelled`]. Dropping the returned
    /// future before a decision clears the pending request.
    pub async fn ask(&self) -> Decision {
        let (tx, rx) = oneshot::channel();
        let confirm_tx = Arc::new(Mutex::new(Some(tx)));
        let cancel_tx = confirm_tx.clone();
        let waiter = Arc::downgrade(&confirm_tx);

        let opened = self.request_confirmation(
            move |email| send_decision(&confirm_tx, Decision::Confirmed(email)),
            move || send_decision(&cancel_tx, Decision::Cancelled),
        );
        if let Err(e) = opened {
            warn!("Not asking for feedback confirmation: {e}");
            return Decision::Cancelled;
        }

        let _abandon = AbandonGuard {
            coordinator: self,
            waiter,
        };
        rx.await.unwrap_or(Decision::Cancelled)
    }

    fn release(&self) -> Option<PendingConfirmation> {
        let released = self
            .store
            .dispatch(Action::HideConfirmationModal)
            .ok()
            .flatten();
        if released.is_none() {
            debug!("No feedback confirmation pending");
        }
        released
    }
}

type DecisionSlot = Mutex<Option<oneshot::Sender<Decision>>>;

/// Releases the request opened by [`ConfirmationCoordinator::ask`] if its
/// waiter goes away while the sender is still unused.
struct AbandonGuard<'a> {
    coordinator: &'a ConfirmationCoordinator,
    waiter: Weak<DecisionSlot>,
}

impl Drop for AbandonGuard<'_> {
    fn drop(&mut self) {
        let Some(slot) = self.waiter.upgrade() else {
            return;
        };
        let unresolved = slot
            .lock()
            .expect("Mutex should not be poisoned")
            .take()
            .is_some();
        if unresolved {
            debug!("Confirmation waiter dropped, clearing the pending request");
            self.coordinator.release();
        }
    }
}

fn send_decision(slot: &DecisionSlot, decision: Decision) {
    let sender = slot.lock().expect("Mutex should not be poisoned").take();
    if let Some(sender) = sender {
        // The waiting side may have been dropped; nothing to resolve then.
        let _ = sender.send(decision);
    }
}
