//! Single-slot confirmation state machine.
//!
//! `Idle` → `Pending` on open, `Pending` → `Idle` on confirm or cancel. The
//! pending slot owns the two callbacks; resolving moves them out so each
//! request fires at most one of them, exactly once.

use std::fmt;

pub type OnConfirm = Box<dyn FnOnce(String) + Send>;
pub type OnCancel = Box<dyn FnOnce() + Send>;

/// Callbacks of an open confirmation request.
pub struct PendingConfirmation {
    on_confirm: OnConfirm,
    on_cancel: OnCancel,
}

impl PendingConfirmation {
    pub fn new<C, X>(on_confirm: C, on_cancel: X) -> Self
    where
        C: FnOnce(String) + Send + 'static,
        X: FnOnce() + Send + 'static,
    {
        Self {
            on_confirm: Box::new(on_confirm),
            on_cancel: Box::new(on_cancel),
        }
    }

    pub fn confirm(self, email: String) {
        (self.on_confirm)(email)
    }

    pub fn cancel(self) {
        (self.on_cancel)()
    }
}

impl fmt::Debug for PendingConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingConfirmation")
            .field("on_confirm", &"<callback>")
            .field("on_cancel", &"<callback>")
            .finish()
    }
}

#[derive(Debug, Default)]
pub enum ConfirmationState {
    #[default]
    Idle,
    Pending(PendingConfirmation),
}

impl ConfirmationState {
    /// Whether the confirmation dialog should be shown.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Opens a request. While another request is pending the new one is
    /// handed back untouched.
    pub fn open(&mut self, pending: PendingConfirmation) -> Result<(), PendingConfirmation> {
        match self {
            Self::Idle => {
                *self = Self::Pending(pending);
                Ok(())
            }
            Self::Pending(_) => Err(pending),
        }
    }

    /// Resets to `Idle`, returning the callbacks that were pending, if any.
    pub fn take(&mut self) -> Option<PendingConfirmation> {
        match std::mem::take(self) {
            Self::Pending(pending) => Some(pending),
            Self::Idle => None,
        }
    }

    /// Resolves the pending request through its confirm callback. No-op when idle.
    pub fn confirm(&mut self, email: String) -> bool {
        match self.take() {
            Some(pending) => {
                pending.confirm(email);
                true
            }
            None => false,
        }
    }

    /// Resolves the pending request through its cancel callback. No-op when idle.
    pub fn cancel(&mut self) -> bool {
        match self.take() {
            Some(pending) => {
                pending.cancel();
                true
            }
            None => false,
        }
    }
}
