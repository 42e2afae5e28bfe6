//! Plugin state and its reducer.

use crate::confirm::{ConfirmationState, PendingConfirmation};
use crate::layout::{DisplaySetting, LayoutSignals};
use log::debug;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug)]
pub enum Action {
    WindowResized(u32),
    ShowConfirmationModal(PendingConfirmation),
    HideConfirmationModal,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::WindowResized(_) => "WINDOW_RESIZED",
            Action::ShowConfirmationModal(_) => "SHOW_CONFIRMATION_MODAL",
            Action::HideConfirmationModal => "HIDE_CONFIRMATION_MODAL",
        }
    }
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("a feedback confirmation is already pending")]
    ConfirmationPending,
}

/// Read-only view of [`PluginState`] handed to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StateSnapshot {
    pub window_width: u32,
    pub confirmation_open: bool,
}

impl StateSnapshot {
    pub fn layout_signals(
        &self,
        display: DisplaySetting,
        sidebar_open: bool,
        team_count: usize,
    ) -> LayoutSignals {
        LayoutSignals {
            window_width: self.window_width,
            display,
            sidebar_open,
            team_count,
        }
    }
}

#[derive(Debug, Default)]
pub struct PluginState {
    window_width: u32,
    confirmation: ConfirmationState,
}

impl PluginState {
    pub fn window_width(&self) -> u32 {
        self.window_width
    }

    pub fn confirmation(&self) -> &ConfirmationState {
        &self.confirmation
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            window_width: self.window_width,
            confirmation_open: self.confirmation.is_open(),
        }
    }

    /// Applies an action. Hiding the modal hands back the callbacks that were
    /// pending so the caller can resolve them outside any lock.
    pub fn reduce(&mut self, action: Action) -> Result<Option<PendingConfirmation>, StateError> {
        match action {
            Action::WindowResized(width) => {
                self.window_width = width;
                Ok(None)
            }
            Action::ShowConfirmationModal(pending) => self
                .confirmation
                .open(pending)
                .map(|_| None)
                .map_err(|_| {
                    debug!("Rejecting confirmation request, one is already pending");
                    StateError::ConfirmationPending
                }),
            Action::HideConfirmationModal => Ok(self.confirmation.take()),
        }
    }
}
