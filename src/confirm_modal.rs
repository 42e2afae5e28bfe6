//! The "Send feedback" dialog shown while a feedback post is held.

use crate::confirmation::ConfirmationCoordinator;
use std::sync::Mutex;

pub const TITLE: &str = "Send feedback";
pub const BODY: &str = "You're about to send feedback about Mattermost.";
pub const EMAIL_PROMPT: &str =
    "Optional: If you're open to being contacted for research purposes, please include your email address.";
pub const EMAIL_PLACEHOLDER: &str = "Email (optional)";
pub const CANCEL_LABEL: &str = "Cancel";
pub const CONFIRM_LABEL: &str = "Yes";

pub struct ConfirmFeedbackModal {
    confirmations: ConfirmationCoordinator,
    email: Mutex<String>,
}

impl ConfirmFeedbackModal {
    pub fn new(confirmations: ConfirmationCoordinator) -> Self {
        Self {
            confirmations,
            email: Mutex::new(String::new()),
        }
    }

    pub fn show(&self) -> bool {
        self.confirmations.is_open()
    }

    pub fn email(&self) -> String {
        self.email.lock().expect("Mutex should not be poisoned").clone()
    }

    pub fn set_email(&self, email: impl Into<String>) {
        *self.email.lock().expect("Mutex should not be poisoned") = email.into();
    }

    /// "Yes": sends the typed email along with the held post.
    pub fn confirm(&self) -> bool {
        let email = self.reset_email();
        self.confirmations.confirm(email.trim())
    }

    pub fn cancel(&self) -> bool {
        self.reset_email();
        self.confirmations.cancel()
    }

    /// Dismissing the dialog declines.
    pub fn on_hide(&self) -> bool {
        self.cancel()
    }

    fn reset_email(&self) -> String {
        std::mem::take(&mut *self.email.lock().expect("Mutex should not be poisoned"))
    }
}
