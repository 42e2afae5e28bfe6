use crate::confirmation::{ConfirmationCoordinator, Decision};
use crate::host::HostState;
use async_trait::async_trait;
use log::debug;
use npscore::types::Post;
use serde::Serialize;
use std::sync::Arc;

/// Error message returned to the host when the user declines to send feedback.
pub const FEEDBACK_NOT_SENT: &str = "Feedback not sent.";

/// What the host should do with an outgoing post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HookResult {
    #[serde(rename = "post")]
    Post(Post),
    /// The send is blocked and `message` is shown to the user.
    #[serde(rename = "error")]
    Rejected { message: String },
}

impl HookResult {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn post(&self) -> Option<&Post> {
        match self {
            Self::Post(post) => Some(post),
            Self::Rejected { .. } => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

#[async_trait]
pub trait MessageWillBePosted: Send + Sync {
    async fn message_will_be_posted(&self, post: Post) -> HookResult;
}

/// Holds posts addressed to the feedback bot until the user has confirmed
/// sending them.
pub struct FeedbackHook {
    host: Arc<dyn HostState>,
    confirmations: ConfirmationCoordinator,
    bot_username: String,
}

impl FeedbackHook {
    pub fn new(
        host: Arc<dyn HostState>,
        confirmations: ConfirmationCoordinator,
        bot_username: impl Into<String>,
    ) -> Self {
        Self {
            host,
            confirmations,
            bot_username: bot_username.into(),
        }
    }

    /// True when the post goes to a direct channel whose other member is the
    /// feedback bot. Anything the host cannot resolve counts as no match.
    pub fn requires_confirmation(&self, post: &Post) -> bool {
        let Some(channel) = self.host.channel(&post.channel_id) else {
            debug!("Channel {} not found, passing post through", post.channel_id);
            return false;
        };
        if !channel.is_direct() {
            return false;
        }

        let current_user_id = self.host.current_user_id();
        let Some(teammate_id) = channel.teammate_id(current_user_id.as_deref()) else {
            debug!("No counterpart for direct channel {}", channel.id);
            return false;
        };
        let Some(teammate) = self.host.user(&teammate_id) else {
            debug!("User {teammate_id} not found, passing post through");
            return false;
        };

        teammate.username == self.bot_username
    }
}

#[async_trait]
impl MessageWillBePosted for FeedbackHook {
    async fn message_will_be_posted(&self, mut post: Post) -> HookResult {
        if !self.requires_confirmation(&post) {
            return HookResult::Post(post);
        }

        debug!("Holding post to {} until feedback is confirmed", self.bot_username);
        match self.confirmations.ask().await {
            Decision::Confirmed(email) => {
                post.props.feedback_email = Some(email);
                HookResult::Post(post)
            }
            Decision::Cancelled => HookResult::rejected(FEEDBACK_NOT_SENT),
        }
    }
}
