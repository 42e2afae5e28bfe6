//! Capabilities supplied by the host webapp.
//!
//! The plugin never reaches into host globals; everything it needs from the
//! surrounding application comes through one of these traits.

use crate::confirm_modal::ConfirmFeedbackModal;
use crate::hooks::MessageWillBePosted;
use crate::store::Store;
use anyhow::Result;
use async_trait::async_trait;
use npscore::layout::DisplaySetting;
use npscore::types::{Channel, User};
use std::sync::Arc;

/// Handle returned by the registry for a registered post renderer.
pub type ComponentId = String;

#[async_trait]
pub trait MenuAction: Send + Sync {
    async fn on_click(&self);
}

/// The host's plugin registry.
pub trait Registry: Send + Sync {
    fn register_post_type_component(&self, post_type: &str) -> ComponentId;
    fn unregister_post_type_component(&self, component_id: &str);
    fn register_root_component(&self, modal: Arc<ConfirmFeedbackModal>);
    fn register_message_will_be_posted_hook(&self, hook: Arc<dyn MessageWillBePosted>);
    fn register_state(&self, key: &str, store: Arc<Store>);
    fn register_user_guide_dropdown_menu_action(&self, label: &str, action: Arc<dyn MenuAction>);
}

/// Read accessors over the host's own state.
pub trait HostState: Send + Sync {
    fn current_user_id(&self) -> Option<String>;
    fn channel(&self, channel_id: &str) -> Option<Channel>;
    fn user(&self, user_id: &str) -> Option<User>;
    /// Raw `message_display` preference value, `"clean"` or `"compact"`.
    fn message_display(&self) -> String;
    fn team_count(&self) -> usize;
    fn is_sidebar_open(&self) -> bool;
    fn current_relative_team_url(&self) -> String;

    fn display_setting(&self) -> DisplaySetting {
        DisplaySetting::from_preference(&self.message_display())
    }
}

/// Submits interactive post actions on behalf of the current user.
#[async_trait]
pub trait PostActions: Send + Sync {
    async fn do_post_action_with_cookie(
        &self,
        post_id: &str,
        action_id: &str,
        action_cookie: &str,
        selected_option: Option<String>,
    ) -> Result<()>;
}

pub trait Router: Send + Sync {
    fn push(&self, path: &str);
}

pub trait TextFormatter: Send + Sync {
    fn format_text(&self, text: &str, at_mentions: bool) -> String;
}
