//! Platform-independent core of the NPS webapp plugin.
//!
//! Nothing in this crate performs I/O: it holds the layout classifier, the
//! confirmation state machine, the plugin state reducer, the post schema and
//! the HTTP abstraction the runtime crate plugs a transport into.

pub mod confirm;
pub mod layout;
pub mod net;
pub mod state;
pub mod types;

/// Plugin id from the manifest.
pub const PLUGIN_ID: &str = "com.mattermost.nps";

/// Username of the bot that receives feedback messages.
pub const FEEDBACK_BOT_USERNAME: &str = "feedbackbot";
