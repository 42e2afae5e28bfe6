use npscore::layout::SidePanelMode;
use npscore::{FEEDBACK_BOT_USERNAME, PLUGIN_ID};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub plugin_id: String,
    /// Server root the plugin API lives under. Empty means same-origin.
    pub site_url: String,
    pub feedback_bot_username: String,
    pub side_panel_mode: SidePanelMode,
    pub csrf_token: Option<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            plugin_id: PLUGIN_ID.to_string(),
            site_url: String::new(),
            feedback_bot_username: FEEDBACK_BOT_USERNAME.to_string(),
            side_panel_mode: SidePanelMode::default(),
            csrf_token: None,
        }
    }
}

impl PluginConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn api_url(&self) -> String {
        format!(
            "{}/plugins/{}/api/v1",
            self.site_url.trim_end_matches('/'),
            self.plugin_id
        )
    }

    /// Key the host stores this plugin's state under.
    pub fn state_key(&self) -> String {
        format!("plugins-{}", self.plugin_id)
    }
}
