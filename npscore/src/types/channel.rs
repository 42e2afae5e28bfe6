use serde::{Deserialize, Serialize};

/// Channel type tag of a direct (1:1) channel.
pub const DM_CHANNEL: &str = "D";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub channel_type: String,
    /// Counterpart of a direct channel, when the host has resolved it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teammate_id: Option<String>,
}

impl Channel {
    pub fn is_direct(&self) -> bool {
        self.channel_type == DM_CHANNEL
    }

    /// The other member of a direct channel.
    ///
    /// Direct channel names are `{user_a}__{user_b}`; when the host has not
    /// filled in `teammate_id` the counterpart is recovered from the name.
    pub fn teammate_id(&self, current_user_id: Option<&str>) -> Option<String> {
        if !self.is_direct() {
            return None;
        }
        if let Some(id) = self.teammate_id.as_deref().filter(|id| !id.is_empty()) {
            return Some(id.to_string());
        }

        let current = current_user_id?;
        let (a, b) = self.name.split_once("__")?;
        match (a == current, b == current) {
            (true, true) => Some(current.to_string()),
            (true, false) => Some(b.to_string()),
            (false, true) => Some(a.to_string()),
            (false, false) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct(name: &str, teammate_id: Option<&str>) -> Channel {
        Channel {
            id: "c1".to_string(),
            name: name.to_string(),
            channel_type: DM_CHANNEL.to_string(),
            teammate_id: teammate_id.map(str::to_string),
        }
    }

    #[test]
    fn test_teammate_prefers_resolved_id() {
        let channel = direct("me__bot", Some("other"));
        assert_eq!(channel.teammate_id(Some("me")).as_deref(), Some("other"));
    }

    #[test]
    fn test_teammate_from_channel_name() {
        assert_eq!(
            direct("me__bot", None).teammate_id(Some("me")).as_deref(),
            Some("bot")
        );
        assert_eq!(
            direct("bot__me", None).teammate_id(Some("me")).as_deref(),
            Some("bot")
        );
        assert_eq!(
            direct("me__me", None).teammate_id(Some("me")).as_deref(),
            Some("me")
        );
        assert_eq!(direct("a__b", None).teammate_id(Some("me")), None);
        assert_eq!(direct("me__bot", None).teammate_id(None), None);
        assert_eq!(direct("malformed", None).teammate_id(Some("me")), None);
    }

    #[test]
    fn test_non_direct_channel_has_no_teammate() {
        let channel = Channel {
            id: "c1".to_string(),
            name: "town-square".to_string(),
            channel_type: "O".to_string(),
            teammate_id: Some("x".to_string()),
        };
        assert!(!channel.is_direct());
        assert_eq!(channel.teammate_id(Some("me")), None);
    }
}
