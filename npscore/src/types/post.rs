//! Post metadata schema.
//!
//! Posts arrive from the host as JSON. Only the fields this plugin reads or
//! writes are typed; everything else is carried through untouched in `extra`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Post type tag of the survey post rendered by this plugin.
pub const POST_NPS_SURVEY: &str = "custom_nps_survey";

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 10;

/// Returned by [`PostAction::selected_score`] when nothing is preselected.
pub const NO_SCORE_SELECTED: i32 = -1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostAction {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub cookie: String,
    /// Raw JSON value, read by [`PostAction::selected_score`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_option: Option<Value>,
}

impl PostAction {
    /// The preselected score, or [`NO_SCORE_SELECTED`] when `default_option`
    /// is missing, not an integer, or outside `0..=10`.
    pub fn selected_score(&self) -> i32 {
        let score = match &self.default_option {
            Some(Value::String(value)) => value.trim().parse::<i32>().ok(),
            Some(Value::Number(value)) => value.as_i64().and_then(|n| i32::try_from(n).ok()),
            _ => None,
        };
        score
            .filter(|score| (MIN_SCORE..=MAX_SCORE).contains(score))
            .unwrap_or(NO_SCORE_SELECTED)
    }
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<PostAction>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostProps {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub post_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub props: PostProps,
}

impl Post {
    pub fn from_json(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    pub fn is_survey(&self) -> bool {
        self.post_type == POST_NPS_SURVEY
    }

    pub fn action(&self, index: usize) -> Option<&PostAction> {
        self.props.attachments.first()?.actions.get(index)
    }

    /// The action that submits a score.
    pub fn score_action(&self) -> Option<&PostAction> {
        self.action(0)
    }

    /// The optional action that opts the user out of further surveys.
    pub fn disable_action(&self) -> Option<&PostAction> {
        self.action(1)
    }

    pub fn selected_score(&self) -> i32 {
        self.score_action()
            .map(PostAction::selected_score)
            .unwrap_or(NO_SCORE_SELECTED)
    }
}
