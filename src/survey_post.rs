//! Interaction model of the custom survey post.

use crate::host::{PostActions, TextFormatter};
use log::{info, warn};
use npscore::layout::{LayoutSignals, PresentationMode, SidePanelMode};
use npscore::types::post::{MAX_SCORE, MIN_SCORE};
use npscore::types::{Post, PostAction};
use thiserror::Error;

pub const TITLE: &str = "How likely are you to recommend Mattermost?";
pub const LOW_SCORE_LABEL: &str = "Not Likely";
pub const HIGH_SCORE_LABEL: &str = "Very Likely";
pub const DISABLED_MESSAGE: &str =
    "You won't receive any more surveys but you can submit feedback about Mattermost by typing here at anytime.";

#[derive(Debug, Error)]
pub enum PostActionError {
    #[error("post {post_id} has no {kind} action")]
    MissingAction { post_id: String, kind: &'static str },
    #[error("score {0} is outside 0..=10")]
    InvalidScore(i32),
    #[error("post action failed: {0}")]
    Host(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreButton {
    pub score: i32,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footer {
    /// Offers to opt out of further surveys.
    DisablePrompt,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct SurveyPostView {
    post: Post,
    mode: PresentationMode,
    disabled: bool,
}

impl SurveyPostView {
    pub fn new(post: Post, mode: PresentationMode) -> Self {
        Self {
            post,
            mode,
            disabled: false,
        }
    }

    pub fn for_context(
        post: Post,
        signals: &LayoutSignals,
        is_rhs: bool,
        side_panel: SidePanelMode,
    ) -> Self {
        Self::new(post, signals.mode_in(is_rhs, side_panel))
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub fn is_small(&self) -> bool {
        !self.mode.is_full()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn selected_score(&self) -> i32 {
        self.post.selected_score()
    }

    pub fn scores(&self) -> Vec<ScoreButton> {
        let selected = self.selected_score();
        (MIN_SCORE..=MAX_SCORE)
            .map(|score| ScoreButton {
                score,
                selected: score == selected,
            })
            .collect()
    }

    pub fn footer(&self) -> Footer {
        if self.disabled {
            Footer::Disabled
        } else {
            Footer::DisablePrompt
        }
    }

    pub fn message_text(&self, formatter: &dyn TextFormatter) -> String {
        formatter.format_text(&self.post.message, true)
    }

    pub async fn select_score(
        &self,
        actions: &dyn PostActions,
        score: i32,
    ) -> Result<(), PostActionError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(PostActionError::InvalidScore(score));
        }
        let action = self.required_action(self.post.score_action(), "score")?;

        actions
            .do_post_action_with_cookie(
                &self.post.id,
                &action.id,
                &action.cookie,
                Some(score.to_string()),
            )
            .await?;
        info!("Submitted score {score} for post {}", self.post.id);
        Ok(())
    }

    /// Opts out of further surveys and switches the footer to the disabled message.
    pub async fn disable(&mut self, actions: &dyn PostActions) -> Result<(), PostActionError> {
        let action = self.required_action(self.post.disable_action(), "disable")?;

        if let Err(e) = actions
            .do_post_action_with_cookie(&self.post.id, &action.id, &action.cookie, None)
            .await
        {
            warn!("Failed to disable surveys from post {}: {e}", self.post.id);
            return Err(e.into());
        }
        self.disabled = true;
        Ok(())
    }

    fn required_action<'a>(
        &self,
        action: Option<&'a PostAction>,
        kind: &'static str,
    ) -> Result<&'a PostAction, PostActionError> {
        action.ok_or_else(|| PostActionError::MissingAction {
            post_id: self.post.id.clone(),
            kind,
        })
    }
}
