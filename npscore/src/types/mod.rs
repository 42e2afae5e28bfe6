pub mod channel;
pub mod post;

pub use channel::{Channel, DM_CHANNEL, User};
pub use post::{Attachment, NO_SCORE_SELECTED, POST_NPS_SURVEY, Post, PostAction, PostProps};
