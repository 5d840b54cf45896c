use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::user;

#[derive(Clone, Debug, Serialize)]
pub(crate) struct User {
    pub(crate) id: i32,
    pub(crate) email: String,
    pub(crate) name: Option<String>,
    pub(crate) image: Option<String>,
}

impl From<&user::User> for User {
    fn from(user: &user::User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            image: user.image.clone(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct Session {
    pub(crate) session: Option<SessionUser>,
}

#[derive(Serialize)]
pub(crate) struct SessionUser {
    pub(crate) user: User,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Generated {
    pub(crate) image_url: String,
    pub(crate) prompt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PublishedImage {
    pub(crate) id: i32,
    pub(crate) image_url: String,
    pub(crate) prompt: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeedImage {
    pub(crate) id: i32,
    pub(crate) image_url: String,
    pub(crate) prompt: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) publisher: Option<Publisher>,
    pub(crate) like_count: i32,
    pub(crate) liked: bool,
}

#[derive(Serialize)]
pub(crate) struct Publisher {
    pub(crate) id: i32,
    pub(crate) name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LikeStatus {
    pub(crate) image_id: i32,
    pub(crate) liked: bool,
    pub(crate) like_count: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Comment {
    pub(crate) id: i32,
    pub(crate) image_id: i32,
    pub(crate) text: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) author: CommentAuthor,
}

#[derive(Serialize)]
pub(crate) struct CommentAuthor {
    pub(crate) id: i32,
    pub(crate) name: Option<String>,
    pub(crate) email: String,
}

#[derive(Serialize)]
pub(crate) struct Comments {
    pub(crate) comments: Vec<Comment>,
}

#[derive(Serialize)]
pub(crate) struct Ok {
    pub(crate) ok: bool,
}
