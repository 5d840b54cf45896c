use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct RegisterData {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) name: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct LoginData {
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Deserialize)]
pub(crate) struct GenerateData {
    pub(crate) prompt: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PublishData {
    pub(crate) image_url: String,
    pub(crate) prompt: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LikeToggleData {
    pub(crate) image_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentsQuery {
    pub(crate) image_id: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewCommentData {
    pub(crate) image_id: i32,
    pub(crate) text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteCommentData {
    pub(crate) comment_id: i32,
}
