use axum::extract::{Extension, Json, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::{request, response};
use crate::utils::auth::UserId;

#[instrument(skip_all)]
pub(crate) async fn get(
    State(state): State<AppState>,
    Query(params): Query<request::CommentsQuery>,
) -> Result<Json<response::Comments>, Error> {
    let image = params.image_id.ok_or(Error::MissingImageId)?;

    let comments = state.comments.list(image).await?;

    Ok(Json(response::Comments { comments }))
}

#[instrument(skip_all)]
pub(crate) async fn post(
    State(state): State<AppState>,
    Extension(UserId(user)): Extension<UserId>,
    Json(params): Json<request::NewCommentData>,
) -> Result<(StatusCode, Json<response::Comment>), Error> {
    let text = params.text.trim();

    if text.is_empty() {
        return Err(Error::EmptyComment);
    }

    let comment = state.comments.create(user, params.image_id, text).await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

#[instrument(skip_all)]
pub(crate) async fn delete(
    State(state): State<AppState>,
    Extension(UserId(user)): Extension<UserId>,
    Json(params): Json<request::DeleteCommentData>,
) -> Result<Json<response::Ok>, Error> {
    state.comments.delete(user, params.comment_id).await?;

    Ok(Json(response::Ok { ok: true }))
}
