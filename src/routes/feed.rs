use axum::extract::{Extension, Json, State};
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::{request, response};
use crate::utils::auth::{Session, UserId};

#[instrument(skip_all)]
pub(crate) async fn get(
    State(state): State<AppState>,
    Extension(Session(viewer)): Extension<Session>,
) -> Result<Json<Vec<response::FeedImage>>, Error> {
    let images = state.images.feed(viewer).await?;

    Ok(Json(images))
}

#[instrument(skip_all)]
pub(crate) async fn put(
    State(state): State<AppState>,
    Extension(UserId(user)): Extension<UserId>,
    Json(params): Json<request::LikeToggleData>,
) -> Result<Json<response::LikeStatus>, Error> {
    let status = state.images.toggle_like(user, params.image_id).await?;

    Ok(Json(status))
}
