use axum::extract::{Extension, Json, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::{request, response};
use crate::utils::auth::UserId;

#[instrument(skip_all)]
pub(crate) async fn post(
    State(state): State<AppState>,
    Extension(UserId(user)): Extension<UserId>,
    Json(params): Json<request::PublishData>,
) -> Result<(StatusCode, Json<response::PublishedImage>), Error> {
    let image_url = params.image_url.trim();

    if image_url.is_empty() {
        return Err(Error::EmptyImageUrl);
    }

    let image = state.images.publish(user, image_url, &params.prompt).await?;

    Ok((StatusCode::CREATED, Json(image)))
}
