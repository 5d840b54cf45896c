use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Serves a published image: stored bytes when present, otherwise a proxy of
/// the remote URL.
#[instrument(skip(state))]
pub(crate) async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, Error> {
    if id <= 0 {
        return Err(Error::InvalidId);
    }

    let image = state.images.get(id).await?.ok_or(Error::ImageNotFound)?;

    if image.stored {
        if let Some(data) = image.image_data {
            let mime = image.image_mime.unwrap_or_else(|| FALLBACK_MIME.to_string());

            return Ok(([(header::CONTENT_TYPE, mime)], data).into_response());
        }
    }

    let (bytes, mime) = state.client.download(&image.image_url).await?;
    let mime = mime.unwrap_or_else(|| FALLBACK_MIME.to_string());

    Ok(([(header::CONTENT_TYPE, mime)], bytes).into_response())
}
