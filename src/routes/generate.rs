use axum::extract::{Json, State};
use tracing::instrument;
use uuid::Uuid;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::{request, response};

/// Generates an image from a prompt, stores it under the media directory and
/// returns the local URL.
#[instrument(skip_all)]
pub(crate) async fn post(
    State(state): State<AppState>,
    Json(params): Json<request::GenerateData>,
) -> Result<Json<response::Generated>, Error> {
    let prompt = params.prompt.trim();

    if prompt.is_empty() {
        return Err(Error::EmptyPrompt);
    }

    let remote_url = state.client.generate(prompt).await?;

    let (bytes, _) = state.client.download(&remote_url).await?;

    let filename = format!("{}.png", Uuid::new_v4());
    let path = std::path::Path::new(&state.media_dir).join(&filename);

    tokio::fs::write(&path, &bytes).await?;

    tracing::debug!("stored generated image {} ({} bytes)", filename, bytes.len());

    Ok(Json(response::Generated {
        image_url: format!("/media/{}", filename),
        prompt: prompt.to_string(),
    }))
}
