use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::core::error::{ConfigError, Error};

const GENERATION_URL: &str = "https://api.openai.com/v1/images/generations";

#[derive(Deserialize)]
struct GenerationResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Deserialize)]
struct GeneratedImage {
    url: Option<String>,
}

#[derive(Clone)]
pub(crate) struct Client {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("url", &self.url).finish()
    }
}

impl Client {
    pub(crate) fn new(api_key: Option<String>) -> Result<Self, ConfigError> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(concat!("atelier/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: String::from(GENERATION_URL),
            api_key,
        })
    }

    /// Asks the provider for one image and returns its remote URL.
    #[instrument(skip_all)]
    pub(crate) async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let api_key = self.api_key.as_ref().ok_or(Error::Misconfigured)?;

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&json!({
                "model": "dall-e-2",
                "prompt": prompt,
                "n": 1,
                "size": "512x512",
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("image generation request rejected: {} {}", status, body);

            return Err(Error::ImageProvider(status.to_string()));
        }

        let response = response.json::<GenerationResponse>().await?;

        response
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or_else(|| Error::ImageProvider("no image returned".to_string()))
    }

    /// Fetches raw image bytes and their content type from a remote URL.
    #[instrument(skip_all)]
    pub(crate) async fn download(&self, url: &str) -> Result<(Vec<u8>, Option<String>), Error> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("image fetch failed: {:?}", e);
            Error::ImageFetch
        })?;

        if !response.status().is_success() {
            return Err(Error::ImageFetch);
        }

        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(|_| Error::ImageFetch)?;

        Ok((bytes.to_vec(), mime))
    }
}
