//! OpenAI image generation client.

use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::dto::{ErrorEnvelope, GenerationRequest, GenerationResponse};
use crate::domain::entities::{ApiKey, ImageRequest};
use crate::domain::errors::GenerationError;
use crate::domain::ports::ImageGeneratorPort;

/// Default API base URL.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Default image model.
pub const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";

// Generation with high quality regularly takes over a minute.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Image generator backed by the OpenAI images API.
pub struct OpenAiImageClient {
    client: Client,
    base_url: String,
    api_key: ApiKey,
}

impl OpenAiImageClient {
    /// Creates new client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(api_key: ApiKey) -> Result<Self, GenerationError> {
        Self::with_base_url(OPENAI_API_BASE, api_key)
    }

    /// Creates client with custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: ApiKey,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GenerationError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn handle_error_response(
        status: StatusCode,
        response: reqwest::Response,
    ) -> GenerationError {
        let message = match response.text().await {
            Ok(text) => serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(text),
            Err(_) => format!("HTTP {status}"),
        };
        GenerationError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Decodes the base64 payload and checks it is a PNG.
///
/// # Errors
/// Returns error if the payload is not valid base64 or not a PNG image.
pub fn decode_png(b64: &str) -> Result<Bytes, GenerationError> {
    let raw = STANDARD
        .decode(b64.trim())
        .map_err(|e| GenerationError::decode(format!("invalid base64: {e}")))?;

    let reader = image::ImageReader::new(Cursor::new(&raw))
        .with_guessed_format()
        .map_err(|e| GenerationError::decode(e.to_string()))?;
    if reader.format() != Some(image::ImageFormat::Png) {
        return Err(GenerationError::decode(format!(
            "expected PNG, got {:?}",
            reader.format()
        )));
    }
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| GenerationError::decode(e.to_string()))?;
    debug!(width, height, "Decoded generated image");

    Ok(Bytes::from(raw))
}

#[async_trait]
impl ImageGeneratorPort for OpenAiImageClient {
    async fn generate(&self, request: &ImageRequest) -> Result<Bytes, GenerationError> {
        let url = format!("{}/images/generations", self.base_url);
        let body = GenerationRequest {
            model: &request.model,
            prompt: &request.prompt,
            size: request.size.as_str(),
            quality: request.quality.as_str(),
            n: 1,
        };

        debug!(model = %request.model, size = %request.size, "Requesting image generation");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach image API");
                if e.is_timeout() {
                    GenerationError::network("request timed out")
                } else {
                    GenerationError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let payload: GenerationResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse image response");
            GenerationError::decode(format!("failed to parse response: {e}"))
        })?;

        let b64 = payload
            .data
            .into_iter()
            .next()
            .and_then(|image| image.b64_json)
            .ok_or(GenerationError::EmptyResponse)?;

        decode_png(&b64)
    }
}
