use serde::{Deserialize, Serialize};

/// Image generation request body.
#[derive(Debug, Serialize)]
pub struct GenerationRequest<'a> {
    /// Model identifier.
    pub model: &'a str,
    /// Text prompt.
    pub prompt: &'a str,
    /// `WIDTHxHEIGHT`.
    pub size: &'a str,
    /// Quality tier.
    pub quality: &'a str,
    /// Number of images.
    pub n: u8,
}

/// Image generation response body.
#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    /// Generated images.
    #[serde(default)]
    pub data: Vec<GeneratedImage>,
}

/// One generated image.
#[derive(Debug, Deserialize)]
pub struct GeneratedImage {
    /// Base64-encoded image bytes.
    pub b64_json: Option<String>,
}

/// API error envelope.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    /// Error details.
    pub error: ErrorBody,
}

/// API error details.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// Human readable message.
    pub message: String,
}
