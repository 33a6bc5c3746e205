//! Live adapter for the Imagen `predict` API.

use reqwest::Client;
use secrecy::SecretString;
use serde::Deserialize;

use super::{post_json, truncate_body};
use crate::error::GatewayError;
use crate::ports::image_generator::{
    GenerateFuture, GeneratedImage, ImageGenerator, ImageRequest,
};

const API_NAME: &str = "Imagen";

/// Imagen returns PNG payloads by default.
const IMAGE_MIME_TYPE: &str = "image/png";

/// Live image generator that calls the Imagen API.
pub struct ImagenGenerator {
    client: Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl ImagenGenerator {
    /// Create a generator for the given endpoint. A missing key fails each call.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, api_key: Option<SecretString>) -> Self {
        Self { client: Client::new(), endpoint: endpoint.into(), api_key }
    }
}

impl ImageGenerator for ImagenGenerator {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        let body = serde_json::json!({
            "instances": { "prompt": request.prompt },
            "parameters": { "sampleCount": 1 }
        });
        Box::pin(async move {
            let response_text =
                post_json(&self.client, &self.endpoint, self.api_key.as_ref(), API_NAME, &body)
                    .await?;

            let parsed: ImagenResponse =
                serde_json::from_str(&response_text).map_err(|e| GatewayError::MalformedResponse {
                    api: API_NAME,
                    message: format!("Failed to parse response: {e}"),
                })?;

            let data = parsed.into_first_image().ok_or_else(|| {
                GatewayError::MalformedResponse {
                    api: API_NAME,
                    message: format!(
                        "No image generated. Body: {}",
                        truncate_body(&response_text)
                    ),
                }
            })?;

            Ok(GeneratedImage {
                mime_type: IMAGE_MIME_TYPE.to_string(),
                data,
            })
        })
    }
}

// --- Imagen API response types ---

#[derive(Deserialize)]
struct ImagenResponse {
    #[serde(default)]
    predictions: Vec<ImagenPrediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImagenPrediction {
    bytes_base64_encoded: Option<String>,
}

impl ImagenResponse {
    /// `predictions[0].bytesBase64Encoded`
    fn into_first_image(self) -> Option<String> {
        self.predictions.into_iter().next()?.bytes_base64_encoded.filter(|b| !b.is_empty())
    }
}
