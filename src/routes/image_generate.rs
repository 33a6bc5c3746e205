//! `POST /image-generate`: single image generation.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::gateway::AdGateway;

/// Request body for `POST /image-generate`.
#[derive(Debug, Default, Deserialize)]
pub struct ImageGenerateRequest {
    /// Text prompt for the image.
    pub prompt: Option<serde_json::Value>,
}

/// Response body for `POST /image-generate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerateResponse {
    /// The image as a `data:image/png;base64,...` URL.
    pub image_url: String,
}

impl ImageGenerateRequest {
    /// Return the prompt if it is a string that is not blank.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] otherwise.
    pub fn validate(self) -> Result<String, ApiError> {
        match self.prompt {
            Some(serde_json::Value::String(prompt)) if !prompt.trim().is_empty() => Ok(prompt),
            _ => Err(ApiError::Validation("Prompt for image generation is required.".to_string())),
        }
    }
}

/// Handle `POST /image-generate`.
pub async fn generate_image(
    State(gateway): State<Arc<AdGateway>>,
    payload: Result<Json<ImageGenerateRequest>, JsonRejection>,
) -> Result<Json<ImageGenerateResponse>, ApiError> {
    let Json(payload) = payload?;
    let prompt = payload.validate()?;

    tracing::info!(prompt_chars = prompt.chars().count(), "generating image");

    let image_url = gateway
        .generate_image(&prompt)
        .await
        .map_err(|source| ApiError::Gateway { context: "Failed to generate image", source })?;

    Ok(Json(ImageGenerateResponse { image_url }))
}
