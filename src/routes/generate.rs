//! `POST /generate`: ad markup generation.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::gateway::{AdGateway, AdRequest};
use crate::media::{MediaItem, MediaSource, MediaSourceType};

/// Maximum number of media items per ad.
pub const MAX_MEDIA_ITEMS: usize = 3;

/// Request body for `POST /generate`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// `link`, `upload` or `generate`.
    pub image_source_type: Option<String>,
    /// One to three media items.
    pub media_data: Option<Vec<MediaItem>>,
    /// How the ad should behave.
    pub logic_description: Option<String>,
}

/// Response body for `POST /generate`.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Generated HTML/CSS/JS source.
    pub html: String,
}

impl GenerateRequest {
    /// Check required fields and the item limit, and shape the items for their mode.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] describing the first problem found.
    pub fn validate(self) -> Result<AdRequest, ApiError> {
        let (Some(kind), Some(items), Some(behavior)) =
            (self.image_source_type, self.media_data, self.logic_description)
        else {
            return Err(missing_fields());
        };
        if kind.is_empty() || items.is_empty() || behavior.is_empty() {
            return Err(missing_fields());
        }

        if items.len() > MAX_MEDIA_ITEMS {
            return Err(ApiError::Validation(format!(
                "Maximum of {MAX_MEDIA_ITEMS} media items (links, uploads, or generation prompts) \
                 are allowed."
            )));
        }

        let kind: MediaSourceType = kind.parse().map_err(ApiError::Validation)?;
        let media = MediaSource::from_items(kind, items).map_err(ApiError::Validation)?;

        Ok(AdRequest { media, behavior })
    }
}

fn missing_fields() -> ApiError {
    ApiError::Validation(
        "Image source type, media data, and logic description are required.".to_string(),
    )
}

/// Handle `POST /generate`.
pub async fn generate_ad(
    State(gateway): State<Arc<AdGateway>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(payload) = payload?;
    let request = payload.validate()?;

    tracing::info!(mode = %request.media.kind(), items = request.media.len(), "generating ad");

    let html = gateway
        .generate_markup(&request)
        .await
        .map_err(|source| ApiError::Gateway { context: "Failed to generate ad HTML", source })?;

    Ok(Json(GenerateResponse { html }))
}
