//! The AI gateway: turns validated ad requests into upstream calls.

use std::fmt::Display;
use std::future::Future;

use crate::error::GatewayError;
use crate::media::MediaSource;
use crate::ports::{ImageGenerator, ImageRequest, MarkupGenerator};
use crate::prompt::{build_prompt, MediaReference};

/// A validated ad generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdRequest {
    /// Media items, already shaped for their mode.
    pub media: MediaSource,
    /// Free-text description of how the ad should behave.
    pub behavior: String,
}

/// Owns the upstream generators and the placeholder policy.
pub struct AdGateway {
    markup: Box<dyn MarkupGenerator>,
    images: Box<dyn ImageGenerator>,
    placeholder_image_url: String,
}

impl AdGateway {
    /// Create a gateway over the given generators.
    pub fn new(
        markup: Box<dyn MarkupGenerator>,
        images: Box<dyn ImageGenerator>,
        placeholder_image_url: impl Into<String>,
    ) -> Self {
        Self { markup, images, placeholder_image_url: placeholder_image_url.into() }
    }

    /// Generate one image and return it as a `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or the image API call fails.
    pub async fn generate_image(&self, prompt: &str) -> Result<String, GatewayError> {
        let image = self.images.generate(&ImageRequest { prompt: prompt.to_string() }).await?;
        tracing::debug!(payload_len = image.data.len(), "image generated");
        Ok(image.to_data_url())
    }

    /// Generate ad markup for the request.
    ///
    /// In generate mode each prompt is turned into an image first, one at a
    /// time in input order; a failed image becomes the placeholder URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or the text API call fails.
    pub async fn generate_markup(&self, request: &AdRequest) -> Result<String, GatewayError> {
        let references = self.resolve_references(&request.media).await;
        let payload = build_prompt(&references, &request.behavior);
        tracing::info!(
            mode = %request.media.kind(),
            images = references.len(),
            parts = payload.parts.len(),
            "requesting ad markup"
        );
        self.markup.generate(&payload).await
    }

    async fn resolve_references(&self, media: &MediaSource) -> Vec<MediaReference> {
        match media {
            MediaSource::Link(urls) => urls.iter().cloned().map(MediaReference::Url).collect(),
            MediaSource::Upload(images) => {
                images.iter().cloned().map(MediaReference::Inline).collect()
            }
            MediaSource::Generate(prompts) => {
                let fallback = |index: usize, err: &GatewayError| {
                    tracing::warn!(
                        index,
                        error = %err,
                        "image generation failed, using placeholder"
                    );
                    self.placeholder_image_url.clone()
                };
                sequential_or(prompts, |prompt| self.generate_image(prompt), fallback)
                    .await
                    .into_iter()
                    .map(MediaReference::Url)
                    .collect()
            }
        }
    }
}

/// Run `op` over `items` one at a time, in order, replacing each failure
/// with `fallback(index, error)`. Never stops early.
pub async fn sequential_or<'a, T, R, E, Op, Fut, Fb>(
    items: &'a [T],
    mut op: Op,
    mut fallback: Fb,
) -> Vec<R>
where
    Op: FnMut(&'a T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: Display,
    Fb: FnMut(usize, &E) -> R,
{
    let mut results = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let result = match op(item).await {
            Ok(value) => value,
            Err(err) => fallback(index, &err),
        };
        results.push(result);
    }
    results
}
