//! Image generator port for the text-to-image API.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::media::InlineImage;

/// Port name used in cassettes.
pub const PORT_NAME: &str = "image_generator";

/// A request to generate a single image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    /// The text prompt describing the desired image.
    pub prompt: String,
}

/// A generated image, kept as the base64 payload the API returned.
pub type GeneratedImage = InlineImage;

/// Boxed future type returned by [`ImageGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GeneratedImage, GatewayError>> + Send + 'a>>;

/// Generates images from text prompts via an external API.
pub trait ImageGenerator: Send + Sync {
    /// Generate one image for the given request.
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_>;
}
