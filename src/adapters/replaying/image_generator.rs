//! Replaying adapter for the `ImageGenerator` port.

use std::sync::{Arc, Mutex};

use super::replay_next;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::image_generator::{
    GenerateFuture, GeneratedImage, ImageGenerator, ImageRequest, PORT_NAME,
};
use crate::ports::GENERATE_METHOD;

/// Answers image requests with the next recorded result, ignoring the prompt.
pub struct ReplayingImageGenerator {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageGenerator for ReplayingImageGenerator {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        tracing::debug!(prompt = %request.prompt, "replaying image generation");
        let result = replay_next::<GeneratedImage>(&self.replayer, PORT_NAME, GENERATE_METHOD);
        Box::pin(async move { result })
    }
}
