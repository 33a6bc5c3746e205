//! Recording adapter for the `ImageGenerator` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::image_generator::{GenerateFuture, ImageGenerator, ImageRequest, PORT_NAME};
use crate::ports::GENERATE_METHOD;

/// Wraps another image generator and appends each call to the cassette.
pub struct RecordingImageGenerator {
    inner: Box<dyn ImageGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageGenerator {
    /// Wrap `inner`, sharing `recorder` with the other recording adapters.
    pub fn new(inner: Box<dyn ImageGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageGenerator for RecordingImageGenerator {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        let inner = self.inner.generate(request);
        let request = request.clone();
        Box::pin(async move {
            let result = inner.await;
            record_result(&self.recorder, PORT_NAME, GENERATE_METHOD, &request, &result);
            result
        })
    }
}
