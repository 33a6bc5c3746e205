//! Recording adapter for the `MarkupGenerator` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::markup_generator::{MarkupFuture, MarkupGenerator, PORT_NAME};
use crate::ports::GENERATE_METHOD;
use crate::prompt::PromptPayload;

/// Wraps another markup generator and appends each call to the cassette.
pub struct RecordingMarkupGenerator {
    inner: Box<dyn MarkupGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingMarkupGenerator {
    /// Wrap `inner`, sharing `recorder` with the other recording adapters.
    pub fn new(inner: Box<dyn MarkupGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl MarkupGenerator for RecordingMarkupGenerator {
    fn generate(&self, payload: &PromptPayload) -> MarkupFuture<'_> {
        let inner = self.inner.generate(payload);
        let payload = payload.clone();
        Box::pin(async move {
            let result = inner.await;
            record_result(&self.recorder, PORT_NAME, GENERATE_METHOD, &payload, &result);
            result
        })
    }
}
