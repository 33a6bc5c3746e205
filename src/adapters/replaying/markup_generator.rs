//! Replaying adapter for the `MarkupGenerator` port.

use std::sync::{Arc, Mutex};

use super::replay_next;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::markup_generator::{MarkupFuture, MarkupGenerator, PORT_NAME};
use crate::ports::GENERATE_METHOD;
use crate::prompt::PromptPayload;

/// Serves recorded markup generation results from a cassette.
pub struct ReplayingMarkupGenerator {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingMarkupGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl MarkupGenerator for ReplayingMarkupGenerator {
    fn generate(&self, _payload: &PromptPayload) -> MarkupFuture<'_> {
        let result = replay_next::<String>(&self.replayer, PORT_NAME, GENERATE_METHOD);
        Box::pin(async move { result })
    }
}
