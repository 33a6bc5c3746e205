//! Markup generator port for the text generation API.

use std::future::Future;
use std::pin::Pin;

use crate::error::GatewayError;
use crate::prompt::PromptPayload;

/// Port name used in cassettes.
pub const PORT_NAME: &str = "markup_generator";

/// Boxed future type returned by [`MarkupGenerator::generate`].
pub type MarkupFuture<'a> = Pin<Box<dyn Future<Output = Result<String, GatewayError>> + Send + 'a>>;

/// Turns a prompt into generated HTML/CSS/JS source text.
pub trait MarkupGenerator: Send + Sync {
    /// Send the prompt and return the first text the model produced.
    fn generate(&self, payload: &PromptPayload) -> MarkupFuture<'_>;
}
