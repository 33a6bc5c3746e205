//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the gateway and an external
//! generative API. Implementations live in `src/adapters/`.

pub mod image_generator;
pub mod markup_generator;

/// The single method every port exposes, as named in cassettes.
pub const GENERATE_METHOD: &str = "generate";

pub use image_generator::{GeneratedImage, ImageGenerator, ImageRequest};
pub use markup_generator::MarkupGenerator;
