//! Prompt assembly for ad markup generation.

use serde::{Deserialize, Serialize};

use crate::media::InlineImage;

/// A resolved image reference to be shown in the generated ad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaReference {
    /// A URL (http(s) or `data:`) the markup must use as `src`.
    Url(String),
    /// An image embedded in the prompt as binary.
    Inline(InlineImage),
}

/// One part of a prompt sent to the text generation API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptPart {
    /// A text fragment.
    Text(String),
    /// An inline image.
    Inline(InlineImage),
}

/// Ordered prompt parts, sent verbatim to the text generation API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPayload {
    /// The parts in send order.
    pub parts: Vec<PromptPart>,
}

/// Transparent 1x1 GIF the model is told to use until images load.
const BLANK_GIF: &str = "data:image/gif;base64,R0lGODlhAQABAAD/ACwAAAAAAQABAAACADs=";

fn instructions(behavior: &str, image_count: usize) -> String {
    [
        "Create ONLY complete HTML, CSS (use Tailwind CSS) and JavaScript code for an advertising \
         web app. Do NOT add any other text, explanations or markdown blocks besides the code \
         itself."
            .to_string(),
        "The ad must be fully responsive for every screen size (mobile, tablet, desktop) and \
         orientation."
            .to_string(),
        "Avoid inner scrollbars in the generated HTML.".to_string(),
        "If the logic involves a slideshow or gallery, make sure images scale and align correctly \
         with no gaps between them."
            .to_string(),
        format!(
            "You MUST use the {image_count} image(s) provided below and create an <img> tag for \
             each of them, in the order given."
        ),
        "Each carousel item (if a carousel) or image container must contain exactly one <img> tag."
            .to_string(),
        format!(
            "Example <img> tag: <img id=\"ad-image-0\" src=\"{BLANK_GIF}\" \
             alt=\"Image description\" class=\"w-full h-full object-cover\">."
        ),
        format!("Ad behavior logic: {behavior}."),
        "Avoid alert()/confirm() and any other blocking dialogs.".to_string(),
        "Always use relative units (%, vw, vh) for element sizes and responsive Tailwind CSS \
         classes."
            .to_string(),
        "Always include an 'alt' attribute for images.".to_string(),
    ]
    .join("\n")
}

fn reference_part(index: usize, reference: &MediaReference) -> PromptPart {
    match reference {
        MediaReference::Url(url) => PromptPart::Text(format!(
            "For image {}: image URL: {url} Create an <img> tag with id=\"ad-image-{index}\", \
             this exact URL as src, and a matching alt attribute.",
            index + 1
        )),
        MediaReference::Inline(image) => PromptPart::Inline(image.clone()),
    }
}

/// Build the prompt: the instruction block followed by one part per reference.
///
/// Inline images are mapped to `ad-image-<n>` by their order in the prompt.
#[must_use]
pub fn build_prompt(references: &[MediaReference], behavior: &str) -> PromptPayload {
    let mut parts = Vec::with_capacity(references.len() + 1);
    parts.push(PromptPart::Text(instructions(behavior, references.len())));
    parts.extend(references.iter().enumerate().map(|(i, r)| reference_part(i, r)));
    PromptPayload { parts }
}
