//! Media-source modes, request items, and data URL handling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the images for an ad are supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSourceType {
    /// Items are image URLs referenced verbatim.
    Link,
    /// Items are base64 data URLs uploaded by the client.
    Upload,
    /// Items are prompts; images are generated on demand.
    Generate,
}

impl FromStr for MediaSourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "link" => Ok(Self::Link),
            "upload" => Ok(Self::Upload),
            "generate" => Ok(Self::Generate),
            other => Err(format!(
                "Unsupported image source type '{other}'. Valid: link, upload, generate"
            )),
        }
    }
}

impl fmt::Display for MediaSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Link => "link",
            Self::Upload => "upload",
            Self::Generate => "generate",
        })
    }
}

/// One entry of `mediaData` as sent by the client.
///
/// Clients send either a bare string, interpreted according to the mode, or
/// an object descriptor.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MediaItem {
    /// A URL, data URL, or prompt depending on the mode.
    Text(String),
    /// An object carrying the mode-specific field.
    Descriptor(MediaDescriptor),
}

/// Object form of a media item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDescriptor {
    /// Image URL (link mode).
    pub url: Option<String>,
    /// Full `data:` URL (upload mode).
    pub data_url: Option<String>,
    /// Bare base64 payload (upload mode, paired with `mime_type`).
    pub data: Option<String>,
    /// MIME type of `data`.
    #[serde(alias = "type")]
    pub mime_type: Option<String>,
    /// Image generation prompt (generate mode).
    pub prompt: Option<String>,
}

/// An image embedded in the prompt as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Base64 payload without the `data:` prefix.
    pub data: String,
}

impl InlineImage {
    /// Render as a `data:<mime>;base64,<payload>` URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

const DATA_URL_SHAPE: &str = "data:<mime>;base64,...";

/// Split a `data:<mime>;base64,<payload>` URL into its parts.
///
/// # Errors
///
/// Returns an error if the prefix is missing or the MIME type is empty.
pub fn parse_data_url(url: &str) -> Result<InlineImage, String> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| format!("Uploaded media must be a data URL ({DATA_URL_SHAPE})"))?;
    let (mime_type, data) = rest
        .split_once(";base64,")
        .ok_or_else(|| format!("Uploaded media must be base64 encoded ({DATA_URL_SHAPE})"))?;
    if mime_type.is_empty() {
        return Err("Uploaded media is missing its MIME type".to_string());
    }
    Ok(InlineImage { mime_type: mime_type.to_string(), data: data.to_string() })
}

impl MediaItem {
    /// Interpret this item as a link-mode URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor has no `url`.
    pub fn into_url(self) -> Result<String, String> {
        match self {
            Self::Text(url) => Ok(url),
            Self::Descriptor(MediaDescriptor { url: Some(url), .. }) => Ok(url),
            Self::Descriptor(_) => Err("Link media items must be URLs".to_string()),
        }
    }

    /// Interpret this item as an uploaded image.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not a data URL or a `data` + MIME type pair.
    pub fn into_inline_image(self) -> Result<InlineImage, String> {
        match self {
            Self::Text(url) | Self::Descriptor(MediaDescriptor { data_url: Some(url), .. }) => {
                parse_data_url(&url)
            }
            Self::Descriptor(MediaDescriptor { data: Some(data), mime_type: Some(mime_type), .. })
                if !mime_type.is_empty() =>
            {
                match parse_data_url(&data) {
                    Ok(image) => Ok(image),
                    Err(_) => Ok(InlineImage { mime_type, data }),
                }
            }
            Self::Descriptor(_) => {
                Err("Upload media items must carry a data URL or data with a MIME type".to_string())
            }
        }
    }

    /// Interpret this item as an image generation prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor has no `prompt` or it is blank.
    pub fn into_prompt(self) -> Result<String, String> {
        let prompt = match self {
            Self::Text(prompt) | Self::Descriptor(MediaDescriptor { prompt: Some(prompt), .. }) => {
                prompt
            }
            Self::Descriptor(_) => {
                return Err("Generate media items must be prompts".to_string());
            }
        };
        if prompt.trim().is_empty() {
            return Err("Image generation prompts must not be empty".to_string());
        }
        Ok(prompt)
    }
}

/// A validated media list whose item shape matches its mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Image URLs.
    Link(Vec<String>),
    /// Uploaded images.
    Upload(Vec<InlineImage>),
    /// Prompts for on-demand generation.
    Generate(Vec<String>),
}

impl MediaSource {
    /// Convert raw items according to the mode.
    ///
    /// # Errors
    ///
    /// Returns the first item whose shape does not fit the mode.
    pub fn from_items(kind: MediaSourceType, items: Vec<MediaItem>) -> Result<Self, String> {
        let items = items.into_iter();
        Ok(match kind {
            MediaSourceType::Link => {
                Self::Link(items.map(MediaItem::into_url).collect::<Result<_, _>>()?)
            }
            MediaSourceType::Upload => {
                Self::Upload(items.map(MediaItem::into_inline_image).collect::<Result<_, _>>()?)
            }
            MediaSourceType::Generate => {
                Self::Generate(items.map(MediaItem::into_prompt).collect::<Result<_, _>>()?)
            }
        })
    }

    /// The mode this source was built for.
    #[must_use]
    pub fn kind(&self) -> MediaSourceType {
        match self {
            Self::Link(_) => MediaSourceType::Link,
            Self::Upload(_) => MediaSourceType::Upload,
            Self::Generate(_) => MediaSourceType::Generate,
        }
    }

    /// Number of media items.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Link(items) | Self::Generate(items) => items.len(),
            Self::Upload(items) => items.len(),
        }
    }

    /// Whether there are no media items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_source_types() {
        assert_eq!("link".parse::<MediaSourceType>().unwrap(), MediaSourceType::Link);
        assert_eq!("upload".parse::<MediaSourceType>().unwrap(), MediaSourceType::Upload);
        assert_eq!("generate".parse::<MediaSourceType>().unwrap(), MediaSourceType::Generate);
        assert!("video".parse::<MediaSourceType>().is_err());
        assert!("Link".parse::<MediaSourceType>().is_err());
    }

    #[test]
    fn data_url_split() {
        let image = parse_data_url("data:image/png;base64,AAAA").unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "AAAA");
        assert_eq!(image.to_data_url(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn data_url_rejects_plain_urls() {
        assert!(parse_data_url("http://a.png").is_err());
        assert!(parse_data_url("data:image/png,AAAA").is_err());
        assert!(parse_data_url("data:;base64,AAAA").is_err());
    }

    #[test]
    fn items_deserialize_from_strings_and_objects() {
        let items: Vec<MediaItem> = serde_json::from_value(serde_json::json!([
            "http://a.png",
            {"url": "http://b.png"},
            {"prompt": "a cat"},
            {"data": "AAAA", "type": "image/jpeg"}
        ]))
        .unwrap();
        let descriptor = |i: usize| match &items[i] {
            MediaItem::Descriptor(d) => d.clone(),
            MediaItem::Text(t) => panic!("expected descriptor, got {t:?}"),
        };
        assert!(matches!(&items[0], MediaItem::Text(s) if s == "http://a.png"));
        assert_eq!(descriptor(1).url.as_deref(), Some("http://b.png"));
        assert_eq!(descriptor(2).prompt.as_deref(), Some("a cat"));
        assert_eq!(descriptor(3).mime_type.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn link_items_pass_through_verbatim() {
        let source = MediaSource::from_items(
            MediaSourceType::Link,
            vec![MediaItem::Text("not even a url".into())],
        )
        .unwrap();
        assert_eq!(source, MediaSource::Link(vec!["not even a url".into()]));
    }

    #[test]
    fn upload_descriptor_with_bare_data() {
        let item = MediaItem::Descriptor(MediaDescriptor {
            data: Some("BBBB".into()),
            mime_type: Some("image/webp".into()),
            ..MediaDescriptor::default()
        });
        let image = item.into_inline_image().unwrap();
        assert_eq!(image, InlineImage { mime_type: "image/webp".into(), data: "BBBB".into() });
    }

    #[test]
    fn upload_rejects_plain_url() {
        let items = vec![MediaItem::Text("http://a.png".into())];
        let result = MediaSource::from_items(MediaSourceType::Upload, items);
        assert!(result.is_err());
    }

    #[test]
    fn generate_rejects_blank_prompt() {
        let result =
            MediaSource::from_items(MediaSourceType::Generate, vec![MediaItem::Text("   ".into())]);
        assert!(result.is_err());
    }

    #[test]
    fn generate_rejects_url_descriptor() {
        let item = MediaItem::Descriptor(MediaDescriptor {
            url: Some("http://a.png".into()),
            ..MediaDescriptor::default()
        });
        assert!(MediaSource::from_items(MediaSourceType::Generate, vec![item]).is_err());
    }

    #[test]
    fn source_reports_kind_and_len() {
        let source = MediaSource::Generate(vec!["a".into(), "b".into()]);
        assert_eq!(source.kind(), MediaSourceType::Generate);
        assert_eq!(source.len(), 2);
        assert!(!source.is_empty());
    }
}
