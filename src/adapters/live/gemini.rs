//! Live adapter for the Gemini `generateContent` API.

use reqwest::Client;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::{post_json, truncate_body};
use crate::error::GatewayError;
use crate::ports::markup_generator::{MarkupFuture, MarkupGenerator};
use crate::prompt::{PromptPart, PromptPayload};

const API_NAME: &str = "Gemini";

/// Live markup generator that calls the Gemini text API.
pub struct GeminiMarkupGenerator {
    client: Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl GeminiMarkupGenerator {
    /// Create a generator for the given endpoint. A missing key fails each call.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, api_key: Option<SecretString>) -> Self {
        Self { client: Client::new(), endpoint: endpoint.into(), api_key }
    }
}

impl MarkupGenerator for GeminiMarkupGenerator {
    fn generate(&self, payload: &PromptPayload) -> MarkupFuture<'_> {
        let body = GeminiRequest::from(payload);
        Box::pin(async move {
            let response_text =
                post_json(&self.client, &self.endpoint, self.api_key.as_ref(), API_NAME, &body)
                    .await?;

            let parsed: GeminiResponse =
                serde_json::from_str(&response_text).map_err(|e| GatewayError::MalformedResponse {
                    api: API_NAME,
                    message: format!("Failed to parse response: {e}"),
                })?;

            parsed.into_first_text().ok_or_else(|| GatewayError::MalformedResponse {
                api: API_NAME,
                message: format!("No content generated. Body: {}", truncate_body(&response_text)),
            })
        })
    }
}

// --- Gemini API request types ---

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiRequestContent>,
}

#[derive(Debug, Serialize)]
struct GeminiRequestContent {
    role: &'static str,
    parts: Vec<GeminiRequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiRequestPart {
    Text { text: String },
    Inline { #[serde(rename = "inlineData")] inline_data: GeminiInlineData },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

impl From<&PromptPayload> for GeminiRequest {
    fn from(payload: &PromptPayload) -> Self {
        let parts = payload
            .parts
            .iter()
            .map(|part| match part {
                PromptPart::Text(text) => GeminiRequestPart::Text { text: text.clone() },
                PromptPart::Inline(image) => GeminiRequestPart::Inline {
                    inline_data: GeminiInlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.data.clone(),
                    },
                },
            })
            .collect();
        Self { contents: vec![GeminiRequestContent { role: "user", parts }] }
    }
}

// --- Gemini API response types ---

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

impl GeminiResponse {
    /// `candidates[0].content.parts[0].text`
    fn into_first_text(self) -> Option<String> {
        self.candidates.into_iter().next()?.content?.parts.into_iter().next()?.text
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::media::InlineImage;

    const PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

    fn generator(server: &MockServer) -> GeminiMarkupGenerator {
        GeminiMarkupGenerator::new(
            format!("{}{PATH}", server.uri()),
            Some(SecretString::from("test-key")),
        )
    }

    fn payload() -> PromptPayload {
        PromptPayload {
            parts: vec![
                PromptPart::Text("make an ad".into()),
                PromptPart::Inline(InlineImage {
                    mime_type: "image/png".into(),
                    data: "AAAA".into(),
                }),
            ],
        }
    }

    #[test]
    fn request_wire_shape() {
        let body = serde_json::to_value(GeminiRequest::from(&payload())).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        {"text": "make an ad"},
                        {"inlineData": {"mimeType": "image/png", "data": "AAAA"}}
                    ]
                }]
            })
        );
    }

    #[tokio::test]
    async fn returns_first_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PATH))
            .and(query_param("key", "test-key"))
            .and(body_json(serde_json::to_value(GeminiRequest::from(&payload())).unwrap()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"parts": [{"text": "<html></html>"}, {"text": "ignored"}]}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let html = generator(&server).generate(&payload()).await.unwrap();
        assert_eq!(html, "<html></html>");
    }

    #[tokio::test]
    async fn non_success_status_surfaces_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"error": {"message": "bad key"}})),
            )
            .mount(&server)
            .await;

        let err = generator(&server).generate(&payload()).await.unwrap_err();
        match err {
            GatewayError::Api { status, message, .. } => {
                assert_eq!(status, 403);
                assert!(message.contains("bad key"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_candidates_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let err = generator(&server).generate(&payload()).await.unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse { api: "Gemini", .. }));
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let generator = GeminiMarkupGenerator::new(format!("{}{PATH}", server.uri()), None);
        let err = generator.generate(&payload()).await.unwrap_err();
        assert!(matches!(err, GatewayError::MissingApiKey { .. }));
    }

    #[test]
    fn first_text_requires_every_level() {
        let parsed: GeminiResponse =
            serde_json::from_value(json!({"candidates": [{"content": {"parts": []}}]})).unwrap();
        assert!(parsed.into_first_text().is_none());
        let parsed: GeminiResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert!(parsed.into_first_text().is_none());
    }
}
