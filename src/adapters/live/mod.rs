//! Live adapters that call the Google generative language APIs.

pub mod gemini;
pub mod imagen;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::config::API_KEY_ENV;
use crate::error::GatewayError;

/// POST a JSON body with the API key as the `key` query parameter and
/// return the response text of a successful call.
pub(crate) async fn post_json<B: Serialize + ?Sized>(
    client: &Client,
    endpoint: &str,
    api_key: Option<&SecretString>,
    api: &'static str,
    body: &B,
) -> Result<String, GatewayError> {
    let key = api_key
        .map(|k| k.expose_secret())
        .filter(|k| !k.trim().is_empty())
        .ok_or(GatewayError::MissingApiKey { env_var: API_KEY_ENV })?;

    tracing::debug!(api, endpoint, "calling upstream");
    let response = client
        .post(endpoint)
        .query(&[("key", key)])
        .json(body)
        .send()
        .await?;

    let status = response.status();
    let response_text = response.text().await?;

    if !status.is_success() {
        tracing::warn!(api, status = status.as_u16(), "upstream returned error");
        return Err(GatewayError::Api { api, status: status.as_u16(), message: response_text });
    }

    Ok(response_text)
}

/// Shorten a response body for error messages.
pub(crate) fn truncate_body(body: &str) -> String {
    const LIMIT: usize = 500;
    if body.len() <= LIMIT {
        return body.to_string();
    }
    let mut end = LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
