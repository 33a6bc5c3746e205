//! Error types for the gateway and the HTTP layer.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while talking to the generative AI APIs.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An API returned a non-success response.
    #[error("{api} API returned an error ({status}): {message}")]
    Api {
        /// Which upstream API answered.
        api: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body from the API.
        message: String,
    },

    /// A network error occurred. The request URL is stripped because it carries the API key.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The API answered successfully but without the expected content.
    #[error("Unexpected response from {api} API: {message}")]
    MalformedResponse {
        /// Which upstream API answered.
        api: &'static str,
        /// What was missing or unparseable.
        message: String,
    },

    /// No API key configured.
    #[error("No API key configured. Set {env_var} or add it to the config file.")]
    MissingApiKey {
        /// The environment variable name.
        env_var: &'static str,
    },

    /// A recorded interaction could not be served.
    #[error("Replay error: {0}")]
    Replay(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url())
    }
}

/// Errors returned by startup code (config, cassettes, binding).
#[derive(Debug, Error)]
pub enum StartupError {
    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body failed validation.
    #[error("{0}")]
    Validation(String),

    /// The request body exceeded the configured size limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The gateway call failed.
    #[error("{context}: {source}")]
    Gateway {
        /// Short description of the failed operation, sent as `error`.
        context: &'static str,
        /// Underlying failure, sent as `details`.
        #[source]
        source: GatewayError,
    },
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Gateway { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(rejection.body_text())
        } else {
            Self::Validation(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::Validation(message) | Self::PayloadTooLarge(message) => {
                tracing::warn!(status = status.as_u16(), error = %message, "rejected request");
                ErrorBody { error: message, details: None }
            }
            Self::Gateway { context, source } => {
                tracing::error!(error = %source, "{context}");
                ErrorBody { error: context.to_string(), details: Some(source.to_string()) }
            }
        };
        (status, Json(body)).into_response()
    }
}
