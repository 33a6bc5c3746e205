//! Shared helpers for HTTP integration tests.

#![allow(dead_code)]

use adgen::adapters::live::gemini::GeminiMarkupGenerator;
use adgen::adapters::live::imagen::ImagenGenerator;
use adgen::config::Config;
use adgen::context::ServiceContext;
use secrecy::SecretString;
use wiremock::MockServer;

pub const TEXT_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";
pub const IMAGE_PATH: &str = "/v1beta/models/imagen-3.0-generate-002:predict";
pub const PLACEHOLDER: &str = "https://placeholder.test/unavailable.png";

/// A running adgen server.
pub struct TestServer {
    base_url: String,
    client: reqwest::Client,
}

impl TestServer {
    /// Serve the app for `ctx` on an ephemeral port.
    pub async fn start(ctx: ServiceContext) -> Self {
        Self::start_with(ctx, Config::default()).await
    }

    /// Serve the app for `ctx` with `config`. The placeholder is always [`PLACEHOLDER`].
    pub async fn start_with(ctx: ServiceContext, mut config: Config) -> Self {
        config.gateway.placeholder_image_url = PLACEHOLDER.to_string();
        let app = adgen::app(&config, ctx);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
        }
    }

    /// Serve the app with live adapters pointed at `upstream`.
    pub async fn with_upstream(upstream: &MockServer, key: Option<&str>) -> Self {
        Self::start(upstream_context(upstream, key)).await
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// POST a JSON body and return status and parsed JSON response.
    pub async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> (u16, serde_json::Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        let json = resp.json().await.unwrap();
        (status, json)
    }
}

/// Live adapters pointed at `upstream`.
pub fn upstream_context(upstream: &MockServer, key: Option<&str>) -> ServiceContext {
    let key = key.map(SecretString::from);
    ServiceContext {
        markup: Box::new(GeminiMarkupGenerator::new(
            format!("{}{TEXT_PATH}", upstream.uri()),
            key.clone(),
        )),
        images: Box::new(ImagenGenerator::new(
            format!("{}{IMAGE_PATH}", upstream.uri()),
            key,
        )),
    }
}

/// Bodies of requests the mock upstream received on `path`, in arrival order.
pub async fn received_bodies(upstream: &MockServer, path: &str) -> Vec<serde_json::Value> {
    upstream
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == path)
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}
