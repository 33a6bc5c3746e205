//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "MY_APP_GEMINI_API_KEY";

/// Secondary environment variable for the API key.
pub const API_KEY_FALLBACK_ENV: &str = "GEMINI_API_KEY";

/// Default text generation endpoint.
pub const DEFAULT_TEXT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Default image generation endpoint.
pub const DEFAULT_IMAGE_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/imagen-3.0-generate-002:predict";

/// Default stand-in image used when on-demand generation fails.
pub const DEFAULT_PLACEHOLDER_IMAGE_URL: &str =
    "https://placehold.co/600x400/png?text=Image+unavailable";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream endpoints and fallbacks.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Gemini API key.
    pub gemini: Option<SecretString>,
}

/// HTTP server settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Maximum accepted request body size.
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 3000, body_limit_bytes: 50 * 1024 * 1024 }
    }
}

/// Upstream endpoints and fallbacks.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Text generation (`generateContent`) endpoint, without the key.
    pub text_endpoint: String,
    /// Image generation (`predict`) endpoint, without the key.
    pub image_endpoint: String,
    /// Image URL substituted when a generate-mode image fails.
    pub placeholder_image_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            text_endpoint: DEFAULT_TEXT_ENDPOINT.to_string(),
            image_endpoint: DEFAULT_IMAGE_ENDPOINT.to_string(),
            placeholder_image_url: DEFAULT_PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the Gemini API key, preferring environment variables.
    ///
    /// Blank values from either source count as unset.
    #[must_use]
    pub fn gemini_key(&self) -> Option<SecretString> {
        [API_KEY_ENV, API_KEY_FALLBACK_ENV]
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
            .map(SecretString::from)
            .or_else(|| {
                self.keys
                    .gemini
                    .clone()
                    .filter(|k| !k.expose_secret().trim().is_empty())
            })
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `ADGEN_CONFIG` environment variable
/// 3. `./adgen.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("ADGEN_CONFIG") {
        return PathBuf::from(p);
    }

    PathBuf::from("adgen.toml")
}
