//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::adapters::live::gemini::GeminiMarkupGenerator;
use crate::adapters::live::imagen::ImagenGenerator;
use crate::adapters::recording::image_generator::RecordingImageGenerator;
use crate::adapters::recording::markup_generator::RecordingMarkupGenerator;
use crate::adapters::replaying::image_generator::ReplayingImageGenerator;
use crate::adapters::replaying::markup_generator::ReplayingMarkupGenerator;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::{Config, API_KEY_ENV};
use crate::error::StartupError;
use crate::gateway::AdGateway;
use crate::ports::{ImageGenerator, MarkupGenerator};

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Markup generator port.
    pub markup: Box<dyn MarkupGenerator>,
    /// Image generator port.
    pub images: Box<dyn ImageGenerator>,
}

/// Handle to a recording session that is written out at shutdown.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Write the cassette file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = self.recorder.lock().unwrap_or_else(PoisonError::into_inner);
        let written = recorder.write().map(Path::to_path_buf);
        written.map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context calling the configured endpoints.
    ///
    /// A missing API key is not an error here; every upstream call will fail instead.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        let key = config.gemini_key();
        if key.is_none() {
            tracing::warn!(
                env_var = API_KEY_ENV,
                "no Gemini API key configured; generation calls will fail"
            );
        }
        let gateway = &config.gateway;
        Self {
            markup: Box::new(GeminiMarkupGenerator::new(&gateway.text_endpoint, key.clone())),
            images: Box::new(ImagenGenerator::new(&gateway.image_endpoint, key)),
        }
    }

    /// Create a recording context that wraps the live adapters with a recorder.
    #[must_use]
    pub fn recording(config: &Config) -> (Self, RecordingSession) {
        let live = Self::live(config);

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".adgen/cassettes").join(&timestamp).join("gateway.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-gateway"),
            get_commit_hash(),
        )));

        let ctx = Self {
            markup: Box::new(RecordingMarkupGenerator::new(live.markup, Arc::clone(&recorder))),
            images: Box::new(RecordingImageGenerator::new(live.images, Arc::clone(&recorder))),
        };
        (ctx, RecordingSession { recorder })
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, StartupError> {
        let replayer = load_cassette(path)
            .map_err(|e| StartupError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        Ok(Self {
            markup: Box::new(ReplayingMarkupGenerator::new(Arc::clone(&replayer))),
            images: Box::new(ReplayingImageGenerator::new(replayer)),
        })
    }

    /// Build the gateway over this context's ports.
    #[must_use]
    pub fn into_gateway(self, config: &Config) -> AdGateway {
        AdGateway::new(self.markup, self.images, &config.gateway.placeholder_image_url)
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
