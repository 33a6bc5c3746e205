//! Records interactions into a cassette file.

use std::path::{Path, PathBuf};

use chrono::Utc;

use super::format::{Cassette, Interaction};

/// Accumulates a cassette in memory while the server runs.
///
/// `recorded_at` is the moment recording started; `seq` is the position of
/// the interaction across all ports.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Start a recording destined for `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        let cassette = Cassette {
            name: name.into(),
            recorded_at: Utc::now(),
            commit: commit.into(),
            interactions: Vec::new(),
        };
        Self { path: path.into(), cassette }
    }

    /// Append one port call.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.cassette.interactions.len() as u64;
        self.cassette.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cassette.interactions.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cassette.interactions.is_empty()
    }

    /// Serialize the cassette to its path, creating parent directories.
    ///
    /// Can be called repeatedly; each call rewrites the whole file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self) -> Result<&Path, std::io::Error> {
        let yaml = serde_yaml::to_string(&self.cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::cassette::config::load_cassette;

    #[test]
    fn written_cassette_replays_in_port_order() {
        let dir = std::env::temp_dir().join(format!("adgen_recorder_{}", std::process::id()));
        let path = dir.join("nested").join("gateway.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "session", "deadbeef");
        assert!(recorder.is_empty());
        recorder.record(
            "image_generator",
            "generate",
            json!({"prompt": "a cat"}),
            json!({"Err": "quota"}),
        );
        recorder.record(
            "markup_generator",
            "generate",
            json!({"parts": []}),
            json!({"Ok": "<html></html>"}),
        );
        assert_eq!(recorder.len(), 2);

        assert_eq!(recorder.write().unwrap(), path.as_path());
        assert!(std::fs::read_to_string(&path).unwrap().contains("a cat"));

        let mut replayer = load_cassette(&path).unwrap();
        assert_eq!(replayer.next_interaction("markup_generator", "generate").unwrap().seq, 1);
        assert_eq!(replayer.next_interaction("image_generator", "generate").unwrap().seq, 0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn rewrite_includes_later_interactions() {
        let dir =
            std::env::temp_dir().join(format!("adgen_recorder_rewrite_{}", std::process::id()));
        let path = dir.join("gateway.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "session", "deadbeef");
        recorder.write().unwrap();
        recorder.record("markup_generator", "generate", json!({}), json!({"Ok": "<p/>"}));
        recorder.write().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let cassette: Cassette = serde_yaml::from_str(&content).unwrap();
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.commit, "deadbeef");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
