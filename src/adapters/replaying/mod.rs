//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_generator;
pub mod markup_generator;

use std::sync::{Arc, Mutex, PoisonError};

use crate::cassette::replayer::CassetteReplayer;
use crate::error::GatewayError;

/// Retrieve the next recorded output for a given port and method and
/// deserialize it as `Result<T, GatewayError>`.
///
/// Recorded `Err` values come back as [`GatewayError::Replay`] carrying the
/// original message.
pub(crate) fn replay_next<T: serde::de::DeserializeOwned>(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<T, GatewayError> {
    let output = {
        let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
        guard.next_interaction(port, method).map_err(GatewayError::Replay)?.output.clone()
    };

    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let msg = err_val.as_str().unwrap_or("replayed error").to_string();
        return Err(GatewayError::Replay(msg));
    }
    let value = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| {
        GatewayError::Replay(format!("Recorded {port}::{method} output is invalid: {e}"))
    })
}
