// Versioned byte encoding for track selection parameters

use podium_core::{Result, SessionError, TrackSelectionParameters};
use serde::{Deserialize, Serialize};

/// Current encoding version
pub const PARAMETERS_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    parameters: &'a TrackSelectionParameters,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    parameters: TrackSelectionParameters,
}

/// Encode parameters for saved state
pub fn persist(parameters: &TrackSelectionParameters) -> Result<Vec<u8>> {
    serde_json::to_vec(&EnvelopeRef {
        version: PARAMETERS_VERSION,
        parameters,
    })
    .map_err(|e| SessionError::Persistence(format!("encode track selection failed: {}", e)))
}

/// Decode parameters written by [`persist`]
pub fn restore(bytes: &[u8]) -> Result<TrackSelectionParameters> {
    let envelope: Envelope = serde_json::from_slice(bytes)
        .map_err(|e| SessionError::Persistence(format!("decode track selection failed: {}", e)))?;
    if envelope.version != PARAMETERS_VERSION {
        return Err(SessionError::Persistence(format!(
            "unsupported track selection version {}",
            envelope.version
        )));
    }
    Ok(envelope.parameters)
}
