// Saved session state: selection blob, auto-play, window and position

use podium_core::{Result, SessionError, SessionState, TrackSelectionParameters};
use serde::{Deserialize, Serialize};

/// Saved window index meaning "no start window"
pub const INDEX_UNSET: i32 = -1;
/// Saved position meaning "no start position"
pub const TIME_UNSET: i64 = i64::MIN + 1;

/// State the host keeps across its own recreation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    /// Encoded track selection parameters, carried verbatim
    pub track_selection_parameters: Vec<u8>,
    pub auto_play: bool,
    pub window: i32,
    pub position: i64,
}

impl SavedState {
    pub fn capture(
        parameters: &TrackSelectionParameters,
        session: &SessionState,
    ) -> Result<Self> {
        let window = match session.window_index {
            Some(index) => i32::try_from(index).unwrap_or_else(|_| {
                log::warn!(
                    "Window index {} does not fit the saved layout, start position dropped",
                    index
                );
                INDEX_UNSET
            }),
            None => INDEX_UNSET,
        };
        Ok(Self {
            track_selection_parameters: podium_tracks::persist(parameters)?,
            auto_play: session.auto_play,
            window,
            position: session.position_ms.unwrap_or(TIME_UNSET),
        })
    }

    pub fn parameters(&self) -> Result<TrackSelectionParameters> {
        podium_tracks::restore(&self.track_selection_parameters)
    }

    pub fn session_state(&self) -> SessionState {
        SessionState {
            auto_play: self.auto_play,
            window_index: usize::try_from(self.window).ok(),
            position_ms: (self.position != TIME_UNSET).then_some(self.position),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| SessionError::Persistence(format!("encode saved state failed: {}", e)))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| SessionError::Persistence(format!("decode saved state failed: {}", e)))
    }
}
