// Session phases and restorable playback position

use crate::error::{Result, SessionError};

/// Session controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No engine and no pending request
    Idle,
    /// Assembly suspended until the host reports a permission result
    AwaitingPermission,
    /// Engine handle exists, not prepared yet
    Created,
    /// Engine prepared with the playlist
    Prepared,
    Playing,
    Paused,
    /// Playback stopped on an unrecoverable error; engine kept for retry
    ErrorFatal,
    /// Engine released; state captured for the next initialize
    TornDown,
}

impl SessionPhase {
    pub fn validate_transition(self, to: SessionPhase) -> Result<()> {
        if self == to {
            return Ok(());
        }

        match (self, to) {
            // From Idle
            (SessionPhase::Idle, SessionPhase::AwaitingPermission) => Ok(()),
            (SessionPhase::Idle, SessionPhase::Created) => Ok(()),

            // From AwaitingPermission
            (SessionPhase::AwaitingPermission, SessionPhase::Created) => Ok(()),
            (SessionPhase::AwaitingPermission, SessionPhase::Idle) => Ok(()),

            // From Created
            (SessionPhase::Created, SessionPhase::Prepared) => Ok(()),
            (SessionPhase::Created, SessionPhase::Idle) => Ok(()), // Prepare failed

            // From Prepared
            (SessionPhase::Prepared, SessionPhase::Playing) => Ok(()),
            (SessionPhase::Prepared, SessionPhase::Paused) => Ok(()),
            (SessionPhase::Prepared, SessionPhase::ErrorFatal) => Ok(()),
            (SessionPhase::Prepared, SessionPhase::TornDown) => Ok(()),

            // From Playing
            (SessionPhase::Playing, SessionPhase::Paused) => Ok(()),
            (SessionPhase::Playing, SessionPhase::Prepared) => Ok(()), // Live window reset
            (SessionPhase::Playing, SessionPhase::ErrorFatal) => Ok(()),
            (SessionPhase::Playing, SessionPhase::TornDown) => Ok(()),

            // From Paused
            (SessionPhase::Paused, SessionPhase::Playing) => Ok(()),
            (SessionPhase::Paused, SessionPhase::Prepared) => Ok(()),
            (SessionPhase::Paused, SessionPhase::ErrorFatal) => Ok(()),
            (SessionPhase::Paused, SessionPhase::TornDown) => Ok(()),

            // From ErrorFatal
            (SessionPhase::ErrorFatal, SessionPhase::Prepared) => Ok(()),
            (SessionPhase::ErrorFatal, SessionPhase::TornDown) => Ok(()),

            // From TornDown
            (SessionPhase::TornDown, SessionPhase::Created) => Ok(()),
            (SessionPhase::TornDown, SessionPhase::AwaitingPermission) => Ok(()),
            (SessionPhase::TornDown, SessionPhase::Idle) => Ok(()),

            // Invalid transitions
            _ => Err(SessionError::InvalidState(format!(
                "Invalid phase transition from {:?} to {:?}",
                self, to
            ))),
        }
    }
}

/// Playback position and auto-play intent that survive engine recreation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub auto_play: bool,
    pub window_index: Option<usize>,
    pub position_ms: Option<i64>,
}

impl SessionState {
    /// State for a fresh session: auto-play, no start position
    pub fn fresh() -> Self {
        Self {
            auto_play: true,
            window_index: None,
            position_ms: None,
        }
    }

    /// Start position to seek to before prepare, if one was captured
    pub fn start_position(&self) -> Option<(usize, i64)> {
        self.window_index
            .map(|window| (window, self.position_ms.unwrap_or(0)))
    }

    pub fn clear(&mut self) {
        *self = Self::fresh();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::fresh()
    }
}
