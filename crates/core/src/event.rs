// Events delivered by the playback engine

use crate::engine::PlaybackState;
use crate::failure::PlaybackError;
use crate::tracks::TrackGroupArray;

/// Engine event types
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Playback state changed
    PlaybackStateChanged(PlaybackState),

    /// Engine started or stopped actually playing
    IsPlayingChanged(bool),

    /// Available track groups changed
    TracksChanged(TrackGroupArray),

    /// Playback error occurred
    PlayerError(PlaybackError),
}

/// Engine listener trait.
/// Called from the engine's own threads; implementations should only enqueue.
pub trait EngineListener: Send + Sync {
    fn on_engine_event(&self, event: EngineEvent);
}
