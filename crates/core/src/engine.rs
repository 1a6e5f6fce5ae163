// Playback engine collaborator interface

use crate::error::Result;
use crate::event::EngineListener;
use crate::media::MediaItemSpec;
use crate::tracks::{MappedTrackInfo, TrackSelectionParameters};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

static NEXT_HANDLE_ID: Lazy<Mutex<u64>> = Lazy::new(|| Mutex::new(1));

/// Identifies one engine instance for the lifetime of the process.
/// Ids are never reused, so events tagged with an old id are always stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineHandleId(u64);

impl EngineHandleId {
    pub fn allocate() -> Self {
        let mut next = NEXT_HANDLE_ID.lock();
        let id = *next;
        *next += 1;
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EngineHandleId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "engine#{}", self.0)
    }
}

/// Options passed when creating an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub prefer_extension_decoders: bool,
    pub handle_audio_focus: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prefer_extension_decoders: false,
            handle_audio_focus: true,
        }
    }
}

/// Engine playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Buffering,
    Ready,
    Ended,
}

/// Media engine handle.
/// Decoding and loading run inside the engine; results come back as
/// [`crate::EngineEvent`]s through registered listeners.
pub trait PlaybackEngine: Send {
    /// Replace the playlist. `reset_position` discards any pending seek.
    fn set_media_items(&mut self, items: &[MediaItemSpec], reset_position: bool);

    /// Start loading the current playlist
    fn prepare(&mut self) -> Result<()>;

    /// Seek to a position (in milliseconds) within a playlist window
    fn seek(&mut self, window_index: usize, position_ms: i64);

    /// Seek to the default position of the current window
    fn seek_to_default_position(&mut self);

    /// Play/pause intent
    fn set_play_when_ready(&mut self, play_when_ready: bool);

    fn get_play_when_ready(&self) -> bool;

    fn get_current_window_index(&self) -> usize;

    /// Content position in milliseconds (may be negative before the first frame)
    fn get_content_position(&self) -> i64;

    fn add_event_listener(&mut self, listener: Arc<dyn EngineListener>);

    fn get_track_selection_parameters(&self) -> TrackSelectionParameters;

    fn set_track_selection_parameters(&mut self, parameters: TrackSelectionParameters);

    /// Current mapping of track groups to renderers, once tracks are known
    fn get_mapped_track_info(&self) -> Option<MappedTrackInfo>;

    /// Release all resources. The handle must not be used afterwards.
    fn release(&mut self);
}

/// Creates engine handles
pub trait EngineFactory: Send {
    fn create(&mut self, config: &EngineConfig) -> Result<Box<dyn PlaybackEngine>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_ids_are_unique() {
        let a = EngineHandleId::allocate();
        let b = EngineHandleId::allocate();
        assert_ne!(a, b);
        assert!(b.as_u64() > a.as_u64());
    }
}
