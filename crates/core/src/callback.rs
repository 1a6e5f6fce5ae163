// Host-visible side effects and their delivery

use crate::notice::{FatalMessage, Notice};
use parking_lot::Mutex;
use std::sync::Arc;

/// Side effects the host should apply to its UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Show the playback controls
    ShowControls,

    /// Show a short notification
    Notify(Notice),

    /// Playback stopped on an unrecoverable error
    PlaybackFailed(FatalMessage),

    /// Enable or disable track selection entry points
    TrackSelectionAvailability(bool),

    /// Open the track selection dialog
    ShowTrackSelectionDialog,

    /// Ask the user for storage permission
    PermissionRequested,

    /// Remove anything the ad loader drew over the player
    ClearAdOverlay,

    /// The request was abandoned; the host should close the session surface
    Finish,
}

/// Host callback trait
/// Implementations should be lightweight and non-blocking
pub trait HostCallback: Send + Sync {
    fn on_effect(&self, effect: SessionEffect);
}

/// Callback manager for handling multiple host callbacks
pub struct CallbackManager {
    callbacks: Arc<Mutex<Vec<Arc<dyn HostCallback>>>>,
}

impl CallbackManager {
    pub fn new() -> Self {
        Self {
            callbacks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_callback(&self, callback: Arc<dyn HostCallback>) {
        self.callbacks.lock().push(callback);
    }

    pub fn clear_callbacks(&self) {
        self.callbacks.lock().clear();
    }

    pub fn dispatch(&self, effect: SessionEffect) {
        let callbacks = self.callbacks.lock();
        for callback in callbacks.iter() {
            callback.on_effect(effect.clone());
        }
    }
}

impl Default for CallbackManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple callback implementation for testing
#[cfg(test)]
pub struct TestCallback {
    effects: Mutex<Vec<SessionEffect>>,
}

#[cfg(test)]
impl TestCallback {
    pub fn new() -> Self {
        Self {
            effects: Mutex::new(Vec::new()),
        }
    }

    pub fn get_effects(&self) -> Vec<SessionEffect> {
        self.effects.lock().clone()
    }
}

#[cfg(test)]
impl HostCallback for TestCallback {
    fn on_effect(&self, effect: SessionEffect) {
        self.effects.lock().push(effect);
    }
}
