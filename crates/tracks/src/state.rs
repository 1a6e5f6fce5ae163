// Track selection policy held across engine lifetimes

use crate::builder::{HostProfile, ParametersBuilder};
use podium_core::{MappedTrackInfo, PlaybackEngine, TrackSelectionParameters, TrackType};

/// Whether a track selection dialog would have anything to adjust:
/// at least one video, audio or text renderer with a track group.
pub fn will_have_content(mapped: Option<&MappedTrackInfo>) -> bool {
    let Some(mapped) = mapped else {
        return false;
    };
    mapped.renderers.iter().any(|renderer| {
        renderer.track_group_count > 0
            && matches!(
                renderer.track_type,
                TrackType::Video | TrackType::Audio | TrackType::Text
            )
    })
}

/// Owns the current track selection parameters
#[derive(Debug, Clone)]
pub struct TrackSelectionState {
    parameters: TrackSelectionParameters,
}

impl TrackSelectionState {
    pub fn new(parameters: TrackSelectionParameters) -> Self {
        Self { parameters }
    }

    /// Fresh state from the host's default policy
    pub fn for_host(profile: &HostProfile) -> Self {
        Self::new(ParametersBuilder::for_host(profile).build())
    }

    pub fn parameters(&self) -> &TrackSelectionParameters {
        &self.parameters
    }

    pub fn set_parameters(&mut self, parameters: TrackSelectionParameters) {
        self.parameters = parameters;
    }

    /// Read the engine's live parameters
    pub fn capture(&self, engine: &dyn PlaybackEngine) -> TrackSelectionParameters {
        engine.get_track_selection_parameters()
    }

    /// Capture the engine's live parameters and keep them
    pub fn update_from(&mut self, engine: &dyn PlaybackEngine) {
        self.parameters = self.capture(engine);
        log::debug!("Captured track selection parameters");
    }

    /// Write the held parameters into the engine
    pub fn apply(&self, engine: &mut dyn PlaybackEngine) {
        engine.set_track_selection_parameters(self.parameters.clone());
    }

    pub fn will_have_content(&self, mapped: Option<&MappedTrackInfo>) -> bool {
        will_have_content(mapped)
    }
}
