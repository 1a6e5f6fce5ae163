// Track selection policy and the engine's view of available tracks

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Kind of media a renderer handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackType {
    Video,
    Audio,
    Text,
    Metadata,
    Other,
}

/// How well a renderer can play the tracks mapped to it.
/// Ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RendererSupport {
    /// No tracks were mapped to the renderer
    NoTracks,
    /// Tracks exist but none are playable
    UnsupportedTracks,
    /// Tracks are playable only beyond declared capabilities
    ExceedsCapabilities,
    /// At least one track is playable
    Playable,
}

/// Forces a specific selection within one track group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOverride {
    pub group_index: u32,
    pub track_indices: Vec<u32>,
}

/// Snapshot of the track selection policy.
///
/// Produced by the engine, stored between engine lifetimes and written back
/// before the next prepare. Maps are ordered so the persisted form is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSelectionParameters {
    pub preferred_audio_languages: Vec<String>,
    pub preferred_text_languages: Vec<String>,
    pub max_video_width: u32,
    pub max_video_height: u32,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub viewport_orientation_may_change: bool,
    pub tunneling_enabled: bool,
    /// Renderer index -> disabled
    pub disabled_renderers: BTreeMap<u32, bool>,
    /// Renderer index -> overrides for that renderer's groups
    pub selection_overrides: BTreeMap<u32, Vec<SelectionOverride>>,
}

impl Default for TrackSelectionParameters {
    fn default() -> Self {
        Self {
            preferred_audio_languages: Vec::new(),
            preferred_text_languages: Vec::new(),
            max_video_width: u32::MAX,
            max_video_height: u32::MAX,
            viewport_width: u32::MAX,
            viewport_height: u32::MAX,
            viewport_orientation_may_change: true,
            tunneling_enabled: false,
            disabled_renderers: BTreeMap::new(),
            selection_overrides: BTreeMap::new(),
        }
    }
}

impl TrackSelectionParameters {
    pub fn is_renderer_disabled(&self, renderer_index: u32) -> bool {
        self.disabled_renderers
            .get(&renderer_index)
            .copied()
            .unwrap_or(false)
    }
}

/// One group of interchangeable streams, e.g. alternate audio languages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackGroup {
    pub track_type: TrackType,
    pub mime_types: Vec<String>,
}

/// Track groups reported by the engine.
///
/// The engine hands out a new `Arc` whenever the groups change, so identity
/// (`Arc::ptr_eq`) is enough for change detection.
pub type TrackGroupArray = Arc<Vec<TrackGroup>>;

/// Whether two reported group arrays are the same report
pub fn same_track_groups(a: &TrackGroupArray, b: &TrackGroupArray) -> bool {
    Arc::ptr_eq(a, b)
}

/// Tracks mapped to a single renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererTrackInfo {
    pub track_type: TrackType,
    pub track_group_count: usize,
    pub support: RendererSupport,
}

/// Engine mapping of track groups to renderers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MappedTrackInfo {
    pub renderers: Vec<RendererTrackInfo>,
}

impl MappedTrackInfo {
    pub fn new(renderers: Vec<RendererTrackInfo>) -> Self {
        Self { renderers }
    }

    /// Best support level across renderers of the given type
    pub fn type_support(&self, track_type: TrackType) -> RendererSupport {
        self.renderers
            .iter()
            .filter(|r| r.track_type == track_type)
            .map(|r| r.support)
            .max()
            .unwrap_or(RendererSupport::NoTracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(track_type: TrackType, support: RendererSupport) -> RendererTrackInfo {
        RendererTrackInfo {
            track_type,
            track_group_count: 1,
            support,
        }
    }

    #[test]
    fn test_type_support_takes_best_renderer() {
        let info = MappedTrackInfo::new(vec![
            renderer(TrackType::Audio, RendererSupport::UnsupportedTracks),
            renderer(TrackType::Audio, RendererSupport::Playable),
            renderer(TrackType::Video, RendererSupport::UnsupportedTracks),
        ]);
        assert_eq!(info.type_support(TrackType::Audio), RendererSupport::Playable);
        assert_eq!(
            info.type_support(TrackType::Video),
            RendererSupport::UnsupportedTracks
        );
        assert_eq!(info.type_support(TrackType::Text), RendererSupport::NoTracks);
    }

    #[test]
    fn test_track_group_identity() {
        let groups: TrackGroupArray = Arc::new(vec![TrackGroup {
            track_type: TrackType::Video,
            mime_types: vec!["video/avc".into()],
        }]);
        let same = groups.clone();
        let equal_but_new: TrackGroupArray = Arc::new((*groups).clone());
        assert!(same_track_groups(&groups, &same));
        assert!(!same_track_groups(&groups, &equal_but_new));
    }
}
