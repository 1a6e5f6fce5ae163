// Default track selection parameters derived from host capabilities

use podium_core::{SelectionOverride, TrackSelectionParameters};

/// Display and output capabilities of the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostProfile {
    /// Physical display size in pixels
    pub display_width: u32,
    pub display_height: u32,
    /// Whether the host may rotate between portrait and landscape
    pub orientation_may_change: bool,
    /// Caption language from the host's accessibility settings
    pub preferred_text_language: Option<String>,
}

impl Default for HostProfile {
    fn default() -> Self {
        Self {
            display_width: 1920,
            display_height: 1080,
            orientation_may_change: true,
            preferred_text_language: None,
        }
    }
}

/// Builder for [`TrackSelectionParameters`]
#[derive(Debug, Clone)]
pub struct ParametersBuilder {
    parameters: TrackSelectionParameters,
}

impl ParametersBuilder {
    pub fn new() -> Self {
        Self {
            parameters: TrackSelectionParameters::default(),
        }
    }

    /// Defaults for a host: viewport matches the display, captions follow
    /// the host language
    pub fn for_host(profile: &HostProfile) -> Self {
        let mut builder = Self::new().viewport(
            profile.display_width,
            profile.display_height,
            profile.orientation_may_change,
        );
        if let Some(language) = &profile.preferred_text_language {
            builder = builder.preferred_text_language(language);
        }
        builder
    }

    /// Start from existing parameters
    pub fn from_parameters(parameters: TrackSelectionParameters) -> Self {
        Self { parameters }
    }

    pub fn viewport(mut self, width: u32, height: u32, orientation_may_change: bool) -> Self {
        self.parameters.viewport_width = width;
        self.parameters.viewport_height = height;
        self.parameters.viewport_orientation_may_change = orientation_may_change;
        self
    }

    pub fn preferred_audio_language(mut self, language: impl Into<String>) -> Self {
        self.parameters.preferred_audio_languages = vec![language.into()];
        self
    }

    pub fn preferred_text_language(mut self, language: impl Into<String>) -> Self {
        self.parameters.preferred_text_languages = vec![language.into()];
        self
    }

    pub fn max_video_size(mut self, width: u32, height: u32) -> Self {
        self.parameters.max_video_width = width;
        self.parameters.max_video_height = height;
        self
    }

    pub fn tunneling(mut self, enabled: bool) -> Self {
        self.parameters.tunneling_enabled = enabled;
        self
    }

    pub fn renderer_disabled(mut self, renderer_index: u32, disabled: bool) -> Self {
        if disabled {
            self.parameters.disabled_renderers.insert(renderer_index, true);
        } else {
            self.parameters.disabled_renderers.remove(&renderer_index);
        }
        self
    }

    pub fn selection_override(mut self, renderer_index: u32, selection: SelectionOverride) -> Self {
        let overrides = self
            .parameters
            .selection_overrides
            .entry(renderer_index)
            .or_default();
        overrides.retain(|o| o.group_index != selection.group_index);
        overrides.push(selection);
        self
    }

    pub fn clear_selection_overrides(mut self, renderer_index: u32) -> Self {
        self.parameters.selection_overrides.remove(&renderer_index);
        self
    }

    pub fn build(self) -> TrackSelectionParameters {
        self.parameters
    }
}

impl Default for ParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_host_profile() {
        let profile = HostProfile {
            display_width: 1080,
            display_height: 2340,
            orientation_may_change: true,
            preferred_text_language: Some("de".into()),
        };
        let params = ParametersBuilder::for_host(&profile).build();
        assert_eq!(params.viewport_width, 1080);
        assert_eq!(params.viewport_height, 2340);
        assert_eq!(params.preferred_text_languages, vec!["de".to_string()]);
        assert!(!params.tunneling_enabled);
    }

    #[test]
    fn test_different_hosts_get_different_defaults() {
        let phone = ParametersBuilder::for_host(&HostProfile {
            display_width: 720,
            display_height: 1280,
            ..HostProfile::default()
        })
        .build();
        let tv = ParametersBuilder::for_host(&HostProfile::default()).build();
        assert_ne!(phone, tv);
    }

    #[test]
    fn test_selection_override_replaces_same_group() {
        let params = ParametersBuilder::new()
            .selection_override(
                1,
                SelectionOverride {
                    group_index: 0,
                    track_indices: vec![0],
                },
            )
            .selection_override(
                1,
                SelectionOverride {
                    group_index: 0,
                    track_indices: vec![2],
                },
            )
            .build();
        assert_eq!(params.selection_overrides[&1].len(), 1);
        assert_eq!(params.selection_overrides[&1][0].track_indices, vec![2]);
    }

    #[test]
    fn test_renderer_disabled_toggle() {
        let params = ParametersBuilder::new()
            .renderer_disabled(2, true)
            .build();
        assert!(params.is_renderer_disabled(2));
        let params = ParametersBuilder::from_parameters(params)
            .renderer_disabled(2, false)
            .build();
        assert!(!params.is_renderer_disabled(2));
    }
}
