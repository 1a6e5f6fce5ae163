// Controller configuration

use podium_assembler::DrmCapabilities;
use podium_core::EngineConfig;
use podium_tracks::HostProfile;

/// Which host callbacks create and release the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleMode {
    /// Initialize on start, tear down on stop. Hosts that stay visible
    /// while paused (multi-window) use this.
    StartStop,
    /// Initialize on resume, tear down on pause
    ResumePause,
}

/// Session controller configuration
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub lifecycle: LifecycleMode,
    pub host_profile: HostProfile,
    pub drm: DrmCapabilities,
    pub prefer_extension_decoders: bool,
    pub handle_audio_focus: bool,
}

impl ControllerConfig {
    pub fn with_lifecycle(mut self, lifecycle: LifecycleMode) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn with_host_profile(mut self, host_profile: HostProfile) -> Self {
        self.host_profile = host_profile;
        self
    }

    pub fn with_drm(mut self, drm: DrmCapabilities) -> Self {
        self.drm = drm;
        self
    }

    pub fn with_prefer_extension_decoders(mut self, prefer: bool) -> Self {
        self.prefer_extension_decoders = prefer;
        self
    }

    /// Engine options, with a per-request decoder preference taking priority
    pub fn engine_config(&self, prefer_extension_decoders: Option<bool>) -> EngineConfig {
        EngineConfig {
            prefer_extension_decoders: prefer_extension_decoders
                .unwrap_or(self.prefer_extension_decoders),
            handle_audio_focus: self.handle_audio_focus,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            lifecycle: LifecycleMode::StartStop,
            host_profile: HostProfile::default(),
            drm: DrmCapabilities::default(),
            prefer_extension_decoders: false,
            handle_audio_focus: true,
        }
    }
}
