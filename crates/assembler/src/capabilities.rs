// DRM capability profile of the host

use podium_core::{CLEARKEY_UUID, WIDEVINE_UUID};

/// Which DRM schemes the host can play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrmCapabilities {
    /// False on hosts without any DRM support
    pub drm_available: bool,
    pub supported_schemes: Vec<String>,
}

impl DrmCapabilities {
    pub fn new(supported_schemes: Vec<String>) -> Self {
        Self {
            drm_available: true,
            supported_schemes,
        }
    }

    /// A host with no DRM support at all
    pub fn unavailable() -> Self {
        Self {
            drm_available: false,
            supported_schemes: Vec::new(),
        }
    }

    pub fn supports(&self, scheme_id: &str) -> bool {
        self.drm_available
            && self
                .supported_schemes
                .iter()
                .any(|s| s.eq_ignore_ascii_case(scheme_id))
    }
}

impl Default for DrmCapabilities {
    fn default() -> Self {
        Self::new(vec![WIDEVINE_UUID.to_string(), CLEARKEY_UUID.to_string()])
    }
}
