// Playable media descriptions and session requests

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Widevine DRM scheme id
pub const WIDEVINE_UUID: &str = "edef8ba9-79d6-4ace-a3c8-27dcd51d21ed";
/// PlayReady DRM scheme id
pub const PLAYREADY_UUID: &str = "9a04f079-9840-4286-ab92-e65be0885f95";
/// ClearKey DRM scheme id
pub const CLEARKEY_UUID: &str = "e2719d58-a985-b3c9-781a-b030af78d30e";

/// DRM configuration for a media item
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DrmConfig {
    pub scheme_id: String,
    pub license_uri: Option<String>,
    pub play_clear_content_without_key: bool,
    pub force_session_for_clear_periods: bool,
    pub request_headers: BTreeMap<String, String>,
    /// Offline key set; when present playback reuses it instead of requesting a license
    pub key_set_id: Option<Vec<u8>>,
}

impl DrmConfig {
    pub fn new(scheme_id: impl Into<String>) -> Self {
        Self {
            scheme_id: scheme_id.into(),
            ..Default::default()
        }
    }

    pub fn with_license_uri(mut self, uri: impl Into<String>) -> Self {
        self.license_uri = Some(uri.into());
        self
    }

    pub fn with_request_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request_headers.insert(name.into(), value.into());
        self
    }
}

/// Selects one stream inside a multi-stream download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamKey {
    pub period_index: u32,
    pub group_index: u32,
    pub stream_index: u32,
}

/// A completed offline download that can stand in for the network source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOverride {
    pub id: String,
    pub resolved_uri: String,
    pub cache_key: Option<String>,
    pub mime_type: Option<String>,
    pub stream_keys: Vec<StreamKey>,
    pub drm_key_set_id: Option<Vec<u8>>,
}

/// Inline ad schedule document (VMAP): break timings and ad source URIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdMarkup {
    pub document: String,
}

impl AdMarkup {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }

    /// Ad tag URI carrying the document inline
    pub fn ad_tag_uri(&self) -> String {
        format!(
            "data:text/xml;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(self.document.as_bytes())
        )
    }
}

/// One playable unit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaItemSpec {
    pub media_id: Option<String>,
    pub content_uri: String,
    pub mime_type: Option<String>,
    pub custom_cache_key: Option<String>,
    pub stream_keys: Vec<StreamKey>,
    pub drm: Option<DrmConfig>,
    pub ad_markup: Option<AdMarkup>,
    pub download_override: Option<DownloadOverride>,
}

impl MediaItemSpec {
    pub fn new(content_uri: impl Into<String>) -> Self {
        Self {
            content_uri: content_uri.into(),
            ..Default::default()
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_drm(mut self, drm: DrmConfig) -> Self {
        self.drm = Some(drm);
        self
    }

    pub fn with_ad_markup(mut self, markup: AdMarkup) -> Self {
        self.ad_markup = Some(markup);
        self
    }

    pub fn has_ads(&self) -> bool {
        self.ad_markup.is_some()
    }
}

/// What the host asked the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestAction {
    /// Play a single item
    View,
    /// Play a list of items
    ViewList,
    /// Anything else; rejected at assembly
    Other(String),
}

impl RequestAction {
    pub fn name(&self) -> &str {
        match self {
            RequestAction::View => "VIEW",
            RequestAction::ViewList => "VIEW_LIST",
            RequestAction::Other(name) => name,
        }
    }
}

/// A host request to start a playback session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub action: RequestAction,
    pub items: Vec<MediaItemSpec>,
    /// Overrides the configured decoder preference for this session
    pub prefer_extension_decoders: Option<bool>,
}

impl SessionRequest {
    pub fn view(item: MediaItemSpec) -> Self {
        Self {
            action: RequestAction::View,
            items: vec![item],
            prefer_extension_decoders: None,
        }
    }

    pub fn view_list(items: Vec<MediaItemSpec>) -> Self {
        Self {
            action: RequestAction::ViewList,
            items,
            prefer_extension_decoders: None,
        }
    }
}
