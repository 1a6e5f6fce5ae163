// Media item assembly: download substitution and policy checks

use crate::capabilities::DrmCapabilities;
use podium_core::{
    DownloadOverride, MediaItemSpec, MediaResolver, Notice, RequestAction, Result, SessionError,
    SessionRequest,
};

/// Result of assembling a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub items: Vec<MediaItemSpec>,
    /// False when no item carries ad markup; any held ad loader can go
    pub ads_required: bool,
}

impl Assembly {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Substitute an offline download for an item's network source.
///
/// The download's key set id moves into the DRM configuration so playback
/// reuses the offline key. License request headers stay as they were.
pub fn apply_download_override(item: &MediaItemSpec, download: DownloadOverride) -> MediaItemSpec {
    let mut resolved = item.clone();
    resolved.media_id = Some(download.id.clone());
    resolved.content_uri = download.resolved_uri.clone();
    resolved.custom_cache_key = download.cache_key.clone();
    resolved.mime_type = download.mime_type.clone();
    resolved.stream_keys = download.stream_keys.clone();
    if let Some(drm) = resolved.drm.as_mut() {
        drm.key_set_id = download.drm_key_set_id.clone();
    }
    resolved.download_override = Some(download);
    resolved
}

/// User-visible notice for an assembly failure, if it warrants one
pub fn notice_for(
    error: &SessionError,
    request: &SessionRequest,
    drm: &DrmCapabilities,
) -> Option<Notice> {
    match error {
        SessionError::InvalidRequest(_) => {
            Some(Notice::UnexpectedAction(request.action.name().to_string()))
        }
        SessionError::UnsupportedScheme(_) if !drm.drm_available => Some(Notice::DrmUnsupported),
        SessionError::UnsupportedScheme(_) => Some(Notice::DrmUnsupportedScheme),
        SessionError::InsecurePolicy(_) => Some(Notice::CleartextNotPermitted),
        _ => None,
    }
}

/// Builds the ordered playlist for a session request
pub struct MediaItemAssembler<'a> {
    resolver: &'a dyn MediaResolver,
    drm: &'a DrmCapabilities,
}

impl<'a> MediaItemAssembler<'a> {
    pub fn new(resolver: &'a dyn MediaResolver, drm: &'a DrmCapabilities) -> Self {
        Self { resolver, drm }
    }

    pub fn assemble(&self, request: &SessionRequest) -> Result<Assembly> {
        if let RequestAction::Other(action) = &request.action {
            log::warn!("Rejecting request with action {}", action);
            return Err(SessionError::InvalidRequest(format!(
                "unexpected action {}",
                action
            )));
        }

        let items: Vec<MediaItemSpec> = request
            .items
            .iter()
            .map(|item| match self.resolver.lookup_download(&item.content_uri) {
                Some(download) => {
                    log::info!(
                        "Using download {} for {}",
                        download.id,
                        item.content_uri
                    );
                    apply_download_override(item, download)
                }
                None => item.clone(),
            })
            .collect();

        // DRM failures cannot be fixed by granting anything, so check them
        // before any permission prompt is raised.
        for item in &items {
            self.check_drm(item)?;
        }

        for item in &items {
            if !self.resolver.is_cleartext_permitted(item) {
                return Err(SessionError::InsecurePolicy(item.content_uri.clone()));
            }
            if self.resolver.needs_storage_permission(item) {
                log::info!("Storage permission needed for {}", item.content_uri);
                return Err(SessionError::PermissionRequired(item.content_uri.clone()));
            }
        }

        let ads_required = items.iter().any(MediaItemSpec::has_ads);
        log::debug!(
            "Assembled {} item(s), ads required: {}",
            items.len(),
            ads_required
        );
        Ok(Assembly {
            items,
            ads_required,
        })
    }

    fn check_drm(&self, item: &MediaItemSpec) -> Result<()> {
        let Some(drm) = &item.drm else {
            return Ok(());
        };
        if !self.drm.drm_available {
            return Err(SessionError::UnsupportedScheme(format!(
                "DRM unavailable on this host ({})",
                drm.scheme_id
            )));
        }
        if !self.drm.supports(&drm.scheme_id) {
            return Err(SessionError::UnsupportedScheme(drm.scheme_id.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_core::{AdMarkup, DrmConfig, StreamKey, PLAYREADY_UUID, WIDEVINE_UUID};
    use std::cell::Cell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeResolver {
        downloads: HashMap<String, DownloadOverride>,
        cleartext_denied: Vec<String>,
        needs_permission: Vec<String>,
        permission_checks: Cell<usize>,
    }

    impl MediaResolver for FakeResolver {
        fn lookup_download(&self, content_uri: &str) -> Option<DownloadOverride> {
            self.downloads.get(content_uri).cloned()
        }

        fn is_cleartext_permitted(&self, item: &MediaItemSpec) -> bool {
            !self.cleartext_denied.contains(&item.content_uri)
        }

        fn needs_storage_permission(&self, item: &MediaItemSpec) -> bool {
            self.permission_checks.set(self.permission_checks.get() + 1);
            self.needs_permission.contains(&item.content_uri)
        }
    }

    fn download(uri: &str) -> DownloadOverride {
        DownloadOverride {
            id: format!("dl:{}", uri),
            resolved_uri: "file:///downloads/dl-1".into(),
            cache_key: Some("cache-1".into()),
            mime_type: Some("application/dash+xml".into()),
            stream_keys: vec![StreamKey {
                period_index: 0,
                group_index: 1,
                stream_index: 2,
            }],
            drm_key_set_id: Some(vec![7, 7, 7]),
        }
    }

    #[test]
    fn test_empty_request_is_empty_assembly() {
        let resolver = FakeResolver::default();
        let drm = DrmCapabilities::default();
        let assembly = MediaItemAssembler::new(&resolver, &drm)
            .assemble(&SessionRequest::view_list(Vec::new()))
            .unwrap();
        assert!(assembly.is_empty());
        assert!(!assembly.ads_required);
    }

    #[test]
    fn test_unexpected_action_rejected() {
        let resolver = FakeResolver::default();
        let drm = DrmCapabilities::default();
        let request = SessionRequest {
            action: RequestAction::Other("EDIT".into()),
            items: vec![MediaItemSpec::new("https://example.com/a.mpd")],
            prefer_extension_decoders: None,
        };
        let err = MediaItemAssembler::new(&resolver, &drm)
            .assemble(&request)
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidRequest(_)));
        assert_eq!(
            notice_for(&err, &request, &drm),
            Some(Notice::UnexpectedAction("EDIT".into()))
        );
    }

    #[test]
    fn test_download_override_carries_key_set_and_headers() {
        let uri = "https://example.com/tears.mpd";
        let mut resolver = FakeResolver::default();
        resolver.downloads.insert(uri.into(), download(uri));
        let drm = DrmCapabilities::default();
        let item = MediaItemSpec::new(uri).with_drm(
            DrmConfig::new(WIDEVINE_UUID)
                .with_license_uri("https://license.example.com")
                .with_request_header("Authorization", "token")
                .with_request_header("X-Device", "tv"),
        );

        let assembly = MediaItemAssembler::new(&resolver, &drm)
            .assemble(&SessionRequest::view(item.clone()))
            .unwrap();

        let resolved = &assembly.items[0];
        assert_eq!(resolved.content_uri, "file:///downloads/dl-1");
        assert_eq!(resolved.media_id.as_deref(), Some("dl:https://example.com/tears.mpd"));
        assert_eq!(resolved.custom_cache_key.as_deref(), Some("cache-1"));
        assert_eq!(resolved.stream_keys.len(), 1);
        let drm_config = resolved.drm.as_ref().unwrap();
        assert_eq!(drm_config.key_set_id, Some(vec![7, 7, 7]));
        assert_eq!(
            drm_config.request_headers,
            item.drm.as_ref().unwrap().request_headers
        );
        assert_eq!(
            resolved.download_override.as_ref().unwrap().drm_key_set_id,
            drm_config.key_set_id
        );
    }

    #[test]
    fn test_items_without_download_pass_through() {
        let resolver = FakeResolver::default();
        let drm = DrmCapabilities::default();
        let item = MediaItemSpec::new("https://example.com/a.mp4").with_mime_type("video/mp4");
        let assembly = MediaItemAssembler::new(&resolver, &drm)
            .assemble(&SessionRequest::view(item.clone()))
            .unwrap();
        assert_eq!(assembly.items, vec![item]);
    }

    #[test]
    fn test_unsupported_scheme_fails_before_permission_check() {
        let mut resolver = FakeResolver::default();
        resolver.needs_permission.push("file:///sdcard/a.mpd".into());
        let drm = DrmCapabilities::default();
        let request = SessionRequest::view_list(vec![
            MediaItemSpec::new("file:///sdcard/a.mpd"),
            MediaItemSpec::new("https://example.com/b.mpd").with_drm(DrmConfig::new(PLAYREADY_UUID)),
        ]);

        let err = MediaItemAssembler::new(&resolver, &drm)
            .assemble(&request)
            .unwrap_err();

        assert!(matches!(err, SessionError::UnsupportedScheme(_)));
        assert_eq!(resolver.permission_checks.get(), 0);
        assert_eq!(
            notice_for(&err, &request, &drm),
            Some(Notice::DrmUnsupportedScheme)
        );
    }

    #[test]
    fn test_drm_unavailable_notice() {
        let resolver = FakeResolver::default();
        let drm = DrmCapabilities::unavailable();
        let request = SessionRequest::view(
            MediaItemSpec::new("https://example.com/a.mpd").with_drm(DrmConfig::new(WIDEVINE_UUID)),
        );
        let err = MediaItemAssembler::new(&resolver, &drm)
            .assemble(&request)
            .unwrap_err();
        assert_eq!(notice_for(&err, &request, &drm), Some(Notice::DrmUnsupported));
    }

    #[test]
    fn test_cleartext_denied() {
        let mut resolver = FakeResolver::default();
        resolver.cleartext_denied.push("http://example.com/a.mp4".into());
        let drm = DrmCapabilities::default();
        let request = SessionRequest::view(MediaItemSpec::new("http://example.com/a.mp4"));
        let err = MediaItemAssembler::new(&resolver, &drm)
            .assemble(&request)
            .unwrap_err();
        assert!(matches!(err, SessionError::InsecurePolicy(_)));
        assert_eq!(
            notice_for(&err, &request, &drm),
            Some(Notice::CleartextNotPermitted)
        );
    }

    #[test]
    fn test_permission_required_suspends() {
        let mut resolver = FakeResolver::default();
        resolver.needs_permission.push("file:///sdcard/a.mp4".into());
        let drm = DrmCapabilities::default();
        let request = SessionRequest::view(MediaItemSpec::new("file:///sdcard/a.mp4"));
        let err = MediaItemAssembler::new(&resolver, &drm)
            .assemble(&request)
            .unwrap_err();
        assert!(matches!(err, SessionError::PermissionRequired(_)));
        assert!(!err.abandons_request());
        assert_eq!(notice_for(&err, &request, &drm), None);
    }

    #[test]
    fn test_ads_required_flag() {
        let resolver = FakeResolver::default();
        let drm = DrmCapabilities::default();
        let with_ads = SessionRequest::view_list(vec![
            MediaItemSpec::new("https://example.com/a.mp4"),
            MediaItemSpec::new("https://example.com/b.mp4")
                .with_ad_markup(AdMarkup::new("<vmap:VMAP/>")),
        ]);
        let assembler = MediaItemAssembler::new(&resolver, &drm);
        assert!(assembler.assemble(&with_ads).unwrap().ads_required);

        let without_ads =
            SessionRequest::view(MediaItemSpec::new("https://example.com/a.mp4"));
        assert!(!assembler.assemble(&without_ads).unwrap().ads_required);
    }
}
