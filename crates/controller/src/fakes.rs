// Test doubles for the engine, resolver, ad loader and host

use parking_lot::Mutex;
use podium_core::{
    AdLoader, AdLoaderFactory, DownloadOverride, EngineConfig, EngineEvent, EngineFactory,
    EngineHandleId, EngineListener, HostCallback, MappedTrackInfo, MediaItemSpec, MediaResolver,
    Notice, PlaybackEngine, Result, SessionEffect, SessionError, TrackSelectionParameters,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Everything the fake engine was asked to do, plus its scripted answers
#[derive(Default)]
pub struct EngineProbe {
    pub created: usize,
    pub configs: Vec<EngineConfig>,
    pub prepares: usize,
    pub releases: usize,
    pub seeks: Vec<(usize, i64)>,
    pub default_seeks: usize,
    pub media_items: Vec<(Vec<MediaItemSpec>, bool)>,
    pub applied_parameters: Vec<TrackSelectionParameters>,
    pub listeners: Vec<Arc<dyn EngineListener>>,
    /// Ordered log of lifecycle calls
    pub calls: Vec<&'static str>,

    pub play_when_ready: bool,
    pub window_index: usize,
    pub content_position: i64,
    pub live_parameters: Option<TrackSelectionParameters>,
    pub mapped: Option<MappedTrackInfo>,
    pub fail_prepare: bool,
    pub fail_create: bool,
}

pub type SharedProbe = Arc<Mutex<EngineProbe>>;

pub struct FakeEngine {
    probe: SharedProbe,
}

impl PlaybackEngine for FakeEngine {
    fn set_media_items(&mut self, items: &[MediaItemSpec], reset_position: bool) {
        let mut probe = self.probe.lock();
        probe.calls.push("set_media_items");
        probe.media_items.push((items.to_vec(), reset_position));
    }

    fn prepare(&mut self) -> Result<()> {
        let mut probe = self.probe.lock();
        probe.calls.push("prepare");
        probe.prepares += 1;
        if probe.fail_prepare {
            return Err(SessionError::Engine("prepare refused".into()));
        }
        Ok(())
    }

    fn seek(&mut self, window_index: usize, position_ms: i64) {
        let mut probe = self.probe.lock();
        probe.calls.push("seek");
        probe.seeks.push((window_index, position_ms));
    }

    fn seek_to_default_position(&mut self) {
        let mut probe = self.probe.lock();
        probe.calls.push("seek_to_default_position");
        probe.default_seeks += 1;
    }

    fn set_play_when_ready(&mut self, play_when_ready: bool) {
        self.probe.lock().play_when_ready = play_when_ready;
    }

    fn get_play_when_ready(&self) -> bool {
        self.probe.lock().play_when_ready
    }

    fn get_current_window_index(&self) -> usize {
        self.probe.lock().window_index
    }

    fn get_content_position(&self) -> i64 {
        self.probe.lock().content_position
    }

    fn add_event_listener(&mut self, listener: Arc<dyn EngineListener>) {
        self.probe.lock().listeners.push(listener);
    }

    fn get_track_selection_parameters(&self) -> TrackSelectionParameters {
        let probe = self.probe.lock();
        probe
            .live_parameters
            .clone()
            .or_else(|| probe.applied_parameters.last().cloned())
            .unwrap_or_default()
    }

    fn set_track_selection_parameters(&mut self, parameters: TrackSelectionParameters) {
        let mut probe = self.probe.lock();
        probe.calls.push("set_track_selection_parameters");
        probe.applied_parameters.push(parameters);
    }

    fn get_mapped_track_info(&self) -> Option<MappedTrackInfo> {
        self.probe.lock().mapped.clone()
    }

    fn release(&mut self) {
        let mut probe = self.probe.lock();
        probe.calls.push("release");
        probe.releases += 1;
        // A released engine no longer reports its live values
        probe.window_index = 0;
        probe.content_position = 0;
        probe.play_when_ready = false;
        probe.live_parameters = None;
    }
}

pub struct FakeEngineFactory {
    pub probe: SharedProbe,
}

impl FakeEngineFactory {
    pub fn new() -> (Self, SharedProbe) {
        let probe = SharedProbe::default();
        (
            Self {
                probe: probe.clone(),
            },
            probe,
        )
    }
}

impl EngineFactory for FakeEngineFactory {
    fn create(&mut self, config: &EngineConfig) -> Result<Box<dyn PlaybackEngine>> {
        let mut probe = self.probe.lock();
        if probe.fail_create {
            return Err(SessionError::Engine("no decoder resources".into()));
        }
        probe.created += 1;
        probe.configs.push(config.clone());
        probe.calls.push("create");
        Ok(Box::new(FakeEngine {
            probe: self.probe.clone(),
        }))
    }
}

/// Deliver an event the way the engine would, through its last listener
pub fn emit(probe: &SharedProbe, event: EngineEvent) {
    let listener = probe.lock().listeners.last().cloned();
    if let Some(listener) = listener {
        listener.on_engine_event(event);
    }
}

#[derive(Default)]
pub struct ResolverState {
    pub downloads: HashMap<String, DownloadOverride>,
    pub cleartext_denied: Vec<String>,
    pub needs_permission: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeResolver {
    pub state: Arc<Mutex<ResolverState>>,
}

impl MediaResolver for FakeResolver {
    fn lookup_download(&self, content_uri: &str) -> Option<DownloadOverride> {
        self.state.lock().downloads.get(content_uri).cloned()
    }

    fn is_cleartext_permitted(&self, item: &MediaItemSpec) -> bool {
        !self.state.lock().cleartext_denied.contains(&item.content_uri)
    }

    fn needs_storage_permission(&self, item: &MediaItemSpec) -> bool {
        self.state.lock().needs_permission.contains(&item.content_uri)
    }
}

#[derive(Default)]
pub struct AdProbe {
    pub created: usize,
    pub bindings: Vec<Option<EngineHandleId>>,
    pub releases: usize,
}

pub type SharedAdProbe = Arc<Mutex<AdProbe>>;

pub struct CountingAdLoader {
    probe: SharedAdProbe,
}

impl AdLoader for CountingAdLoader {
    fn set_player(&mut self, player: Option<EngineHandleId>) {
        self.probe.lock().bindings.push(player);
    }

    fn release(&mut self) {
        self.probe.lock().releases += 1;
    }
}

pub struct CountingAdLoaderFactory {
    pub probe: SharedAdProbe,
}

impl CountingAdLoaderFactory {
    pub fn new() -> (Self, SharedAdProbe) {
        let probe = SharedAdProbe::default();
        (
            Self {
                probe: probe.clone(),
            },
            probe,
        )
    }
}

impl AdLoaderFactory for CountingAdLoaderFactory {
    fn create(&mut self) -> Box<dyn AdLoader> {
        self.probe.lock().created += 1;
        Box::new(CountingAdLoader {
            probe: self.probe.clone(),
        })
    }
}

/// Records every effect dispatched to the host
#[derive(Default)]
pub struct RecordingCallback {
    effects: Mutex<Vec<SessionEffect>>,
}

impl RecordingCallback {
    pub fn effects(&self) -> Vec<SessionEffect> {
        self.effects.lock().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.effects
            .lock()
            .iter()
            .filter_map(|effect| match effect {
                SessionEffect::Notify(notice) => Some(notice.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &SessionEffect) -> usize {
        self.effects
            .lock()
            .iter()
            .filter(|effect| *effect == wanted)
            .count()
    }

    pub fn clear(&self) {
        self.effects.lock().clear();
    }
}

impl HostCallback for RecordingCallback {
    fn on_effect(&self, effect: SessionEffect) {
        self.effects.lock().push(effect);
    }
}
