// Session controller: owns the engine handle and sequences its lifecycle

use crate::ad_slot::AdLoaderSlot;
use crate::config::ControllerConfig;
use crate::inbox::EngineInbox;
use crate::saved::SavedState;
use podium_assembler::{notice_for, Assembly, MediaItemAssembler};
use podium_core::{
    same_track_groups, AdLoaderFactory, CallbackManager, EngineEvent, EngineFactory,
    EngineHandleId, FatalMessage, HostCallback, MediaResolver, Notice, PlaybackEngine,
    PlaybackError, PlaybackState, RendererSupport, Result, SessionEffect, SessionError,
    SessionPhase, SessionRequest, SessionState, TrackGroupArray, TrackSelectionParameters,
    TrackType,
};
use podium_recovery::{Classification, ClassifierState, ErrorClassifier, RecoveryAction};
use podium_tracks::TrackSelectionState;
use std::sync::Arc;

/// Result of a successful `initialize` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializeOutcome {
    /// A new engine was created and prepared
    Started,
    /// An engine was already live; nothing was done
    AlreadyActive,
    /// The request resolved to no items; no engine was created
    NothingToPlay,
}

struct ActiveEngine {
    id: EngineHandleId,
    handle: Box<dyn PlaybackEngine>,
}

/// Orchestrates one playback session.
///
/// All methods run on the host's sequencing context. Engine events arrive
/// through the [`EngineInbox`] and are applied by
/// [`SessionController::process_engine_events`]; events from an engine that
/// is no longer current are dropped.
pub struct SessionController {
    config: ControllerConfig,
    engine_factory: Box<dyn EngineFactory>,
    resolver: Box<dyn MediaResolver>,
    ad_loader: AdLoaderSlot,
    callbacks: CallbackManager,
    inbox: EngineInbox,

    request: Option<SessionRequest>,
    phase: SessionPhase,
    engine: Option<ActiveEngine>,
    tracks: TrackSelectionState,
    session: SessionState,
    classifier: ErrorClassifier,
    last_error: Option<SessionError>,
    last_track_groups: Option<TrackGroupArray>,
    showing_track_selection: bool,
}

impl SessionController {
    pub fn new(
        config: ControllerConfig,
        engine_factory: Box<dyn EngineFactory>,
        resolver: Box<dyn MediaResolver>,
        ad_loader_factory: Box<dyn AdLoaderFactory>,
    ) -> Self {
        log::info!("SessionController::new ({:?})", config.lifecycle);
        let tracks = TrackSelectionState::for_host(&config.host_profile);
        Self {
            config,
            engine_factory,
            resolver,
            ad_loader: AdLoaderSlot::new(ad_loader_factory),
            callbacks: CallbackManager::new(),
            inbox: EngineInbox::new(),
            request: None,
            phase: SessionPhase::Idle,
            engine: None,
            tracks,
            session: SessionState::fresh(),
            classifier: ErrorClassifier::new(),
            last_error: None,
            last_track_groups: None,
            showing_track_selection: false,
        }
    }

    pub fn add_callback(&self, callback: Arc<dyn HostCallback>) {
        self.callbacks.add_callback(callback);
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn session_state(&self) -> &SessionState {
        &self.session
    }

    pub fn track_selection_parameters(&self) -> &TrackSelectionParameters {
        self.tracks.parameters()
    }

    pub fn classifier_state(&self) -> ClassifierState {
        self.classifier.state()
    }

    /// Most recent engine error verdict, cleared once playback is healthy
    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Id of the live engine handle, if any
    pub fn engine_id(&self) -> Option<EngineHandleId> {
        self.engine.as_ref().map(|active| active.id)
    }

    pub fn inbox(&self) -> &EngineInbox {
        &self.inbox
    }

    pub fn request(&self) -> Option<&SessionRequest> {
        self.request.as_ref()
    }

    /// Set the request played by lifecycle-driven initialization.
    /// Unlike a new request event, this keeps restored state.
    pub fn set_request(&mut self, request: SessionRequest) {
        self.request = Some(request);
    }

    pub(crate) fn dispatch(&self, effect: SessionEffect) {
        self.callbacks.dispatch(effect);
    }

    fn set_phase(&mut self, to: SessionPhase) -> Result<()> {
        self.phase.validate_transition(to)?;
        if self.phase != to {
            log::debug!("Session phase {:?} -> {:?}", self.phase, to);
        }
        self.phase = to;
        Ok(())
    }

    /// Phase change driven by an engine event; never fails the caller
    fn follow_phase(&mut self, to: SessionPhase) {
        if let Err(err) = self.set_phase(to) {
            log::warn!("Ignoring engine-driven transition: {}", err);
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Create, configure and prepare an engine for `request`.
    ///
    /// Does nothing while an engine is live. Assembly failures are reported
    /// to the host before the error is returned; `PermissionRequired` leaves
    /// the session waiting for a permission result.
    pub fn initialize(&mut self, request: &SessionRequest) -> Result<InitializeOutcome> {
        if self.engine.is_some() {
            log::debug!("initialize ignored, engine already live");
            return Ok(InitializeOutcome::AlreadyActive);
        }
        log::info!("initialize called ({} item(s))", request.items.len());

        let assembled =
            MediaItemAssembler::new(self.resolver.as_ref(), &self.config.drm).assemble(request);
        let assembly = match assembled {
            Ok(assembly) => assembly,
            Err(err) => return Err(self.reject(err, request)),
        };

        if !assembly.ads_required {
            self.dispose_ad_loader();
        }

        if assembly.is_empty() {
            log::info!("Nothing to play");
            self.set_phase(SessionPhase::Idle)?;
            self.update_track_selection_availability();
            return Ok(InitializeOutcome::NothingToPlay);
        }

        let engine_config = self.config.engine_config(request.prefer_extension_decoders);
        let handle = match self.engine_factory.create(&engine_config) {
            Ok(handle) => handle,
            Err(err) => {
                log::error!("Engine creation failed: {}", err);
                self.settle_after_failure();
                self.update_track_selection_availability();
                return Err(err);
            }
        };
        let id = EngineHandleId::allocate();
        log::info!("Created {}", id);
        self.engine = Some(ActiveEngine { id, handle });

        if let Err(err) = self.configure_and_prepare(id, &assembly) {
            log::error!("Preparing {} failed: {}", id, err);
            self.abandon_engine();
            self.update_track_selection_availability();
            return Err(err);
        }

        self.update_track_selection_availability();
        Ok(InitializeOutcome::Started)
    }

    fn configure_and_prepare(&mut self, id: EngineHandleId, assembly: &Assembly) -> Result<()> {
        self.set_phase(SessionPhase::Created)?;
        let listener = self.inbox.listener_for(id);
        let auto_play = self.session.auto_play;
        let start = self.session.start_position();

        let active = self
            .engine
            .as_mut()
            .ok_or_else(|| SessionError::InvalidState("engine missing during setup".into()))?;
        let handle = active.handle.as_mut();
        handle.add_event_listener(listener);
        self.tracks.apply(handle);
        handle.set_play_when_ready(auto_play);
        if assembly.ads_required {
            self.ad_loader.bind(id);
        }
        if let Some((window, position_ms)) = start {
            log::info!("Restoring position {} ms in window {}", position_ms, window);
            handle.seek(window, position_ms);
        }
        handle.set_media_items(&assembly.items, start.is_none());
        handle.prepare()?;

        self.last_track_groups = None;
        self.mark_healthy();
        self.set_phase(SessionPhase::Prepared)
    }

    /// Leave a waiting phase after a failed attempt so the host can start
    /// over; `TornDown` and `Idle` already allow a new initialize.
    fn settle_after_failure(&mut self) {
        if self.phase == SessionPhase::AwaitingPermission {
            self.follow_phase(SessionPhase::Idle);
        }
    }

    fn mark_healthy(&mut self) {
        self.classifier.reset();
        self.last_error = None;
    }

    /// Release a handle whose setup failed
    fn abandon_engine(&mut self) {
        if let Some(mut active) = self.engine.take() {
            active.handle.release();
            log::info!("Released {} after failed setup", active.id);
        }
        self.ad_loader.unbind();
        self.phase = SessionPhase::Idle;
    }

    fn reject(&mut self, err: SessionError, request: &SessionRequest) -> SessionError {
        if !err.abandons_request() {
            log::info!("Waiting for storage permission");
            if let Err(phase_err) = self.set_phase(SessionPhase::AwaitingPermission) {
                log::warn!("{}", phase_err);
            }
            self.dispatch(SessionEffect::TrackSelectionAvailability(false));
            self.dispatch(SessionEffect::PermissionRequested);
            return err;
        }

        log::warn!("Request rejected: {}", err);
        self.request = None;
        self.settle_after_failure();
        self.dispatch(SessionEffect::TrackSelectionAvailability(false));
        if let Some(notice) = notice_for(&err, request, &self.config.drm) {
            self.dispatch(SessionEffect::Notify(notice));
        }
        self.dispatch(SessionEffect::Finish);
        err
    }

    /// Capture state from the live engine, then release it.
    /// Safe to call in any phase; a second call does nothing.
    pub fn teardown(&mut self) {
        let Some(mut active) = self.engine.take() else {
            log::debug!("teardown ignored in {:?}", self.phase);
            return;
        };
        log::info!("Tearing down {}", active.id);

        // Live values are gone once the engine is released
        self.tracks.update_from(active.handle.as_ref());
        self.session = capture_session_state(active.handle.as_ref());
        active.handle.release();

        self.ad_loader.unbind();
        self.last_track_groups = None;
        self.showing_track_selection = false;
        self.follow_phase(SessionPhase::TornDown);
    }

    /// Release the ad loader for good. Only for a permanent end of session.
    pub fn dispose_ad_loader(&mut self) {
        if self.ad_loader.release() {
            self.dispatch(SessionEffect::ClearAdOverlay);
        }
    }

    /// Re-prepare after a fatal error
    pub fn retry(&mut self) -> Result<()> {
        if self.phase != SessionPhase::ErrorFatal {
            return Err(SessionError::InvalidState(format!(
                "retry needs a failed session, phase is {:?}",
                self.phase
            )));
        }
        let active = self
            .engine
            .as_mut()
            .ok_or_else(|| SessionError::InvalidState("no engine to retry".into()))?;
        log::info!("Retrying {}", active.id);
        active.handle.prepare()?;
        self.mark_healthy();
        self.set_phase(SessionPhase::Prepared)?;
        self.update_track_selection_availability();
        Ok(())
    }

    /// User play/pause intent
    pub fn set_play_when_ready(&mut self, play_when_ready: bool) {
        match self.engine.as_mut() {
            Some(active) => active.handle.set_play_when_ready(play_when_ready),
            None => self.session.auto_play = play_when_ready,
        }
    }

    /// Start over: forget the position so the next initialize starts fresh
    pub fn clear_start_position(&mut self) {
        self.session.clear();
    }

    /// Forget all per-request state ahead of an unrelated request
    pub(crate) fn discard_session(&mut self) {
        self.teardown();
        self.dispose_ad_loader();
        self.session.clear();
        self.tracks = TrackSelectionState::for_host(&self.config.host_profile);
        self.request = None;
        if self.phase != SessionPhase::Idle {
            self.follow_phase(SessionPhase::Idle);
        }
    }

    // -------------------------------------------------------------------------
    // Saved state
    // -------------------------------------------------------------------------

    /// Snapshot state for the host, reading live values first
    pub fn save_state(&mut self) -> Result<SavedState> {
        if let Some(active) = self.engine.as_ref() {
            self.tracks.update_from(active.handle.as_ref());
            self.session = capture_session_state(active.handle.as_ref());
        }
        SavedState::capture(self.tracks.parameters(), &self.session)
    }

    /// Adopt state saved by an earlier controller.
    ///
    /// Track selection reaches a live engine immediately. The start position
    /// only takes effect on the next initialize; a teardown before then
    /// replaces it with the live engine's position.
    pub fn restore_state(&mut self, saved: &SavedState) -> Result<()> {
        let parameters = saved.parameters()?;
        self.tracks.set_parameters(parameters);
        if let Some(active) = self.engine.as_mut() {
            self.tracks.apply(active.handle.as_mut());
        }
        self.session = saved.session_state();
        log::info!("Restored session state {:?}", self.session);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Track selection
    // -------------------------------------------------------------------------

    fn track_selection_available(&self) -> bool {
        let Some(active) = self.engine.as_ref() else {
            return false;
        };
        self.phase != SessionPhase::ErrorFatal
            && self
                .tracks
                .will_have_content(active.handle.get_mapped_track_info().as_ref())
    }

    fn update_track_selection_availability(&self) {
        self.dispatch(SessionEffect::TrackSelectionAvailability(
            self.track_selection_available(),
        ));
    }

    /// User asked to pick tracks. Returns whether the dialog was opened.
    pub fn request_track_selection(&mut self) -> bool {
        if self.showing_track_selection || !self.track_selection_available() {
            return false;
        }
        self.showing_track_selection = true;
        self.dispatch(SessionEffect::ShowTrackSelectionDialog);
        true
    }

    pub fn track_selection_dismissed(&mut self) {
        self.showing_track_selection = false;
    }

    /// Apply parameters chosen by the user
    pub fn set_track_selection_parameters(&mut self, parameters: TrackSelectionParameters) {
        self.tracks.set_parameters(parameters);
        if let Some(active) = self.engine.as_mut() {
            self.tracks.apply(active.handle.as_mut());
        }
    }

    // -------------------------------------------------------------------------
    // Engine events
    // -------------------------------------------------------------------------

    /// Apply every queued engine event. Returns how many were queued.
    pub fn process_engine_events(&mut self) -> usize {
        if self.inbox.is_empty() {
            return 0;
        }
        let events = self.inbox.drain();
        let count = events.len();
        for (source, event) in events {
            self.handle_engine_event(source, event);
        }
        count
    }

    /// Apply one event from `source`; events from a stale engine are dropped
    pub fn handle_engine_event(&mut self, source: EngineHandleId, event: EngineEvent) {
        if self.engine_id() != Some(source) {
            log::debug!("Dropping {:?} from stale {}", event, source);
            return;
        }

        match event {
            EngineEvent::PlaybackStateChanged(state) => self.on_playback_state_changed(state),
            EngineEvent::IsPlayingChanged(playing) => self.on_is_playing_changed(playing),
            EngineEvent::TracksChanged(groups) => self.on_tracks_changed(groups),
            EngineEvent::PlayerError(error) => self.on_player_error(error),
        }
    }

    fn on_playback_state_changed(&mut self, state: PlaybackState) {
        log::debug!("Playback state {:?}", state);
        if state == PlaybackState::Ready && self.classifier.state() == ClassifierState::Recovering
        {
            self.mark_healthy();
        }
        if state == PlaybackState::Ended {
            self.dispatch(SessionEffect::ShowControls);
        }
        self.update_track_selection_availability();
    }

    fn on_is_playing_changed(&mut self, playing: bool) {
        match self.phase {
            SessionPhase::Prepared | SessionPhase::Playing | SessionPhase::Paused => {
                let to = if playing {
                    SessionPhase::Playing
                } else {
                    SessionPhase::Paused
                };
                self.follow_phase(to);
            }
            phase => log::debug!("Ignoring playing={} in {:?}", playing, phase),
        }
    }

    fn on_tracks_changed(&mut self, groups: TrackGroupArray) {
        self.update_track_selection_availability();

        let unchanged = self
            .last_track_groups
            .as_ref()
            .is_some_and(|last| same_track_groups(last, &groups));
        if unchanged {
            return;
        }

        let mapped = self
            .engine
            .as_ref()
            .and_then(|active| active.handle.get_mapped_track_info());
        if let Some(mapped) = mapped {
            if mapped.type_support(TrackType::Video) == RendererSupport::UnsupportedTracks {
                self.dispatch(SessionEffect::Notify(Notice::UnsupportedVideo));
            }
            if mapped.type_support(TrackType::Audio) == RendererSupport::UnsupportedTracks {
                self.dispatch(SessionEffect::Notify(Notice::UnsupportedAudio));
            }
        }
        self.last_track_groups = Some(groups);
    }

    fn on_player_error(&mut self, error: PlaybackError) {
        let verdict = self.classifier.observe(&error);
        self.last_error = Some(verdict.to_error());
        match verdict {
            Classification::Recover(RecoveryAction::ResetToDefaultPositionAndPrepare) => {
                let Some(active) = self.engine.as_mut() else {
                    return;
                };
                active.handle.seek_to_default_position();
                match active.handle.prepare() {
                    Ok(()) => self.follow_phase(SessionPhase::Prepared),
                    Err(err) => {
                        log::error!("Re-prepare after live window reset failed: {}", err);
                        self.last_error =
                            Some(SessionError::FatalPlayback(FatalMessage::Generic.to_string()));
                        self.fail(FatalMessage::Generic);
                    }
                }
            }
            Classification::Fatal(message) => self.fail(message),
        }
    }

    fn fail(&mut self, message: FatalMessage) {
        self.follow_phase(SessionPhase::ErrorFatal);
        self.update_track_selection_availability();
        self.dispatch(SessionEffect::ShowControls);
        self.dispatch(SessionEffect::PlaybackFailed(message));
    }
}

fn capture_session_state(engine: &dyn PlaybackEngine) -> SessionState {
    SessionState {
        auto_play: engine.get_play_when_ready(),
        window_index: Some(engine.get_current_window_index()),
        position_ms: Some(engine.get_content_position().max(0)),
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.teardown();
        self.ad_loader.release();
    }
}
