// Host lifecycle events routed onto the session controller

use crate::config::LifecycleMode;
use crate::controller::{InitializeOutcome, SessionController};
use crate::saved::SavedState;
use podium_core::{Notice, Result, SessionEffect, SessionError, SessionPhase, SessionRequest};

/// Answer to a storage permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    Denied,
    /// The prompt went away without an answer (e.g. the host was recreated)
    Dismissed,
}

/// Lifecycle notifications from the host surface
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Start,
    Resume,
    Pause,
    Stop,
    /// The session surface is gone for good
    Destroy,
    /// An unrelated request replaces the current one
    NewRequest(SessionRequest),
    PermissionResult(PermissionOutcome),
    SaveState,
    RestoreState(SavedState),
}

/// What handling a host event produced
#[derive(Debug, Clone, PartialEq)]
pub enum HostOutcome {
    Handled,
    Initialized(InitializeOutcome),
    Saved(SavedState),
}

impl SessionController {
    pub fn handle_host_event(&mut self, event: HostEvent) -> Result<HostOutcome> {
        log::debug!("Host event {:?}", event);
        let lifecycle = self.config().lifecycle;

        match event {
            HostEvent::Start => {
                if lifecycle == LifecycleMode::StartStop {
                    return self.initialize_current();
                }
                Ok(HostOutcome::Handled)
            }
            HostEvent::Resume => {
                // Start-stop hosts may still have lost the engine (e.g. a
                // failed start); resume picks it back up.
                if lifecycle == LifecycleMode::ResumePause || self.engine_id().is_none() {
                    return self.initialize_current();
                }
                Ok(HostOutcome::Handled)
            }
            HostEvent::Pause => {
                if lifecycle == LifecycleMode::ResumePause {
                    self.teardown();
                }
                Ok(HostOutcome::Handled)
            }
            HostEvent::Stop => {
                if lifecycle == LifecycleMode::StartStop {
                    self.teardown();
                }
                Ok(HostOutcome::Handled)
            }
            HostEvent::Destroy => {
                self.teardown();
                self.dispose_ad_loader();
                Ok(HostOutcome::Handled)
            }
            HostEvent::NewRequest(request) => {
                log::info!("New request, discarding session state");
                self.discard_session();
                self.set_request(request);
                Ok(HostOutcome::Handled)
            }
            HostEvent::PermissionResult(outcome) => self.on_permission_result(outcome),
            HostEvent::SaveState => Ok(HostOutcome::Saved(self.save_state()?)),
            HostEvent::RestoreState(saved) => {
                self.restore_state(&saved)?;
                Ok(HostOutcome::Handled)
            }
        }
    }

    fn on_permission_result(&mut self, outcome: PermissionOutcome) -> Result<HostOutcome> {
        if self.phase() != SessionPhase::AwaitingPermission {
            log::warn!("Permission result {:?} with no prompt pending", outcome);
            return Ok(HostOutcome::Handled);
        }

        match outcome {
            PermissionOutcome::Granted => {
                log::info!("Storage permission granted");
                self.initialize_request()
            }
            PermissionOutcome::Denied => {
                log::warn!("Storage permission denied");
                self.abandon_request();
                Ok(HostOutcome::Handled)
            }
            PermissionOutcome::Dismissed => Ok(HostOutcome::Handled),
        }
    }

    fn abandon_request(&mut self) {
        self.dispatch(SessionEffect::Notify(Notice::StoragePermissionDenied));
        self.dispatch(SessionEffect::Finish);
        self.discard_session();
    }

    fn initialize_current(&mut self) -> Result<HostOutcome> {
        if self.phase() == SessionPhase::AwaitingPermission {
            log::debug!("Permission prompt pending, not initializing");
            return Ok(HostOutcome::Handled);
        }
        self.initialize_request()
    }

    fn initialize_request(&mut self) -> Result<HostOutcome> {
        let Some(request) = self.request().cloned() else {
            log::debug!("No request to initialize");
            return Ok(HostOutcome::Initialized(InitializeOutcome::NothingToPlay));
        };
        match self.initialize(&request) {
            Ok(outcome) => Ok(HostOutcome::Initialized(outcome)),
            // The host already has the prompt; the grant comes back as an event
            Err(SessionError::PermissionRequired(_)) => Ok(HostOutcome::Handled),
            Err(err) => Err(err),
        }
    }
}
