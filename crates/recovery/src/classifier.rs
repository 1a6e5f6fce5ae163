// Error classifier state machine

use podium_core::{ErrorCause, ErrorSourceKind, FatalMessage, PlaybackError, SessionError};

/// Classifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierState {
    Healthy,
    /// An error arrived and is being classified
    ErrorObserved,
    /// An automatic recovery was issued
    Recovering,
    /// Playback stopped; waiting for a manual retry
    Fatal,
}

/// What the controller should do about a recoverable error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Seek to the default position and prepare again
    ResetToDefaultPositionAndPrepare,
}

/// Classifier verdict for one error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Recover(RecoveryAction),
    Fatal(FatalMessage),
}

impl Classification {
    pub fn to_error(&self) -> SessionError {
        match self {
            Classification::Recover(_) => SessionError::RecoverableLiveWindow,
            Classification::Fatal(message) => SessionError::FatalPlayback(message.to_string()),
        }
    }
}

/// Whether a source error was caused by falling behind the live window
pub fn is_behind_live_window(error: &PlaybackError) -> bool {
    error.source_kind == ErrorSourceKind::Source
        && error
            .causes
            .iter()
            .any(|cause| matches!(cause, ErrorCause::BehindLiveWindow))
}

/// User-facing message for an unrecoverable error
pub fn fatal_message(error: &PlaybackError) -> FatalMessage {
    if error.source_kind != ErrorSourceKind::Renderer {
        return FatalMessage::Generic;
    }

    // Only a decoder initialization failure reported directly by the
    // renderer gets a specific message.
    let Some(ErrorCause::DecoderInit(failure)) = error.root_cause() else {
        return FatalMessage::Generic;
    };

    match &failure.decoder_name {
        Some(name) => FatalMessage::InstantiatingDecoder {
            decoder_name: name.clone(),
        },
        None if failure.query_failed => FatalMessage::QueryingDecoders,
        None if failure.secure_decoder_required => FatalMessage::NoSecureDecoder {
            mime_type: failure.mime_type.clone(),
        },
        None => FatalMessage::NoDecoder {
            mime_type: failure.mime_type.clone(),
        },
    }
}

/// Tracks engine error handling across one session
#[derive(Debug)]
pub struct ErrorClassifier {
    state: ClassifierState,
    recoveries: u64,
}

impl ErrorClassifier {
    pub fn new() -> Self {
        Self {
            state: ClassifierState::Healthy,
            recoveries: 0,
        }
    }

    pub fn state(&self) -> ClassifierState {
        self.state
    }

    /// Number of automatic recoveries issued so far
    pub fn recoveries(&self) -> u64 {
        self.recoveries
    }

    /// Classify one error. Each call yields exactly one verdict; an error
    /// raised by the recovery itself arrives as a new call.
    pub fn observe(&mut self, error: &PlaybackError) -> Classification {
        self.state = ClassifierState::ErrorObserved;
        log::debug!("Classifying {}", error);

        if is_behind_live_window(error) {
            self.state = ClassifierState::Recovering;
            self.recoveries += 1;
            log::info!("Behind live window, resetting to default position");
            return Classification::Recover(RecoveryAction::ResetToDefaultPositionAndPrepare);
        }

        let message = fatal_message(error);
        self.state = ClassifierState::Fatal;
        log::error!("Fatal playback error ({}): {}", message, error);
        Classification::Fatal(message)
    }

    /// Playback is healthy again
    pub fn reset(&mut self) {
        if self.state != ClassifierState::Healthy {
            log::debug!("Error classifier back to healthy from {:?}", self.state);
        }
        self.state = ClassifierState::Healthy;
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
