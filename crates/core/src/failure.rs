// Errors reported asynchronously by the playback engine

use std::fmt;

/// Where in the engine an error originated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSourceKind {
    /// Loading from a media source (network, storage, manifest)
    Source,
    /// A renderer (decoder) failed
    Renderer,
    /// Anything else
    Unexpected,
}

/// Decoder initialization failure reported by a renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderInitFailure {
    /// MIME type of the format the decoder was meant for
    pub mime_type: String,
    /// Name of the decoder that failed to instantiate, if one was identified
    pub decoder_name: Option<String>,
    /// The content required a secure decoder
    pub secure_decoder_required: bool,
    /// Querying the platform for decoders failed
    pub query_failed: bool,
}

/// One link in an error's cause chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCause {
    /// The requested position fell outside a live stream's seekable window
    BehindLiveWindow,
    DecoderInit(DecoderInitFailure),
    Io(String),
    Other(String),
}

/// An error value delivered by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackError {
    pub source_kind: ErrorSourceKind,
    pub message: String,
    /// Outermost cause first
    pub causes: Vec<ErrorCause>,
}

impl PlaybackError {
    pub fn new(source_kind: ErrorSourceKind, message: impl Into<String>) -> Self {
        Self {
            source_kind,
            message: message.into(),
            causes: Vec::new(),
        }
    }

    pub fn source(message: impl Into<String>) -> Self {
        Self::new(ErrorSourceKind::Source, message)
    }

    pub fn renderer(message: impl Into<String>) -> Self {
        Self::new(ErrorSourceKind::Renderer, message)
    }

    pub fn caused_by(mut self, cause: ErrorCause) -> Self {
        self.causes.push(cause);
        self
    }

    /// The immediate cause, if any
    pub fn root_cause(&self) -> Option<&ErrorCause> {
        self.causes.first()
    }
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} error: {}", self.source_kind, self.message)?;
        for cause in &self.causes {
            write!(f, " <- {:?}", cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for PlaybackError {}
