// Error taxonomy for playback sessions

use std::fmt;

/// Session error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session request has an unsupported action or shape
    InvalidRequest(String),

    /// A DRM scheme is not supported by this host
    UnsupportedScheme(String),

    /// Content needs network access that the host policy forbids
    InsecurePolicy(String),

    /// Local storage access needs a permission that has not been granted yet.
    /// Assembly is suspended until the host reports a permission result.
    PermissionRequired(String),

    /// Playback fell behind the live window; retried once automatically
    RecoverableLiveWindow,

    /// Playback stopped; the engine stays alive for a manual retry
    FatalPlayback(String),

    /// Invalid phase transition or operation for the current phase
    InvalidState(String),

    /// The playback engine refused an operation
    Engine(String),

    /// Saved state could not be encoded or decoded
    Persistence(String),
}

impl SessionError {
    /// Whether this error abandons the current request.
    /// Only a pending permission keeps the request alive.
    pub fn abandons_request(&self) -> bool {
        !matches!(self, SessionError::PermissionRequired(_))
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            SessionError::UnsupportedScheme(msg) => write!(f, "Unsupported DRM scheme: {}", msg),
            SessionError::InsecurePolicy(msg) => write!(f, "Insecure policy: {}", msg),
            SessionError::PermissionRequired(msg) => write!(f, "Permission required: {}", msg),
            SessionError::RecoverableLiveWindow => write!(f, "Behind live window"),
            SessionError::FatalPlayback(msg) => write!(f, "Playback error: {}", msg),
            SessionError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            SessionError::Engine(msg) => write!(f, "Engine error: {}", msg),
            SessionError::Persistence(msg) => write!(f, "Persistence error: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
