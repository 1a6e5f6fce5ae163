// Core types and traits for Podium playback sessions

pub mod ads;
pub mod callback;
pub mod engine;
pub mod error;
pub mod event;
pub mod failure;
pub mod media;
pub mod notice;
pub mod resolver;
pub mod state;
pub mod tracks;

// Re-export commonly used types
pub use ads::{AdLoader, AdLoaderFactory};
pub use callback::{CallbackManager, HostCallback, SessionEffect};
pub use engine::{EngineConfig, EngineFactory, EngineHandleId, PlaybackEngine, PlaybackState};
pub use error::{Result, SessionError};
pub use event::{EngineEvent, EngineListener};
pub use failure::{DecoderInitFailure, ErrorCause, ErrorSourceKind, PlaybackError};
pub use media::{
    AdMarkup, DownloadOverride, DrmConfig, MediaItemSpec, RequestAction, SessionRequest,
    StreamKey, CLEARKEY_UUID, PLAYREADY_UUID, WIDEVINE_UUID,
};
pub use notice::{FatalMessage, Notice};
pub use resolver::MediaResolver;
pub use state::{SessionPhase, SessionState};
pub use tracks::{
    same_track_groups, MappedTrackInfo, RendererSupport, RendererTrackInfo, SelectionOverride,
    TrackGroup, TrackGroupArray, TrackSelectionParameters, TrackType,
};
