// User-facing notices and playback failure messages

use std::fmt;

/// Short user-visible notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    UnexpectedAction(String),
    CleartextNotPermitted,
    DrmUnsupported,
    DrmUnsupportedScheme,
    StoragePermissionDenied,
    UnsupportedVideo,
    UnsupportedAudio,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Notice::UnexpectedAction(action) => write!(f, "Unexpected intent action: {}", action),
            Notice::CleartextNotPermitted => write!(f, "Cleartext HTTP traffic not permitted"),
            Notice::DrmUnsupported => write!(f, "Protected content not supported on this device"),
            Notice::DrmUnsupportedScheme => {
                write!(f, "This device does not support the required DRM scheme")
            }
            Notice::StoragePermissionDenied => write!(f, "Permission to access storage was denied"),
            Notice::UnsupportedVideo => write!(
                f,
                "Media includes video tracks, but none are playable by this device"
            ),
            Notice::UnsupportedAudio => write!(
                f,
                "Media includes audio tracks, but none are playable by this device"
            ),
        }
    }
}

/// Message shown when playback stops on an unrecoverable error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FatalMessage {
    QueryingDecoders,
    NoSecureDecoder { mime_type: String },
    NoDecoder { mime_type: String },
    InstantiatingDecoder { decoder_name: String },
    Generic,
}

impl fmt::Display for FatalMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FatalMessage::QueryingDecoders => write!(f, "Unable to query device decoders"),
            FatalMessage::NoSecureDecoder { mime_type } => write!(
                f,
                "This device does not provide a secure decoder for {}",
                mime_type
            ),
            FatalMessage::NoDecoder { mime_type } => {
                write!(f, "This device does not provide a decoder for {}", mime_type)
            }
            FatalMessage::InstantiatingDecoder { decoder_name } => {
                write!(f, "Unable to instantiate decoder {}", decoder_name)
            }
            FatalMessage::Generic => write!(f, "Playback failed"),
        }
    }
}
