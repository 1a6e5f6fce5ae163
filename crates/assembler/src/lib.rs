// Builds the playlist for a session request

pub mod assembler;
pub mod capabilities;

pub use assembler::{apply_download_override, notice_for, Assembly, MediaItemAssembler};
pub use capabilities::DrmCapabilities;
