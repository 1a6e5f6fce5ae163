// Media resolver collaborator interface

use crate::media::{DownloadOverride, MediaItemSpec};

/// Resolves offline downloads and host policy for media items
pub trait MediaResolver {
    /// Completed download for a content URI, if any
    fn lookup_download(&self, content_uri: &str) -> Option<DownloadOverride>;

    /// Whether the host policy allows the network traffic this item needs
    fn is_cleartext_permitted(&self, item: &MediaItemSpec) -> bool;

    /// Whether reading this item needs a storage permission not granted yet
    fn needs_storage_permission(&self, item: &MediaItemSpec) -> bool;
}
