// Playback session controller: host lifecycle in, engine orchestration out

pub mod ad_slot;
pub mod config;
pub mod controller;
pub mod host;
pub mod inbox;
pub mod saved;

#[cfg(test)]
mod fakes;

pub use ad_slot::AdLoaderSlot;
pub use config::{ControllerConfig, LifecycleMode};
pub use controller::{InitializeOutcome, SessionController};
pub use host::{HostEvent, HostOutcome, PermissionOutcome};
pub use inbox::EngineInbox;
pub use saved::{SavedState, INDEX_UNSET, TIME_UNSET};

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Install env_logger once. A logger installed by the host is left alone.
pub fn init_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::builder()
            .is_test(false)
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
        log::info!("logger ready");
    }
}
