// Ad-loading resource interface

use crate::engine::EngineHandleId;

/// Loads and schedules ads for the current player.
///
/// One loader outlives engine recreation so an ad pod in progress survives a
/// brief teardown. It is rebound to each new engine and released only when
/// the session ends for good.
pub trait AdLoader: Send {
    /// Bind to an engine, or unbind with `None`
    fn set_player(&mut self, player: Option<EngineHandleId>);

    fn release(&mut self);
}

/// Creates ad loaders on demand
pub trait AdLoaderFactory: Send {
    fn create(&mut self) -> Box<dyn AdLoader>;
}
