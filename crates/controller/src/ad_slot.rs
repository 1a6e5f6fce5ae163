// Ad loader kept across engine recreation

use podium_core::{AdLoader, AdLoaderFactory, EngineHandleId};

/// Holds the session's ad loader, created on first use
pub struct AdLoaderSlot {
    factory: Box<dyn AdLoaderFactory>,
    loader: Option<Box<dyn AdLoader>>,
}

impl AdLoaderSlot {
    pub fn new(factory: Box<dyn AdLoaderFactory>) -> Self {
        Self {
            factory,
            loader: None,
        }
    }

    pub fn is_held(&self) -> bool {
        self.loader.is_some()
    }

    /// Bind the loader to an engine, creating it if none is held
    pub fn bind(&mut self, player: EngineHandleId) {
        let factory = &mut self.factory;
        let loader = self.loader.get_or_insert_with(|| {
            log::info!("Creating ad loader");
            factory.create()
        });
        loader.set_player(Some(player));
    }

    /// Detach from the engine but keep the loader for the next one
    pub fn unbind(&mut self) {
        if let Some(loader) = self.loader.as_mut() {
            loader.set_player(None);
        }
    }

    /// Release the loader. Returns whether one was held.
    pub fn release(&mut self) -> bool {
        match self.loader.take() {
            Some(mut loader) => {
                log::info!("Releasing ad loader");
                loader.release();
                true
            }
            None => false,
        }
    }
}
