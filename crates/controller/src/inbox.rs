// Queue of engine events awaiting the controller's sequencing context

use parking_lot::Mutex;
use podium_core::{EngineEvent, EngineHandleId, EngineListener};
use std::collections::VecDeque;
use std::sync::Arc;

/// Engine events tagged with the handle that produced them
#[derive(Clone, Default)]
pub struct EngineInbox {
    queue: Arc<Mutex<VecDeque<(EngineHandleId, EngineEvent)>>>,
}

impl EngineInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listener to register with the engine identified by `source`
    pub fn listener_for(&self, source: EngineHandleId) -> Arc<dyn EngineListener> {
        Arc::new(InboxListener {
            source,
            inbox: self.clone(),
        })
    }

    pub fn push(&self, source: EngineHandleId, event: EngineEvent) {
        self.queue.lock().push_back((source, event));
    }

    /// Take every queued event, oldest first
    pub fn drain(&self) -> Vec<(EngineHandleId, EngineEvent)> {
        self.queue.lock().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

struct InboxListener {
    source: EngineHandleId,
    inbox: EngineInbox,
}

impl EngineListener for InboxListener {
    fn on_engine_event(&self, event: EngineEvent) {
        self.inbox.push(self.source, event);
    }
}
