use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::event::{EditorEvent, EventHandler};

/// Buffers events so the UI can drain them once per frame.
///
/// Clones share the same queue: subscribe one clone to the bus and keep the
/// other to drain from.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Arc<Mutex<VecDeque<EditorEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every queued event, oldest first
    pub fn drain(&self) -> Vec<EditorEvent> {
        self.events.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventHandler for EventQueue {
    fn handle_event(&mut self, event: &EditorEvent) {
        self.events.lock().push_back(event.clone());
    }
}

/// Logs every event at debug level
#[derive(Debug, Default)]
pub struct EventLogger;

impl EventHandler for EventLogger {
    fn handle_event(&mut self, event: &EditorEvent) {
        log::debug!("Editor event: {event:?}");
    }
}
