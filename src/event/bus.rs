use log::trace;

use crate::event::{EditorEvent, EventHandler};

/// Fans editor events out to every subscriber, in subscription order.
///
/// Owned by the editor context, which emits canvas, stroke, tool, state and
/// history notifications here; the app subscribes a queue for texture
/// invalidation and a logger.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<Box<dyn EventHandler>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: Box<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Delivers `event` to every handler before returning
    pub fn emit(&mut self, event: EditorEvent) {
        trace!("Emitting {event:?} to {} handlers", self.handlers.len());
        for handler in &mut self.handlers {
            handler.handle_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::event::EventQueue;

    #[test]
    fn test_every_subscriber_sees_each_event() {
        let mut bus = EventBus::new();
        let first = EventQueue::new();
        let second = EventQueue::new();
        bus.subscribe(Box::new(first.clone()));
        bus.subscribe(Box::new(second.clone()));
        assert_eq!(bus.handler_count(), 2);

        bus.emit(EditorEvent::ColourSampled(Color::RED));
        bus.emit(EditorEvent::ColourSampled(Color::BLUE));

        let expected = vec![
            EditorEvent::ColourSampled(Color::RED),
            EditorEvent::ColourSampled(Color::BLUE),
        ];
        assert_eq!(first.drain(), expected);
        assert_eq!(second.drain(), expected);
    }
}
