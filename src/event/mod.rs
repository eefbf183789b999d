mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::{EditorEvent, HistoryAction};
pub use handlers::{EventLogger, EventQueue};

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &EditorEvent);
}
