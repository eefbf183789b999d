use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

use crate::event::HistoryAction;

mod router;
pub use router::route_event;

/// Represents which panel an input event occurred in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelKind {
    /// The central drawing canvas
    Central,
    /// The tools side panel
    Tools,
    /// For events not associated with a specific panel (like keyboard shortcuts)
    Global,
}

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    /// The panel in which the event occurred
    pub panel: PanelKind,
}

/// Represents different types of input events that can occur in the application
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Mouse button was pressed
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse button was released
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        /// Buttons that are currently held down
        held_buttons: Vec<PointerButton>,
    },
    /// Ctrl+Z / Ctrl+Shift+Z
    History(HistoryAction),
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    central_panel_rect: Option<Rect>,
    tools_panel_rect: Option<Rect>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the central panel rectangle
    pub fn set_central_panel_rect(&mut self, rect: Rect) {
        self.central_panel_rect = Some(rect);
    }

    /// Update the tools panel rectangle
    pub fn set_tools_panel_rect(&mut self, rect: Rect) {
        self.tools_panel_rect = Some(rect);
    }

    /// Last pointer position seen over the window
    pub fn last_pointer_pos(&self) -> Option<Pos2> {
        self.last_pointer_pos
    }

    /// Determine which panel a position is in
    fn determine_panel(&self, pos: Pos2) -> PanelKind {
        if self.central_panel_rect.is_some_and(|rect| rect.contains(pos)) {
            return PanelKind::Central;
        }
        if self.tools_panel_rect.is_some_and(|rect| rect.contains(pos)) {
            return PanelKind::Tools;
        }
        PanelKind::Global
    }

    /// Creates an InputLocation from a position
    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: pos,
            panel: self.determine_panel(pos),
        }
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();
        // a focused text field owns Ctrl+Z
        let text_focused = ctx.wants_keyboard_input();

        ctx.input(|input| {
            if let Some(action) = history_shortcut(input.modifiers, input.key_pressed(Key::Z), text_focused) {
                events.push(InputEvent::History(action));
            }

            if let Some(pos) = input.pointer.hover_pos() {
                if Some(pos) != self.last_pointer_pos {
                    let held_buttons = [PointerButton::Primary, PointerButton::Secondary, PointerButton::Middle]
                        .into_iter()
                        .filter(|button| input.pointer.button_down(*button))
                        .collect();
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                        held_buttons,
                    });
                }
                self.last_pointer_pos = Some(pos);
            }

            for button in [PointerButton::Primary, PointerButton::Secondary, PointerButton::Middle] {
                if input.pointer.button_pressed(button) {
                    if let Some(pos) = input.pointer.hover_pos() {
                        events.push(InputEvent::PointerDown {
                            location: self.make_location(pos),
                            button,
                        });
                    }
                }
                // releasing outside the window still ends the stroke
                if input.pointer.button_released(button) {
                    if let Some(pos) = input.pointer.hover_pos().or(self.last_pointer_pos) {
                        events.push(InputEvent::PointerUp {
                            location: self.make_location(pos),
                            button,
                        });
                    }
                }
            }
        });

        events
    }
}

/// Ctrl+Z undoes, Ctrl+Shift+Z redoes, unless a text field has focus
fn history_shortcut(modifiers: Modifiers, z_pressed: bool, text_focused: bool) -> Option<HistoryAction> {
    if text_focused || !z_pressed || !modifiers.command {
        return None;
    }
    Some(if modifiers.shift {
        HistoryAction::Redo
    } else {
        HistoryAction::Undo
    })
}
