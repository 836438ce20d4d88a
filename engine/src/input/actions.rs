//! Structured input source
//!
//! A structured device delivers discrete `Performed`/`Canceled` events per
//! logical [`Action`]. Value actions (move, look, sprint, zoom) latch their
//! value until canceled. Button actions only reach the controller while it
//! holds a subscription for them.
//!
//! Subscriptions are a set keyed by action: one persistent handler per action,
//! bound once at activation, so binding twice can never stack duplicate
//! handlers and unbinding always removes the handler that was bound.

use std::collections::HashSet;

use glam::Vec2;

use super::bindings::Action;
use super::source::{InputFrame, InputSource, InputSourceKind};

/// Event delivered by a structured input device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionEvent {
    /// Action performed with its current value (zero for buttons)
    Performed(Action, Vec2),
    /// Action released / value returned to rest
    Canceled(Action),
}

impl ActionEvent {
    /// Button-style performed event.
    pub fn performed(action: Action) -> Self {
        ActionEvent::Performed(action, Vec2::ZERO)
    }

    /// Value-style performed event.
    pub fn value(action: Action, value: Vec2) -> Self {
        ActionEvent::Performed(action, value)
    }

    pub fn action(&self) -> Action {
        match *self {
            ActionEvent::Performed(action, _) | ActionEvent::Canceled(action) => action,
        }
    }
}

/// Event-driven input with idempotent subscriptions.
#[derive(Debug, Clone)]
pub struct StructuredInput {
    enabled: bool,
    subscriptions: HashSet<Action>,

    move_value: Vec2,
    look_value: Vec2,
    sprint_held: bool,
    zoom_held: bool,

    // Edges since the last frame
    zoom_pressed: bool,
    zoom_released: bool,
    buttons: HashSet<Action>,
}

impl Default for StructuredInput {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuredInput {
    pub fn new() -> Self {
        Self {
            enabled: true,
            subscriptions: HashSet::new(),
            move_value: Vec2::ZERO,
            look_value: Vec2::ZERO,
            sprint_held: false,
            zoom_held: false,
            zoom_pressed: false,
            zoom_released: false,
            buttons: HashSet::new(),
        }
    }

    /// Deliver an event. Returns `false` if the event was dropped (device
    /// disabled, or a button action with no subscription).
    pub fn push(&mut self, event: ActionEvent) -> bool {
        if !self.enabled {
            return false;
        }

        match event {
            ActionEvent::Performed(Action::Move, value) => {
                self.move_value = value.normalize_or_zero();
            }
            ActionEvent::Canceled(Action::Move) => self.move_value = Vec2::ZERO,

            ActionEvent::Performed(Action::Look, value) => self.look_value = value,
            ActionEvent::Canceled(Action::Look) => self.look_value = Vec2::ZERO,

            ActionEvent::Performed(Action::Sprint, _) => self.sprint_held = true,
            ActionEvent::Canceled(Action::Sprint) => self.sprint_held = false,

            ActionEvent::Performed(Action::Zoom, _) => {
                if !self.zoom_held {
                    self.zoom_held = true;
                    self.zoom_pressed = true;
                }
            }
            ActionEvent::Canceled(Action::Zoom) => {
                if self.zoom_held {
                    self.zoom_held = false;
                    self.zoom_released = true;
                }
            }

            ActionEvent::Performed(action, _) => {
                if !self.subscriptions.contains(&action) {
                    return false;
                }
                self.buttons.insert(action);
            }
            // Buttons fire on performed only
            ActionEvent::Canceled(_) => {}
        }
        true
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Drop all latched values and pending edges and stop accepting events.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.move_value = Vec2::ZERO;
        self.look_value = Vec2::ZERO;
        self.sprint_held = false;
        self.zoom_held = false;
        self.zoom_pressed = false;
        self.zoom_released = false;
        self.buttons.clear();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_bound(&self, action: Action) -> bool {
        self.subscriptions.contains(&action)
    }
}

impl InputSource for StructuredInput {
    fn kind(&self) -> InputSourceKind {
        InputSourceKind::Structured
    }

    fn next_frame(&mut self) -> InputFrame {
        let frame = InputFrame {
            move_axis: self.move_value,
            look_delta: self.look_value,
            sprint_held: self.sprint_held,
            jump_pressed: self.buttons.contains(&Action::Jump),
            crouch_pressed: self.buttons.contains(&Action::Crouch),
            zoom_pressed: self.zoom_pressed,
            zoom_released: self.zoom_released,
            zoom_held: self.zoom_held,
            interact_pressed: self.buttons.contains(&Action::Interact),
            pause_pressed: self.buttons.contains(&Action::Pause),
        };

        self.zoom_pressed = false;
        self.zoom_released = false;
        self.buttons.clear();
        frame
    }

    fn bind(&mut self, action: Action) -> bool {
        if !action.is_button() {
            return false;
        }
        self.subscriptions.insert(action)
    }

    fn unbind(&mut self, action: Action) -> bool {
        self.buttons.remove(&action);
        self.subscriptions.remove(&action)
    }

    fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    fn disable(&mut self) {
        StructuredInput::disable(self);
    }
}
