//! Input source abstraction
//!
//! Both input sources reduce to the same per-frame [`InputFrame`]. Everything
//! downstream (speed selection, look, jump, crouch, zoom, interaction, pause)
//! reads the frame and never asks which source produced it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actions::{ActionEvent, StructuredInput};
use super::bindings::Action;
use super::polled::PolledInput;

/// Which input source drives the controller. Chosen once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSourceKind {
    /// Polled axes and keys
    #[default]
    Legacy,
    /// Performed/canceled action events from a structured device
    Structured,
}

/// Snapshot of everything the controller reads from input in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputFrame {
    /// x = strafe right, y = forward. Components in [-1, 1].
    pub move_axis: Vec2,
    /// x = turn right, y = look up, in look units (degrees before sensitivity).
    pub look_delta: Vec2,
    pub sprint_held: bool,
    pub jump_pressed: bool,
    pub crouch_pressed: bool,
    pub zoom_pressed: bool,
    pub zoom_released: bool,
    /// Zoom key state after this frame's edges.
    pub zoom_held: bool,
    pub interact_pressed: bool,
    pub pause_pressed: bool,
}

static_assertions::assert_impl_all!(InputFrame: Copy, Send, Sync);

impl InputFrame {
    /// Any lateral move input this frame.
    #[inline]
    pub fn has_move_input(&self) -> bool {
        self.move_axis != Vec2::ZERO
    }
}

/// A source of per-frame input.
pub trait InputSource {
    fn kind(&self) -> InputSourceKind;

    /// Build this frame's snapshot and consume its edges.
    fn next_frame(&mut self) -> InputFrame;

    /// Subscribe the controller to a button action. Returns `true` if a new
    /// subscription was created; binding twice is a no-op.
    ///
    /// Polled sources have no subscriptions and always return `false`.
    fn bind(&mut self, action: Action) -> bool {
        let _ = action;
        false
    }

    /// Remove a subscription. Returns `true` if one existed.
    fn unbind(&mut self, action: Action) -> bool {
        let _ = action;
        false
    }

    /// Number of live subscriptions.
    fn subscription_count(&self) -> usize {
        0
    }

    /// Stop delivering input (teardown).
    fn disable(&mut self) {}
}

/// The input source selected for a controller.
#[derive(Debug, Clone)]
pub enum InputDriver {
    Legacy(PolledInput),
    Structured(StructuredInput),
}

impl InputDriver {
    pub fn new(kind: InputSourceKind, bindings: super::KeyBindings) -> Self {
        match kind {
            InputSourceKind::Legacy => InputDriver::Legacy(PolledInput::new(bindings)),
            InputSourceKind::Structured => InputDriver::Structured(StructuredInput::new()),
        }
    }

    pub fn as_legacy_mut(&mut self) -> Option<&mut PolledInput> {
        match self {
            InputDriver::Legacy(input) => Some(input),
            InputDriver::Structured(_) => None,
        }
    }

    pub fn as_structured_mut(&mut self) -> Option<&mut StructuredInput> {
        match self {
            InputDriver::Structured(input) => Some(input),
            InputDriver::Legacy(_) => None,
        }
    }

    pub fn as_structured(&self) -> Option<&StructuredInput> {
        match self {
            InputDriver::Structured(input) => Some(input),
            InputDriver::Legacy(_) => None,
        }
    }

    /// Forward a structured action event. Ignored by the legacy source.
    pub fn push_action(&mut self, event: ActionEvent) -> bool {
        match self {
            InputDriver::Structured(input) => input.push(event),
            InputDriver::Legacy(_) => false,
        }
    }
}

impl InputSource for InputDriver {
    fn kind(&self) -> InputSourceKind {
        match self {
            InputDriver::Legacy(input) => input.kind(),
            InputDriver::Structured(input) => input.kind(),
        }
    }

    fn next_frame(&mut self) -> InputFrame {
        match self {
            InputDriver::Legacy(input) => input.next_frame(),
            InputDriver::Structured(input) => input.next_frame(),
        }
    }

    fn bind(&mut self, action: Action) -> bool {
        match self {
            InputDriver::Legacy(input) => input.bind(action),
            InputDriver::Structured(input) => input.bind(action),
        }
    }

    fn unbind(&mut self, action: Action) -> bool {
        match self {
            InputDriver::Legacy(input) => input.unbind(action),
            InputDriver::Structured(input) => input.unbind(action),
        }
    }

    fn subscription_count(&self) -> usize {
        match self {
            InputDriver::Legacy(input) => input.subscription_count(),
            InputDriver::Structured(input) => input.subscription_count(),
        }
    }

    fn disable(&mut self) {
        match self {
            InputDriver::Legacy(input) => input.disable(),
            InputDriver::Structured(input) => input.disable(),
        }
    }
}
