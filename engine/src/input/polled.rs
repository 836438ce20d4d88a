//! Polled (legacy) input source
//!
//! Reads held keys as axes and key edges as button presses, the way a
//! per-frame `GetKey`/`GetKeyDown` style input layer does.

use glam::Vec2;

use super::bindings::KeyBindings;
use super::keyboard::{KeyCode, KeyboardState};
use super::mouse_state::LookAccumulator;
use super::source::{InputFrame, InputSource, InputSourceKind};

/// Raw mouse units to look units (degrees before sensitivity).
pub const MOUSE_AXIS_SCALE: f32 = 0.1;

/// Keyboard + mouse polled every frame.
#[derive(Debug, Clone)]
pub struct PolledInput {
    bindings: KeyBindings,
    keys: KeyboardState,
    look: LookAccumulator,
    mouse_scale: f32,
    enabled: bool,
}

impl PolledInput {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            keys: KeyboardState::new(),
            look: LookAccumulator::new(),
            mouse_scale: MOUSE_AXIS_SCALE,
            enabled: true,
        }
    }

    pub fn with_mouse_scale(mut self, scale: f32) -> Self {
        self.mouse_scale = scale;
        self
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if self.enabled {
            self.keys.handle_key(key, pressed);
        }
    }

    /// Raw screen-space mouse motion (`dy` positive = down).
    pub fn handle_mouse_motion(&mut self, dx: f32, dy: f32) {
        if self.enabled {
            self.look.accumulate(dx, dy);
        }
    }

    pub fn set_cursor_captured(&mut self, captured: bool) {
        self.look.set_captured(captured);
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keys
    }
}

impl InputSource for PolledInput {
    fn kind(&self) -> InputSourceKind {
        InputSourceKind::Legacy
    }

    fn next_frame(&mut self) -> InputFrame {
        let b = &self.bindings;
        let k = &self.keys;

        let frame = InputFrame {
            move_axis: Vec2::new(k.axis(b.left, b.right), k.axis(b.backward, b.forward)),
            look_delta: self.look.consume() * self.mouse_scale,
            sprint_held: k.is_held(b.sprint),
            jump_pressed: k.was_pressed(b.jump),
            crouch_pressed: k.was_pressed(b.crouch),
            zoom_pressed: k.was_pressed(b.zoom),
            zoom_released: k.was_released(b.zoom),
            zoom_held: k.is_held(b.zoom),
            interact_pressed: k.was_pressed(b.interact),
            pause_pressed: k.was_pressed(b.pause),
        };

        self.keys.end_frame();
        frame
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.keys.reset();
        self.look.consume();
    }
}
