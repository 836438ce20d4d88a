//! Keyboard Input Module
//!
//! Generic key codes and per-frame key edge tracking, independent of the
//! windowing system. Mouse buttons share the key namespace so any action
//! (zoom on right mouse, for instance) can be bound to them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Generic key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Letter keys (action bindings)
    C,
    E,
    F,
    Q,
    R,
    V,

    // Function keys
    F1,
    F2,
    F3,
    F4,

    // Control keys
    Escape,
    Enter,
    Tab,

    // Mouse buttons
    MouseLeft,
    MouseRight,
    MouseMiddle,

    /// Catch-all for unhandled keys
    Unknown,
}

impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as Winit;
        match key {
            Winit::KeyW => KeyCode::W,
            Winit::KeyA => KeyCode::A,
            Winit::KeyS => KeyCode::S,
            Winit::KeyD => KeyCode::D,
            Winit::Space => KeyCode::Space,
            Winit::ShiftLeft => KeyCode::ShiftLeft,
            Winit::ShiftRight => KeyCode::ShiftRight,
            Winit::ControlLeft => KeyCode::ControlLeft,
            Winit::ControlRight => KeyCode::ControlRight,
            Winit::ArrowUp => KeyCode::ArrowUp,
            Winit::ArrowDown => KeyCode::ArrowDown,
            Winit::ArrowLeft => KeyCode::ArrowLeft,
            Winit::ArrowRight => KeyCode::ArrowRight,
            Winit::KeyC => KeyCode::C,
            Winit::KeyE => KeyCode::E,
            Winit::KeyF => KeyCode::F,
            Winit::KeyQ => KeyCode::Q,
            Winit::KeyR => KeyCode::R,
            Winit::KeyV => KeyCode::V,
            Winit::F1 => KeyCode::F1,
            Winit::F2 => KeyCode::F2,
            Winit::F3 => KeyCode::F3,
            Winit::F4 => KeyCode::F4,
            Winit::Escape => KeyCode::Escape,
            Winit::Enter => KeyCode::Enter,
            Winit::Tab => KeyCode::Tab,
            _ => KeyCode::Unknown,
        }
    }
}

impl From<winit::event::MouseButton> for KeyCode {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => KeyCode::MouseLeft,
            winit::event::MouseButton::Right => KeyCode::MouseRight,
            winit::event::MouseButton::Middle => KeyCode::MouseMiddle,
            _ => KeyCode::Unknown,
        }
    }
}

/// Held keys plus the press/release edges seen since the last `end_frame`.
///
/// Repeated press events for a key that is already held do not produce a
/// second edge, so OS key repeat cannot retrigger toggles.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
    released: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::Unknown {
            return;
        }
        if pressed {
            if self.held.insert(key) {
                self.pressed.insert(key);
            }
        } else if self.held.remove(&key) {
            self.released.insert(key);
        }
    }

    #[inline]
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Key went down since the last `end_frame`.
    #[inline]
    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Key went up since the last `end_frame`.
    #[inline]
    pub fn was_released(&self, key: KeyCode) -> bool {
        self.released.contains(&key)
    }

    /// -1, 0 or 1 from a negative/positive key pair.
    pub fn axis(&self, negative: KeyCode, positive: KeyCode) -> f32 {
        let mut value = 0.0;
        if self.is_held(positive) {
            value += 1.0;
        }
        if self.is_held(negative) {
            value -= 1.0;
        }
        value
    }

    /// Clear edges. Call once per frame after the edges were consumed.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    /// Release everything (focus loss).
    pub fn reset(&mut self) {
        self.held.clear();
        self.pressed.clear();
        self.released.clear();
    }
}
