//! Input Bindings Module
//!
//! Logical actions shared by both input sources, and the key layout used by
//! the polled (legacy) source.

use serde::{Deserialize, Serialize};

use super::KeyCode;

/// Logical input actions, independent of their physical mapping.
///
/// The structured device delivers these as performed/canceled events; the
/// polled source derives them from [`KeyBindings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// 2D move vector (value action)
    Move,
    /// 2D look delta (value action)
    Look,
    /// Sprint modifier (value action, held)
    Sprint,
    /// Zoom (value action, held; edges drive the zoom animation)
    Zoom,
    /// Jump (button)
    Jump,
    /// Crouch / stand toggle (button)
    Crouch,
    /// Interact with the detected target (button)
    Interact,
    /// Pause toggle (button)
    Pause,
}

impl Action {
    /// Button actions only reach the controller through a subscription.
    pub fn is_button(&self) -> bool {
        matches!(self, Action::Jump | Action::Crouch | Action::Interact | Action::Pause)
    }
}

/// Physical key layout for the polled input source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub sprint: KeyCode,
    pub jump: KeyCode,
    pub crouch: KeyCode,
    pub zoom: KeyCode,
    pub interact: KeyCode,
    pub pause: KeyCode,
    /// Developer movement kill switch, polled raw regardless of input source
    pub debug_toggle: KeyCode,
}

impl Default for KeyBindings {
    /// Default bindings:
    /// - W/S/A/D = move
    /// - Shift (Left) = Sprint
    /// - Space = Jump
    /// - C = Crouch
    /// - Right mouse = Zoom
    /// - E = Interact
    /// - Escape = Pause
    /// - F1 = debug movement toggle
    fn default() -> Self {
        Self {
            forward: KeyCode::W,
            backward: KeyCode::S,
            left: KeyCode::A,
            right: KeyCode::D,
            sprint: KeyCode::ShiftLeft,
            jump: KeyCode::Space,
            crouch: KeyCode::C,
            zoom: KeyCode::MouseRight,
            interact: KeyCode::E,
            pause: KeyCode::Escape,
            debug_toggle: KeyCode::F1,
        }
    }
}

impl KeyBindings {
    /// Key bound to a held/button action. Move and Look are axis actions and
    /// have no single key.
    pub fn key_for(&self, action: Action) -> Option<KeyCode> {
        match action {
            Action::Move | Action::Look => None,
            Action::Sprint => Some(self.sprint),
            Action::Zoom => Some(self.zoom),
            Action::Jump => Some(self.jump),
            Action::Crouch => Some(self.crouch),
            Action::Interact => Some(self.interact),
            Action::Pause => Some(self.pause),
        }
    }

    /// Check whether any two actions share a key.
    pub fn has_conflicts(&self) -> bool {
        let keys = [
            self.forward,
            self.backward,
            self.left,
            self.right,
            self.sprint,
            self.jump,
            self.crouch,
            self.zoom,
            self.interact,
            self.pause,
            self.debug_toggle,
        ];
        keys.iter()
            .enumerate()
            .any(|(i, key)| keys[i + 1..].contains(key))
    }
}
