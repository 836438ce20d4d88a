//! Interaction capabilities and cue sinks
//!
//! World objects are never owned by the controller. Each frame it learns an
//! [`ObjectId`] from a ray hit and asks the host's [`InteractionWorld`] for the
//! capability it needs on that object.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::physics::ObjectId;

/// Opaque handle to a crosshair image owned by the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SpriteHandle(pub u32);

/// Latch-protocol capability.
pub trait Interactable {
    fn interact(&mut self);
}

/// Focus-tracker capability.
pub trait Focusable {
    fn on_focus(&mut self);
    fn on_lose_focus(&mut self);
    fn on_interact(&mut self);
}

/// Highlight capability.
pub trait Outline {
    fn set_outline(&mut self, enabled: bool);
}

/// Host lookup from identity to capability.
///
/// Every lookup defaults to "capability absent", so hosts implement only the
/// capabilities their objects have.
pub trait InteractionWorld {
    fn interactable(&mut self, object: ObjectId) -> Option<&mut dyn Interactable> {
        let _ = object;
        None
    }

    fn focusable(&mut self, object: ObjectId) -> Option<&mut dyn Focusable> {
        let _ = object;
        None
    }

    fn outline(&mut self, object: ObjectId) -> Option<&mut dyn Outline> {
        let _ = object;
        None
    }
}

/// World with no interactive objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTargets;

impl InteractionWorld for NoTargets {}

/// Crosshair presentation collaborator.
pub trait CrosshairSink {
    fn set_crosshair(&mut self, active: bool, offset: Vec3, sprite: SpriteHandle, detected: bool);
}

/// External modal UI state (text boxes) that suppresses the latch protocol.
pub trait ModalState {
    fn text_box_open(&self) -> bool;
}

/// Modal state that is never open.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModal;

impl ModalState for NoModal {
    fn text_box_open(&self) -> bool {
        false
    }
}
