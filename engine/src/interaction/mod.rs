//! Interaction Module
//!
//! Two alternative detection protocols behind one [`InteractionProtocol`]:
//!
//! - [`LatchDetector`]: edge-triggered crosshair latch calling
//!   [`Interactable::interact`]
//! - [`FocusTracker`]: level-triggered focus tracking calling
//!   [`Focusable::on_focus`], [`Focusable::on_lose_focus`] and
//!   [`Focusable::on_interact`]
//!
//! A protocol never calls into the world itself. Each frame the controller
//! builds a [`DetectionSample`] from ray queries, the protocol returns a list
//! of [`InteractionEffect`]s, and [`apply_effects`] delivers them to the host
//! collaborators.

pub mod focus;
pub mod latch;
pub mod target;

use glam::{Quat, Vec2, Vec3};

use crate::camera::CameraRig;
use crate::config::{DetectionProtocolKind, InteractionTuning};
use crate::physics::{LayerMask, ObjectId, PhysicsProbe};

pub use focus::FocusTracker;
pub use latch::LatchDetector;
pub use target::{
    CrosshairSink, Focusable, Interactable, InteractionWorld, ModalState, NoModal, NoTargets,
    Outline, SpriteHandle,
};

/// Viewport point the latch protocol casts through.
pub const VIEWPORT_CENTER: Vec2 = Vec2::new(0.5, 0.5);

/// What the detection ray found, with the capabilities the host reports for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedObject {
    pub object: ObjectId,
    pub layer: u8,
    pub interactable: bool,
    pub focusable: bool,
    pub outlined: bool,
}

/// Per-frame input to a detection protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetectionSample {
    /// Closest hit on the detection ray, if any
    pub hit: Option<DetectedObject>,
    /// The detection ray filtered by the interaction mask hit something
    pub interact_ray_hit: bool,
    /// A modal text box is open
    pub modal_open: bool,
}

/// Side effect requested by a protocol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionEffect {
    SetCrosshair { sprite: SpriteHandle, detected: bool },
    SetOutline(ObjectId, bool),
    Interact(ObjectId),
    Focus(ObjectId),
    LoseFocus(ObjectId),
    FocusInteract(ObjectId),
}

/// The selected detection protocol.
#[derive(Debug, Clone)]
pub enum InteractionProtocol {
    Latch(LatchDetector),
    FocusTracker(FocusTracker),
}

impl InteractionProtocol {
    /// Protocol for a configured kind; `None` disables detection.
    pub fn from_kind(kind: DetectionProtocolKind) -> Option<Self> {
        match kind {
            DetectionProtocolKind::None => None,
            DetectionProtocolKind::Latch => Some(InteractionProtocol::Latch(LatchDetector::new())),
            DetectionProtocolKind::FocusTracker => {
                Some(InteractionProtocol::FocusTracker(FocusTracker::new()))
            }
        }
    }

    pub fn kind(&self) -> DetectionProtocolKind {
        match self {
            InteractionProtocol::Latch(_) => DetectionProtocolKind::Latch,
            InteractionProtocol::FocusTracker(_) => DetectionProtocolKind::FocusTracker,
        }
    }

    /// Viewport point the detection ray passes through.
    pub fn raypoint(&self, tuning: &InteractionTuning) -> Vec2 {
        match self {
            InteractionProtocol::Latch(_) => VIEWPORT_CENTER,
            InteractionProtocol::FocusTracker(_) => tuning.raypoint,
        }
    }

    /// Mask for the detection ray. The focus tracker checks layers itself.
    pub fn detection_mask(&self, tuning: &InteractionTuning) -> LayerMask {
        match self {
            InteractionProtocol::Latch(_) => tuning.layer_mask,
            InteractionProtocol::FocusTracker(_) => LayerMask::ALL,
        }
    }

    pub fn update(
        &mut self,
        sample: &DetectionSample,
        interact_pressed: bool,
        tuning: &InteractionTuning,
    ) -> Vec<InteractionEffect> {
        match self {
            InteractionProtocol::Latch(latch) => latch.update(sample, interact_pressed, tuning),
            InteractionProtocol::FocusTracker(tracker) => {
                tracker.update(sample, interact_pressed, tuning)
            }
        }
    }

    /// Release any focus or highlight held by the protocol.
    pub fn reset(&mut self) -> Vec<InteractionEffect> {
        match self {
            InteractionProtocol::Latch(latch) => latch.reset(),
            InteractionProtocol::FocusTracker(tracker) => tracker.reset(),
        }
    }

    /// Currently focused (focus tracker) or targeted (latch) object.
    pub fn current_target(&self) -> Option<ObjectId> {
        match self {
            InteractionProtocol::Latch(latch) => latch.current_target(),
            InteractionProtocol::FocusTracker(tracker) => tracker.focused(),
        }
    }

    /// Cast the detection rays and collect capabilities for the hit.
    pub fn sample(
        &self,
        tuning: &InteractionTuning,
        rig: &CameraRig,
        body_position: Vec3,
        body_orientation: Quat,
        probe: &dyn PhysicsProbe,
        world: &mut dyn InteractionWorld,
        modal_open: bool,
    ) -> DetectionSample {
        let (origin, direction) =
            rig.viewport_ray(body_position, body_orientation, self.raypoint(tuning));

        let hit = probe
            .raycast(origin, direction, tuning.distance, self.detection_mask(tuning))
            .map(|hit| DetectedObject {
                object: hit.object,
                layer: hit.layer,
                interactable: world.interactable(hit.object).is_some(),
                focusable: world.focusable(hit.object).is_some(),
                outlined: world.outline(hit.object).is_some(),
            });

        let interact_ray_hit = match self {
            InteractionProtocol::Latch(_) => hit.is_some(),
            InteractionProtocol::FocusTracker(_) => {
                probe.ray_test(origin, direction, tuning.distance, tuning.layer_mask)
            }
        };

        DetectionSample {
            hit,
            interact_ray_hit,
            modal_open,
        }
    }
}

/// Deliver protocol effects to the world and the crosshair.
pub fn apply_effects(
    effects: &[InteractionEffect],
    world: &mut dyn InteractionWorld,
    mut crosshair: Option<&mut dyn CrosshairSink>,
    crosshair_offset: Vec3,
) {
    for effect in effects {
        match *effect {
            InteractionEffect::SetCrosshair { sprite, detected } => {
                if let Some(sink) = crosshair.as_deref_mut() {
                    sink.set_crosshair(true, crosshair_offset, sprite, detected);
                }
            }
            InteractionEffect::SetOutline(object, enabled) => {
                if let Some(outline) = world.outline(object) {
                    outline.set_outline(enabled);
                }
            }
            InteractionEffect::Interact(object) => {
                if let Some(target) = world.interactable(object) {
                    target.interact();
                }
            }
            InteractionEffect::Focus(object) => {
                if let Some(target) = world.focusable(object) {
                    target.on_focus();
                }
            }
            InteractionEffect::LoseFocus(object) => {
                if let Some(target) = world.focusable(object) {
                    target.on_lose_focus();
                }
            }
            InteractionEffect::FocusInteract(object) => {
                if let Some(target) = world.focusable(object) {
                    target.on_interact();
                }
            }
        }
    }
}
