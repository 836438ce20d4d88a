//! Latch detector
//!
//! Edge-triggered crosshair protocol:
//!
//! - On a hit on an interactable object, the detected crosshair is raised
//!   once and an interact press calls `interact` on the hit object.
//! - An outlined hit becomes the current highlight; moving to another object
//!   turns the previous highlight off first.
//! - On a miss (or while a modal text box is open) the normal crosshair is
//!   restored once, the detected flag is cleared and any highlight is turned
//!   off.
//!
//! The interact action is bound once for the controller's lifetime. This
//! detector only keeps the *current* target in a slot that the interact press
//! reads, so nothing is subscribed or unsubscribed per detection.

use crate::config::InteractionTuning;
use crate::physics::ObjectId;

use super::{DetectionSample, InteractionEffect};

#[derive(Debug, Clone, Default)]
pub struct LatchDetector {
    /// Detected crosshair has been raised for the current detection
    detected_cue_set: bool,
    /// Normal crosshair has been restored since the last detection
    normal_cue_set: bool,
    /// Interactable under the crosshair right now
    current: Option<ObjectId>,
    /// Object whose outline is enabled
    highlighted: Option<ObjectId>,
}

impl LatchDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_target(&self) -> Option<ObjectId> {
        self.current
    }

    pub fn highlighted(&self) -> Option<ObjectId> {
        self.highlighted
    }

    pub fn is_detected(&self) -> bool {
        self.detected_cue_set
    }

    pub fn update(
        &mut self,
        sample: &DetectionSample,
        interact_pressed: bool,
        tuning: &InteractionTuning,
    ) -> Vec<InteractionEffect> {
        let mut effects = Vec::new();

        let hit = match sample.hit {
            Some(hit) if !sample.modal_open => hit,
            _ => {
                self.on_miss(tuning, &mut effects);
                return effects;
            }
        };

        if hit.interactable {
            if !self.detected_cue_set {
                effects.push(InteractionEffect::SetCrosshair {
                    sprite: tuning.detected_crosshair,
                    detected: true,
                });
                self.detected_cue_set = true;
            }
            self.normal_cue_set = false;
            self.current = Some(hit.object);

            if interact_pressed {
                effects.push(InteractionEffect::Interact(hit.object));
            }
        } else {
            self.current = None;
        }

        if hit.outlined {
            if self.highlighted != Some(hit.object) {
                self.clear_highlight(&mut effects);
                effects.push(InteractionEffect::SetOutline(hit.object, true));
                self.highlighted = Some(hit.object);
            }
        } else {
            self.clear_highlight(&mut effects);
        }

        effects
    }

    fn on_miss(&mut self, tuning: &InteractionTuning, effects: &mut Vec<InteractionEffect>) {
        self.current = None;
        if !self.normal_cue_set {
            effects.push(InteractionEffect::SetCrosshair {
                sprite: tuning.normal_crosshair,
                detected: false,
            });
            self.normal_cue_set = true;
        }
        self.detected_cue_set = false;
        self.clear_highlight(effects);
    }

    fn clear_highlight(&mut self, effects: &mut Vec<InteractionEffect>) {
        if let Some(previous) = self.highlighted.take() {
            effects.push(InteractionEffect::SetOutline(previous, false));
        }
    }

    /// Drop the current target and highlight (teardown).
    pub fn reset(&mut self) -> Vec<InteractionEffect> {
        let mut effects = Vec::new();
        self.current = None;
        self.detected_cue_set = false;
        self.clear_highlight(&mut effects);
        effects
    }
}
