//! Focus tracker
//!
//! Level-triggered protocol that keeps at most one focused target. Every
//! frame the hit under the configured viewport point is compared by identity
//! with the focused target:
//!
//! - a different focusable object on the interaction layer: the previous
//!   target loses focus, then the new one gains it
//! - the same object: nothing
//! - a miss, an off-layer hit or a non-focusable hit: the focused target
//!   loses focus
//!
//! An interact press reaches the focused target only if a ray filtered by the
//! interaction mask also hits within range.

use tracing::debug;

use crate::config::InteractionTuning;
use crate::physics::ObjectId;

use super::{DetectionSample, InteractionEffect};

#[derive(Debug, Clone, Default)]
pub struct FocusTracker {
    focused: Option<ObjectId>,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<ObjectId> {
        self.focused
    }

    pub fn update(
        &mut self,
        sample: &DetectionSample,
        interact_pressed: bool,
        tuning: &InteractionTuning,
    ) -> Vec<InteractionEffect> {
        let mut effects = Vec::new();

        let candidate = sample
            .hit
            .filter(|hit| hit.focusable && tuning.layer_mask.contains(hit.layer))
            .map(|hit| hit.object);

        match candidate {
            Some(object) if self.focused != Some(object) => {
                if let Some(previous) = self.focused.take() {
                    effects.push(InteractionEffect::LoseFocus(previous));
                }
                debug!(object = object.0, "focus gained");
                effects.push(InteractionEffect::Focus(object));
                self.focused = Some(object);
            }
            Some(_) => {}
            None => {
                if let Some(previous) = self.focused.take() {
                    debug!(object = previous.0, "focus lost");
                    effects.push(InteractionEffect::LoseFocus(previous));
                }
            }
        }

        if interact_pressed && sample.interact_ray_hit {
            if let Some(object) = self.focused {
                effects.push(InteractionEffect::FocusInteract(object));
            }
        }

        effects
    }

    /// Release focus (teardown).
    pub fn reset(&mut self) -> Vec<InteractionEffect> {
        self.focused
            .take()
            .map(InteractionEffect::LoseFocus)
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::DetectedObject;

    fn hit_on(id: u64, layer: u8, focusable: bool) -> DetectionSample {
        DetectionSample {
            hit: Some(DetectedObject {
                object: ObjectId(id),
                layer,
                interactable: false,
                focusable,
                outlined: false,
            }),
            interact_ray_hit: layer == 6,
            modal_open: false,
        }
    }

    fn hit(id: u64) -> DetectionSample {
        hit_on(id, 6, true)
    }

    #[test]
    fn test_switch_unfocuses_first() {
        let tuning = InteractionTuning::default();
        let mut tracker = FocusTracker::new();

        assert_eq!(
            tracker.update(&hit(1), false, &tuning),
            vec![InteractionEffect::Focus(ObjectId(1))]
        );
        assert_eq!(
            tracker.update(&hit(2), false, &tuning),
            vec![
                InteractionEffect::LoseFocus(ObjectId(1)),
                InteractionEffect::Focus(ObjectId(2)),
            ]
        );
    }

    #[test]
    fn test_same_target_is_quiet() {
        let tuning = InteractionTuning::default();
        let mut tracker = FocusTracker::new();
        tracker.update(&hit(1), false, &tuning);
        assert!(tracker.update(&hit(1), false, &tuning).is_empty());
    }

    #[test]
    fn test_miss_loses_focus_once() {
        let tuning = InteractionTuning::default();
        let mut tracker = FocusTracker::new();
        tracker.update(&hit(1), false, &tuning);

        let miss = DetectionSample::default();
        assert_eq!(
            tracker.update(&miss, false, &tuning),
            vec![InteractionEffect::LoseFocus(ObjectId(1))]
        );
        assert!(tracker.update(&miss, false, &tuning).is_empty());
        assert_eq!(tracker.focused(), None);
    }

    #[test]
    fn test_off_layer_or_unfocusable_counts_as_miss() {
        let tuning = InteractionTuning::default();
        let mut tracker = FocusTracker::new();

        assert!(tracker.update(&hit_on(1, 0, true), false, &tuning).is_empty());
        assert!(tracker.update(&hit_on(1, 6, false), false, &tuning).is_empty());

        tracker.update(&hit(2), false, &tuning);
        assert_eq!(
            tracker.update(&hit_on(3, 0, true), false, &tuning),
            vec![InteractionEffect::LoseFocus(ObjectId(2))]
        );
    }

    #[test]
    fn test_interact_needs_focus_and_masked_hit() {
        let tuning = InteractionTuning::default();
        let mut tracker = FocusTracker::new();

        // Focus is taken before the press is checked
        let effects = tracker.update(&hit(1), true, &tuning);
        assert!(effects.contains(&InteractionEffect::FocusInteract(ObjectId(1))));

        let mut sample = hit(1);
        sample.interact_ray_hit = false;
        let effects = tracker.update(&sample, true, &tuning);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_reset_releases_focus() {
        let tuning = InteractionTuning::default();
        let mut tracker = FocusTracker::new();
        tracker.update(&hit(9), false, &tuning);
        assert_eq!(tracker.reset(), vec![InteractionEffect::LoseFocus(ObjectId(9))]);
        assert!(tracker.reset().is_empty());
    }
}
