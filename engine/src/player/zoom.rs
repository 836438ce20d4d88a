//! Zoom transition
//!
//! Pressing zoom animates the field of view toward the zoom FOV, releasing it
//! animates back to the camera's default FOV. Either edge cancels whatever
//! zoom animation is in flight and starts a new one from the current FOV, so
//! at most one zoom animation ever runs.

use tracing::debug;

use crate::camera::CameraRig;
use crate::config::ZoomTuning;

use super::tween::{Tween, TweenSlot};

#[derive(Debug, Clone, Default)]
pub struct ZoomController {
    animation: TweenSlot<f32>,
}

impl ZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_active()
    }

    /// FOV the in-flight animation is heading to, if any.
    pub fn target_fov(&self) -> Option<f32> {
        self.animation.current().map(|tween| tween.target())
    }

    /// Start zooming in (`true`) or out (`false`) from the rig's current FOV.
    pub fn trigger(&mut self, zoom_in: bool, rig: &CameraRig, tuning: &ZoomTuning) {
        let target = if zoom_in {
            tuning.zoom_fov
        } else {
            rig.default_fov()
        };

        let cancelled = self
            .animation
            .start(Tween::new(rig.fov(), target, tuning.time_to_zoom));
        if cancelled {
            debug!(target_fov = target, "zoom retriggered, previous animation cancelled");
        }
    }

    /// Apply the zoom edges of one input frame.
    ///
    /// When both edges arrive in the same frame their order is lost, so the
    /// key's final `held` state picks the direction.
    pub fn handle_input(
        &mut self,
        pressed: bool,
        released: bool,
        held: bool,
        rig: &CameraRig,
        tuning: &ZoomTuning,
    ) {
        match (pressed, released) {
            (true, true) => self.trigger(held, rig, tuning),
            (true, false) => self.trigger(true, rig, tuning),
            (false, true) => self.trigger(false, rig, tuning),
            (false, false) => {}
        }
    }

    /// Advance the animation and write the FOV to the rig.
    ///
    /// # Returns
    /// `true` on the frame the animation completes.
    pub fn advance(&mut self, dt: f32, rig: &mut CameraRig) -> bool {
        match self.animation.advance(dt) {
            Some((fov, done)) => {
                rig.set_fov(fov);
                done
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) -> bool {
        self.animation.cancel()
    }
}
