//! Head-bob oscillator
//!
//! While grounded and moving, a phase timer advances at a stance-dependent
//! rate and the camera's local height follows `default_y + sin(phase) * amount`.
//! When the agent stops the update is skipped and the phase freezes where it
//! was.

use crate::camera::CameraRig;
use crate::config::HeadBobTuning;

use super::AgentState;

#[derive(Debug, Clone, Default)]
pub struct HeadBob {
    timer: f32,
}

impl HeadBob {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        self.timer
    }

    /// Check whether the bob should advance this frame.
    pub fn is_active(state: &AgentState, tuning: &HeadBobTuning) -> bool {
        state.grounded
            && (state.velocity.x.abs() > tuning.deadzone || state.velocity.z.abs() > tuning.deadzone)
    }

    /// Advance the oscillator and move the camera.
    ///
    /// # Arguments
    /// * `sprinting` - Sprint is enabled and held this frame
    ///
    /// # Returns
    /// `true` if the camera was moved.
    pub fn update(
        &mut self,
        dt: f32,
        state: &AgentState,
        sprinting: bool,
        tuning: &HeadBobTuning,
        rig: &mut CameraRig,
    ) -> bool {
        if !Self::is_active(state, tuning) {
            return false;
        }

        let (speed, amount) = if state.crouching {
            (tuning.crouch_speed, tuning.crouch_amount)
        } else if sprinting {
            (tuning.sprint_speed, tuning.sprint_amount)
        } else {
            (tuning.walk_speed, tuning.walk_amount)
        };

        self.timer += dt * speed;
        rig.set_local_y(rig.default_y() + self.timer.sin() * amount);
        true
    }
}
