//! Mouse-look integration
//!
//! Pitch lives on the camera and is clamped absolutely every frame. Yaw lives
//! on the agent and is composed incrementally onto whatever orientation the
//! agent currently has, so external rotations (teleports, cutscenes) are kept.

use glam::{Quat, Vec2};

use super::CameraRig;
use crate::config::LookTuning;

/// Turns a look delta into camera pitch and agent yaw.
#[derive(Clone, Copy, Debug)]
pub struct LookIntegrator {
    /// Degrees of yaw per look unit
    pub sensitivity_x: f32,
    /// Degrees of pitch per look unit
    pub sensitivity_y: f32,
    /// Maximum pitch above the horizon (degrees)
    pub degrees_up: f32,
    /// Maximum pitch below the horizon (degrees)
    pub degrees_down: f32,
}

impl Default for LookIntegrator {
    fn default() -> Self {
        Self::from_tuning(&LookTuning::default())
    }
}

impl LookIntegrator {
    pub fn from_tuning(tuning: &LookTuning) -> Self {
        Self {
            sensitivity_x: tuning.sensitivity_x,
            sensitivity_y: tuning.sensitivity_y,
            degrees_up: tuning.degrees_up,
            degrees_down: tuning.degrees_down,
        }
    }

    /// Clamp a pitch value to `[-degrees_up, degrees_down]`.
    ///
    /// Never panics: a NaN limit is ignored and inverted limits resolve to
    /// `degrees_down`.
    #[inline]
    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.max(-self.degrees_up).min(self.degrees_down)
    }

    /// Apply one frame of look input.
    ///
    /// # Arguments
    /// * `delta` - Look delta, +x turns right, +y looks up
    /// * `rig` - Camera whose local pitch is updated
    /// * `orientation` - Current agent orientation
    ///
    /// # Returns
    /// The new agent orientation with this frame's yaw composed on.
    pub fn apply(&self, delta: Vec2, rig: &mut CameraRig, orientation: Quat) -> Quat {
        let pitch = rig.pitch_degrees() - delta.y * self.sensitivity_y;
        rig.set_pitch_degrees(self.clamp_pitch(pitch));

        let yaw = -(delta.x * self.sensitivity_x).to_radians();
        (orientation * Quat::from_rotation_y(yaw)).normalize()
    }
}
