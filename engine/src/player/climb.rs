//! Climb override
//!
//! While climbing, the move axis drives the agent along its own up/right plane
//! instead of the ground plane, gravity is suspended and normal movement is
//! switched off for the frame.

use glam::{Vec2, Vec3};

use crate::physics::CharacterBody;

use super::AgentState;

#[derive(Debug, Clone, Copy, Default)]
pub struct ClimbController;

impl ClimbController {
    /// Climb velocity for a move axis.
    ///
    /// `axis.y` climbs along the agent's up vector, `axis.x` along its right.
    pub fn velocity(axis: Vec2, orientation: glam::Quat, climb_speed: f32) -> Vec3 {
        let axis = axis.clamp_length_max(1.0);
        (orientation * Vec3::Y * axis.y + orientation * Vec3::X * axis.x) * climb_speed
    }

    /// Run one climbing frame.
    ///
    /// # Returns
    /// The displacement the body applied.
    pub fn update(
        dt: f32,
        axis: Vec2,
        state: &mut AgentState,
        body: &mut dyn CharacterBody,
        climb_speed: f32,
    ) -> Vec3 {
        state.movement_enabled = false;

        let climb = Self::velocity(axis, body.orientation(), climb_speed);
        state.velocity = Vec3::new(state.velocity.x, 0.0, state.velocity.z);

        let applied = body.move_by(climb * dt);
        state.grounded = body.is_grounded();
        applied
    }
}
