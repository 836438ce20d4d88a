//! Kinematics resolver
//!
//! Turns the move axis and mode flags into a world-space velocity, then
//! integrates gravity and slope assist and commits the displacement through
//! the body's move primitive.
//!
//! # Speed selection
//!
//! Crouching wins over sprinting; sprinting needs both the feature and the
//! held key; everything else walks.
//!
//! # Slope assist
//!
//! While grounded, a short downward probe reads the ground normal. If the
//! angle between that normal and world up exceeds the body's slope limit, the
//! normal with its vertical component inverted is added to the velocity,
//! pushing the agent down and away from the slope.

use glam::{Quat, Vec2, Vec3};

use crate::config::MovementTuning;
use crate::physics::{CharacterBody, LayerMask, PhysicsProbe};

use super::AgentState;

/// Pick the lateral speed for this frame.
///
/// # Arguments
/// * `tuning` - Speed constants
/// * `sprint_enabled` - Sprint feature toggle
/// * `crouching` - Current crouch flag
/// * `sprint_held` - Sprint input held this frame
pub fn select_speed(
    tuning: &MovementTuning,
    sprint_enabled: bool,
    crouching: bool,
    sprint_held: bool,
) -> f32 {
    if crouching {
        tuning.crouch_speed
    } else if sprint_enabled && sprint_held {
        tuning.sprint_speed
    } else {
        tuning.walk_speed
    }
}

/// Agent forward direction flattened to the XZ plane.
pub fn flat_forward(orientation: Quat) -> Vec3 {
    let forward = orientation * Vec3::NEG_Z;
    Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero()
}

/// Agent right direction flattened to the XZ plane.
pub fn flat_right(orientation: Quat) -> Vec3 {
    let right = orientation * Vec3::X;
    Vec3::new(right.x, 0.0, right.z).normalize_or_zero()
}

/// Compose the move axis into a world-space velocity.
///
/// The axis is clamped to unit length so diagonal keyboard input is not
/// faster than a full stick. The vertical component of `previous` is kept:
/// it belongs to gravity and jumps.
pub fn resolve_velocity(axis: Vec2, speed: f32, orientation: Quat, previous: Vec3) -> Vec3 {
    let axis = axis.clamp_length_max(1.0) * speed;
    let lateral = flat_forward(orientation) * axis.y + flat_right(orientation) * axis.x;
    Vec3::new(lateral.x, previous.y, lateral.z)
}

/// Slope correction for a ground normal, if the slope is too steep.
///
/// # Returns
/// `Some(correction)` when the angle between `normal` and up exceeds
/// `slope_limit_deg`, otherwise `None`.
pub fn slope_correction(normal: Vec3, slope_limit_deg: f32, slope_speed: f32) -> Option<Vec3> {
    let angle = normal.angle_between(Vec3::Y).to_degrees();
    if angle > slope_limit_deg {
        Some(Vec3::new(normal.x, -normal.y, normal.z) * slope_speed)
    } else {
        None
    }
}

/// Integrate gravity and slope assist, then move the body.
///
/// Refreshes `state.grounded` from the body after the move.
///
/// # Returns
/// The displacement the body actually applied.
pub fn apply_physics(
    state: &mut AgentState,
    body: &mut dyn CharacterBody,
    probe: &dyn PhysicsProbe,
    tuning: &MovementTuning,
    slope_slide: bool,
    dt: f32,
) -> Vec3 {
    let grounded = body.is_grounded();

    if !grounded {
        state.velocity.y -= tuning.gravity * dt;
    }

    if slope_slide && grounded {
        let hit = probe.raycast(
            body.position(),
            Vec3::NEG_Y,
            tuning.slope_probe_distance,
            LayerMask::ALL,
        );
        if let Some(correction) =
            hit.and_then(|hit| slope_correction(hit.normal, body.slope_limit(), tuning.slope_speed))
        {
            state.velocity += correction;
        }
    }

    let applied = body.move_by(state.velocity * dt);
    state.grounded = body.is_grounded();
    applied
}
