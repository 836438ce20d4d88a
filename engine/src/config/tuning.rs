//! Tuning parameter groups
//!
//! Numeric constants grouped by the feature that reads them. Every group is
//! `#[serde(default)]`, so a JSON document only needs the values it changes.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::interaction::SpriteHandle;
use crate::physics::LayerMask;

/// Collision layer reserved for interactable objects.
pub const INTERACTABLE_LAYER: u8 = 6;

/// Ground speeds, gravity and slope assist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Walk speed (m/s)
    pub walk_speed: f32,
    /// Sprint speed (m/s)
    pub sprint_speed: f32,
    /// Crouched speed (m/s)
    pub crouch_speed: f32,
    /// Downward acceleration while airborne (m/s^2)
    pub gravity: f32,
    /// Lateral push away from too-steep slopes (m/s)
    pub slope_speed: f32,
    /// Length of the downward slope probe (m)
    pub slope_probe_distance: f32,
    /// Climb speed along the agent's up/right plane (m/s)
    pub climb_speed: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            sprint_speed: 6.0,
            crouch_speed: 1.5,
            gravity: 30.0,
            slope_speed: 8.0,
            slope_probe_distance: 2.0,
            climb_speed: 2.0,
        }
    }
}

/// Mouse-look sensitivity and pitch limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookTuning {
    pub sensitivity_x: f32,
    pub sensitivity_y: f32,
    /// Maximum upward pitch (degrees)
    pub degrees_up: f32,
    /// Maximum downward pitch (degrees)
    pub degrees_down: f32,
}

impl Default for LookTuning {
    fn default() -> Self {
        Self {
            sensitivity_x: 2.0,
            sensitivity_y: 2.0,
            degrees_up: 80.0,
            degrees_down: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpTuning {
    /// Vertical velocity set on jump (m/s)
    pub jump_force: f32,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self { jump_force: 8.0 }
    }
}

/// Capsule shapes for both stances and the transition between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrouchTuning {
    pub crouch_height: f32,
    pub standing_height: f32,
    /// Duration of the crouch/stand transition (seconds)
    pub time_to_crouch: f32,
    pub crouching_center: Vec3,
    pub standing_center: Vec3,
    /// Upward ray length used to refuse standing under a ceiling (m)
    pub ceiling_probe_distance: f32,
}

impl Default for CrouchTuning {
    fn default() -> Self {
        Self {
            crouch_height: 0.6,
            standing_height: 1.5,
            time_to_crouch: 0.25,
            crouching_center: Vec3::new(0.0, 0.5, 0.0),
            standing_center: Vec3::ZERO,
            ceiling_probe_distance: 1.0,
        }
    }
}

/// Head-bob speed (rad/s of phase) and amplitude (m) per stance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadBobTuning {
    pub walk_speed: f32,
    pub walk_amount: f32,
    pub sprint_speed: f32,
    pub sprint_amount: f32,
    pub crouch_speed: f32,
    pub crouch_amount: f32,
    /// Lateral speed below which the bob does not advance (m/s)
    pub deadzone: f32,
}

impl Default for HeadBobTuning {
    fn default() -> Self {
        Self {
            walk_speed: 14.0,
            walk_amount: 0.05,
            sprint_speed: 18.0,
            sprint_amount: 0.11,
            crouch_speed: 8.0,
            crouch_amount: 0.025,
            deadzone: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomTuning {
    /// Duration of the zoom transition (seconds)
    pub time_to_zoom: f32,
    /// Field of view while zoomed (degrees)
    pub zoom_fov: f32,
}

impl Default for ZoomTuning {
    fn default() -> Self {
        Self {
            time_to_zoom: 0.3,
            zoom_fov: 30.0,
        }
    }
}

/// Detection ray and crosshair presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionTuning {
    /// Viewport point the detection ray passes through ((0,0) bottom-left)
    pub raypoint: Vec2,
    /// Detection distance cutoff (m)
    pub distance: f32,
    pub layer_mask: LayerMask,
    pub normal_crosshair: SpriteHandle,
    pub detected_crosshair: SpriteHandle,
    /// Screen offset applied to the crosshair image
    pub crosshair_offset: Vec3,
}

impl Default for InteractionTuning {
    fn default() -> Self {
        Self {
            raypoint: Vec2::new(0.5, 0.5),
            distance: 3.0,
            layer_mask: LayerMask::layer(INTERACTABLE_LAYER),
            normal_crosshair: SpriteHandle(0),
            detected_crosshair: SpriteHandle(1),
            crosshair_offset: Vec3::ZERO,
        }
    }
}

/// Footstep cadence and volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootstepTuning {
    /// Seconds between steps while walking
    pub base_step_interval: f32,
    pub crouch_step_multiplier: f32,
    pub sprint_step_multiplier: f32,
    /// Downward surface probe length (m)
    pub probe_distance: f32,
    pub tile_volume: f32,
    pub default_volume: f32,
}

impl Default for FootstepTuning {
    fn default() -> Self {
        Self {
            base_step_interval: 0.5,
            crouch_step_multiplier: 1.5,
            sprint_step_multiplier: 0.6,
            probe_distance: 5.0,
            tile_volume: 0.3,
            default_volume: 1.0,
        }
    }
}
