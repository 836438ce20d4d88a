//! Controller Configuration
//!
//! [`ControllerConfig`] is the full configuration surface of a controller:
//! which input source and detection protocol to use, the feature toggles, the
//! key layout and all numeric tuning. It is read-only during a frame and may be
//! edited between frames (the debug kill switch, host menus).
//!
//! Configuration is plain serde data and loads from partial JSON documents;
//! missing fields take their defaults.

pub mod features;
pub mod tuning;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ControllerError, Result};
use crate::input::{InputSourceKind, KeyBindings};

pub use features::FeatureToggles;
pub use tuning::{
    CrouchTuning, FootstepTuning, HeadBobTuning, INTERACTABLE_LAYER, InteractionTuning,
    JumpTuning, LookTuning, MovementTuning, ZoomTuning,
};

/// Interaction detection protocol, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionProtocolKind {
    /// No interaction detection
    None,
    /// Edge-triggered crosshair latch calling `interact`
    #[default]
    Latch,
    /// Level-triggered focus tracking calling focus/lose-focus/interact
    FocusTracker,
}

/// Complete controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ControllerConfig {
    pub input_source: InputSourceKind,
    pub detection: DetectionProtocolKind,
    /// Enables the raw debug kill switch
    pub debug_mode: bool,
    pub features: FeatureToggles,
    pub keys: KeyBindings,
    pub movement: MovementTuning,
    pub look: LookTuning,
    pub jump: JumpTuning,
    pub crouch: CrouchTuning,
    pub head_bob: HeadBobTuning,
    pub zoom: ZoomTuning,
    pub interaction: InteractionTuning,
    pub footsteps: FootstepTuning,
}

impl ControllerConfig {
    /// Parse a JSON document. Missing fields use defaults. The result is
    /// validated.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ControllerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every tuning value against its accepted range.
    pub fn validate(&self) -> Result<()> {
        let look = &self.look;
        check_range("look.sensitivity_x", look.sensitivity_x, 0.1, 3.0)?;
        check_range("look.sensitivity_y", look.sensitivity_y, 0.1, 3.0)?;
        check_range("look.degrees_up", look.degrees_up, 1.0, 180.0)?;
        check_range("look.degrees_down", look.degrees_down, 1.0, 180.0)?;

        let m = &self.movement;
        for (name, value) in [
            ("movement.walk_speed", m.walk_speed),
            ("movement.sprint_speed", m.sprint_speed),
            ("movement.crouch_speed", m.crouch_speed),
            ("movement.gravity", m.gravity),
            ("movement.slope_speed", m.slope_speed),
            ("movement.slope_probe_distance", m.slope_probe_distance),
            ("movement.climb_speed", m.climb_speed),
            ("jump.jump_force", self.jump.jump_force),
            ("crouch.ceiling_probe_distance", self.crouch.ceiling_probe_distance),
            ("interaction.distance", self.interaction.distance),
            ("footsteps.probe_distance", self.footsteps.probe_distance),
            ("footsteps.tile_volume", self.footsteps.tile_volume),
            ("footsteps.default_volume", self.footsteps.default_volume),
        ] {
            check_non_negative(name, value)?;
        }

        check_positive("crouch.time_to_crouch", self.crouch.time_to_crouch)?;
        check_positive("crouch.crouch_height", self.crouch.crouch_height)?;
        if self.crouch.crouch_height >= self.crouch.standing_height {
            return Err(ControllerError::InvalidConfig(format!(
                "crouch.crouch_height ({}) must be below crouch.standing_height ({})",
                self.crouch.crouch_height, self.crouch.standing_height
            )));
        }

        check_positive("zoom.time_to_zoom", self.zoom.time_to_zoom)?;
        check_range("zoom.zoom_fov", self.zoom.zoom_fov, 1.0, 179.0)?;

        check_positive("footsteps.base_step_interval", self.footsteps.base_step_interval)?;
        check_positive("footsteps.crouch_step_multiplier", self.footsteps.crouch_step_multiplier)?;
        check_positive("footsteps.sprint_step_multiplier", self.footsteps.sprint_step_multiplier)?;

        let raypoint = self.interaction.raypoint;
        if !(0.0..=1.0).contains(&raypoint.x) || !(0.0..=1.0).contains(&raypoint.y) {
            return Err(ControllerError::InvalidConfig(format!(
                "interaction.raypoint {raypoint} must lie inside the viewport [0, 1]"
            )));
        }

        Ok(())
    }
}

fn check_range(name: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ControllerError::InvalidConfig(format!(
            "{name} = {value} outside [{min}, {max}]"
        )))
    }
}

fn check_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ControllerError::InvalidConfig(format!("{name} = {value} must be > 0")))
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ControllerError::InvalidConfig(format!("{name} = {value} must be >= 0")))
    }
}
