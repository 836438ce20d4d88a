//! Footstep cadence
//!
//! A countdown runs while the agent is grounded, has move input and movement
//! is enabled. When it reaches zero a downward probe classifies the surface,
//! one clip from that surface's pool plays through the audio sink, and the
//! countdown resets to an interval scaled by stance.

use glam::Vec3;
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::FootstepTuning;
use crate::physics::{LayerMask, PhysicsProbe};

use super::AgentState;

/// Opaque handle to an audio clip owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipHandle(pub u32);

/// One-shot audio playback collaborator.
pub trait AudioSink {
    fn play_one_shot(&mut self, clip: ClipHandle, volume: f32);
}

/// Ground surface classes with their own clip pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Forest,
    Wood,
    Stone,
    Metal,
    Tile,
    /// Unrecognized or missing tag
    Default,
}

impl SurfaceKind {
    /// Classify a surface tag such as `"Footsteps/STONE"`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("Footsteps/FOREST") => SurfaceKind::Forest,
            Some("Footsteps/WOOD") => SurfaceKind::Wood,
            Some("Footsteps/STONE") => SurfaceKind::Stone,
            Some("Footsteps/METAL") => SurfaceKind::Metal,
            Some("Footsteps/TILE") => SurfaceKind::Tile,
            _ => SurfaceKind::Default,
        }
    }
}

/// Clip pools per surface. The default surface plays the wood pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootstepClips {
    pub forest: Vec<ClipHandle>,
    pub wood: Vec<ClipHandle>,
    pub stone: Vec<ClipHandle>,
    pub metal: Vec<ClipHandle>,
    pub tile: Vec<ClipHandle>,
}

impl FootstepClips {
    pub fn pool(&self, surface: SurfaceKind) -> &[ClipHandle] {
        match surface {
            SurfaceKind::Forest => &self.forest,
            SurfaceKind::Wood | SurfaceKind::Default => &self.wood,
            SurfaceKind::Stone => &self.stone,
            SurfaceKind::Metal => &self.metal,
            SurfaceKind::Tile => &self.tile,
        }
    }
}

/// A footstep that was played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootstepCue {
    pub surface: SurfaceKind,
    pub clip: ClipHandle,
    pub volume: f32,
}

/// Countdown and clip selection for footstep audio.
#[derive(Debug, Clone)]
pub struct FootstepCadence {
    timer: f32,
    clips: FootstepClips,
    rng: StdRng,
}

impl FootstepCadence {
    pub fn new(clips: FootstepClips, rng: StdRng) -> Self {
        Self {
            timer: 0.0,
            clips,
            rng,
        }
    }

    /// Seconds until the next step.
    #[inline]
    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn clips(&self) -> &FootstepClips {
        &self.clips
    }

    /// Interval the countdown resets to after a step.
    pub fn interval(tuning: &FootstepTuning, crouching: bool, sprinting: bool) -> f32 {
        if crouching {
            tuning.base_step_interval * tuning.crouch_step_multiplier
        } else if sprinting {
            tuning.base_step_interval * tuning.sprint_step_multiplier
        } else {
            tuning.base_step_interval
        }
    }

    /// Volume for a surface.
    pub fn volume(tuning: &FootstepTuning, surface: SurfaceKind) -> f32 {
        match surface {
            SurfaceKind::Tile => tuning.tile_volume,
            _ => tuning.default_volume,
        }
    }

    /// Advance the countdown and play a step when it runs out.
    ///
    /// # Arguments
    /// * `has_move_input` - Non-zero move axis this frame
    /// * `sprinting` - Sprint is enabled and held this frame
    /// * `origin` - Agent origin; the surface probe starts here
    ///
    /// # Returns
    /// The cue that was played, if any. The countdown resets on every step
    /// even when the probe misses or the pool is empty.
    pub fn update(
        &mut self,
        dt: f32,
        state: &AgentState,
        has_move_input: bool,
        sprinting: bool,
        origin: Vec3,
        probe: &dyn PhysicsProbe,
        audio: &mut dyn AudioSink,
        tuning: &FootstepTuning,
    ) -> Option<FootstepCue> {
        if !state.grounded || !has_move_input || !state.movement_enabled {
            return None;
        }

        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }

        let cue = probe
            .raycast(origin, Vec3::NEG_Y, tuning.probe_distance, LayerMask::ALL)
            .and_then(|hit| {
                let surface = SurfaceKind::from_tag(hit.surface_tag.as_deref());
                if surface == SurfaceKind::Default {
                    debug!(tag = ?hit.surface_tag, "unrecognized footstep surface, using default pool");
                }
                self.play(surface, audio, tuning)
            });

        self.timer = Self::interval(tuning, state.crouching, sprinting);
        cue
    }

    fn play(
        &mut self,
        surface: SurfaceKind,
        audio: &mut dyn AudioSink,
        tuning: &FootstepTuning,
    ) -> Option<FootstepCue> {
        let pool = self.clips.pool(surface);
        if pool.is_empty() {
            warn!(?surface, "footstep clip pool is empty, skipping step");
            return None;
        }

        let clip = pool[self.rng.gen_range(0..pool.len())];
        let volume = Self::volume(tuning, surface);
        audio.play_one_shot(clip, volume);
        trace!(?surface, clip = clip.0, volume, "footstep");

        Some(FootstepCue {
            surface,
            clip,
            volume,
        })
    }
}
