//! Player Crouch System
//!
//! Toggle between a standing and a crouched capsule with a timed transition.
//!
//! # Rules
//!
//! - A crouch press is only accepted while grounded and while no transition
//!   is in flight.
//! - Standing up is refused outright when a short upward ray from the camera
//!   hits something. No transition starts and the crouch flag is unchanged.
//! - The crouch flag flips when the transition completes, not when it starts.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut crouch = CrouchController::new();
//!
//! if input.crouch_pressed {
//!     crouch.trigger(&state, &tuning, body.capsule(), camera_pos, probe);
//! }
//! // Every frame:
//! crouch.advance(dt, &mut state, body);
//! ```

use glam::Vec3;
use tracing::debug;

use crate::config::CrouchTuning;
use crate::physics::{CapsuleShape, CharacterBody, LayerMask, PhysicsProbe};

use super::AgentState;
use super::tween::{Tween, TweenSlot};

/// Result of a crouch press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrouchTrigger {
    /// Transition started toward the crouched capsule
    Crouching,
    /// Transition started toward the standing capsule
    Standing,
    /// Stand-up refused: ceiling above the camera
    Blocked,
    /// Press ignored: airborne or a transition is already running
    Ignored,
}

impl CrouchTrigger {
    pub fn started(&self) -> bool {
        matches!(self, CrouchTrigger::Crouching | CrouchTrigger::Standing)
    }
}

/// Drives the crouch/stand capsule transition.
#[derive(Debug, Clone, Default)]
pub struct CrouchController {
    transition: TweenSlot<CapsuleShape>,
}

impl CrouchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a crouch/stand transition is in flight.
    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_active()
    }

    /// Check whether there is headroom to stand.
    ///
    /// # Arguments
    /// * `camera_position` - World-space camera position the ray starts from
    /// * `probe` - Ray query collaborator
    /// * `tuning` - Supplies the probe length
    pub fn has_headroom(
        camera_position: Vec3,
        probe: &dyn PhysicsProbe,
        tuning: &CrouchTuning,
    ) -> bool {
        !probe.ray_test(
            camera_position,
            Vec3::Y,
            tuning.ceiling_probe_distance,
            LayerMask::ALL,
        )
    }

    /// Handle a crouch press.
    ///
    /// # Arguments
    /// * `state` - Agent state (grounded and crouch flags are read)
    /// * `tuning` - Capsule shapes and transition time
    /// * `current` - Capsule shape right now; the transition starts from it
    /// * `camera_position` - Ceiling probe origin
    /// * `probe` - Ray query collaborator
    pub fn trigger(
        &mut self,
        state: &AgentState,
        tuning: &CrouchTuning,
        current: CapsuleShape,
        camera_position: Vec3,
        probe: &dyn PhysicsProbe,
    ) -> CrouchTrigger {
        if !state.grounded || self.transition.is_active() {
            return CrouchTrigger::Ignored;
        }

        if state.crouching && !Self::has_headroom(camera_position, probe, tuning) {
            return CrouchTrigger::Blocked;
        }

        let (target, outcome) = if state.crouching {
            (
                CapsuleShape::new(tuning.standing_height, tuning.standing_center),
                CrouchTrigger::Standing,
            )
        } else {
            (
                CapsuleShape::new(tuning.crouch_height, tuning.crouching_center),
                CrouchTrigger::Crouching,
            )
        };

        self.transition
            .start(Tween::new(current, target, tuning.time_to_crouch));
        outcome
    }

    /// Advance the transition and apply it to the body.
    ///
    /// # Returns
    /// `true` on the frame the transition completes (the crouch flag has just
    /// flipped).
    pub fn advance(&mut self, dt: f32, state: &mut AgentState, body: &mut dyn CharacterBody) -> bool {
        let Some((shape, done)) = self.transition.advance(dt) else {
            return false;
        };

        body.set_capsule(shape);
        if done {
            state.crouching = !state.crouching;
            debug!(crouching = state.crouching, height = shape.height, "crouch transition complete");
        }
        done
    }

    /// Drop the in-flight transition, leaving the capsule where it is.
    pub fn cancel(&mut self) -> bool {
        self.transition.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BoxCollider, BoxWorld, KinematicCapsule, ObjectId};

    fn standing_body() -> KinematicCapsule {
        KinematicCapsule::on_ground(Vec3::ZERO, 0.0, CapsuleShape::new(1.5, Vec3::ZERO))
    }

    fn grounded() -> AgentState {
        AgentState {
            grounded: true,
            ..Default::default()
        }
    }

    fn run_to_completion(
        crouch: &mut CrouchController,
        state: &mut AgentState,
        body: &mut KinematicCapsule,
    ) -> usize {
        let mut frames = 0;
        while crouch.is_transitioning() {
            crouch.advance(0.05, state, body);
            frames += 1;
            assert!(frames < 100);
        }
        frames
    }

    #[test]
    fn test_crouch_flag_flips_on_completion() {
        let tuning = CrouchTuning::default();
        let world = BoxWorld::new();
        let mut body = standing_body();
        let mut state = grounded();
        let mut crouch = CrouchController::new();

        let outcome = crouch.trigger(&state, &tuning, body.capsule(), Vec3::Y, &world);
        assert_eq!(outcome, CrouchTrigger::Crouching);
        assert!(!state.crouching);

        crouch.advance(0.1, &mut state, &mut body);
        assert!(!state.crouching);
        let mid = body.capsule().height;
        assert!(mid < 1.5 && mid > 0.6);

        run_to_completion(&mut crouch, &mut state, &mut body);
        assert!(state.crouching);
        assert_eq!(body.capsule().height, tuning.crouch_height);
        assert_eq!(body.capsule().center, tuning.crouching_center);
    }

    #[test]
    fn test_ignored_while_airborne() {
        let tuning = CrouchTuning::default();
        let world = BoxWorld::new();
        let body = standing_body();
        let state = AgentState::default();
        let mut crouch = CrouchController::new();

        assert_eq!(
            crouch.trigger(&state, &tuning, body.capsule(), Vec3::Y, &world),
            CrouchTrigger::Ignored
        );
        assert!(!crouch.is_transitioning());
    }

    #[test]
    fn test_ignored_while_transitioning() {
        let tuning = CrouchTuning::default();
        let world = BoxWorld::new();
        let body = standing_body();
        let state = grounded();
        let mut crouch = CrouchController::new();

        crouch.trigger(&state, &tuning, body.capsule(), Vec3::Y, &world);
        assert_eq!(
            crouch.trigger(&state, &tuning, body.capsule(), Vec3::Y, &world),
            CrouchTrigger::Ignored
        );
    }

    #[test]
    fn test_stand_blocked_by_ceiling() {
        let tuning = CrouchTuning::default();
        let mut world = BoxWorld::new();
        world.insert(BoxCollider::new(
            ObjectId(7),
            Vec3::new(-1.0, 1.2, -1.0),
            Vec3::new(1.0, 1.4, 1.0),
        ));
        let body = KinematicCapsule::on_ground(
            Vec3::ZERO,
            0.0,
            CapsuleShape::new(tuning.crouch_height, tuning.crouching_center),
        );
        let state = AgentState {
            grounded: true,
            crouching: true,
            ..Default::default()
        };
        let mut crouch = CrouchController::new();

        let camera = Vec3::new(0.0, 0.5, 0.0);
        for _ in 0..5 {
            assert_eq!(
                crouch.trigger(&state, &tuning, body.capsule(), camera, &world),
                CrouchTrigger::Blocked
            );
            assert!(!crouch.is_transitioning());
        }
    }

    #[test]
    fn test_crouching_down_ignores_ceiling() {
        let tuning = CrouchTuning::default();
        let mut world = BoxWorld::new();
        world.insert(BoxCollider::new(
            ObjectId(7),
            Vec3::new(-1.0, 1.2, -1.0),
            Vec3::new(1.0, 1.4, 1.0),
        ));
        let body = standing_body();
        let mut crouch = CrouchController::new();

        let outcome = crouch.trigger(&grounded(), &tuning, body.capsule(), Vec3::new(0.0, 0.5, 0.0), &world);
        assert_eq!(outcome, CrouchTrigger::Crouching);
    }

    #[test]
    fn test_stand_back_up() {
        let tuning = CrouchTuning::default();
        let world = BoxWorld::new();
        let mut body = standing_body();
        let mut state = grounded();
        let mut crouch = CrouchController::new();

        crouch.trigger(&state, &tuning, body.capsule(), Vec3::Y, &world);
        run_to_completion(&mut crouch, &mut state, &mut body);
        assert!(state.crouching);

        let outcome = crouch.trigger(&state, &tuning, body.capsule(), Vec3::Y, &world);
        assert_eq!(outcome, CrouchTrigger::Standing);
        run_to_completion(&mut crouch, &mut state, &mut body);
        assert!(!state.crouching);
        assert_eq!(body.capsule().height, tuning.standing_height);
    }

    #[test]
    fn test_cancel_leaves_flag() {
        let tuning = CrouchTuning::default();
        let world = BoxWorld::new();
        let mut body = standing_body();
        let mut state = grounded();
        let mut crouch = CrouchController::new();

        crouch.trigger(&state, &tuning, body.capsule(), Vec3::Y, &world);
        crouch.advance(0.05, &mut state, &mut body);
        assert!(crouch.cancel());
        assert!(!crouch.advance(0.5, &mut state, &mut body));
        assert!(!state.crouching);
    }
}
