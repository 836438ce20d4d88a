//! Character body contract
//!
//! The physics engine owns the agent's transform and capsule. The controller
//! mutates position only through [`CharacterBody::move_by`], which resolves
//! collisions and refreshes the grounded flag for the next frame.
//!
//! [`KinematicCapsule`] is a minimal flat-ground body used by the simulation
//! binary and the tests. It is not a collision solver: it clamps to a ground
//! height and nothing else.

use glam::{Quat, Vec3};

/// Capsule dimensions interpolated by the crouch transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleShape {
    /// Total capsule height in meters
    pub height: f32,
    /// Capsule center relative to the agent origin
    pub center: Vec3,
}

impl CapsuleShape {
    pub fn new(height: f32, center: Vec3) -> Self {
        Self { height, center }
    }
}

/// Physics body collaborator driven by the controller.
pub trait CharacterBody {
    /// Agent origin in world space.
    fn position(&self) -> Vec3;

    /// Agent orientation (yaw only for a well-behaved first-person agent).
    fn orientation(&self) -> Quat;

    /// Replace the agent orientation.
    fn set_orientation(&mut self, orientation: Quat);

    /// Contact with walkable ground as of the last move.
    fn is_grounded(&self) -> bool;

    /// Steepest walkable slope in degrees.
    fn slope_limit(&self) -> f32;

    /// Current capsule dimensions.
    fn capsule(&self) -> CapsuleShape;

    /// Resize the capsule.
    fn set_capsule(&mut self, shape: CapsuleShape);

    /// Sweep the capsule by `displacement`, resolving collisions.
    ///
    /// Returns the displacement that was actually applied.
    fn move_by(&mut self, displacement: Vec3) -> Vec3;
}

/// Flat-ground reference body.
#[derive(Debug, Clone)]
pub struct KinematicCapsule {
    position: Vec3,
    orientation: Quat,
    shape: CapsuleShape,
    slope_limit: f32,
    ground_height: Option<f32>,
    grounded: bool,
}

/// Default slope limit in degrees
pub const DEFAULT_SLOPE_LIMIT: f32 = 45.0;

/// Distance under which the capsule counts as touching the ground
const GROUND_SNAP: f32 = 0.001;

impl KinematicCapsule {
    /// Create a capsule standing on a ground plane at `ground_height`.
    pub fn on_ground(position: Vec3, ground_height: f32, shape: CapsuleShape) -> Self {
        let position = Vec3::new(position.x, position.y.max(ground_height), position.z);
        Self {
            position,
            orientation: Quat::IDENTITY,
            shape,
            slope_limit: DEFAULT_SLOPE_LIMIT,
            ground_height: Some(ground_height),
            grounded: position.y - ground_height <= GROUND_SNAP,
        }
    }

    /// Create a capsule with no ground beneath it (free fall).
    pub fn floating(position: Vec3, shape: CapsuleShape) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            shape,
            slope_limit: DEFAULT_SLOPE_LIMIT,
            ground_height: None,
            grounded: false,
        }
    }

    pub fn with_slope_limit(mut self, degrees: f32) -> Self {
        self.slope_limit = degrees;
        self
    }

    /// Teleport without collision resolution.
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.refresh_grounded();
    }

    fn refresh_grounded(&mut self) {
        self.grounded = match self.ground_height {
            Some(ground) => self.position.y - ground <= GROUND_SNAP,
            None => false,
        };
    }
}

impl CharacterBody for KinematicCapsule {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation.normalize();
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn slope_limit(&self) -> f32 {
        self.slope_limit
    }

    fn capsule(&self) -> CapsuleShape {
        self.shape
    }

    fn set_capsule(&mut self, shape: CapsuleShape) {
        self.shape = shape;
    }

    fn move_by(&mut self, displacement: Vec3) -> Vec3 {
        let start = self.position;
        let mut target = start + displacement;

        if let Some(ground) = self.ground_height {
            if target.y < ground {
                target.y = ground;
            }
        }

        self.position = target;
        self.refresh_grounded();
        target - start
    }
}
