//! Ray probe contract
//!
//! The controller never owns the collision world. It asks a [`PhysicsProbe`]
//! for ray hits and receives plain data back: where the ray stopped, the
//! surface normal, which object was hit (by identity only), the object's
//! layer and its surface tag.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stable identity of a world object, used for change detection.
///
/// The controller only stores identities; capability calls go through an
/// [`InteractionWorld`](crate::interaction::InteractionWorld) lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

static_assertions::assert_eq_size!(ObjectId, u64);

/// Bit set of collision layers (32 layers, one bit each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches every layer.
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    /// Matches nothing.
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask containing exactly one layer.
    ///
    /// Layers outside 0..32 produce an empty mask.
    pub const fn layer(index: u8) -> Self {
        if index < 32 {
            LayerMask(1 << index)
        } else {
            LayerMask(0)
        }
    }

    /// Check whether `layer` is part of this mask.
    #[inline]
    pub fn contains(&self, layer: u8) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }

    /// Union of two masks.
    #[inline]
    pub fn with(self, other: LayerMask) -> Self {
        LayerMask(self.0 | other.0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::ALL
    }
}

/// Result of a successful ray query.
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit {
    /// World-space position where the ray stopped
    pub point: Vec3,
    /// Surface normal at the hit point (normalized)
    pub normal: Vec3,
    /// Distance from the ray origin to the hit point
    pub distance: f32,
    /// Identity of the object that was hit
    pub object: ObjectId,
    /// Collision layer of the hit object (0..32)
    pub layer: u8,
    /// Surface classification tag, e.g. `"Footsteps/STONE"`
    pub surface_tag: Option<String>,
}

/// Ray query collaborator supplied by the host's physics engine.
pub trait PhysicsProbe {
    /// Cast a ray and return the closest hit within `max_distance` on a layer
    /// included in `mask`.
    ///
    /// `direction` is expected to be normalized. A miss is `None` and is a
    /// normal outcome, not an error.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask)
    -> Option<RayHit>;

    /// Convenience: does anything block the ray?
    fn ray_test(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask) -> bool {
        self.raycast(origin, direction, max_distance, mask).is_some()
    }
}
