//! Physics collaborators
//!
//! The controller does not simulate collisions. It talks to two
//! collaborators supplied by the host:
//!
//! - a [`PhysicsProbe`] for ray queries (ceiling, slope, surface, interaction)
//! - a [`CharacterBody`] that owns the agent transform and capsule and
//!   resolves `move_by` sweeps
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, velocities in m/s, angles in degrees at the
//! configuration surface.
//!
//! # Submodules
//!
//! - [`probe`] - Ray query contract, identities and layer masks
//! - [`body`] - Character body contract and a flat-ground reference body
//! - [`collision`] - Ray-AABB tests and the `BoxWorld` reference probe

pub mod body;
pub mod collision;
pub mod probe;

pub use body::{CapsuleShape, CharacterBody, KinematicCapsule};
pub use collision::{BoxCollider, BoxWorld, aabb_surface_normal, ray_aabb_intersect};
pub use probe::{LayerMask, ObjectId, PhysicsProbe, RayHit};
