//! Collision detection module
//!
//! Ray-AABB intersection and a small static world of boxes that implements
//! [`PhysicsProbe`]. Hosts with a real physics engine implement the probe
//! themselves; `BoxWorld` backs the simulation binary and the tests.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Example
//!
//! ```ignore
//! use strider_engine::physics::{BoxWorld, BoxCollider, LayerMask, ObjectId, PhysicsProbe};
//! use glam::Vec3;
//!
//! let mut world = BoxWorld::with_ground(0.0, ObjectId(1), Some("Footsteps/STONE"));
//! world.insert(BoxCollider::new(ObjectId(2), Vec3::new(-1.0, 0.0, -4.0), Vec3::new(1.0, 2.0, -3.0)));
//!
//! if let Some(hit) = world.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 10.0, LayerMask::ALL) {
//!     assert_eq!(hit.object, ObjectId(2));
//! }
//! ```

use glam::Vec3;

use super::probe::{LayerMask, ObjectId, PhysicsProbe, RayHit};

/// Slab test of a ray against an axis-aligned box.
///
/// # Returns
/// Distance along `direction` to the first surface in front of `origin`. A
/// ray starting inside the box reports its exit distance. `None` when the box
/// is missed or lies entirely behind the origin.
pub fn ray_aabb_intersect(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut enter = f32::NEG_INFINITY;
    let mut exit = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (origin[axis], direction[axis]);
        if d.abs() < 1e-10 {
            // Parallel to this slab: inside it or never
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = d.recip();
        let (near, far) = {
            let t0 = (min[axis] - o) * inv;
            let t1 = (max[axis] - o) * inv;
            if t0 <= t1 { (t0, t1) } else { (t1, t0) }
        };
        enter = enter.max(near);
        exit = exit.min(far);
        if enter > exit {
            return None;
        }
    }

    if exit < 0.0 {
        None
    } else if enter >= 0.0 {
        Some(enter)
    } else {
        Some(exit)
    }
}

/// Outward normal of the box face closest to `point`.
pub fn aabb_surface_normal(point: Vec3, min: Vec3, max: Vec3) -> Vec3 {
    let half = ((max - min) * 0.5).max(Vec3::splat(1e-6));
    let local = (point - (min + max) * 0.5) / half;
    let magnitude = local.abs();

    let axis = if magnitude.x >= magnitude.y && magnitude.x >= magnitude.z {
        Vec3::X
    } else if magnitude.y >= magnitude.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    axis * local.dot(axis).signum()
}

/// A static axis-aligned box with identity, layer and surface tag.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxCollider {
    pub object: ObjectId,
    pub min: Vec3,
    pub max: Vec3,
    /// Collision layer (0..32)
    pub layer: u8,
    /// Surface classification, e.g. `"Footsteps/WOOD"`
    pub surface_tag: Option<String>,
}

impl BoxCollider {
    /// Box on layer 0 with no surface tag.
    pub fn new(object: ObjectId, min: Vec3, max: Vec3) -> Self {
        Self {
            object,
            min: min.min(max),
            max: min.max(max),
            layer: 0,
            surface_tag: None,
        }
    }

    pub fn on_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.surface_tag = Some(tag.into());
        self
    }
}

/// Infinite horizontal ground plane.
#[derive(Debug, Clone, PartialEq)]
struct GroundPlane {
    height: f32,
    object: ObjectId,
    surface_tag: Option<String>,
}

/// Brute-force static world of boxes plus an optional ground plane.
#[derive(Debug, Clone, Default)]
pub struct BoxWorld {
    colliders: Vec<BoxCollider>,
    ground: Option<GroundPlane>,
}

impl BoxWorld {
    /// Empty world with no ground.
    pub fn new() -> Self {
        Self::default()
    }

    /// World with a ground plane at `height` on layer 0.
    pub fn with_ground(height: f32, object: ObjectId, surface_tag: Option<&str>) -> Self {
        Self {
            colliders: Vec::new(),
            ground: Some(GroundPlane {
                height,
                object,
                surface_tag: surface_tag.map(str::to_owned),
            }),
        }
    }

    pub fn insert(&mut self, collider: BoxCollider) {
        self.colliders.push(collider);
    }

    /// Remove every collider with the given identity. Returns how many were removed.
    pub fn remove(&mut self, object: ObjectId) -> usize {
        let before = self.colliders.len();
        self.colliders.retain(|c| c.object != object);
        before - self.colliders.len()
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    fn ground_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let ground = self.ground.as_ref()?;
        if direction.y.abs() < 1e-4 {
            return None;
        }
        let t = (ground.height - origin.y) / direction.y;
        if t < 0.0 || t > max_distance {
            return None;
        }
        Some(RayHit {
            point: origin + direction * t,
            normal: Vec3::Y,
            distance: t,
            object: ground.object,
            layer: 0,
            surface_tag: ground.surface_tag.clone(),
        })
    }
}

impl PhysicsProbe for BoxWorld {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let mut closest = if mask.contains(0) {
            self.ground_hit(origin, direction, max_distance)
        } else {
            None
        };
        let mut closest_dist = closest.as_ref().map_or(max_distance, |hit| hit.distance);

        for collider in self.colliders.iter().filter(|c| mask.contains(c.layer)) {
            if let Some(t) = ray_aabb_intersect(origin, direction, collider.min, collider.max) {
                if t <= closest_dist {
                    let point = origin + direction * t;
                    closest = Some(RayHit {
                        point,
                        normal: aabb_surface_normal(point, collider.min, collider.max),
                        distance: t,
                        object: collider.object,
                        layer: collider.layer,
                        surface_tag: collider.surface_tag.clone(),
                    });
                    closest_dist = t;
                }
            }
        }

        closest
    }
}
