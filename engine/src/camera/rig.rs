//! Camera Rig Module
//!
//! The first-person camera is a child of the agent: it inherits the agent's
//! yaw and position and adds its own local pitch, local offset (eye height
//! plus head-bob) and field of view.
//!
//! Coordinate convention: +Y up, forward is -Z, right is +X. Pitch is stored
//! in degrees with positive values looking down.

use glam::{Quat, Vec2, Vec3};

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV: f32 = 60.0;

/// Camera state owned by the controller.
#[derive(Clone, Debug)]
pub struct CameraRig {
    /// Local pitch in degrees (positive = down)
    pitch: f32,
    /// Offset from the agent origin in agent space
    local_offset: Vec3,
    /// Eye height captured at construction; head-bob oscillates around it
    default_y: f32,
    /// Current vertical field of view in degrees
    fov: f32,
    /// Field of view captured at construction; zoom returns to it
    default_fov: f32,
    /// Viewport aspect ratio (width / height)
    aspect_ratio: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.7, 0.0), DEFAULT_FOV)
    }
}

impl CameraRig {
    /// Create a rig at `local_offset` with the given field of view (degrees).
    pub fn new(local_offset: Vec3, fov: f32) -> Self {
        Self {
            pitch: 0.0,
            local_offset,
            default_y: local_offset.y,
            fov,
            default_fov: fov,
            aspect_ratio: 16.0 / 9.0,
        }
    }

    pub fn with_aspect(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    #[inline]
    pub fn pitch_degrees(&self) -> f32 {
        self.pitch
    }

    /// Set the pitch directly. Callers own the clamp.
    #[inline]
    pub fn set_pitch_degrees(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    #[inline]
    pub fn local_offset(&self) -> Vec3 {
        self.local_offset
    }

    /// Move the camera vertically in agent space (head-bob).
    #[inline]
    pub fn set_local_y(&mut self, y: f32) {
        self.local_offset.y = y;
    }

    #[inline]
    pub fn default_y(&self) -> f32 {
        self.default_y
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    #[inline]
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    #[inline]
    pub fn default_fov(&self) -> f32 {
        self.default_fov
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Camera rotation in world space given the agent's orientation.
    pub fn world_rotation(&self, body_orientation: Quat) -> Quat {
        body_orientation * Quat::from_rotation_x(-self.pitch.to_radians())
    }

    /// Camera position in world space given the agent's transform.
    pub fn world_position(&self, body_position: Vec3, body_orientation: Quat) -> Vec3 {
        body_position + body_orientation * self.local_offset
    }

    /// World-space forward direction of the camera.
    pub fn forward(&self, body_orientation: Quat) -> Vec3 {
        self.world_rotation(body_orientation) * Vec3::NEG_Z
    }

    /// World-space up direction of the camera.
    pub fn up(&self, body_orientation: Quat) -> Vec3 {
        self.world_rotation(body_orientation) * Vec3::Y
    }

    /// Ray through a viewport point.
    ///
    /// # Arguments
    /// * `body_position` - Agent position in world space
    /// * `body_orientation` - Agent orientation in world space
    /// * `viewport` - Normalized viewport coordinates (0-1, 0-1) where (0,0) is bottom-left
    ///
    /// # Returns
    /// `(origin, direction)` with a normalized direction
    pub fn viewport_ray(
        &self,
        body_position: Vec3,
        body_orientation: Quat,
        viewport: Vec2,
    ) -> (Vec3, Vec3) {
        // Viewport to NDC (-1 to 1)
        let ndc = viewport * 2.0 - Vec2::ONE;
        let half_fov = (self.fov.to_radians() * 0.5).tan();

        let rotation = self.world_rotation(body_orientation);
        let forward = rotation * Vec3::NEG_Z;
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;

        let direction = (forward
            + right * ndc.x * self.aspect_ratio * half_fov
            + up * ndc.y * half_fov)
            .normalize();

        (self.world_position(body_position, body_orientation), direction)
    }
}
