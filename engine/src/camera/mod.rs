//! Camera Module
//!
//! First-person camera state and mouse-look math. Window-system agnostic: it
//! only deals with camera state, rays and rotations.

pub mod look;
pub mod rig;

pub use look::LookIntegrator;
pub use rig::{CameraRig, DEFAULT_FOV};
