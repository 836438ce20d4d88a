//! Strider Engine Library
//!
//! A frame-driven first-person controller: walking, sprinting, jumping,
//! crouching, mouse look, zoom, head-bob, footsteps, climbing, pausing and
//! crosshair interaction detection. The host owns the window, the physics
//! engine and the scene; the controller talks to them through small traits.
//!
//! # Modules
//!
//! - [`controller`] - Frame orchestrator and its builder
//! - [`input`] - Polled (legacy) and structured action input sources
//! - [`camera`] - Camera rig and look integration
//! - [`player`] - Kinematics, crouch, zoom, head-bob, footsteps, climb, pause
//! - [`interaction`] - Latch and focus-tracker detection protocols
//! - [`physics`] - Character body and ray-query seams with reference implementations
//! - [`config`] - Feature toggles and tuning, loaded from JSON
//!
//! # Example
//!
//! ```ignore
//! use strider_engine::prelude::*;
//!
//! let world = BoxWorld::with_ground(0.0, ObjectId(1), Some("Wood"));
//! let mut controller = FirstPersonController::builder(ControllerConfig::default())
//!     .camera(CameraRig::default())
//!     .body(KinematicCapsule::on_ground(Vec3::ZERO, 0.0, CapsuleShape::new(1.5, Vec3::ZERO)))
//!     .build()?;
//!
//! // Event loop
//! controller.handle_key(KeyCode::W, true);
//! controller.handle_mouse_motion(12.0, -3.0);
//! controller.tick(1.0 / 60.0, &mut FrameContext::new(&world, &mut NoTargets));
//! ```

pub mod camera;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod interaction;
pub mod physics;
pub mod player;

pub use camera::CameraRig;
pub use config::{ControllerConfig, DetectionProtocolKind, FeatureToggles};
pub use controller::{FirstPersonController, FirstPersonControllerBuilder, FrameContext};
pub use error::{ControllerError, Result};
pub use input::{ActionEvent, InputSourceKind, KeyCode};

/// Everything a host usually needs.
pub mod prelude {
    pub use glam::{Quat, Vec2, Vec3};

    pub use crate::camera::CameraRig;
    pub use crate::config::{ControllerConfig, DetectionProtocolKind, FeatureToggles};
    pub use crate::controller::{FirstPersonController, FrameContext};
    pub use crate::error::{ControllerError, Result};
    pub use crate::input::{Action, ActionEvent, InputSourceKind, KeyCode};
    pub use crate::interaction::{
        CrosshairSink, Focusable, Interactable, InteractionWorld, ModalState, NoTargets, Outline,
        SpriteHandle,
    };
    pub use crate::physics::{
        BoxCollider, BoxWorld, CapsuleShape, CharacterBody, KinematicCapsule, LayerMask, ObjectId,
        PhysicsProbe,
    };
    pub use crate::player::{AudioSink, ClipHandle, FootstepClips};
}
