//! Player Module
//!
//! Per-agent movement state and the frame steps that mutate it.
//!
//! # Components
//!
//! - [`AgentState`] - Velocity and mode flags shared by every frame step
//! - [`kinematics`] - Speed selection, velocity resolution, gravity and slope assist
//! - [`Tween`] / [`TweenSlot`] - Cancellable timed interpolation advanced per tick
//! - [`CrouchController`] - Crouch/stand capsule transition with ceiling check
//! - [`ZoomController`] - Field-of-view zoom transition
//! - [`HeadBob`] - Sinusoidal camera bob while moving on the ground
//! - [`FootstepCadence`] - Surface-dependent footstep audio
//! - [`ClimbController`] - Climb override on the agent's up/right plane
//! - [`PauseSignal`] - Pause flag with observer broadcast

pub mod climb;
pub mod crouch;
pub mod footsteps;
pub mod head_bob;
pub mod kinematics;
pub mod pause;
pub mod state;
pub mod tween;
pub mod zoom;

pub use climb::ClimbController;
pub use crouch::{CrouchController, CrouchTrigger};
pub use footsteps::{
    AudioSink, ClipHandle, FootstepCadence, FootstepClips, FootstepCue, SurfaceKind,
};
pub use head_bob::HeadBob;
pub use pause::{ListenerId, PauseSignal};
pub use state::AgentState;
pub use tween::{Lerp, Tween, TweenSlot};
pub use zoom::ZoomController;
