//! First-Person Controller
//!
//! The frame orchestrator. One [`FirstPersonController::tick`] per rendered
//! frame runs the steps below in a fixed order; later steps observe what
//! earlier steps changed in the same frame.
//!
//! 1. Debug kill switch (raw key, independent of the input source)
//! 2. Input frame from the selected source
//! 3. While movement is enabled: velocity, look, jump, crouch trigger,
//!    head-bob, zoom trigger, then gravity/slope and the physics commit
//! 4. Crouch and zoom animations advance
//! 5. Interaction protocol (not while paused)
//! 6. Footstep cadence
//! 7. Climb override
//! 8. Pause toggle
//!
//! # Usage
//!
//! ```rust,ignore
//! use strider_engine::prelude::*;
//!
//! let mut controller = FirstPersonController::builder(ControllerConfig::default())
//!     .camera(CameraRig::default())
//!     .body(KinematicCapsule::on_ground(Vec3::ZERO, 0.0, CapsuleShape::new(1.5, Vec3::ZERO)))
//!     .build()?;
//!
//! controller.handle_key(KeyCode::W, true);
//! controller.tick(1.0 / 60.0, &mut FrameContext::new(&world, &mut NoTargets));
//! ```

pub mod builder;

use glam::Vec3;
use tracing::{debug, info};

use crate::camera::{CameraRig, LookIntegrator};
use crate::config::ControllerConfig;
use crate::input::{Action, ActionEvent, InputDriver, InputSource, KeyCode, KeyboardState};
use crate::interaction::{
    CrosshairSink, InteractionProtocol, InteractionWorld, ModalState, SpriteHandle, apply_effects,
};
use crate::physics::{CharacterBody, ObjectId, PhysicsProbe};
use crate::player::{
    AgentState, AudioSink, ClimbController, ClipHandle, CrouchController, FootstepCadence,
    HeadBob, PauseSignal, ZoomController, kinematics,
};

pub use builder::FirstPersonControllerBuilder;

/// Longest frame the controller integrates in one step (seconds).
pub const MAX_FRAME_DT: f32 = 0.1;

/// World collaborators borrowed for one tick.
pub struct FrameContext<'a> {
    pub probe: &'a dyn PhysicsProbe,
    pub targets: &'a mut dyn InteractionWorld,
}

impl<'a> FrameContext<'a> {
    pub fn new(probe: &'a dyn PhysicsProbe, targets: &'a mut dyn InteractionWorld) -> Self {
        Self { probe, targets }
    }
}

/// Audio sink used when the host supplies none.
struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_one_shot(&mut self, _clip: ClipHandle, _volume: f32) {}
}

/// First-person locomotion and interaction controller.
pub struct FirstPersonController {
    config: ControllerConfig,

    // Collaborators
    camera: CameraRig,
    body: Box<dyn CharacterBody>,
    crosshair: Option<Box<dyn CrosshairSink>>,
    modal: Option<Box<dyn ModalState>>,
    audio: Option<Box<dyn AudioSink>>,

    // Input
    input: InputDriver,
    /// Raw keys for the debug kill switch
    raw_keys: KeyboardState,

    // Frame steps
    state: AgentState,
    crouch: CrouchController,
    zoom: ZoomController,
    head_bob: HeadBob,
    footsteps: FootstepCadence,
    protocol: Option<InteractionProtocol>,
    pause: PauseSignal,

    active: bool,
}

impl FirstPersonController {
    pub fn builder(config: ControllerConfig) -> FirstPersonControllerBuilder {
        FirstPersonControllerBuilder::new(config)
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Feed a key or mouse-button event.
    ///
    /// Every key reaches the raw debug state; the polled source also gets it.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if !self.active {
            return;
        }
        self.raw_keys.handle_key(key, pressed);
        if let Some(polled) = self.input.as_legacy_mut() {
            polled.handle_key(key, pressed);
        }
    }

    /// Feed raw mouse motion (screen space, `dy` positive = down). Polled source only.
    pub fn handle_mouse_motion(&mut self, dx: f32, dy: f32) {
        if !self.active {
            return;
        }
        if let Some(polled) = self.input.as_legacy_mut() {
            polled.handle_mouse_motion(dx, dy);
        }
    }

    /// Feed a structured action event. Returns `false` if it was dropped.
    pub fn push_action(&mut self, event: ActionEvent) -> bool {
        self.active && self.input.push_action(event)
    }

    // ------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------

    /// Run one frame.
    pub fn tick(&mut self, dt: f32, ctx: &mut FrameContext<'_>) {
        if !self.active {
            return;
        }
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        let features = self.config.features;

        // Debug kill switch
        if self.config.debug_mode && self.raw_keys.was_pressed(self.config.keys.debug_toggle) {
            self.state.movement_enabled = !self.state.movement_enabled;
            debug!(movement_enabled = self.state.movement_enabled, "debug movement toggle");
        }

        let input = self.input.next_frame();
        self.state.grounded = self.body.is_grounded();
        let sprinting = features.sprint && input.sprint_held;

        if self.state.movement_enabled {
            let speed = kinematics::select_speed(
                &self.config.movement,
                features.sprint,
                self.state.crouching,
                input.sprint_held,
            );
            self.state.velocity = kinematics::resolve_velocity(
                input.move_axis,
                speed,
                self.body.orientation(),
                self.state.velocity,
            );

            let orientation = LookIntegrator::from_tuning(&self.config.look).apply(
                input.look_delta,
                &mut self.camera,
                self.body.orientation(),
            );
            self.body.set_orientation(orientation);

            if features.jump && input.jump_pressed && self.state.grounded {
                self.state.velocity.y = self.config.jump.jump_force;
            }

            if features.crouch && input.crouch_pressed {
                let camera_position = self.camera_position();
                let outcome = self.crouch.trigger(
                    &self.state,
                    &self.config.crouch,
                    self.body.capsule(),
                    camera_position,
                    ctx.probe,
                );
                debug!(?outcome, "crouch pressed");
            }

            if features.head_bob {
                self.head_bob.update(
                    dt,
                    &self.state,
                    sprinting,
                    &self.config.head_bob,
                    &mut self.camera,
                );
            }

            if features.zoom {
                self.zoom.handle_input(
                    input.zoom_pressed,
                    input.zoom_released,
                    input.zoom_held,
                    &self.camera,
                    &self.config.zoom,
                );
            }

            kinematics::apply_physics(
                &mut self.state,
                self.body.as_mut(),
                ctx.probe,
                &self.config.movement,
                features.slope_slide,
                dt,
            );
        }

        if features.crouch {
            self.crouch.advance(dt, &mut self.state, self.body.as_mut());
        }
        if features.zoom {
            self.zoom.advance(dt, &mut self.camera);
        }

        if features.interact && !self.state.paused {
            self.update_interaction(input.interact_pressed, ctx);
        }

        if features.footsteps {
            let mut silent = SilentAudio;
            let audio: &mut dyn AudioSink = match self.audio.as_deref_mut() {
                Some(audio) => audio,
                None => &mut silent,
            };
            self.footsteps.update(
                dt,
                &self.state,
                input.has_move_input(),
                sprinting,
                self.body.position(),
                ctx.probe,
                audio,
                &self.config.footsteps,
            );
        }

        if features.climb && self.state.climbing && !self.state.paused {
            ClimbController::update(
                dt,
                input.move_axis,
                &mut self.state,
                self.body.as_mut(),
                self.config.movement.climb_speed,
            );
        }

        if features.pause && input.pause_pressed {
            self.pause.toggle(&mut self.state);
        }

        self.raw_keys.end_frame();
    }

    fn update_interaction(&mut self, interact_pressed: bool, ctx: &mut FrameContext<'_>) {
        let Some(protocol) = self.protocol.as_mut() else {
            return;
        };
        let tuning = &self.config.interaction;
        let modal_open = self.modal.as_ref().is_some_and(|modal| modal.text_box_open());

        let sample = protocol.sample(
            tuning,
            &self.camera,
            self.body.position(),
            self.body.orientation(),
            ctx.probe,
            ctx.targets,
            modal_open,
        );
        let effects = protocol.update(&sample, interact_pressed, tuning);
        apply_effects(
            &effects,
            ctx.targets,
            self.crosshair
                .as_mut()
                .map(|sink| sink.as_mut() as &mut dyn CrosshairSink),
            tuning.crosshair_offset,
        );
    }

    /// Tear down: drop subscriptions, stop animations, release focus and
    /// highlight. Later ticks do nothing.
    pub fn shutdown(&mut self, targets: &mut dyn InteractionWorld) {
        if !self.active {
            return;
        }

        for action in [Action::Jump, Action::Crouch, Action::Interact, Action::Pause] {
            self.input.unbind(action);
        }
        self.input.disable();

        self.crouch.cancel();
        self.zoom.cancel();

        if let Some(protocol) = self.protocol.as_mut() {
            let effects = protocol.reset();
            apply_effects(
                &effects,
                targets,
                self.crosshair
                    .as_mut()
                    .map(|sink| sink.as_mut() as &mut dyn CrosshairSink),
                self.config.interaction.crosshair_offset,
            );
        }

        self.active = false;
        info!("first-person controller shut down");
    }

    // ------------------------------------------------------------------
    // Host surface
    // ------------------------------------------------------------------

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Edit toggles and tuning between frames.
    pub fn config_mut(&mut self) -> &mut ControllerConfig {
        &mut self.config
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    /// World-space camera position.
    pub fn camera_position(&self) -> Vec3 {
        self.camera
            .world_position(self.body.position(), self.body.orientation())
    }

    pub fn body(&self) -> &dyn CharacterBody {
        self.body.as_ref()
    }

    pub fn body_mut(&mut self) -> &mut dyn CharacterBody {
        self.body.as_mut()
    }

    pub fn input(&self) -> &InputDriver {
        &self.input
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Flip pause regardless of the pause toggle and broadcast.
    pub fn toggle_pause(&mut self) -> bool {
        self.pause.toggle(&mut self.state)
    }

    pub fn pause_signal_mut(&mut self) -> &mut PauseSignal {
        &mut self.pause
    }

    pub fn can_pause(&self) -> bool {
        self.config.features.pause
    }

    pub fn set_can_pause(&mut self, can_pause: bool) {
        self.config.features.pause = can_pause;
        self.sync_binding(Action::Pause, can_pause);
    }

    pub fn can_interact(&self) -> bool {
        self.config.features.interact
    }

    pub fn set_can_interact(&mut self, can_interact: bool) {
        self.config.features.interact = can_interact;
        self.sync_binding(Action::Interact, can_interact && self.protocol.is_some());
    }

    fn sync_binding(&mut self, action: Action, bound: bool) {
        if !self.active {
            return;
        }
        if bound {
            self.input.bind(action);
        } else {
            self.input.unbind(action);
        }
    }

    pub fn movement_enabled(&self) -> bool {
        self.state.movement_enabled
    }

    pub fn set_movement_enabled(&mut self, enabled: bool) {
        self.state.movement_enabled = enabled;
    }

    /// Enter climbing. Takes effect while the climb toggle is on.
    pub fn start_climb(&mut self) {
        self.state.climbing = true;
    }

    /// Leave climbing and give movement back unless paused.
    pub fn stop_climb(&mut self) {
        self.state.climbing = false;
        if !self.state.paused {
            self.state.movement_enabled = true;
        }
    }

    /// Crosshair image for the undetected state.
    pub fn default_crosshair(&self) -> SpriteHandle {
        self.config.interaction.normal_crosshair
    }

    pub fn is_crouch_transitioning(&self) -> bool {
        self.crouch.is_transitioning()
    }

    pub fn is_zoom_animating(&self) -> bool {
        self.zoom.is_animating()
    }

    /// Target of the zoom animation in flight, if any.
    pub fn zoom_target(&self) -> Option<f32> {
        self.zoom.target_fov()
    }

    /// Focused (focus tracker) or targeted (latch) object.
    pub fn current_target(&self) -> Option<ObjectId> {
        self.protocol.as_ref().and_then(InteractionProtocol::current_target)
    }

    pub fn footstep_timer(&self) -> f32 {
        self.footsteps.timer()
    }

    pub fn head_bob_phase(&self) -> f32 {
        self.head_bob.phase()
    }
}

impl std::fmt::Debug for FirstPersonController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirstPersonController")
            .field("state", &self.state)
            .field("camera", &self.camera)
            .field("input", &self.input.kind())
            .field("protocol", &self.protocol.as_ref().map(InteractionProtocol::kind))
            .field("active", &self.active)
            .finish()
    }
}
