//! Controller construction
//!
//! Collaborators are injected here instead of being looked up globally. The
//! camera rig and the character body are required; everything else is
//! optional and degrades to "nothing to notify".

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::camera::CameraRig;
use crate::config::ControllerConfig;
use crate::error::{ControllerError, Result};
use crate::input::{Action, InputDriver, InputSource};
use crate::interaction::{CrosshairSink, InteractionProtocol, ModalState};
use crate::physics::CharacterBody;
use crate::player::{
    AgentState, AudioSink, CrouchController, FootstepCadence, FootstepClips, HeadBob,
    PauseSignal, ZoomController,
};

use super::FirstPersonController;

/// Builder for [`FirstPersonController`].
#[derive(Default)]
pub struct FirstPersonControllerBuilder {
    config: ControllerConfig,
    camera: Option<CameraRig>,
    body: Option<Box<dyn CharacterBody>>,
    crosshair: Option<Box<dyn CrosshairSink>>,
    modal: Option<Box<dyn ModalState>>,
    audio: Option<Box<dyn AudioSink>>,
    footstep_clips: FootstepClips,
    rng_seed: Option<u64>,
}

impl FirstPersonControllerBuilder {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn camera(mut self, camera: CameraRig) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn body(mut self, body: impl CharacterBody + 'static) -> Self {
        self.body = Some(Box::new(body));
        self
    }

    pub fn crosshair(mut self, crosshair: impl CrosshairSink + 'static) -> Self {
        self.crosshair = Some(Box::new(crosshair));
        self
    }

    pub fn modal(mut self, modal: impl ModalState + 'static) -> Self {
        self.modal = Some(Box::new(modal));
        self
    }

    pub fn audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    pub fn footstep_clips(mut self, clips: FootstepClips) -> Self {
        self.footstep_clips = clips;
        self
    }

    /// Fix the footstep clip RNG for reproducible runs.
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Validate the configuration and activate the controller.
    ///
    /// # Errors
    /// * [`ControllerError::InvalidConfig`] for out-of-range tuning
    /// * [`ControllerError::MissingCollaborator`] without a camera rig or body
    pub fn build(self) -> Result<FirstPersonController> {
        self.config.validate()?;

        let camera = self
            .camera
            .ok_or(ControllerError::MissingCollaborator("camera rig"))?;
        let body = self
            .body
            .ok_or(ControllerError::MissingCollaborator("character body"))?;

        let config = self.config;
        let features = config.features;

        let mut input = InputDriver::new(config.input_source, config.keys.clone());
        if features.jump {
            input.bind(Action::Jump);
        }
        if features.crouch {
            input.bind(Action::Crouch);
        }
        if features.pause {
            input.bind(Action::Pause);
        }
        let protocol = InteractionProtocol::from_kind(config.detection);
        if protocol.is_some() && features.interact {
            input.bind(Action::Interact);
        }

        let rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            input_source = ?config.input_source,
            detection = ?config.detection,
            subscriptions = input.subscription_count(),
            "first-person controller activated"
        );

        let state = AgentState {
            grounded: body.is_grounded(),
            ..Default::default()
        };

        Ok(FirstPersonController {
            footsteps: FootstepCadence::new(self.footstep_clips, rng),
            config,
            camera,
            body,
            crosshair: self.crosshair,
            modal: self.modal,
            audio: self.audio,
            input,
            raw_keys: Default::default(),
            state,
            crouch: CrouchController::new(),
            zoom: ZoomController::new(),
            head_bob: HeadBob::new(),
            protocol,
            pause: PauseSignal::new(),
            active: true,
        })
    }
}
