//! Strider Sim - Headless Controller Run
//!
//! Run with: `cargo run --bin strider-sim -- [config.json] [frames]`
//!
//! Builds a small box world (wooden ground, a stone walkway and an
//! interactable crate on the interaction layer), then drives a scripted input
//! sequence through the controller at 60 Hz:
//!
//! - walk forward, sprint, crouch and stand
//! - jump, zoom in and out, sweep the view with the mouse
//! - interact with the crate, pause and unpause
//!
//! Set `RUST_LOG=strider_engine=debug` to see every transition.

use std::collections::HashMap;
use std::process::ExitCode;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use strider_engine::config::INTERACTABLE_LAYER;
use strider_engine::prelude::*;

/// Fixed simulation step (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 600;

const GROUND: ObjectId = ObjectId(1);
const WALKWAY: ObjectId = ObjectId(2);
const CRATE: ObjectId = ObjectId(3);

/// Interactive crate with every capability.
#[derive(Debug, Default)]
struct Crate {
    interactions: u32,
    focused: bool,
    outlined: bool,
}

impl Interactable for Crate {
    fn interact(&mut self) {
        self.interactions += 1;
        info!(count = self.interactions, "crate used");
    }
}

impl Focusable for Crate {
    fn on_focus(&mut self) {
        self.focused = true;
        debug!("crate focused");
    }

    fn on_lose_focus(&mut self) {
        self.focused = false;
        debug!("crate lost focus");
    }

    fn on_interact(&mut self) {
        self.interactions += 1;
        info!(count = self.interactions, "crate used (focus)");
    }
}

impl Outline for Crate {
    fn set_outline(&mut self, enabled: bool) {
        self.outlined = enabled;
    }
}

#[derive(Debug, Default)]
struct Scene {
    crates: HashMap<ObjectId, Crate>,
}

impl InteractionWorld for Scene {
    fn interactable(&mut self, object: ObjectId) -> Option<&mut dyn Interactable> {
        self.crates.get_mut(&object).map(|c| c as &mut dyn Interactable)
    }

    fn focusable(&mut self, object: ObjectId) -> Option<&mut dyn Focusable> {
        self.crates.get_mut(&object).map(|c| c as &mut dyn Focusable)
    }

    fn outline(&mut self, object: ObjectId) -> Option<&mut dyn Outline> {
        self.crates.get_mut(&object).map(|c| c as &mut dyn Outline)
    }
}

struct LogCrosshair;

impl CrosshairSink for LogCrosshair {
    fn set_crosshair(&mut self, _active: bool, _offset: Vec3, sprite: SpriteHandle, detected: bool) {
        debug!(sprite = sprite.0, detected, "crosshair");
    }
}

struct LogAudio;

impl AudioSink for LogAudio {
    fn play_one_shot(&mut self, clip: ClipHandle, volume: f32) {
        debug!(clip = clip.0, volume, "footstep played");
    }
}

fn build_world() -> BoxWorld {
    let mut world = BoxWorld::with_ground(0.0, GROUND, Some("Footsteps/WOOD"));
    world.insert(
        BoxCollider::new(WALKWAY, Vec3::new(-2.0, -0.2, -14.0), Vec3::new(2.0, 0.0, -5.0))
            .with_tag("Footsteps/STONE"),
    );
    world.insert(
        BoxCollider::new(CRATE, Vec3::new(-0.5, 0.0, -17.0), Vec3::new(0.5, 1.5, -16.0))
            .on_layer(INTERACTABLE_LAYER),
    );
    world
}

fn clips() -> FootstepClips {
    FootstepClips {
        forest: vec![ClipHandle(10), ClipHandle(11)],
        wood: vec![ClipHandle(20), ClipHandle(21), ClipHandle(22)],
        stone: vec![ClipHandle(30), ClipHandle(31)],
        metal: vec![ClipHandle(40)],
        tile: vec![ClipHandle(50)],
    }
}

/// Scripted input for one frame.
fn drive(controller: &mut FirstPersonController, frame: u32) {
    match frame {
        0 => controller.handle_key(KeyCode::W, true),
        60 => controller.handle_key(KeyCode::ShiftLeft, true),
        120 => controller.handle_key(KeyCode::ShiftLeft, false),
        150 => controller.handle_key(KeyCode::C, true),
        151 => controller.handle_key(KeyCode::C, false),
        240 => controller.handle_key(KeyCode::C, true),
        241 => controller.handle_key(KeyCode::C, false),
        270 => controller.handle_key(KeyCode::Space, true),
        271 => controller.handle_key(KeyCode::Space, false),
        300 => controller.handle_key(KeyCode::MouseRight, true),
        330 => controller.handle_key(KeyCode::MouseRight, false),
        380 => controller.handle_key(KeyCode::W, false),
        400 => controller.handle_key(KeyCode::E, true),
        401 => controller.handle_key(KeyCode::E, false),
        450 => controller.handle_key(KeyCode::Escape, true),
        451 => controller.handle_key(KeyCode::Escape, false),
        500 => controller.handle_key(KeyCode::Escape, true),
        501 => controller.handle_key(KeyCode::Escape, false),
        _ => {}
    }

    // Look left and back again while walking
    if (180..220).contains(&frame) {
        controller.handle_mouse_motion(-8.0, 0.0);
    } else if (220..260).contains(&frame) {
        controller.handle_mouse_motion(8.0, 0.0);
    }
}

fn run(config: ControllerConfig, frames: u32) -> Result<()> {
    let world = build_world();
    let mut scene = Scene::default();
    scene.crates.insert(CRATE, Crate::default());

    let mut controller = FirstPersonController::builder(config)
        .camera(CameraRig::default())
        .body(KinematicCapsule::on_ground(
            Vec3::new(0.0, 0.0, 0.0),
            0.0,
            CapsuleShape::new(1.5, Vec3::ZERO),
        ))
        .crosshair(LogCrosshair)
        .audio(LogAudio)
        .footstep_clips(clips())
        .rng_seed(7)
        .build()?;

    let pauses = std::rc::Rc::new(std::cell::Cell::new(0u32));
    let seen = pauses.clone();
    controller
        .pause_signal_mut()
        .subscribe(move || seen.set(seen.get() + 1));

    for frame in 0..frames {
        drive(&mut controller, frame);
        controller.tick(FRAME_DT, &mut FrameContext::new(&world, &mut scene));

        if frame % 60 == 0 {
            let state = controller.state();
            info!(
                frame,
                position = ?controller.body().position(),
                grounded = state.grounded,
                crouching = state.crouching,
                paused = state.paused,
                fov = controller.camera().fov(),
                target = ?controller.current_target(),
                "tick"
            );
        }
    }

    controller.shutdown(&mut scene);

    let crate_state = scene.crates.get(&CRATE);
    info!(
        frames,
        position = ?controller.body().position(),
        pitch = controller.camera().pitch_degrees(),
        interactions = crate_state.map_or(0, |c| c.interactions),
        outlined = crate_state.is_some_and(|c| c.outlined),
        pause_notifications = pauses.get(),
        "simulation finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => match ControllerConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!(%path, "failed to load config: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => ControllerConfig::default(),
    };

    let frames = match args.next().map(|s| s.parse::<u32>()) {
        Some(Ok(frames)) => frames,
        Some(Err(e)) => {
            error!("invalid frame count: {e}");
            return ExitCode::FAILURE;
        }
        None => DEFAULT_FRAMES,
    };

    info!(
        input_source = ?config.input_source,
        detection = ?config.detection,
        frames,
        "starting simulation"
    );

    match run(config, frames) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("simulation failed: {e}");
            ExitCode::FAILURE
        }
    }
}
