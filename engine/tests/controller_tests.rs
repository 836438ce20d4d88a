//! Controller Tests - Frame Loop Behaviour
//!
//! Drives a full controller against the reference box world and checks the
//! frame-level guarantees: pitch limits, speed selection, crouch headroom,
//! zoom retriggering, footstep cadence, pause symmetry and the structured
//! input lifecycle.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use strider_engine::input::InputSource;
use strider_engine::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn standing_body() -> KinematicCapsule {
    KinematicCapsule::on_ground(Vec3::ZERO, 0.0, CapsuleShape::new(1.5, Vec3::ZERO))
}

fn build(config: ControllerConfig) -> FirstPersonController {
    FirstPersonController::builder(config)
        .camera(CameraRig::default())
        .body(standing_body())
        .rng_seed(42)
        .build()
        .unwrap()
}

fn tick(controller: &mut FirstPersonController, world: &BoxWorld, dt: f32) {
    controller.tick(dt, &mut FrameContext::new(world, &mut NoTargets));
}

fn run(controller: &mut FirstPersonController, world: &BoxWorld, frames: usize, dt: f32) {
    for _ in 0..frames {
        tick(controller, world, dt);
    }
}

/// Press and release a key across one frame.
fn tap(controller: &mut FirstPersonController, world: &BoxWorld, key: KeyCode) {
    controller.handle_key(key, true);
    tick(controller, world, DT);
    controller.handle_key(key, false);
}

fn ground() -> BoxWorld {
    BoxWorld::with_ground(0.0, ObjectId(1), Some("Footsteps/WOOD"))
}

/// Crouch and wait for the transition to finish.
fn crouch(controller: &mut FirstPersonController, world: &BoxWorld) {
    tap(controller, world, KeyCode::C);
    run(controller, world, 30, DT);
    assert!(controller.state().crouching);
    assert!(!controller.is_crouch_transitioning());
}

#[derive(Clone, Default)]
struct RecordingAudio {
    played: Rc<RefCell<Vec<(ClipHandle, f32)>>>,
}

impl AudioSink for RecordingAudio {
    fn play_one_shot(&mut self, clip: ClipHandle, volume: f32) {
        self.played.borrow_mut().push((clip, volume));
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_build_requires_body_and_camera() {
    let err = FirstPersonController::builder(ControllerConfig::default())
        .build()
        .unwrap_err();
    assert!(matches!(err, ControllerError::MissingCollaborator(_)));
}

#[test]
fn test_build_from_partial_json() {
    let config = ControllerConfig::from_json_str(
        r#"{ "detection": "focus_tracker", "features": { "zoom": false } }"#,
    )
    .unwrap();
    let controller = build(config);

    assert_eq!(controller.config().detection, DetectionProtocolKind::FocusTracker);
    assert!(!controller.config().features.zoom);
    assert!(controller.config().features.sprint);
}

// ============================================================================
// Look
// ============================================================================

proptest! {
    #[test]
    fn prop_pitch_stays_within_limits(
        motions in prop::collection::vec((-400.0f32..400.0, -400.0f32..400.0), 1..60)
    ) {
        let world = ground();
        let mut controller = build(ControllerConfig::default());
        let look = controller.config().look;

        for (dx, dy) in motions {
            controller.handle_mouse_motion(dx, dy);
            tick(&mut controller, &world, DT);
            let pitch = controller.camera().pitch_degrees();
            prop_assert!(pitch >= -look.degrees_up - 1e-3);
            prop_assert!(pitch <= look.degrees_down + 1e-3);
        }
    }
}

#[test]
fn test_mouse_down_looks_down_and_clamps() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());

    // 1000 raw units * 0.1 scale * 2.0 sensitivity = 200 degrees requested
    controller.handle_mouse_motion(0.0, 1000.0);
    tick(&mut controller, &world, DT);
    assert_eq!(controller.camera().pitch_degrees(), 80.0);

    controller.handle_mouse_motion(0.0, -3000.0);
    tick(&mut controller, &world, DT);
    assert_eq!(controller.camera().pitch_degrees(), -80.0);
}

#[test]
fn test_yaw_turns_the_body_not_the_camera() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());

    // 450 * 0.1 * 2.0 = 90 degrees to the right
    controller.handle_mouse_motion(450.0, 0.0);
    tick(&mut controller, &world, DT);

    let forward = controller.body().orientation() * Vec3::NEG_Z;
    assert!((forward - Vec3::X).length() < 1e-3);
    assert_eq!(controller.camera().pitch_degrees(), 0.0);
}

// ============================================================================
// Speed selection
// ============================================================================

#[test]
fn test_walk_sprint_and_crouch_speeds() {
    let world = ground();

    let mut walker = build(ControllerConfig::default());
    walker.handle_key(KeyCode::W, true);
    run(&mut walker, &world, 10, 0.1);
    assert!(approx_eq(walker.body().position().z, -3.0));

    let mut sprinter = build(ControllerConfig::default());
    sprinter.handle_key(KeyCode::W, true);
    sprinter.handle_key(KeyCode::ShiftLeft, true);
    run(&mut sprinter, &world, 10, 0.1);
    assert!(approx_eq(sprinter.body().position().z, -6.0));

    // Crouching wins over a held sprint key
    let mut croucher = build(ControllerConfig::default());
    crouch(&mut croucher, &world);
    let start = croucher.body().position().z;
    croucher.handle_key(KeyCode::W, true);
    croucher.handle_key(KeyCode::ShiftLeft, true);
    run(&mut croucher, &world, 10, 0.1);
    assert!(approx_eq(croucher.body().position().z - start, -1.5));
}

#[test]
fn test_sprint_toggle_off_walks() {
    let world = ground();
    let mut config = ControllerConfig::default();
    config.features.sprint = false;
    let mut controller = build(config);

    controller.handle_key(KeyCode::W, true);
    controller.handle_key(KeyCode::ShiftLeft, true);
    run(&mut controller, &world, 10, 0.1);
    assert!(approx_eq(controller.body().position().z, -3.0));
}

#[test]
fn test_diagonal_is_not_faster() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());

    controller.handle_key(KeyCode::W, true);
    controller.handle_key(KeyCode::D, true);
    run(&mut controller, &world, 10, 0.1);

    let p = controller.body().position();
    assert!(approx_eq(Vec2::new(p.x, p.z).length(), 3.0));
}

#[test]
fn test_all_features_off_still_walks() {
    let world = ground();
    let mut config = ControllerConfig::default();
    config.features = FeatureToggles::none();
    let audio = RecordingAudio::default();
    let mut controller = FirstPersonController::builder(config)
        .camera(CameraRig::default())
        .body(standing_body())
        .audio(audio.clone())
        .footstep_clips(FootstepClips {
            wood: vec![ClipHandle(1)],
            ..Default::default()
        })
        .build()
        .unwrap();

    controller.handle_key(KeyCode::Space, true);
    controller.handle_key(KeyCode::Escape, true);
    controller.handle_key(KeyCode::C, true);
    controller.handle_key(KeyCode::W, true);
    run(&mut controller, &world, 10, 0.1);

    assert!(approx_eq(controller.body().position().z, -3.0));
    assert_eq!(controller.body().position().y, 0.0);
    assert!(!controller.is_paused());
    assert!(!controller.is_crouch_transitioning());
    assert!(audio.played.borrow().is_empty());
}

// ============================================================================
// Crouch
// ============================================================================

#[test]
fn test_crouch_resizes_capsule() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());

    crouch(&mut controller, &world);
    let capsule = controller.body().capsule();
    assert!(approx_eq(capsule.height, 0.6));
    assert!(approx_eq(capsule.center.y, 0.5));

    tap(&mut controller, &world, KeyCode::C);
    run(&mut controller, &world, 30, DT);
    assert!(!controller.state().crouching);
    assert!(approx_eq(controller.body().capsule().height, 1.5));
}

#[test]
fn test_cannot_stand_under_ceiling() {
    let mut world = ground();
    let mut controller = build(ControllerConfig::default());
    crouch(&mut controller, &world);

    // Camera sits at 0.7; the ceiling is half a metre above it
    world.insert(BoxCollider::new(
        ObjectId(9),
        Vec3::new(-1.0, 1.2, -1.0),
        Vec3::new(1.0, 1.5, 1.0),
    ));

    tap(&mut controller, &world, KeyCode::C);
    assert!(!controller.is_crouch_transitioning());
    run(&mut controller, &world, 30, DT);
    assert!(controller.state().crouching);
    assert!(approx_eq(controller.body().capsule().height, 0.6));

    world.remove(ObjectId(9));
    tap(&mut controller, &world, KeyCode::C);
    assert!(controller.is_crouch_transitioning());
    run(&mut controller, &world, 30, DT);
    assert!(!controller.state().crouching);
}

#[test]
fn test_crouch_press_ignored_mid_transition_and_airborne() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());

    tap(&mut controller, &world, KeyCode::C);
    assert!(controller.is_crouch_transitioning());
    // Second press during the transition does nothing
    tap(&mut controller, &world, KeyCode::C);
    run(&mut controller, &world, 30, DT);
    assert!(controller.state().crouching);

    // Jump, then press crouch in the air
    tap(&mut controller, &world, KeyCode::C);
    run(&mut controller, &world, 30, DT);
    tap(&mut controller, &world, KeyCode::Space);
    assert!(!controller.state().grounded);
    tap(&mut controller, &world, KeyCode::C);
    assert!(!controller.is_crouch_transitioning());
}

// ============================================================================
// Zoom
// ============================================================================

#[test]
fn test_zoom_release_mid_animation_returns_to_default() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());

    controller.handle_key(KeyCode::MouseRight, true);
    run(&mut controller, &world, 6, DT);
    let mid = controller.camera().fov();
    assert!(mid < 60.0 && mid > 30.0);

    controller.handle_key(KeyCode::MouseRight, false);
    tick(&mut controller, &world, DT);
    assert_eq!(controller.zoom_target(), Some(60.0));

    run(&mut controller, &world, 30, DT);
    assert!(!controller.is_zoom_animating());
    assert_eq!(controller.camera().fov(), 60.0);
}

proptest! {
    #[test]
    fn prop_zoom_settles_on_last_edge(held in prop::collection::vec(any::<bool>(), 1..40)) {
        let world = ground();
        let mut controller = build(ControllerConfig::default());
        let mut was_held = false;

        for &h in &held {
            if h != was_held {
                controller.handle_key(KeyCode::MouseRight, h);
                was_held = h;
            }
            tick(&mut controller, &world, DT);
            let fov = controller.camera().fov();
            prop_assert!((30.0 - 1e-3..=60.0 + 1e-3).contains(&fov));
        }

        run(&mut controller, &world, 30, DT);
        prop_assert!(!controller.is_zoom_animating());
        let expected = if was_held { 30.0 } else { 60.0 };
        prop_assert!(approx_eq(controller.camera().fov(), expected));
    }
}

#[test]
fn test_release_and_repress_between_ticks_stays_zoomed() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());

    controller.handle_key(KeyCode::MouseRight, true);
    run(&mut controller, &world, 30, DT);
    assert_eq!(controller.camera().fov(), 30.0);

    controller.handle_key(KeyCode::MouseRight, false);
    controller.handle_key(KeyCode::MouseRight, true);
    run(&mut controller, &world, 60, DT);
    assert_eq!(controller.camera().fov(), 30.0);
}

#[test]
fn test_structured_zoom_cancel_and_perform_in_one_frame() {
    let world = ground();
    let mut controller = structured();

    controller.push_action(ActionEvent::performed(Action::Zoom));
    run(&mut controller, &world, 30, DT);
    assert_eq!(controller.camera().fov(), 30.0);

    controller.push_action(ActionEvent::Canceled(Action::Zoom));
    controller.push_action(ActionEvent::performed(Action::Zoom));
    run(&mut controller, &world, 60, DT);
    assert_eq!(controller.camera().fov(), 30.0);

    // Press and release inside one frame still ends unzoomed
    controller.push_action(ActionEvent::Canceled(Action::Zoom));
    run(&mut controller, &world, 30, DT);
    controller.push_action(ActionEvent::performed(Action::Zoom));
    controller.push_action(ActionEvent::Canceled(Action::Zoom));
    run(&mut controller, &world, 60, DT);
    assert_eq!(controller.camera().fov(), 60.0);
}

#[test]
fn test_disabling_crouch_and_zoom_freezes_their_animations() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());

    controller.handle_key(KeyCode::MouseRight, true);
    tap(&mut controller, &world, KeyCode::C);
    run(&mut controller, &world, 3, DT);
    assert!(controller.is_crouch_transitioning());
    assert!(controller.is_zoom_animating());

    controller.config_mut().features.crouch = false;
    controller.config_mut().features.zoom = false;
    let fov = controller.camera().fov();
    let height = controller.body().capsule().height;

    run(&mut controller, &world, 60, DT);
    assert!(!controller.state().crouching);
    assert_eq!(controller.camera().fov(), fov);
    assert_eq!(controller.body().capsule().height, height);
}

// ============================================================================
// Footsteps
// ============================================================================

fn with_audio(audio: RecordingAudio) -> FirstPersonController {
    let clips = FootstepClips {
        wood: vec![ClipHandle(1), ClipHandle(2)],
        tile: vec![ClipHandle(7)],
        ..Default::default()
    };
    FirstPersonController::builder(ControllerConfig::default())
        .camera(CameraRig::default())
        .body(standing_body())
        .audio(audio)
        .footstep_clips(clips)
        .rng_seed(3)
        .build()
        .unwrap()
}

#[test]
fn test_step_intervals_per_stance() {
    let world = ground();

    let audio = RecordingAudio::default();
    let mut walker = with_audio(audio.clone());
    walker.handle_key(KeyCode::W, true);
    tick(&mut walker, &world, DT);
    assert_eq!(audio.played.borrow().len(), 1);
    assert!(approx_eq(walker.footstep_timer(), 0.5));

    let mut sprinter = with_audio(RecordingAudio::default());
    sprinter.handle_key(KeyCode::W, true);
    sprinter.handle_key(KeyCode::ShiftLeft, true);
    tick(&mut sprinter, &world, DT);
    assert!(approx_eq(sprinter.footstep_timer(), 0.3));

    let mut croucher = with_audio(RecordingAudio::default());
    crouch(&mut croucher, &world);
    croucher.handle_key(KeyCode::W, true);
    tick(&mut croucher, &world, DT);
    assert!(approx_eq(croucher.footstep_timer(), 0.75));
}

#[test]
fn test_step_plays_surface_pool_and_volume() {
    let audio = RecordingAudio::default();
    let mut controller = with_audio(audio.clone());

    let tile = BoxWorld::with_ground(0.0, ObjectId(1), Some("Footsteps/TILE"));
    controller.handle_key(KeyCode::W, true);
    tick(&mut controller, &tile, DT);
    assert_eq!(*audio.played.borrow(), vec![(ClipHandle(7), 0.3)]);

    // Unknown tags fall back to the wood pool at full volume
    let unknown = BoxWorld::with_ground(0.0, ObjectId(1), Some("Carpet"));
    run(&mut controller, &unknown, 31, DT);
    let played = audio.played.borrow();
    let (clip, volume) = played[1];
    assert!(clip == ClipHandle(1) || clip == ClipHandle(2));
    assert_eq!(volume, 1.0);
}

#[test]
fn test_no_steps_when_still_or_airborne() {
    let world = ground();
    let audio = RecordingAudio::default();
    let mut controller = with_audio(audio.clone());

    run(&mut controller, &world, 60, DT);
    assert!(audio.played.borrow().is_empty());

    controller.handle_key(KeyCode::Space, true);
    tick(&mut controller, &world, DT);
    controller.handle_key(KeyCode::W, true);
    run(&mut controller, &world, 10, DT);
    assert!(!controller.state().grounded);
    assert!(audio.played.borrow().is_empty());
}

// ============================================================================
// Pause
// ============================================================================

#[test]
fn test_pause_twice_is_symmetric() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());
    let notified = Rc::new(RefCell::new(Vec::new()));
    let log = notified.clone();
    controller
        .pause_signal_mut()
        .subscribe(move || log.borrow_mut().push("pause"));

    let before = *controller.state();
    tap(&mut controller, &world, KeyCode::Escape);
    assert!(controller.is_paused());
    assert!(!controller.movement_enabled());

    tap(&mut controller, &world, KeyCode::Escape);
    assert_eq!(controller.is_paused(), before.paused);
    assert_eq!(controller.movement_enabled(), before.movement_enabled);
    assert_eq!(notified.borrow().len(), 2);
}

#[test]
fn test_pause_blocks_movement() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());

    controller.toggle_pause();
    controller.handle_key(KeyCode::W, true);
    run(&mut controller, &world, 10, 0.1);
    assert_eq!(controller.body().position(), Vec3::ZERO);
}

#[test]
fn test_pause_toggle_off_ignores_key() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());
    controller.set_can_pause(false);

    tap(&mut controller, &world, KeyCode::Escape);
    assert!(!controller.is_paused());
}

#[test]
fn test_unsubscribed_listener_not_notified() {
    let mut controller = build(ControllerConfig::default());
    let count = Rc::new(RefCell::new(0));
    let seen = count.clone();
    let id = controller
        .pause_signal_mut()
        .subscribe(move || *seen.borrow_mut() += 1);

    controller.toggle_pause();
    assert!(controller.pause_signal_mut().unsubscribe(id));
    controller.toggle_pause();
    assert_eq!(*count.borrow(), 1);
}

// ============================================================================
// Structured input
// ============================================================================

fn structured() -> FirstPersonController {
    let mut config = ControllerConfig::default();
    config.input_source = InputSourceKind::Structured;
    build(config)
}

#[test]
fn test_structured_move_and_jump() {
    let world = ground();
    let mut controller = structured();

    controller.push_action(ActionEvent::value(Action::Move, Vec2::new(0.0, 1.0)));
    run(&mut controller, &world, 10, 0.1);
    assert!(approx_eq(controller.body().position().z, -3.0));

    controller.push_action(ActionEvent::Canceled(Action::Move));
    assert!(controller.push_action(ActionEvent::performed(Action::Jump)));
    tick(&mut controller, &world, DT);
    assert!(!controller.state().grounded);
}

#[test]
fn test_structured_subscriptions_are_idempotent() {
    let mut controller = structured();
    // Jump, crouch, pause and interact (latch protocol by default)
    assert_eq!(controller.input().subscription_count(), 4);

    controller.set_can_interact(true);
    controller.set_can_pause(true);
    assert_eq!(controller.input().subscription_count(), 4);

    controller.set_can_interact(false);
    assert_eq!(controller.input().subscription_count(), 3);
    assert!(!controller.push_action(ActionEvent::performed(Action::Interact)));
}

#[test]
fn test_shutdown_releases_everything() {
    let world = ground();
    let mut controller = structured();

    controller.push_action(ActionEvent::performed(Action::Crouch));
    controller.push_action(ActionEvent::performed(Action::Zoom));
    tick(&mut controller, &world, DT);
    assert!(controller.is_crouch_transitioning());
    assert!(controller.is_zoom_animating());

    controller.shutdown(&mut NoTargets);
    assert!(!controller.is_active());
    assert_eq!(controller.input().subscription_count(), 0);
    assert!(!controller.is_crouch_transitioning());
    assert!(!controller.is_zoom_animating());

    // Events and ticks after teardown are ignored
    assert!(!controller.push_action(ActionEvent::performed(Action::Jump)));
    let fov = controller.camera().fov();
    run(&mut controller, &world, 10, DT);
    assert_eq!(controller.camera().fov(), fov);
    assert!(controller.state().grounded);
}

// ============================================================================
// Debug and climb
// ============================================================================

#[test]
fn test_debug_switch_works_with_structured_input() {
    let world = ground();
    let mut config = ControllerConfig::default();
    config.input_source = InputSourceKind::Structured;
    config.debug_mode = true;
    let mut controller = build(config);

    tap(&mut controller, &world, KeyCode::F1);
    assert!(!controller.movement_enabled());
    tap(&mut controller, &world, KeyCode::F1);
    assert!(controller.movement_enabled());
}

#[test]
fn test_climb_ignores_gravity_and_climb_toggle() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());
    controller.start_climb();
    controller.handle_key(KeyCode::W, true);

    // First frame walks, later frames only climb
    run(&mut controller, &world, 11, 0.1);
    let p = controller.body().position();
    assert!(approx_eq(p.y, 2.0 + 0.2));
    assert!(approx_eq(p.z, -0.3));

    controller.stop_climb();
    controller.config_mut().features.climb = false;
    controller.start_climb();
    controller.handle_key(KeyCode::W, false);
    run(&mut controller, &world, 30, 0.1);
    assert_eq!(controller.body().position().y, 0.0);
}

#[test]
fn test_climb_frozen_while_paused() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());
    controller.start_climb();
    controller.toggle_pause();
    controller.handle_key(KeyCode::W, true);

    run(&mut controller, &world, 10, 0.1);
    assert!(controller.is_paused());
    assert_eq!(controller.body().position(), Vec3::ZERO);
}

// ============================================================================
// Host edits between frames
// ============================================================================

#[test]
fn test_bad_look_limits_do_not_panic() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());

    controller.config_mut().look.degrees_up = f32::NAN;
    controller.handle_mouse_motion(0.0, 500.0);
    tick(&mut controller, &world, DT);
    assert!(controller.camera().pitch_degrees().is_finite());

    // Inverted limits resolve to the down limit
    controller.config_mut().look.degrees_up = -20.0;
    controller.config_mut().look.degrees_down = 10.0;
    controller.handle_mouse_motion(0.0, -500.0);
    tick(&mut controller, &world, DT);
    assert_eq!(controller.camera().pitch_degrees(), 10.0);
}

#[test]
fn test_non_finite_dt_is_a_zero_step() {
    let world = ground();
    let mut controller = build(ControllerConfig::default());
    controller.handle_key(KeyCode::W, true);

    tick(&mut controller, &world, f32::NAN);
    tick(&mut controller, &world, f32::INFINITY);
    assert_eq!(controller.body().position(), Vec3::ZERO);

    tick(&mut controller, &world, 0.1);
    let p = controller.body().position();
    assert!(p.is_finite());
    assert!(approx_eq(p.z, -0.3));
}
