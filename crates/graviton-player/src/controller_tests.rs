//! End-to-end tests for the two-phase controller against the fake backend.

use graviton_physics::CollisionResponseMode;

use super::*;
use crate::testing::{FakePhysics, ObjectEvent};

const DT: f32 = 0.02;

fn controller(physics: &FakePhysics) -> PlayerController<FakePhysics> {
    PlayerController::new(&Config::default(), physics)
}

fn press_jump() -> InputFrame {
    InputFrame {
        jump: true,
        ..Default::default()
    }
}

fn press_grab() -> InputFrame {
    InputFrame {
        grab: true,
        ..Default::default()
    }
}

fn press_fling() -> InputFrame {
    InputFrame {
        fling: true,
        ..Default::default()
    }
}

/// Ticks with no input until the character is resting on the floor.
fn settle(c: &mut PlayerController<FakePhysics>, physics: &mut FakePhysics) {
    c.input_phase(&InputFrame::default());
    c.physics_phase(physics, DT);
}

/// Puts a prop straight ahead of the eye at `distance` and grabs it.
fn grab_prop_at(
    c: &mut PlayerController<FakePhysics>,
    physics: &mut FakePhysics,
    distance: f32,
) -> u32 {
    settle(c, physics);
    let body = physics.add_object(c.eye_position() + Vec3::NEG_Z * distance);
    c.input_phase(&press_grab());
    c.physics_phase(physics, DT);
    body
}

#[test]
fn test_standing_still_stays_grounded_at_rest() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    for _ in 0..10 {
        settle(&mut c, &mut physics);
    }
    assert_eq!(c.velocity(), Vec3::ZERO);
    assert_eq!(c.position(), Vec3::ZERO);
    // Cleared at the end of every tick.
    assert!(!c.motion().is_on_floor());
}

#[test]
fn test_free_fall_in_void() {
    let mut physics = FakePhysics::void(Vec3::new(0.0, 100.0, 0.0));
    let mut c = controller(&physics);
    let mut prev = c.velocity().y;
    for _ in 0..20 {
        settle(&mut c, &mut physics);
        assert!(c.velocity().y < prev);
        prev = c.velocity().y;
    }
    assert!(c.position().y < 100.0);
}

#[test]
fn test_grounded_jump_sets_exact_strength() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    settle(&mut c, &mut physics);

    c.input_phase(&press_jump());
    c.physics_phase(&mut physics, DT);
    assert_eq!(c.velocity().y, 15.0);
}

#[test]
fn test_jump_presses_coalesce_into_one() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    settle(&mut c, &mut physics);

    c.input_phase(&press_jump());
    c.input_phase(&press_jump());
    c.physics_phase(&mut physics, DT);
    assert_eq!(c.velocity().y, 15.0);

    // The second press was not kept for the following tick.
    c.physics_phase(&mut physics, DT);
    assert_eq!(c.velocity().y, 14.0);
}

#[test]
fn test_jump_survives_frames_without_press() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    settle(&mut c, &mut physics);

    c.input_phase(&press_jump());
    c.input_phase(&InputFrame::default());
    c.input_phase(&InputFrame::default());
    c.physics_phase(&mut physics, DT);
    assert_eq!(c.velocity().y, 15.0);
}

#[test]
fn test_airborne_jump_is_ignored() {
    let mut physics = FakePhysics::void(Vec3::new(0.0, 50.0, 0.0));
    let mut c = controller(&physics);
    c.input_phase(&press_jump());
    c.physics_phase(&mut physics, DT);
    assert_eq!(c.velocity().y, -1.0);
    assert!(!c.motion().state.queued_jump);
}

#[test]
fn test_walking_follows_yaw() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    c.input_phase(&InputFrame::look(90.0, 0.0));
    for _ in 0..20 {
        c.input_phase(&InputFrame::walk(1.0, 0.0));
        c.physics_phase(&mut physics, DT);
    }
    assert!(c.position().x > 0.0);
    assert!(c.position().z.abs() < 1e-4);
}

#[test]
fn test_pitch_does_not_affect_walking() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    c.input_phase(&InputFrame::look(0.0, 80.0));
    for _ in 0..20 {
        c.input_phase(&InputFrame::walk(1.0, 0.0));
        c.physics_phase(&mut physics, DT);
    }
    assert!(c.position().z < 0.0);
    assert_eq!(c.position().y, 0.0);
}

#[test]
fn test_horizontal_drift_decays_after_release() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    for _ in 0..10 {
        c.input_phase(&InputFrame::walk(0.0, 1.0));
        c.physics_phase(&mut physics, DT);
    }
    let mut prev = c.velocity().x;
    assert!(prev > 0.0);
    for _ in 0..100 {
        settle(&mut c, &mut physics);
        let vx = c.velocity().x;
        assert!(vx <= prev && vx >= 0.0);
        prev = vx;
    }
}

#[test]
fn test_grab_at_exact_reach() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    let body = grab_prop_at(&mut c, &mut physics, 4.0);
    assert_eq!(c.manipulator_state(), ManipulatorState::Holding);
    assert!(!physics.object(body).gravity);
    assert_eq!(physics.object(body).mode, CollisionResponseMode::Continuous);
}

#[test]
fn test_grab_beyond_reach_is_silent() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    let body = grab_prop_at(&mut c, &mut physics, 4.5);
    assert_eq!(c.manipulator_state(), ManipulatorState::Idle);
    assert!(physics.object(body).events.is_empty());
}

#[test]
fn test_grab_presses_coalesce() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    settle(&mut c, &mut physics);
    physics.add_object(c.eye_position() + Vec3::NEG_Z * 2.0);

    c.input_phase(&press_grab());
    c.input_phase(&press_grab());
    assert!(c.queued_intents().grab);
    c.physics_phase(&mut physics, DT);
    // One toggle, not pick-up then drop.
    assert_eq!(c.manipulator_state(), ManipulatorState::Holding);
    assert!(!c.queued_intents().grab);
}

#[test]
fn test_held_object_follows_hold_point() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    let body = grab_prop_at(&mut c, &mut physics, 3.0);
    assert_eq!(
        physics.object(body).position,
        c.eye_position() + Vec3::NEG_Z * 2.0
    );

    c.input_phase(&InputFrame::look(90.0, 0.0));
    c.physics_phase(&mut physics, DT);
    let expected = c.eye_position() + c.look().aim_forward() * 2.0;
    assert!((physics.object(body).position - expected).length() < 1e-5);
}

#[test]
fn test_grab_again_restores_atypical_properties() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    settle(&mut c, &mut physics);
    let body = physics.add_object(c.eye_position() + Vec3::NEG_Z * 2.0);
    {
        let obj = physics.object_mut_direct(body);
        obj.gravity = false;
        obj.mode = CollisionResponseMode::Continuous;
    }

    c.input_phase(&press_grab());
    c.physics_phase(&mut physics, DT);
    c.input_phase(&press_grab());
    c.physics_phase(&mut physics, DT);

    assert_eq!(c.manipulator_state(), ManipulatorState::Idle);
    let obj = physics.object(body);
    assert!(!obj.gravity);
    assert_eq!(obj.mode, CollisionResponseMode::Continuous);
}

#[test]
fn test_fling_along_pre_fling_aim_then_restore() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    let body = grab_prop_at(&mut c, &mut physics, 3.0);
    physics.object_mut_direct(body).events.clear();

    c.input_phase(&InputFrame {
        look_yaw: 90.0,
        fling: true,
        ..Default::default()
    });
    let aim = c.look().aim_forward();
    c.physics_phase(&mut physics, DT);

    let events = &physics.object(body).events;
    let impulse_at = events
        .iter()
        .position(|e| matches!(e, ObjectEvent::Impulse(_)))
        .expect("impulse applied");
    let ObjectEvent::Impulse(impulse) = events[impulse_at] else {
        unreachable!()
    };
    assert!((impulse - aim * 10.0).length() < 1e-5);
    assert!((impulse.length() - 10.0).abs() < 1e-4);

    let restore_at = events
        .iter()
        .position(|e| *e == ObjectEvent::SetGravity(true))
        .expect("gravity restored");
    assert!(impulse_at < restore_at);
    assert!(events.contains(&ObjectEvent::SetMode(CollisionResponseMode::Discrete)));
    assert_eq!(c.manipulator_state(), ManipulatorState::Idle);
}

#[test]
fn test_fling_while_idle_does_nothing() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    settle(&mut c, &mut physics);
    let body = physics.add_object(c.eye_position() + Vec3::NEG_Z * 10.0);
    c.input_phase(&press_fling());
    c.physics_phase(&mut physics, DT);
    assert!(physics.object(body).events.is_empty());
    assert!(!c.queued_intents().fling);
}

#[test]
fn test_grab_and_fling_same_frame_throws_immediately() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    settle(&mut c, &mut physics);
    let body = physics.add_object(c.eye_position() + Vec3::NEG_Z * 2.0);

    c.input_phase(&InputFrame {
        grab: true,
        fling: true,
        ..Default::default()
    });
    c.physics_phase(&mut physics, DT);

    assert_eq!(c.manipulator_state(), ManipulatorState::Idle);
    assert!(physics
        .object(body)
        .events
        .contains(&ObjectEvent::Impulse(Vec3::NEG_Z * 10.0)));
    assert!(physics.object(body).gravity);
}

#[test]
fn test_self_collision_auto_releases_same_tick() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    let body = grab_prop_at(&mut c, &mut physics, 3.0);
    let moves_before = physics.object(body).events.len();

    physics.script_contact(Vec3::Z, FakePhysics::collider_of(body));
    c.input_phase(&InputFrame::default());
    c.physics_phase(&mut physics, DT);

    assert_eq!(c.manipulator_state(), ManipulatorState::Idle);
    let obj = physics.object(body);
    assert!(obj.gravity);
    assert_eq!(obj.mode, CollisionResponseMode::Discrete);
    // No carry after the release.
    assert!(
        obj.events[moves_before..]
            .iter()
            .all(|e| !matches!(e, ObjectEvent::MoveTo(_)))
    );
}

#[test]
fn test_contact_with_other_collider_keeps_holding() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    grab_prop_at(&mut c, &mut physics, 3.0);
    physics.script_contact(Vec3::X, 999);
    c.physics_phase(&mut physics, DT);
    assert_eq!(c.manipulator_state(), ManipulatorState::Holding);
}

#[test]
fn test_destroyed_held_object_drops_to_idle() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    let body = grab_prop_at(&mut c, &mut physics, 3.0);
    physics.destroy(body);
    c.physics_phase(&mut physics, DT);
    assert_eq!(c.manipulator_state(), ManipulatorState::Idle);
}

#[test]
fn test_steep_contact_does_not_ground() {
    let mut physics = FakePhysics::void(Vec3::new(0.0, 10.0, 0.0));
    let mut c = controller(&physics);
    let steep = Vec3::new(60.0_f32.to_radians().sin(), 60.0_f32.to_radians().cos(), 0.0);
    physics.script_contact(steep, 7);
    c.input_phase(&press_jump());
    c.physics_phase(&mut physics, DT);
    assert!(c.velocity().y < 15.0);
}

#[test]
fn test_reconfigure_applies_new_tunables() {
    let mut physics = FakePhysics::new();
    let mut c = controller(&physics);
    settle(&mut c, &mut physics);

    let mut config = Config::default();
    config.player.jump_strength = 7.5;
    config.player.eye_height = 1.0;
    c.reconfigure(&config);

    c.input_phase(&press_jump());
    c.physics_phase(&mut physics, DT);
    assert_eq!(c.velocity().y, 7.5);
    assert_eq!(c.eye_position().y - c.position().y, 1.0);
}
