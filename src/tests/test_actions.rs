use crate::actions::Action;
use crate::math::Vec2;

const SPEED: f32 = 120.0;
const TOL: f32 = 1e-3;

fn steer(action: Action) -> Vec2 {
    action.steering(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), SPEED, 0.25)
}

#[test]
fn test_action_indices_roundtrip() {
    for (i, &action) in Action::ALL.iter().enumerate() {
        assert_eq!(action.index(), i);
        assert_eq!(Action::from_index(i), Some(action));
    }
    assert_eq!(Action::from_index(Action::COUNT), None);
}

#[test]
fn test_approach_magnitude() {
    let v = steer(Action::Approach);
    assert!((v.length() - SPEED).abs() < TOL);
    // Straight toward the player.
    assert!(v.x > 0.0);
    assert!(v.y.abs() < TOL);
}

#[test]
fn test_rush_magnitude() {
    let v = steer(Action::Rush);
    assert!((v.length() - 1.5 * SPEED).abs() < TOL);
    assert!(v.x > 0.0);
}

#[test]
fn test_retreat_moves_away() {
    let v = steer(Action::Retreat);
    assert!((v.length() - 0.8 * SPEED).abs() < TOL);
    assert!(v.x < 0.0);
}

#[test]
fn test_renormalized_actions_have_full_speed() {
    for action in [
        Action::CircleLeft,
        Action::CircleRight,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Zigzag,
    ] {
        let v = steer(action);
        assert!(
            (v.length() - SPEED).abs() < TOL,
            "{:?} speed was {}",
            action,
            v.length()
        );
    }
}

#[test]
fn test_circle_directions_mirror() {
    let left = steer(Action::CircleLeft);
    let right = steer(Action::CircleRight);

    // Same forward component, opposite lateral components.
    let forward = Vec2::new(1.0, 0.0);
    let lateral = forward.perp();
    assert!((left.dot(forward) - right.dot(forward)).abs() < TOL);
    assert!((left.dot(lateral) + right.dot(lateral)).abs() < TOL);
    assert!(left.dot(lateral).abs() > TOL);
}

#[test]
fn test_strafe_mixes_more_forward_than_circle() {
    let circle = steer(Action::CircleLeft);
    let strafe = steer(Action::StrafeLeft);
    assert!(strafe.x > circle.x);
}

#[test]
fn test_zigzag_oscillates_with_phase() {
    let enemy = Vec2::new(0.0, 0.0);
    let player = Vec2::new(100.0, 0.0);
    // sin(5t) changes sign between these two phases.
    let a = Action::Zigzag.steering(enemy, player, SPEED, 0.2);
    let b = Action::Zigzag.steering(enemy, player, SPEED, 0.8);
    assert!(a.y * b.y < 0.0, "lateral offset should flip: {} vs {}", a.y, b.y);
}

#[test]
fn test_zigzag_is_pure_in_phase() {
    let enemy = Vec2::new(3.0, -7.0);
    let player = Vec2::new(80.0, 40.0);
    let a = Action::Zigzag.steering(enemy, player, SPEED, 1.5);
    let b = Action::Zigzag.steering(enemy, player, SPEED, 1.5);
    assert_eq!(a, b);
}

#[test]
fn test_coincident_positions_yield_zero_vector() {
    let pos = Vec2::new(50.0, 50.0);
    for &action in Action::ALL.iter() {
        let v = action.steering(pos, pos, SPEED, 0.0);
        assert_eq!(v, Vec2::ZERO, "{:?} should not move at zero distance", action);
    }
}
