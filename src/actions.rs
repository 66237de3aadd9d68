//! Discrete action set and its deterministic steering formulas.

use serde::{Serialize, Deserialize};

use crate::math::Vec2;

/// The eight combat maneuvers an enemy can pick each tick.
///
/// Discriminants are the network output indices and the replay-buffer wire
/// order; do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(usize)]
pub enum Action {
    Approach = 0,
    CircleLeft = 1,
    CircleRight = 2,
    Retreat = 3,
    StrafeLeft = 4,
    StrafeRight = 5,
    Zigzag = 6,
    Rush = 7,
}

impl Action {
    pub const COUNT: usize = 8;

    pub const ALL: [Action; Action::COUNT] = [
        Action::Approach,
        Action::CircleLeft,
        Action::CircleRight,
        Action::Retreat,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Zigzag,
        Action::Rush,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Action> {
        Action::ALL.get(index).copied()
    }

    /// Map this action to a movement velocity given the enemy and player
    /// positions and the enemy's base speed.
    ///
    /// Each action is a fixed mix of the unit direction toward the player and
    /// its perpendicular; nothing here is learned. `phase_s` is the caller's
    /// clock in seconds and only drives the zigzag oscillation, so the whole
    /// function stays pure. If the enemy sits exactly on the player the
    /// direction is undefined and the zero vector is returned.
    pub fn steering(self, enemy_pos: Vec2, player_pos: Vec2, speed: f32, phase_s: f32) -> Vec2 {
        let offset = player_pos - enemy_pos;
        if offset.length_squared() == 0.0 {
            return Vec2::ZERO;
        }

        let direction = offset.normalized();
        let perpendicular = direction.perp();

        match self {
            Action::Approach => direction * speed,
            Action::CircleLeft => {
                (direction * 0.3 + perpendicular * 0.7).normalized() * speed
            }
            Action::CircleRight => {
                (direction * 0.3 - perpendicular * 0.7).normalized() * speed
            }
            Action::Retreat => -direction * (speed * 0.8),
            Action::StrafeLeft => {
                (direction * 0.5 + perpendicular * 0.5).normalized() * speed
            }
            Action::StrafeRight => {
                (direction * 0.5 - perpendicular * 0.5).normalized() * speed
            }
            Action::Zigzag => {
                let wobble = perpendicular * ((phase_s * 5.0).sin() * 0.6);
                (direction * 0.7 + wobble).normalized() * speed
            }
            Action::Rush => direction * (speed * 1.5),
        }
    }
}
