//! Fixed-layout state encoding for the combat brain.
//!
//! The simulation hands over raw positions, velocity, and health per enemy
//! per tick; `encode` turns that into the 16-dimensional feature vector the
//! Q-network consumes. Encoding is a pure function: same observation, same
//! vector, always.

use ndarray::Array1;
use serde::{Serialize, Deserialize};
use std::f32::consts::PI;

use crate::math::Vec2;

/// Length of the encoded state vector.
pub const STATE_SIZE: usize = 16;

/// World-unit distance used to normalize positions and distances.
pub const NORMALIZATION_DISTANCE: f32 = 1000.0;

/// Speed used to normalize player velocity components.
pub const MAX_PLAYER_SPEED: f32 = 300.0;

/// Player speed above which the "moving" flag is set.
pub const MOVING_SPEED_THRESHOLD: f32 = 50.0;

/// Distance bucket edges for the one-hot range features.
pub const CLOSE_DISTANCE: f32 = 100.0;
pub const MEDIUM_DISTANCE: f32 = 250.0;
pub const FAR_DISTANCE: f32 = 500.0;

/// Per-enemy per-tick observation handed over by the simulation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CombatObservation {
    pub enemy_pos: Vec2,
    pub player_pos: Vec2,
    pub player_velocity: Vec2,
    pub distance: f32,
    /// Player health as a ratio in [0, 1].
    pub player_health_ratio: f32,
    /// Enemy health as a ratio in [0, 1].
    pub enemy_health_ratio: f32,
}

/// Encode an observation into the fixed 16-feature state vector.
///
/// Layout:
/// - `[0-1]` relative position to the player, normalized and clamped to [-1, 1]
/// - `[2]`   distance, normalized and clamped to [0, 1]
/// - `[3-5]` player velocity x, y, and magnitude, normalized
/// - `[6]`   bearing angle to the player, mapped to [0, 1)
/// - `[7-8]` player and enemy health ratios
/// - `[9-12]` one-hot distance bucket (close / medium / far / very far)
/// - `[13-14]` one-hot moving / static player flag
/// - `[15]`  constant bias term
///
/// When the enemy sits exactly on top of the player the relative components
/// and the bearing are 0; no division by zero occurs anywhere.
pub fn encode(obs: &CombatObservation) -> Array1<f32> {
    let mut state = Array1::<f32>::zeros(STATE_SIZE);

    let dx = (obs.player_pos.x - obs.enemy_pos.x) / NORMALIZATION_DISTANCE;
    let dy = (obs.player_pos.y - obs.enemy_pos.y) / NORMALIZATION_DISTANCE;
    state[0] = dx.clamp(-1.0, 1.0);
    state[1] = dy.clamp(-1.0, 1.0);

    state[2] = (obs.distance / NORMALIZATION_DISTANCE).clamp(0.0, 1.0);

    state[3] = (obs.player_velocity.x / MAX_PLAYER_SPEED).clamp(-1.0, 1.0);
    state[4] = (obs.player_velocity.y / MAX_PLAYER_SPEED).clamp(-1.0, 1.0);
    let player_speed = obs.player_velocity.length();
    state[5] = (player_speed / MAX_PLAYER_SPEED).clamp(0.0, 1.0);

    // Bearing in (-pi, pi], remapped to [0, 1). Coincident positions carry no
    // direction information and encode as 0.
    if dx != 0.0 || dy != 0.0 {
        let angle = dy.atan2(dx);
        state[6] = (angle + PI) / (2.0 * PI);
    }

    state[7] = obs.player_health_ratio;
    state[8] = obs.enemy_health_ratio;

    // One-hot distance bucket. Exactly one of [9-12] is set.
    if obs.distance < CLOSE_DISTANCE {
        state[9] = 1.0;
    } else if obs.distance < MEDIUM_DISTANCE {
        state[10] = 1.0;
    } else if obs.distance < FAR_DISTANCE {
        state[11] = 1.0;
    } else {
        state[12] = 1.0;
    }

    // One-hot moving flag. Exactly one of [13-14] is set.
    if player_speed > MOVING_SPEED_THRESHOLD {
        state[13] = 1.0;
    } else {
        state[14] = 1.0;
    }

    state[15] = 1.0;

    state
}
