//! Reward shaping strategies.
//!
//! Shaping is a pluggable strategy selected by configuration, so different
//! training phases can change what the enemies are rewarded for without
//! touching the agent or the learning loop. The default profile pushes
//! aggressive, player-seeking combat.

use serde::{Serialize, Deserialize};

/// Every shaping constant, with the shipped tuning as defaults. Per-second
/// values are scaled by the tick's `dt` before being added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    /// One-shot bonus when the player dies on this tick. The ultimate goal.
    pub player_kill: f32,
    /// One-shot bonus when the enemy's attack connects.
    pub hit_player: f32,
    /// Constant survival trickle, per second.
    pub survival_per_sec: f32,
    /// Per-second bonus while in the preferred engagement band
    /// [`band_optimal_min`, `band_optimal_max`).
    pub band_optimal_per_sec: f32,
    /// Per-second bonus while in the near band
    /// [`band_near_min`, `band_optimal_min`).
    pub band_near_per_sec: f32,
    /// Per-second bonus while at point-blank range (< `point_blank_max`).
    /// Close quarters is rewarded, not penalized.
    pub band_point_blank_per_sec: f32,
    /// Edges of the engagement bands, in world units.
    pub band_optimal_min: f32,
    pub band_optimal_max: f32,
    pub band_near_min: f32,
    pub point_blank_max: f32,
    /// Per-second bonus for closing distance while still farther than
    /// `closing_min_distance`.
    pub closing_per_sec: f32,
    pub closing_min_distance: f32,
    /// One-shot penalty for taking damage this tick.
    pub got_hit: f32,
    /// Terminal reward when the player killed this enemy.
    pub killed_by_player: f32,
    /// Terminal reward for any other cause of death.
    pub other_death: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        RewardConfig {
            player_kill: 100.0,
            hit_player: 20.0,
            survival_per_sec: 0.05,
            band_optimal_per_sec: 1.0,
            band_near_per_sec: 0.6,
            band_point_blank_per_sec: 0.8,
            band_optimal_min: 100.0,
            band_optimal_max: 200.0,
            band_near_min: 80.0,
            point_blank_max: 50.0,
            closing_per_sec: 0.3,
            closing_min_distance: 80.0,
            got_hit: -8.0,
            killed_by_player: -15.0,
            other_death: -5.0,
        }
    }
}

/// What the simulation observed between the previous action and now.
#[derive(Debug, Clone, Copy)]
pub struct RewardContext {
    pub dt_ms: f32,
    pub distance: f32,
    pub distance_decreased: bool,
    pub hit_player: bool,
    pub got_hit: bool,
    pub player_died: bool,
}

/// A reward shaping strategy. No clipping is applied by any shipped shaper.
pub trait RewardShaper: Send {
    fn reward(&self, ctx: &RewardContext) -> f32;

    /// Terminal reward flushed with the final transition when the enemy dies.
    fn terminal_reward(&self, killed_by_player: bool) -> f32;
}

/// Selects which shaper a freshly spawned agent gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardProfile {
    Aggressive,
    Cautious,
}

impl RewardProfile {
    pub fn build(&self, config: &RewardConfig) -> Box<dyn RewardShaper> {
        match self {
            RewardProfile::Aggressive => Box::new(AggressiveShaper::new(config.clone())),
            RewardProfile::Cautious => Box::new(CautiousShaper::new(config.clone())),
        }
    }
}

/// The default shaping: kills and hits dominate, close range is rewarded,
/// closing in is rewarded, getting hit is punished hard.
pub struct AggressiveShaper {
    config: RewardConfig,
}

impl AggressiveShaper {
    pub fn new(config: RewardConfig) -> Self {
        AggressiveShaper { config }
    }
}

impl RewardShaper for AggressiveShaper {
    fn reward(&self, ctx: &RewardContext) -> f32 {
        let dt_s = ctx.dt_ms / 1000.0;
        let mut reward = 0.0;

        if ctx.player_died {
            reward += self.config.player_kill;
        }
        if ctx.hit_player {
            reward += self.config.hit_player;
        }

        reward += self.config.survival_per_sec * dt_s;

        if (self.config.band_optimal_min..self.config.band_optimal_max).contains(&ctx.distance) {
            reward += self.config.band_optimal_per_sec * dt_s;
        } else if (self.config.band_near_min..self.config.band_optimal_min).contains(&ctx.distance) {
            reward += self.config.band_near_per_sec * dt_s;
        } else if ctx.distance < self.config.point_blank_max {
            reward += self.config.band_point_blank_per_sec * dt_s;
        }

        if ctx.distance_decreased && ctx.distance > self.config.closing_min_distance {
            reward += self.config.closing_per_sec * dt_s;
        }

        if ctx.got_hit {
            reward += self.config.got_hit;
        }

        reward
    }

    fn terminal_reward(&self, killed_by_player: bool) -> f32 {
        if killed_by_player {
            self.config.killed_by_player
        } else {
            self.config.other_death
        }
    }
}

/// An earlier, more defensive tuning kept for curriculum phases that want
/// enemies to keep their distance: smaller hit bonus, a single mid-range
/// band, and a penalty for point-blank range.
pub struct CautiousShaper {
    config: RewardConfig,
}

impl CautiousShaper {
    pub fn new(config: RewardConfig) -> Self {
        CautiousShaper { config }
    }
}

impl RewardShaper for CautiousShaper {
    fn reward(&self, ctx: &RewardContext) -> f32 {
        let dt_s = ctx.dt_ms / 1000.0;
        let mut reward = 0.0;

        if ctx.hit_player {
            reward += 10.0;
        }

        reward += 0.1 * dt_s;

        if ctx.distance > 100.0 && ctx.distance < 250.0 {
            reward += 0.5 * dt_s;
        } else if ctx.distance < 50.0 {
            reward -= 0.2 * dt_s;
        }

        if ctx.got_hit {
            reward -= 5.0;
        }

        reward
    }

    fn terminal_reward(&self, killed_by_player: bool) -> f32 {
        if killed_by_player {
            self.config.killed_by_player
        } else {
            self.config.other_death
        }
    }
}
