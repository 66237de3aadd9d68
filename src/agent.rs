//! Per-enemy agent state machine.
//!
//! Each live enemy owns one [`EnemyAgent`]. The agent holds a handle to the
//! shared brain, never a copy of it: every decision reads the one policy
//! network and every transition lands in the one replay buffer.
//!
//! Lifecycle: the first tick after spawn only encodes and acts (there is no
//! reward to observe yet). Every later tick scores what happened since the
//! previous action, flushes a transition, and acts again. Death is handled by
//! [`crate::learning::LearningSystem::enemy_died`], which consumes the agent,
//! so a dead enemy can never tick again.

use ndarray::Array1;

use crate::actions::Action;
use crate::brain::BrainHandle;
use crate::encoder::{encode, CombatObservation, CLOSE_DISTANCE};
use crate::replay_buffer::Transition;
use crate::reward::{RewardContext, RewardShaper};

/// What the simulation observed for this enemy since its previous tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickEvents {
    /// The enemy's attack connected with the player this tick.
    pub hit_player: bool,
    /// The enemy took damage this tick.
    pub got_hit: bool,
    /// The player died this tick.
    pub player_died: bool,
}

pub struct EnemyAgent {
    brain: BrainHandle,
    shaper: Box<dyn RewardShaper>,
    /// Encoded state and action awaiting their reward. `None` only before
    /// the first decision.
    pub(crate) pending: Option<(Array1<f32>, Action)>,
    last_distance: Option<f32>,
    lifetime_ms: f32,
    damage_dealt: u32,
    damage_received: u32,
    time_near_player_ms: f32,
    pub(crate) episode_reward: f32,
}

impl EnemyAgent {
    pub fn new(brain: BrainHandle, shaper: Box<dyn RewardShaper>) -> Self {
        EnemyAgent {
            brain,
            shaper,
            pending: None,
            last_distance: None,
            lifetime_ms: 0.0,
            damage_dealt: 0,
            damage_received: 0,
            time_near_player_ms: 0.0,
            episode_reward: 0.0,
        }
    }

    /// Advance the agent by one simulation tick and pick the next action.
    ///
    /// If an action is pending from the previous tick, its reward is computed
    /// from `events` and the observation, and the completed transition is
    /// pushed into the shared buffer before the next action is chosen.
    pub fn tick(&mut self, obs: &CombatObservation, events: &TickEvents, dt_ms: f32) -> Action {
        let state = encode(obs);

        if let Some((prev_state, prev_action)) = self.pending.take() {
            let ctx = RewardContext {
                dt_ms,
                distance: obs.distance,
                distance_decreased: self
                    .last_distance
                    .map_or(false, |last| obs.distance < last),
                hit_player: events.hit_player,
                got_hit: events.got_hit,
                player_died: events.player_died,
            };
            let reward = self.shaper.reward(&ctx);
            self.episode_reward += reward;

            self.brain.borrow_mut().store(Transition {
                state: prev_state,
                action: prev_action.index(),
                reward,
                next_state: state.clone(),
                done: false,
            });
        }

        let action = self.brain.borrow_mut().choose_action(state.view());

        self.lifetime_ms += dt_ms;
        if events.hit_player {
            self.damage_dealt += 1;
        }
        if events.got_hit {
            self.damage_received += 1;
        }
        if obs.distance < CLOSE_DISTANCE {
            self.time_near_player_ms += dt_ms;
        }

        self.pending = Some((state, action));
        self.last_distance = Some(obs.distance);
        action
    }

    pub(crate) fn terminal_reward(&self, killed_by_player: bool) -> f32 {
        self.shaper.terminal_reward(killed_by_player)
    }

    pub fn brain(&self) -> &BrainHandle {
        &self.brain
    }

    /// Whether the agent has made at least one decision.
    pub fn has_acted(&self) -> bool {
        self.pending.is_some()
    }

    pub fn lifetime_ms(&self) -> f32 {
        self.lifetime_ms
    }

    pub fn damage_dealt(&self) -> u32 {
        self.damage_dealt
    }

    pub fn damage_received(&self) -> u32 {
        self.damage_received
    }

    pub fn time_near_player_ms(&self) -> f32 {
        self.time_near_player_ms
    }

    pub fn episode_reward(&self) -> f32 {
        self.episode_reward
    }
}
