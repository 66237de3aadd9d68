//! The shared learning system: spawns agents, schedules training, tracks
//! run-level statistics, and persists the brain.

use std::path::Path;
use std::rc::Rc;

use ndarray::Array1;
use serde::Serialize;
use tracing::{info, warn};

use crate::agent::EnemyAgent;
use crate::brain::{BrainHandle, DqnBrain};
use crate::checkpoint::Checkpoint;
use crate::config::BrainConfig;
use crate::encoder::STATE_SIZE;
use crate::error::Result;
use crate::replay_buffer::Transition;

/// Read-only snapshot of the run for the telemetry/HUD layer.
#[derive(Debug, Clone, Serialize)]
pub struct LearningStats {
    pub total_episodes: usize,
    pub total_training_steps: usize,
    pub buffer_size: usize,
    pub current_epsilon: f32,
    pub avg_loss: f32,
    pub avg_reward: f32,
    pub best_reward: f32,
}

/// Owns the one shared brain and drives its training schedule.
///
/// The simulation calls [`LearningSystem::step_update`] once per tick and
/// [`LearningSystem::enemy_died`] whenever an enemy is removed. Training is
/// a silent no-op until the replay buffer has warmed up past
/// `min_replay_size`.
pub struct LearningSystem {
    brain: BrainHandle,
    total_episodes: usize,
    total_training_steps: usize,
    best_episode_reward: f32,
    step_counter: usize,
}

impl LearningSystem {
    pub fn new(config: BrainConfig) -> Result<Self> {
        let brain = DqnBrain::new(config)?.into_handle();
        Ok(LearningSystem {
            brain,
            total_episodes: 0,
            total_training_steps: 0,
            best_episode_reward: f32::NEG_INFINITY,
            step_counter: 0,
        })
    }

    /// Restore from a checkpoint if one is readable and shape-compatible;
    /// otherwise start with a fresh brain. Never fails on a bad checkpoint,
    /// only on an invalid config.
    pub fn load_or_fresh(config: BrainConfig, path: &Path) -> Result<Self> {
        let mut system = Self::new(config)?;
        match system.load_model(path) {
            Ok(()) => {
                info!(path = %path.display(), episodes = system.total_episodes, "restored brain checkpoint");
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "could not restore checkpoint, starting fresh");
            }
        }
        Ok(system)
    }

    /// A reference to the one shared brain. Every enemy gets the same
    /// physical network, never a copy.
    pub fn create_enemy_brain(&self) -> BrainHandle {
        Rc::clone(&self.brain)
    }

    /// Build an agent for a freshly spawned enemy, wired to the shared brain
    /// and to the configured reward profile.
    pub fn spawn_agent(&self) -> EnemyAgent {
        let shaper = {
            let brain = self.brain.borrow();
            let config = brain.config();
            config.reward_profile.build(&config.reward)
        };
        EnemyAgent::new(self.create_enemy_brain(), shaper)
    }

    /// Called once per simulation tick. Every `train_every` calls this runs
    /// one training step, which is skipped silently during warm-up.
    pub fn step_update(&mut self) {
        self.step_counter += 1;
        let train_every = self.brain.borrow().config().train_every;
        if self.step_counter >= train_every {
            self.step_counter = 0;
            if self.brain.borrow_mut().train_step().is_some() {
                self.total_training_steps += 1;
            }
        }
    }

    /// Finalize a dead enemy's episode.
    ///
    /// Consuming the agent makes further ticks unrepresentable. If the agent
    /// ever acted, its dangling action is flushed as a terminal transition
    /// with an all-zero next state, then a few extra training passes run to
    /// digest the episode (no-ops during warm-up).
    pub fn enemy_died(&mut self, agent: EnemyAgent, killed_by_player: bool) {
        self.total_episodes += 1;

        let final_reward = agent.terminal_reward(killed_by_player);
        let episode_reward = agent.episode_reward + final_reward;

        let mut brain = self.brain.borrow_mut();
        if let Some((state, action)) = agent.pending {
            brain.store(Transition {
                state,
                action: action.index(),
                reward: final_reward,
                next_state: Array1::zeros(STATE_SIZE),
                done: true,
            });
        }
        brain.end_episode(episode_reward);

        let death_passes = brain.config().death_train_passes;
        for _ in 0..death_passes {
            if brain.train_step().is_some() {
                self.total_training_steps += 1;
            }
        }
        drop(brain);

        if episode_reward > self.best_episode_reward {
            self.best_episode_reward = episode_reward;
        }
    }

    pub fn stats(&self) -> LearningStats {
        let brain = self.brain.borrow();
        LearningStats {
            total_episodes: self.total_episodes,
            total_training_steps: self.total_training_steps,
            buffer_size: brain.buffer().len(),
            current_epsilon: brain.epsilon(),
            avg_loss: brain.metrics().avg_loss(100).unwrap_or(0.0),
            avg_reward: brain.metrics().avg_reward(100).unwrap_or(0.0),
            best_reward: self.best_episode_reward,
        }
    }

    /// JSON rendering of [`LearningSystem::stats`] for the HUD layer.
    pub fn stats_json(&self) -> Result<String> {
        serde_json::to_string(&self.stats())
            .map_err(|err| crate::error::AresError::SerializationError(err.to_string()))
    }

    /// Persist the brain: both networks, optimizer state, epsilon, and the
    /// cumulative episode count.
    pub fn save_model(&self, path: &Path) -> Result<()> {
        let brain = self.brain.borrow();
        let checkpoint = Checkpoint {
            policy: brain.policy.clone(),
            target: brain.target.clone(),
            optimizer: brain.optimizer().clone(),
            epsilon: brain.epsilon(),
            episodes: self.total_episodes,
        };
        checkpoint.save(path)?;
        info!(path = %path.display(), "saved brain checkpoint");
        Ok(())
    }

    /// Restore a checkpoint, rejecting one whose network shapes do not match
    /// the configured architecture. On error the current brain is untouched.
    pub fn load_model(&mut self, path: &Path) -> Result<()> {
        let checkpoint = Checkpoint::load(path)?;
        let mut brain = self.brain.borrow_mut();
        checkpoint.validate(brain.config())?;
        let Checkpoint { policy, target, optimizer, epsilon, episodes } = checkpoint;
        brain.restore(policy, target, optimizer, epsilon);
        drop(brain);
        self.total_episodes = episodes;
        Ok(())
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_training_steps(&self) -> usize {
        self.total_training_steps
    }

    pub fn best_episode_reward(&self) -> f32 {
        self.best_episode_reward
    }
}
