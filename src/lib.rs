//! # Ares - Adaptive Combat Learning for 2D Survival Games
//!
//! Ares is the brain behind the enemies: one shared Double Deep-Q-Network
//! that every enemy instance reads and writes, trained online from gameplay
//! as it happens. There is no scripted combat logic here: enemies encode
//! what they see, pick a maneuver epsilon-greedily, and the reward shaping
//! teaches them aggressive, player-seeking behavior over the course of a run.
//!
//! ## Key pieces
//!
//! - **State encoding**: raw positions, velocity, and health become a fixed
//!   16-feature vector ([`encoder`])
//! - **Q-network**: a small fully-connected net with hand-written backprop,
//!   Xavier init, and dropout ([`network`])
//! - **Experience replay**: bounded FIFO store sampled uniformly ([`replay_buffer`])
//! - **Double DQN training**: policy net selects, target net evaluates, Huber
//!   loss, gradient-norm clipping ([`brain`])
//! - **Shared learning system**: one physical brain for all enemies, training
//!   cadence, checkpointing ([`learning`])
//! - **Action execution**: eight deterministic steering formulas ([`actions`])
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ares::agent::TickEvents;
//! use ares::config::BrainConfig;
//! use ares::encoder::CombatObservation;
//! use ares::learning::LearningSystem;
//! use ares::math::Vec2;
//!
//! let mut system = LearningSystem::new(BrainConfig::default()).unwrap();
//! let mut enemy = system.spawn_agent();
//!
//! // Each simulation tick: observe, decide, move.
//! let obs = CombatObservation {
//!     enemy_pos: Vec2::new(0.0, 0.0),
//!     player_pos: Vec2::new(500.0, 0.0),
//!     player_velocity: Vec2::ZERO,
//!     distance: 500.0,
//!     player_health_ratio: 1.0,
//!     enemy_health_ratio: 1.0,
//! };
//! let action = enemy.tick(&obs, &TickEvents::default(), 16.0);
//! let _velocity = action.steering(obs.enemy_pos, obs.player_pos, 120.0, 0.0);
//! system.step_update();
//!
//! // On death the episode is finalized and the brain trains on it.
//! system.enemy_died(enemy, true);
//! ```
//!
//! ## Module Organization
//!
//! - [`actions`] - Discrete action set and steering vectors
//! - [`agent`] - Per-enemy state machine over the shared brain
//! - [`brain`] - The shared policy/target network pair and its training step
//! - [`checkpoint`] - Five-field persistence blob
//! - [`config`] - Hyperparameters with shipped defaults
//! - [`encoder`] - Observation to feature-vector encoding
//! - [`error`] - Error types and result handling
//! - [`learning`] - Run-level scheduling, stats, and persistence
//! - [`loss`] - Huber and MSE losses
//! - [`math`] - Minimal 2D vector type
//! - [`metrics`] - Bounded loss/reward histories for diagnostics
//! - [`network`] - The Q-function approximator
//! - [`optimizer`] - SGD, Adam, and gradient-norm clipping
//! - [`replay_buffer`] - Bounded experience store
//! - [`reward`] - Pluggable reward shaping strategies

pub mod actions;
pub mod agent;
pub mod brain;
pub mod checkpoint;
pub mod config;
pub mod encoder;
pub mod error;
pub mod learning;
pub mod loss;
pub mod math;
pub mod metrics;
pub mod network;
pub mod optimizer;
pub mod replay_buffer;
pub mod reward;

#[cfg(test)]
mod tests;
