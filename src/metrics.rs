//! Bounded training diagnostics. Read by the HUD/telemetry layer only; no
//! behavioral effect on learning.

use serde::{Serialize, Deserialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub losses: VecDeque<f32>,
    pub episode_rewards: VecDeque<f32>,
    history_size: usize,
}

impl TrainingMetrics {
    pub fn new(history_size: usize) -> Self {
        TrainingMetrics {
            losses: VecDeque::with_capacity(history_size),
            episode_rewards: VecDeque::with_capacity(history_size),
            history_size,
        }
    }

    pub fn record_loss(&mut self, loss: f32) {
        if self.losses.len() >= self.history_size {
            self.losses.pop_front();
        }
        self.losses.push_back(loss);
    }

    pub fn record_episode(&mut self, reward: f32) {
        if self.episode_rewards.len() >= self.history_size {
            self.episode_rewards.pop_front();
        }
        self.episode_rewards.push_back(reward);
    }

    /// Mean of the most recent `window` losses, or None before any training.
    pub fn avg_loss(&self, window: usize) -> Option<f32> {
        if self.losses.is_empty() {
            return None;
        }
        let n = window.min(self.losses.len());
        let sum: f32 = self.losses.iter().rev().take(n).sum();
        Some(sum / n as f32)
    }

    /// Mean of the most recent `window` episode rewards.
    pub fn avg_reward(&self, window: usize) -> Option<f32> {
        if self.episode_rewards.is_empty() {
            return None;
        }
        let n = window.min(self.episode_rewards.len());
        let sum: f32 = self.episode_rewards.iter().rev().take(n).sum();
        Some(sum / n as f32)
    }
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new(1000)
    }
}
