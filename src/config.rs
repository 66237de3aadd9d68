use serde::{Serialize, Deserialize};

use crate::actions::Action;
use crate::encoder::STATE_SIZE;
use crate::error::{AresError, Result};
use crate::loss::LossKind;
use crate::reward::{RewardConfig, RewardProfile};

/// Hyperparameters for the shared combat brain.
///
/// Defaults reproduce the tuning the enemies ship with. Every value here is
/// configuration, not contract: the reward shaping and distance thresholds in
/// particular were hand-tuned and may be adjusted per game without touching
/// the learning code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrainConfig {
    /// Hidden layer widths of the Q-network (input and output sizes are fixed
    /// by the state encoding and the action set).
    pub hidden_layers: Vec<usize>,
    /// Dropout rate applied after the early hidden layers during training.
    pub dropout: f32,
    pub learning_rate: f32,
    pub discount_factor: f32,
    /// Initial exploration rate.
    pub epsilon: f32,
    pub epsilon_min: f32,
    pub epsilon_decay: f32,
    pub buffer_capacity: usize,
    pub batch_size: usize,
    /// Below this many stored transitions, training steps are silent no-ops.
    pub min_replay_size: usize,
    /// Target network is synced from the policy network every N train steps.
    pub update_target_every: usize,
    /// One train step is scheduled every N simulation ticks.
    pub train_every: usize,
    /// Extra train steps run when an enemy dies.
    pub death_train_passes: usize,
    /// Global gradient norm bound applied before every optimizer update.
    pub max_grad_norm: f32,
    pub loss: LossKind,
    pub reward: RewardConfig,
    pub reward_profile: RewardProfile,
}

impl Default for BrainConfig {
    fn default() -> Self {
        BrainConfig {
            hidden_layers: vec![128, 128, 64],
            dropout: 0.2,
            learning_rate: 5e-4,
            discount_factor: 0.95,
            epsilon: 0.3,
            epsilon_min: 0.05,
            epsilon_decay: 0.9995,
            buffer_capacity: 10_000,
            batch_size: 64,
            min_replay_size: 500,
            update_target_every: 100,
            train_every: 4,
            death_train_passes: 3,
            max_grad_norm: 1.0,
            loss: LossKind::default(),
            reward: RewardConfig::default(),
            reward_profile: RewardProfile::Aggressive,
        }
    }
}

impl BrainConfig {
    /// Full layer size chain of the Q-network, input and output included.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_layers.len() + 2);
        sizes.push(STATE_SIZE);
        sizes.extend_from_slice(&self.hidden_layers);
        sizes.push(Action::COUNT);
        sizes
    }

    pub fn validate(&self) -> Result<()> {
        if self.hidden_layers.is_empty() {
            return Err(AresError::invalid_parameter(
                "hidden_layers",
                "network must have at least one hidden layer",
            ));
        }
        if self.hidden_layers.iter().any(|&n| n == 0) {
            return Err(AresError::invalid_parameter(
                "hidden_layers",
                "layer width must be non-zero",
            ));
        }
        if self.learning_rate <= 0.0 {
            return Err(AresError::invalid_parameter(
                "learning_rate",
                "must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(AresError::invalid_parameter(
                "discount_factor",
                "must be in [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.epsilon)
            || !(0.0..=1.0).contains(&self.epsilon_min)
            || self.epsilon_min > self.epsilon
        {
            return Err(AresError::invalid_parameter(
                "epsilon",
                "epsilon and epsilon_min must be in [0, 1] with epsilon_min <= epsilon",
            ));
        }
        if !(0.0..1.0).contains(&self.epsilon_decay) {
            return Err(AresError::invalid_parameter(
                "epsilon_decay",
                "must be in [0, 1)",
            ));
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return Err(AresError::invalid_parameter("dropout", "must be in [0, 1)"));
        }
        if self.batch_size == 0 {
            return Err(AresError::invalid_parameter(
                "batch_size",
                "must be non-zero",
            ));
        }
        if self.batch_size > self.buffer_capacity {
            return Err(AresError::invalid_parameter(
                "batch_size",
                "cannot exceed buffer capacity",
            ));
        }
        if self.update_target_every == 0 || self.train_every == 0 {
            return Err(AresError::invalid_parameter(
                "train cadence",
                "update_target_every and train_every must be non-zero",
            ));
        }
        if self.max_grad_norm <= 0.0 {
            return Err(AresError::invalid_parameter(
                "max_grad_norm",
                "must be positive",
            ));
        }
        Ok(())
    }
}
