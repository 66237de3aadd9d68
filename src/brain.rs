//! The one shared Double-DQN brain.
//!
//! Exactly one [`DqnBrain`] exists per run. Every live enemy holds a
//! [`BrainHandle`] to it: action selection reads the policy network, stored
//! transitions land in the one replay buffer, and the training step mutates
//! the policy parameters for everyone at once.

use ndarray::{Array1, Array2, ArrayView1};
use rand::{Rng, rngs::ThreadRng};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

use crate::actions::Action;
use crate::config::BrainConfig;
use crate::error::Result;
use crate::loss::Loss;
use crate::metrics::TrainingMetrics;
use crate::network::QNetwork;
use crate::optimizer::{clip_global_norm, Adam, Optimizer, OptimizerWrapper};
use crate::replay_buffer::{ReplayBuffer, Transition};

/// Shared ownership of the single brain within the simulation thread.
///
/// A multi-threaded embedding would substitute `Arc<Mutex<DqnBrain>>`; the
/// simulation here is single-threaded by design, so the cheaper handle wins.
pub type BrainHandle = Rc<RefCell<DqnBrain>>;

/// Policy/target network pair plus everything needed to train it online.
pub struct DqnBrain {
    pub policy: QNetwork,
    pub target: QNetwork,
    optimizer: OptimizerWrapper,
    loss: Box<dyn Loss>,
    buffer: ReplayBuffer,
    config: BrainConfig,
    epsilon: f32,
    train_steps: usize,
    metrics: TrainingMetrics,
    rng: ThreadRng,
}

impl DqnBrain {
    pub fn new(config: BrainConfig) -> Result<Self> {
        config.validate()?;

        let policy = QNetwork::new(&config.layer_sizes(), config.dropout);
        // Target starts as an exact copy of the policy parameters.
        let target = policy.clone();
        let optimizer = OptimizerWrapper::Adam(Adam::default_for(&policy));
        let loss = config.loss.build();
        let buffer = ReplayBuffer::new(config.buffer_capacity);
        let epsilon = config.epsilon;

        Ok(DqnBrain {
            policy,
            target,
            optimizer,
            loss,
            buffer,
            epsilon,
            config,
            train_steps: 0,
            metrics: TrainingMetrics::default(),
            rng: rand::thread_rng(),
        })
    }

    pub fn into_handle(self) -> BrainHandle {
        Rc::new(RefCell::new(self))
    }

    /// Epsilon-greedy action selection over the policy network.
    ///
    /// With probability epsilon a uniformly random action is explored;
    /// otherwise the argmax Q-value action is exploited. Argmax ties resolve
    /// to the first maximal index, which callers must not rely on.
    pub fn choose_action(&mut self, state: ArrayView1<f32>) -> Action {
        if self.rng.gen::<f32>() < self.epsilon {
            let index = self.rng.gen_range(0..Action::COUNT);
            return Action::from_index(index).expect("index is always in range");
        }

        let q_values = self.policy.forward(state);
        let best = q_values
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        Action::from_index(best).unwrap_or(Action::Approach)
    }

    /// Store one transition in the shared replay buffer.
    pub fn store(&mut self, transition: Transition) {
        self.buffer.push(transition);
    }

    /// Run one Double-DQN gradient step.
    ///
    /// Returns `None` without touching the network while the buffer is still
    /// warming up; this is expected early in a run, not an error. On success
    /// the loss is returned, epsilon decays, and the target network is synced
    /// every `update_target_every` steps.
    pub fn train_step(&mut self) -> Option<f32> {
        if self.buffer.len() < self.config.min_replay_size {
            return None;
        }

        let batch_size = self.config.batch_size;
        let batch = match self.buffer.sample(batch_size) {
            Ok(batch) => batch,
            Err(_) => return None,
        };

        let state_size = batch[0].state.len();
        let mut states = Array2::zeros((batch_size, state_size));
        let mut next_states = Array2::zeros((batch_size, state_size));
        let mut actions = Vec::with_capacity(batch_size);
        let mut rewards = Vec::with_capacity(batch_size);
        let mut dones = Vec::with_capacity(batch_size);

        for (i, transition) in batch.iter().enumerate() {
            states.row_mut(i).assign(&transition.state);
            next_states.row_mut(i).assign(&transition.next_state);
            actions.push(transition.action);
            rewards.push(transition.reward);
            dones.push(transition.done);
        }

        // Double DQN: the policy network selects the next action, the target
        // network evaluates it. Terminal transitions bootstrap nothing.
        let next_q_policy = self.policy.forward_batch(next_states.view(), false);
        let next_q_target = self.target.forward_batch(next_states.view(), false);

        let mut targets = Array1::zeros(batch_size);
        for i in 0..batch_size {
            targets[i] = if dones[i] {
                rewards[i]
            } else {
                let best_next = next_q_policy
                    .row(i)
                    .iter()
                    .enumerate()
                    .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                    .map(|(idx, _)| idx)
                    .unwrap_or(0);
                rewards[i] + self.config.discount_factor * next_q_target[[i, best_next]]
            };
        }

        // Forward the sampled states in training mode so dropout is active
        // and the backward pass sees this batch's cached activations.
        let q_all = self.policy.forward_batch(states.view(), true);
        let predicted = Array1::from_shape_fn(batch_size, |i| q_all[[i, actions[i]]]);

        let loss = self.loss.compute(predicted.view(), targets.view());
        let grad = self.loss.gradient(predicted.view(), targets.view());

        // The loss only touches the taken-action outputs; scatter its
        // gradient back into the full output matrix for backprop.
        let mut output_errors = Array2::zeros(q_all.dim());
        for i in 0..batch_size {
            output_errors[[i, actions[i]]] = grad[i];
        }

        let mut gradients = self.policy.backward_batch(output_errors.view());
        clip_global_norm(&mut gradients, self.config.max_grad_norm);
        self.optimizer.apply(&mut self.policy, &gradients, self.config.learning_rate);

        self.metrics.record_loss(loss);
        self.train_steps += 1;

        if self.train_steps % self.config.update_target_every == 0 {
            self.target.sync_from(&self.policy);
            debug!(train_steps = self.train_steps, "synced target network");
        }

        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.epsilon_min);

        Some(loss)
    }

    /// Record a finished episode's total reward.
    pub fn end_episode(&mut self, episode_reward: f32) {
        self.metrics.record_episode(episode_reward);
    }

    /// Override epsilon, clamped to [0, 1]. Used by the enclosing game for
    /// difficulty scaling; normal decay happens inside `train_step`.
    pub fn set_epsilon(&mut self, epsilon: f32) {
        self.epsilon = epsilon.clamp(0.0, 1.0);
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn train_steps(&self) -> usize {
        self.train_steps
    }

    pub fn buffer(&self) -> &ReplayBuffer {
        &self.buffer
    }

    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    pub fn metrics(&self) -> &TrainingMetrics {
        &self.metrics
    }

    pub(crate) fn optimizer(&self) -> &OptimizerWrapper {
        &self.optimizer
    }

    /// Install checkpointed state. The caller has already validated shapes.
    pub(crate) fn restore(
        &mut self,
        policy: QNetwork,
        target: QNetwork,
        optimizer: OptimizerWrapper,
        epsilon: f32,
    ) {
        self.policy = policy;
        self.target = target;
        self.optimizer = optimizer;
        self.epsilon = epsilon.clamp(0.0, 1.0);
        // The loss holds no state; rebuild it so a config swap stays honest.
        self.loss = self.config.loss.build();
    }
}
