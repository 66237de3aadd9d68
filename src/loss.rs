//! Loss functions for the Q-learning regression target.
//!
//! Losses operate on the gathered taken-action predictions, so inputs are
//! 1-D vectors of length batch_size. Gradients use mean reduction.

use ndarray::{Array1, ArrayView1};
use serde::{Serialize, Deserialize};

pub trait Loss: Send + Sync {
    fn compute(&self, prediction: ArrayView1<f32>, target: ArrayView1<f32>) -> f32;

    fn gradient(&self, prediction: ArrayView1<f32>, target: ArrayView1<f32>) -> Array1<f32>;
}

/// Mean squared error.
pub struct Mse;

impl Loss for Mse {
    fn compute(&self, prediction: ArrayView1<f32>, target: ArrayView1<f32>) -> f32 {
        let diff = &prediction - &target;
        (&diff * &diff).sum() / (2.0 * prediction.len() as f32)
    }

    fn gradient(&self, prediction: ArrayView1<f32>, target: ArrayView1<f32>) -> Array1<f32> {
        (&prediction - &target) / prediction.len() as f32
    }
}

/// Huber (smooth L1) loss. Quadratic within `delta` of the target, linear
/// beyond, which keeps the occasional wildly wrong bootstrap target from
/// dominating the update.
pub struct HuberLoss {
    pub delta: f32,
}

impl HuberLoss {
    pub fn new(delta: f32) -> Self {
        HuberLoss { delta }
    }
}

impl Loss for HuberLoss {
    fn compute(&self, prediction: ArrayView1<f32>, target: ArrayView1<f32>) -> f32 {
        let diff = &prediction - &target;
        diff.mapv(|x| {
            let abs_x = x.abs();
            if abs_x <= self.delta {
                0.5 * x * x
            } else {
                self.delta * abs_x - 0.5 * self.delta * self.delta
            }
        }).sum() / prediction.len() as f32
    }

    fn gradient(&self, prediction: ArrayView1<f32>, target: ArrayView1<f32>) -> Array1<f32> {
        let diff = &prediction - &target;
        diff.mapv(|x| {
            if x.abs() <= self.delta {
                x
            } else {
                self.delta * x.signum()
            }
        }) / prediction.len() as f32
    }
}

/// Configuration-level selection of the training loss.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum LossKind {
    Huber { delta: f32 },
    Mse,
}

impl Default for LossKind {
    fn default() -> Self {
        LossKind::Huber { delta: 1.0 }
    }
}

impl LossKind {
    pub fn build(&self) -> Box<dyn Loss> {
        match *self {
            LossKind::Huber { delta } => Box::new(HuberLoss::new(delta)),
            LossKind::Mse => Box::new(Mse),
        }
    }
}
