//! Gradient-based parameter updates for the policy network.

use ndarray::{Array1, Array2};
use serde::{Serialize, Deserialize};

use crate::network::QNetwork;

/// Applies one batch of per-layer gradients to a network.
pub trait Optimizer {
    fn apply(&mut self, network: &mut QNetwork, gradients: &[(Array2<f32>, Array1<f32>)], learning_rate: f32);
}

/// Serializable dispatch over the supported optimizers. The checkpoint blob
/// carries this whole value, internal state included.
#[derive(Serialize, Deserialize, Clone)]
pub enum OptimizerWrapper {
    Sgd(Sgd),
    Adam(Adam),
}

impl Optimizer for OptimizerWrapper {
    fn apply(&mut self, network: &mut QNetwork, gradients: &[(Array2<f32>, Array1<f32>)], learning_rate: f32) {
        match self {
            OptimizerWrapper::Sgd(optimizer) => optimizer.apply(network, gradients, learning_rate),
            OptimizerWrapper::Adam(optimizer) => optimizer.apply(network, gradients, learning_rate),
        }
    }
}

/// Plain stochastic gradient descent. Stateless.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct Sgd;

impl Sgd {
    pub fn new() -> Sgd {
        Sgd
    }
}

impl Optimizer for Sgd {
    fn apply(&mut self, network: &mut QNetwork, gradients: &[(Array2<f32>, Array1<f32>)], learning_rate: f32) {
        for (layer, (weight_grads, bias_grads)) in network.layers.iter_mut().zip(gradients) {
            layer.weights.zip_mut_with(weight_grads, |w, &g| *w -= learning_rate * g);
            layer.biases.zip_mut_with(bias_grads, |b, &g| *b -= learning_rate * g);
        }
    }
}

/// Adam with bias-corrected moment estimates.
///
/// Moment buffers are addressed by layer index and the timestep advances once
/// per batch, so the state stays aligned with the network no matter how many
/// layers it has.
#[derive(Serialize, Deserialize, Clone)]
pub struct Adam {
    pub beta1: f32,
    pub beta2: f32,
    pub epsilon: f32,
    m_weights: Vec<Array2<f32>>,
    v_weights: Vec<Array2<f32>>,
    m_biases: Vec<Array1<f32>>,
    v_biases: Vec<Array1<f32>>,
    t: usize,
}

impl Adam {
    pub fn new(network: &QNetwork, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        let m_weights = network.layers.iter().map(|l| Array2::zeros(l.weights.dim())).collect();
        let v_weights = network.layers.iter().map(|l| Array2::zeros(l.weights.dim())).collect();
        let m_biases = network.layers.iter().map(|l| Array1::zeros(l.biases.dim())).collect();
        let v_biases = network.layers.iter().map(|l| Array1::zeros(l.biases.dim())).collect();

        Adam {
            beta1,
            beta2,
            epsilon,
            m_weights,
            v_weights,
            m_biases,
            v_biases,
            t: 0,
        }
    }

    pub fn default_for(network: &QNetwork) -> Self {
        Self::new(network, 0.9, 0.999, 1e-8)
    }
}

impl Optimizer for Adam {
    fn apply(&mut self, network: &mut QNetwork, gradients: &[(Array2<f32>, Array1<f32>)], learning_rate: f32) {
        debug_assert_eq!(network.layers.len(), gradients.len());
        self.t += 1;
        let (beta1, beta2, eps) = (self.beta1, self.beta2, self.epsilon);
        let bias1 = 1.0 - beta1.powi(self.t as i32);
        let bias2 = 1.0 - beta2.powi(self.t as i32);

        for (i, (layer, (weight_grads, bias_grads))) in
            network.layers.iter_mut().zip(gradients).enumerate()
        {
            let m = &mut self.m_weights[i];
            let v = &mut self.v_weights[i];
            m.zip_mut_with(weight_grads, |m, &g| *m = beta1 * *m + (1.0 - beta1) * g);
            v.zip_mut_with(weight_grads, |v, &g| *v = beta2 * *v + (1.0 - beta2) * g * g);
            let m_hat = m.mapv(|x| x / bias1);
            let v_hat = v.mapv(|x| x / bias2);
            layer.weights -= &((&m_hat / (v_hat.mapv(f32::sqrt) + eps)) * learning_rate);

            let m = &mut self.m_biases[i];
            let v = &mut self.v_biases[i];
            m.zip_mut_with(bias_grads, |m, &g| *m = beta1 * *m + (1.0 - beta1) * g);
            v.zip_mut_with(bias_grads, |v, &g| *v = beta2 * *v + (1.0 - beta2) * g * g);
            let m_hat = m.mapv(|x| x / bias1);
            let v_hat = v.mapv(|x| x / bias2);
            layer.biases -= &((&m_hat / (v_hat.mapv(f32::sqrt) + eps)) * learning_rate);
        }
    }
}

/// Scale all gradients down if their global L2 norm exceeds `max_norm`.
/// Returns the pre-clip norm.
pub fn clip_global_norm(gradients: &mut [(Array2<f32>, Array1<f32>)], max_norm: f32) -> f32 {
    let norm_sq: f32 = gradients
        .iter()
        .map(|(wg, bg)| {
            wg.iter().map(|&g| g * g).sum::<f32>() + bg.iter().map(|&g| g * g).sum::<f32>()
        })
        .sum();
    let global_norm = norm_sq.sqrt();

    if global_norm > max_norm {
        let scale = max_norm / global_norm;
        for (wg, bg) in gradients.iter_mut() {
            wg.mapv_inplace(|g| g * scale);
            bg.mapv_inplace(|g| g * scale);
        }
    }

    global_norm
}
