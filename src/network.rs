//! Feed-forward Q-function approximator with hand-written backprop.
//!
//! Two instances of [`QNetwork`] exist per run: the policy network that is
//! trained every step and the target network that is only ever written by
//! [`QNetwork::sync_from`]. Both map a 16-feature state vector to one Q-value
//! per discrete action.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Uniform;
use serde::{Serialize, Deserialize};

/// Activation functions used by the Q-network layers.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Activation {
    Relu,
    Linear,
}

impl Activation {
    fn apply_batch(&self, inputs: &mut Array2<f32>) {
        match self {
            Activation::Relu => inputs.mapv_inplace(|v| v.max(0.0)),
            Activation::Linear => {}
        }
    }

    fn derivative_batch(&self, inputs: ArrayView2<f32>) -> Array2<f32> {
        match self {
            Activation::Relu => inputs.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 }),
            Activation::Linear => Array2::ones(inputs.dim()),
        }
    }
}

/// A fully connected layer with optional inverted dropout after the
/// activation.
///
/// Weights are initialized with Xavier/Glorot uniform scaling so early
/// Q-estimates are well-ranged; biases start at zero. Forward passes cache
/// inputs, pre-activations, and the dropout mask for the backward pass; the
/// caches are transient and excluded from serialization.
#[derive(Serialize, Deserialize, Clone)]
pub struct DenseLayer {
    pub weights: Array2<f32>,
    pub biases: Array1<f32>,
    pub activation: Activation,
    pub dropout_rate: f32,
    #[serde(skip)]
    inputs: Option<Array2<f32>>,
    #[serde(skip)]
    pre_activation_output: Option<Array2<f32>>,
    #[serde(skip)]
    dropout_mask: Option<Array2<f32>>,
}

impl DenseLayer {
    pub fn new(input_size: usize, output_size: usize, activation: Activation, dropout_rate: f32) -> Self {
        let limit = (6.0 / (input_size + output_size) as f32).sqrt();
        let weights = Array2::random((input_size, output_size), Uniform::new(-limit, limit));
        let biases = Array1::zeros(output_size);
        DenseLayer {
            weights,
            biases,
            activation,
            dropout_rate,
            inputs: None,
            pre_activation_output: None,
            dropout_mask: None,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.shape()[0]
    }

    pub fn output_size(&self) -> usize {
        self.weights.shape()[1]
    }

    fn forward_batch(&mut self, inputs: ArrayView2<f32>, training: bool) -> Array2<f32> {
        self.inputs = Some(inputs.to_owned());
        let mut outputs = inputs.dot(&self.weights) + &self.biases.to_owned().insert_axis(Axis(0));
        self.pre_activation_output = Some(outputs.clone());
        self.activation.apply_batch(&mut outputs);

        if training && self.dropout_rate > 0.0 {
            let mut rng = rand::thread_rng();
            let scale = 1.0 / (1.0 - self.dropout_rate);
            let mask = Array2::from_shape_fn(outputs.dim(), |_| {
                if rng.gen::<f32>() > self.dropout_rate {
                    scale
                } else {
                    0.0
                }
            });
            outputs *= &mask;
            self.dropout_mask = Some(mask);
        } else {
            self.dropout_mask = None;
        }

        outputs
    }

    /// Backpropagate `output_errors` through this layer using the cached
    /// forward state. Returns the error for the previous layer plus the
    /// weight and bias gradients.
    fn backward_batch(&self, output_errors: ArrayView2<f32>) -> (Array2<f32>, Array2<f32>, Array1<f32>) {
        let pre_activation_output = self.pre_activation_output.as_ref()
            .expect("No pre-activation output stored. forward_batch() must be called before backward_batch()");
        let inputs = self.inputs.as_ref()
            .expect("No inputs stored. forward_batch() must be called before backward_batch()");

        let mut adjusted_error = output_errors.to_owned();
        if let Some(mask) = self.dropout_mask.as_ref() {
            adjusted_error *= mask;
        }
        adjusted_error *= &self.activation.derivative_batch(pre_activation_output.view());

        let weight_gradients = inputs.t().dot(&adjusted_error);
        let bias_gradients = adjusted_error.sum_axis(Axis(0));

        (adjusted_error, weight_gradients, bias_gradients)
    }
}

/// The Q-function approximator: a stack of dense layers ending in a linear
/// output, one scalar per action.
#[derive(Serialize, Deserialize, Clone)]
pub struct QNetwork {
    pub layers: Vec<DenseLayer>,
}

impl QNetwork {
    /// Build a network from the full layer size chain (input first, actions
    /// last). Hidden layers use ReLU; the output layer is linear. Dropout is
    /// applied after the first two hidden layers only, leaving the layer
    /// feeding the output head and the head itself deterministic.
    pub fn new(layer_sizes: &[usize], dropout: f32) -> Self {
        assert!(layer_sizes.len() >= 2, "network needs at least input and output sizes");

        let last = layer_sizes.len() - 2;
        let layers = layer_sizes
            .windows(2)
            .enumerate()
            .map(|(i, window)| {
                let activation = if i == last { Activation::Linear } else { Activation::Relu };
                let rate = if i < 2.min(last) { dropout } else { 0.0 };
                DenseLayer::new(window[0], window[1], activation, rate)
            })
            .collect();

        QNetwork { layers }
    }

    /// Q-values for a single state, in eval mode (dropout inactive).
    pub fn forward(&mut self, state: ArrayView1<f32>) -> Array1<f32> {
        let state = state.insert_axis(Axis(0));
        let output = self.forward_batch(state.view(), false);
        let width = output.shape()[1];
        output.into_shape((width,)).expect("output row reshape cannot fail")
    }

    /// Q-values for a batch of states. `training` enables dropout and caches
    /// the forward state needed by [`QNetwork::backward_batch`].
    pub fn forward_batch(&mut self, inputs: ArrayView2<f32>, training: bool) -> Array2<f32> {
        let mut current = inputs.to_owned();
        for layer in &mut self.layers {
            current = layer.forward_batch(current.view(), training);
        }
        current
    }

    /// Backpropagate output errors through every layer, returning one
    /// (weight, bias) gradient pair per layer, front to back.
    pub fn backward_batch(&mut self, output_errors: ArrayView2<f32>) -> Vec<(Array2<f32>, Array1<f32>)> {
        let mut gradients: Vec<(Array2<f32>, Array1<f32>)> = Vec::with_capacity(self.layers.len());
        let mut current_error = output_errors.to_owned();

        for i in (0..self.layers.len()).rev() {
            let layer = &self.layers[i];
            let (adjusted_error, weight_gradients, bias_gradients) =
                layer.backward_batch(current_error.view());
            gradients.push((weight_gradients, bias_gradients));

            if i != 0 {
                current_error = adjusted_error.dot(&layer.weights.t());
            }
        }

        gradients.reverse();
        gradients
    }

    /// Copy parameters from another network of the same architecture. This is
    /// the target-network sync: weights and biases only, no training state.
    pub fn sync_from(&mut self, source: &QNetwork) {
        debug_assert_eq!(self.layer_sizes(), source.layer_sizes());
        for (dst, src) in self.layers.iter_mut().zip(&source.layers) {
            dst.weights.assign(&src.weights);
            dst.biases.assign(&src.biases);
        }
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.layers.iter().map(|l| l.input_size()).collect();
        if let Some(last) = self.layers.last() {
            sizes.push(last.output_size());
        }
        sizes
    }

    pub fn num_actions(&self) -> usize {
        self.layers.last().map(|l| l.output_size()).unwrap_or(0)
    }
}
