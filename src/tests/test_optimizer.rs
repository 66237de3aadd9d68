use ndarray::{Array1, Array2};

use crate::network::QNetwork;
use crate::optimizer::{clip_global_norm, Adam, Optimizer, Sgd};

fn unit_gradients(network: &QNetwork, value: f32) -> Vec<(Array2<f32>, Array1<f32>)> {
    network
        .layers
        .iter()
        .map(|l| {
            (
                Array2::from_elem(l.weights.dim(), value),
                Array1::from_elem(l.biases.dim(), value),
            )
        })
        .collect()
}

#[test]
fn test_sgd_steps_against_gradient() {
    let mut network = QNetwork::new(&[4, 3], 0.0);
    let before = network.layers[0].weights.clone();
    let gradients = unit_gradients(&network, 1.0);

    Sgd::new().apply(&mut network, &gradients, 0.1);

    let after = &network.layers[0].weights;
    for (b, a) in before.iter().zip(after.iter()) {
        assert!((b - a - 0.1).abs() < 1e-6);
    }
    for &b in network.layers[0].biases.iter() {
        assert!((b + 0.1).abs() < 1e-6);
    }
}

#[test]
fn test_adam_moves_parameters() {
    let mut network = QNetwork::new(&[4, 8, 3], 0.0);
    let mut adam = Adam::default_for(&network);
    let before = network.layers[0].weights.clone();

    let gradients = unit_gradients(&network, 0.5);
    adam.apply(&mut network, &gradients, 0.01);

    assert_ne!(before, network.layers[0].weights);
    // With a constant positive gradient the bias-corrected first step is
    // close to -lr for every parameter.
    for (b, a) in before.iter().zip(network.layers[0].weights.iter()) {
        let step = b - a;
        assert!((step - 0.01).abs() < 1e-3, "step was {}", step);
    }
}

#[test]
fn test_adam_state_tracks_layers() {
    let mut network = QNetwork::new(&[4, 8, 8, 3], 0.0);
    let mut adam = Adam::default_for(&network);
    let gradients = unit_gradients(&network, 0.1);

    // Multiple applications must stay shape-consistent across all layers.
    for _ in 0..5 {
        adam.apply(&mut network, &gradients, 0.001);
    }
    for layer in &network.layers {
        for &w in layer.weights.iter() {
            assert!(w.is_finite());
        }
    }
}

#[test]
fn test_clip_global_norm_scales_down() {
    let mut gradients = vec![(
        Array2::from_elem((2, 2), 3.0),
        Array1::from_elem(2, 4.0),
    )];
    // norm = sqrt(4*9 + 2*16) = sqrt(68)
    let expected_norm = 68.0f32.sqrt();

    let norm = clip_global_norm(&mut gradients, 1.0);
    assert!((norm - expected_norm).abs() < 1e-4);

    let clipped_norm: f32 = gradients
        .iter()
        .map(|(wg, bg)| {
            wg.iter().map(|&g| g * g).sum::<f32>() + bg.iter().map(|&g| g * g).sum::<f32>()
        })
        .sum::<f32>()
        .sqrt();
    assert!((clipped_norm - 1.0).abs() < 1e-4);
}

#[test]
fn test_clip_global_norm_leaves_small_gradients() {
    let mut gradients = vec![(
        Array2::from_elem((2, 2), 0.01),
        Array1::from_elem(2, 0.01),
    )];
    let original = gradients[0].0.clone();

    let norm = clip_global_norm(&mut gradients, 1.0);
    assert!(norm < 1.0);
    assert_eq!(gradients[0].0, original);
}
