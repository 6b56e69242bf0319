#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evo_racer::simulation::brain::{Activation, Brain, Controls, Dense, evolve};
use ndarray::{Array1, Array2, array};

fn zero_layer(inputs: usize, outputs: usize) -> Dense {
    Dense {
        weights: Array2::zeros((inputs, outputs)),
        biases: Array1::zeros(outputs),
    }
}

fn mean_and_std(values: &[f32]) -> (f32, f32) {
    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
    (mean, var.sqrt())
}

#[test]
fn test_dense_forward_is_input_times_weights_plus_bias() {
    let layer = Dense {
        weights: array![[1.0, 2.0, 0.0], [0.5, -1.0, 3.0]],
        biases: array![0.1, 0.2, 0.3],
    };

    let output = layer.forward(&array![2.0, 4.0]);

    assert_eq!(layer.input_size(), 2);
    assert_eq!(layer.output_size(), 3);
    assert!((output[0] - 4.1).abs() < 1e-6);
    assert!((output[1] - 0.2).abs() < 1e-6);
    assert!((output[2] - 12.3).abs() < 1e-6);
}

#[test]
fn test_new_random_shapes() {
    let layer = Dense::new_random(4, 6, 0.1, 0.0);

    assert_eq!(layer.weights.dim(), (4, 6));
    assert_eq!(layer.biases.len(), 6);
    assert!(layer.biases.iter().all(|&b| b == 0.0));
}

#[test]
#[should_panic(expected = "dense layer expects")]
fn test_forward_rejects_wrong_input_length() {
    let layer = zero_layer(3, 2);
    let _ = layer.forward(&array![1.0, 2.0]);
}

#[test]
fn test_inherit_copies_parameters_exactly() {
    let parent = Dense::new_random(3, 5, 1.0, 1.0);
    let mut child = Dense::new_random(3, 5, 1.0, 1.0);

    child.inherit(&parent);

    assert_eq!(child, parent);
}

#[test]
#[should_panic(expected = "wrong shape")]
fn test_inherit_rejects_shape_mismatch() {
    let parent = zero_layer(3, 5);
    let mut child = zero_layer(4, 5);
    child.inherit(&parent);
}

#[test]
#[should_panic(expected = "wrong shape")]
fn test_inherit_and_evolve_rejects_shape_mismatch() {
    let parent = zero_layer(3, 5);
    let mut child = zero_layer(3, 4);
    child.inherit_and_evolve(&parent, 0.1, 0.1);
}

#[test]
fn test_evolve_with_zero_factor_is_a_copy() {
    let parent = Dense::new_random(3, 5, 1.0, 1.0);

    let child = evolve(&parent, 0.0, 0.0);

    assert_eq!(child, parent);
}

#[test]
fn test_evolve_leaves_parent_untouched() {
    let parent = Dense::new_random(3, 5, 1.0, 1.0);
    let snapshot = parent.clone();

    let child = evolve(&parent, 0.5, 0.5);

    assert_eq!(parent, snapshot);
    assert_ne!(child, parent);
}

#[test]
fn test_evolve_noise_has_zero_mean_and_scales_with_factor() {
    let parent = zero_layer(40, 50);

    for factor in [0.1f32, 0.5, 2.0] {
        let child = evolve(&parent, factor, 0.0);
        let noise: Vec<f32> = child.weights.iter().copied().collect();
        let (mean, std) = mean_and_std(&noise);

        assert!(mean.abs() < 0.1 * factor, "mean {mean} for factor {factor}");
        assert!(
            (std - factor).abs() < 0.1 * factor,
            "std {std} for factor {factor}"
        );
        // bias factor was zero
        assert!(child.biases.iter().all(|&b| b == 0.0));
    }
}

#[test]
fn test_bias_noise_uses_bias_factor() {
    let parent = zero_layer(1, 2000);

    let child = evolve(&parent, 0.0, 0.3);
    let noise: Vec<f32> = child.biases.iter().copied().collect();
    let (mean, std) = mean_and_std(&noise);

    assert!(mean.abs() < 0.03);
    assert!((std - 0.3).abs() < 0.03);
    assert!(child.weights.iter().all(|&w| w == 0.0));
}

#[test]
fn test_activations() {
    let input = array![-2.0, 0.0, 3.0];

    let relu = Activation::Relu.forward(&input);
    assert_eq!(relu, array![0.0, 0.0, 3.0]);

    let sigmoid = Activation::Sigmoid.forward(&input);
    assert!((sigmoid[0] - 0.119_202_92).abs() < 1e-6);
    assert!((sigmoid[1] - 0.5).abs() < 1e-6);
    assert!((sigmoid[2] - 0.952_574_13).abs() < 1e-6);
}

#[test]
fn test_controls_decoding() {
    assert_eq!(Controls::from_outputs(&array![0.0, 0.0, 0.0, 0.0]), Controls::IDLE);

    let forward_right = Controls::from_outputs(&array![0.7, 0.0, 0.0, 1.2]);
    assert!(forward_right.accelerate);
    assert!(!forward_right.brake);
    assert_eq!(forward_right.turn, 1);

    let left = Controls::from_outputs(&array![0.0, 0.4, 0.9, 0.0]);
    assert!(left.brake);
    assert_eq!(left.turn, -1);

    // both steering outputs active: left wins
    let both = Controls::from_outputs(&array![0.0, 0.0, 0.2, 0.3]);
    assert_eq!(both.turn, -1);
}

#[test]
fn test_brain_forward_produces_four_non_negative_outputs() {
    let brain = Brain::new_random(4, 6, Activation::Sigmoid, 1.0, 1.0);

    let output = brain.forward(&array![2.0, 100.0, 30.0, 45.0]);

    assert_eq!(brain.input_size(), 4);
    assert_eq!(output.len(), 4);
    assert!(output.iter().all(|&o| o >= 0.0));
}

#[test]
fn test_brain_forward_matches_manual_computation() {
    let brain = Brain {
        hidden: Dense {
            weights: array![[1.0, -1.0], [0.5, 0.5]],
            biases: array![0.0, 0.0],
        },
        output: Dense {
            weights: array![[1.0, -1.0, 2.0, 0.0], [0.0, 1.0, 0.0, -1.0]],
            biases: array![0.0, 0.0, -1.0, 0.0],
        },
        hidden_activation: Activation::Relu,
    };

    // hidden = relu([1 + 1, -1 + 1]) = [2, 0]
    // output = relu([2, -2, 4 - 1, 0]) = [2, 0, 3, 0]
    let output = brain.forward(&array![1.0, 2.0]);
    assert_eq!(output, array![2.0, 0.0, 3.0, 0.0]);

    let controls = brain.decide(&array![1.0, 2.0]);
    assert!(controls.accelerate);
    assert!(!controls.brake);
    assert_eq!(controls.turn, -1);
}

#[test]
fn test_brain_inherit_and_evolve() {
    let parent = Brain::new_random(4, 6, Activation::Relu, 1.0, 1.0);
    let mut clone = Brain::new_random(4, 6, Activation::Sigmoid, 1.0, 1.0);
    let mut mutant = clone.clone();

    clone.inherit(&parent);
    mutant.inherit_and_evolve(&parent, 0.2, 0.2);

    assert_eq!(clone, parent);
    assert_ne!(mutant, parent);
    assert_eq!(mutant.hidden_activation, Activation::Relu);
    assert_eq!(mutant.to_flat_vector().len(), parent.to_flat_vector().len());
}
