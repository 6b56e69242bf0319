//! Neural network controller for the cars.
//!
//! A fixed two-layer feed-forward network maps the sensor vector to four
//! control signals. Parameters can be cloned from an elite or inherited with
//! Gaussian mutation.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

pub mod activation;
pub mod dense;

pub use activation::Activation;
pub use dense::{Dense, evolve};

/// Number of control signals produced by the network.
pub const OUTPUT_SIZE: usize = 4;

/// Decoded driving command for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Controls {
    /// Throttle pedal.
    pub accelerate: bool,
    /// Brake pedal.
    pub brake: bool,
    /// Steering: `-1` left, `0` straight, `1` right.
    pub turn: i8,
}

impl Controls {
    /// All pedals released, wheel straight.
    pub const IDLE: Controls = Controls {
        accelerate: false,
        brake: false,
        turn: 0,
    };

    /// Interprets raw network outputs `[accelerate, brake, left, right]`.
    ///
    /// Outputs pass through ReLU, so any positive value counts as pressed.
    /// When both steering outputs fire, left wins.
    pub fn from_outputs(outputs: &Array1<f32>) -> Self {
        let pressed = |i: usize| outputs[i] > 0.0;
        let turn = if pressed(2) {
            -1
        } else if pressed(3) {
            1
        } else {
            0
        };
        Self {
            accelerate: pressed(0),
            brake: pressed(1),
            turn,
        }
    }
}

/// Two-layer feed-forward controller.
///
/// Inputs are `[speed, reading_0, ..., reading_n]`, outputs are
/// `[accelerate, brake, turn_left, turn_right]` after a ReLU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brain {
    /// Input to hidden layer.
    pub hidden: Dense,
    /// Hidden to output layer.
    pub output: Dense,
    /// Nonlinearity applied after the hidden layer.
    pub hidden_activation: Activation,
}

impl Brain {
    /// Creates a brain with random Gaussian parameters.
    pub fn new_random(
        input_size: usize,
        hidden_size: usize,
        hidden_activation: Activation,
        weight_scale: f32,
        bias_scale: f32,
    ) -> Self {
        Self {
            hidden: Dense::new_random(input_size, hidden_size, weight_scale, bias_scale),
            output: Dense::new_random(hidden_size, OUTPUT_SIZE, weight_scale, bias_scale),
            hidden_activation,
        }
    }

    /// Runs Dense → activation → Dense → ReLU.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut hidden = self.hidden.forward(inputs);
        self.hidden_activation.forward_inplace(&mut hidden);
        let mut output = self.output.forward(&hidden);
        Activation::Relu.forward_inplace(&mut output);
        output
    }

    /// Forward pass decoded into [`Controls`].
    pub fn decide(&self, inputs: &Array1<f32>) -> Controls {
        Controls::from_outputs(&self.forward(inputs))
    }

    /// Copies both layers from `parent` unchanged.
    pub fn inherit(&mut self, parent: &Brain) {
        self.hidden.inherit(&parent.hidden);
        self.output.inherit(&parent.output);
        self.hidden_activation = parent.hidden_activation;
    }

    /// Copies both layers from `parent` and perturbs them with Gaussian noise.
    pub fn inherit_and_evolve(
        &mut self,
        parent: &Brain,
        weight_mutation_factor: f32,
        bias_mutation_factor: f32,
    ) {
        self.hidden
            .inherit_and_evolve(&parent.hidden, weight_mutation_factor, bias_mutation_factor);
        self.output
            .inherit_and_evolve(&parent.output, weight_mutation_factor, bias_mutation_factor);
        self.hidden_activation = parent.hidden_activation;
    }

    /// Number of inputs the brain expects.
    pub fn input_size(&self) -> usize {
        self.hidden.input_size()
    }

    /// Flattens all weights and biases into a single vector.
    pub fn to_flat_vector(&self) -> Vec<f32> {
        let mut flat = Vec::new();
        for layer in [&self.hidden, &self.output] {
            flat.extend(layer.weights.iter().copied());
            flat.extend(layer.biases.iter().copied());
        }
        flat
    }
}
