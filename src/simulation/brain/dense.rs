//! Fully connected layer with inheritable parameters.

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// A single linear layer computing `input · W + b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dense {
    /// Weight matrix (`input_size` × `output_size`).
    pub weights: Array2<f32>,
    /// Bias row vector (`output_size`).
    pub biases: Array1<f32>,
}

impl Dense {
    /// Creates a layer with Gaussian weights and biases.
    ///
    /// Weights are drawn from `N(0, 1) · weight_scale`, biases from
    /// `N(0, 1) · bias_scale`.
    pub fn new_random(
        input_size: usize,
        output_size: usize,
        weight_scale: f32,
        bias_scale: f32,
    ) -> Self {
        Self {
            weights: Array2::<f32>::random((input_size, output_size), StandardNormal) * weight_scale,
            biases: Array1::<f32>::random(output_size, StandardNormal) * bias_scale,
        }
    }

    /// Number of inputs the layer accepts.
    pub fn input_size(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of outputs the layer produces.
    pub fn output_size(&self) -> usize {
        self.weights.ncols()
    }

    /// Linear forward pass, no activation.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` does not match [`Dense::input_size`].
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        assert_eq!(
            inputs.len(),
            self.input_size(),
            "dense layer expects {} inputs",
            self.input_size()
        );
        let mut output = inputs.dot(&self.weights);
        output += &self.biases;
        output
    }

    /// Replaces weights and biases with an exact copy of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` has a different shape.
    pub fn inherit(&mut self, parent: &Dense) {
        self.assert_same_shape(parent);
        self.weights.clone_from(&parent.weights);
        self.biases.clone_from(&parent.biases);
    }

    /// Replaces the parameters with a Gaussian perturbation of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` has a different shape.
    pub fn inherit_and_evolve(
        &mut self,
        parent: &Dense,
        weight_mutation_factor: f32,
        bias_mutation_factor: f32,
    ) {
        self.assert_same_shape(parent);
        *self = evolve(parent, weight_mutation_factor, bias_mutation_factor);
    }

    fn assert_same_shape(&self, other: &Dense) {
        assert_eq!(
            self.weights.dim(),
            other.weights.dim(),
            "inherited weights have the wrong shape"
        );
        assert_eq!(
            self.biases.len(),
            other.biases.len(),
            "inherited biases have the wrong shape"
        );
    }
}

/// Returns `parent` plus elementwise `N(0, 1)` noise scaled per tensor.
pub fn evolve(parent: &Dense, weight_mutation_factor: f32, bias_mutation_factor: f32) -> Dense {
    Dense {
        weights: &parent.weights
            + &(Array2::<f32>::random(parent.weights.dim(), StandardNormal) * weight_mutation_factor),
        biases: &parent.biases
            + &(Array1::<f32>::random(parent.biases.len(), StandardNormal) * bias_mutation_factor),
    }
}
