//! Elementwise activation functions.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Nonlinearity applied to the output of a dense layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    /// Rectified linear unit, `max(0, x)`.
    Relu,
    /// Logistic function, `1 / (1 + e^-x)`.
    Sigmoid,
}

impl Activation {
    /// Applies the activation to every element of `inputs`.
    #[inline]
    pub fn forward(self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = inputs.clone();
        self.forward_inplace(&mut output);
        output
    }

    /// In-place variant of [`Activation::forward`].
    #[inline]
    pub fn forward_inplace(self, values: &mut Array1<f32>) {
        match self {
            Activation::Relu => values.mapv_inplace(|x| x.max(0.0)),
            Activation::Sigmoid => values.mapv_inplace(|x| 1.0 / (1.0 + (-x).exp())),
        }
    }
}
