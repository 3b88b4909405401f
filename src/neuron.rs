//! Single neuron behaviour. A [crate::Network] stores every neuron's value, bias and weights in
//! flat buffers, and hands out [NeuronRef] / [NeuronMut] views over one of them. Which
//! nonlinearity those views apply is chosen once, by the network's [Neuron] type parameter, so
//! the forward loop is specialised per variant instead of dispatching per call.

use core::{fmt::Debug, marker::PhantomData};
use serde::{Deserialize, Serialize};

/// The capability every neuron variant provides
pub trait Neuron: Debug + Clone + Copy + Default + PartialEq + 'static {
    /// Short name, used by the CLI and in logs
    const NAME: &'static str;

    /// Squash an accumulated value
    fn activate(value: f64) -> f64;

    /// The contribution of one synapse slot
    #[inline]
    fn accumulate(value: f64, input: f64, weight: f64, bias: f64) -> f64 {
        value + input * weight + bias
    }

    /// Grid step an output neuron asks for, before bounds are applied
    fn direction(value: f64) -> i32;
}

/// Neuron whose activation snaps to -1, 0 or 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Discrete;

impl Neuron for Discrete {
    const NAME: &'static str = "discrete";

    #[inline]
    fn activate(value: f64) -> f64 {
        if value < 0. {
            -1.
        } else if value > 0. {
            1.
        } else {
            0.
        }
    }

    #[inline]
    fn direction(value: f64) -> i32 {
        value.round() as i32
    }
}

/// Neuron squashed by a logistic rescaled onto (-1, 1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Continuous;

impl Neuron for Continuous {
    const NAME: &'static str = "continuous";

    #[inline]
    fn activate(value: f64) -> f64 {
        2. / (1. + (-value).exp()) - 1.
    }

    #[inline]
    fn direction(value: f64) -> i32 {
        if value > 0. {
            1
        } else if value < 0. {
            -1
        } else {
            0
        }
    }
}

/// Read-only view of one neuron inside a network
#[derive(Debug, Clone, Copy)]
pub struct NeuronRef<'a, N: Neuron> {
    pub(crate) value: f64,
    pub(crate) bias: f64,
    pub(crate) weights: &'a [f64],
    pub(crate) kind: PhantomData<N>,
}

impl<N: Neuron> NeuronRef<'_, N> {
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// One weight per synapse slot
    #[inline]
    pub fn weights(&self) -> &[f64] {
        self.weights
    }

    /// Number of synapse slots
    #[inline]
    pub fn slots(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn direction(&self) -> i32 {
        N::direction(self.value)
    }
}

/// Mutable view of one neuron inside a network. Only the value may change, weights and bias
/// are owned by the genetic operators.
#[derive(Debug)]
pub struct NeuronMut<'a, N: Neuron> {
    pub(crate) value: &'a mut f64,
    pub(crate) bias: f64,
    pub(crate) weights: &'a [f64],
    pub(crate) kind: PhantomData<N>,
}

impl<N: Neuron> NeuronMut<'_, N> {
    #[inline]
    pub fn value(&self) -> f64 {
        *self.value
    }

    #[inline]
    pub fn set_value(&mut self, value: f64) {
        *self.value = value;
    }

    /// Add `input * weights[slot] + bias` to the value
    ///
    /// # Panics
    /// If `slot` is not below the neuron's slot count
    #[inline]
    pub fn accumulate(&mut self, slot: usize, input: f64) {
        *self.value = N::accumulate(*self.value, input, self.weights[slot], self.bias);
    }

    /// Apply the variant's nonlinearity in place
    #[inline]
    pub fn activate(&mut self) {
        *self.value = N::activate(*self.value);
    }
}
