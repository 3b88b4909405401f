//! The recurrent network every creature thinks with.
//!
//! Neurons live in flat buffers: one value and one bias per neuron, and a square weight matrix
//! whose row `i` holds neuron `i`'s synapse slots. The [Genome] gates which of those slots are
//! read by [Network::forward].

use crate::{
    constants::{CREATURES_PARAM_MAX, CREATURES_PARAM_MIN},
    error::{Error, Result},
    genome::{Genome, Graph},
    neuron::{Neuron, NeuronMut, NeuronRef},
    serialize::{
        deserialize_floats, deserialize_matrix_square, serialize_floats, serialize_matrix,
    },
};
use core::marker::PhantomData;
use rand::{Rng, RngCore};
use rulinalg::matrix::Matrix;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network<N: Neuron> {
    #[serde(serialize_with = "serialize_floats", deserialize_with = "deserialize_floats")]
    values: Vec<f64>,
    #[serde(serialize_with = "serialize_floats", deserialize_with = "deserialize_floats")]
    bias: Vec<f64>,
    /// indexed as [neuron, slot]
    #[serde(
        serialize_with = "serialize_matrix",
        deserialize_with = "deserialize_matrix_square"
    )]
    weights: Matrix<f64>,
    genome: Genome,
    #[serde(skip)]
    kind: PhantomData<N>,
}

impl<N: Neuron> Network<N> {
    /// Build a network whose genome marks exactly the graph's edges. Every neuron gets one
    /// synapse slot per vertex, with bias and weights drawn uniformly from [-1, 1].
    pub fn from_graph(graph: &Graph, rng: &mut impl RngCore) -> Result<Self> {
        let genome = Genome::from_graph(graph)?;
        let width = graph.vertices;

        let mut bias = Vec::with_capacity(width);
        let mut weights = Vec::with_capacity(width * width);
        for _ in 0..width {
            bias.push(rng.random_range(CREATURES_PARAM_MIN..=CREATURES_PARAM_MAX));
            for _ in 0..width {
                weights.push(rng.random_range(CREATURES_PARAM_MIN..=CREATURES_PARAM_MAX));
            }
        }

        Self::from_parts(vec![0.; width], bias, weights, genome)
    }

    /// Assemble a network from explicit buffers, `weights` flattened row-major
    pub fn from_parts(
        values: Vec<f64>,
        bias: Vec<f64>,
        weights: Vec<f64>,
        genome: Genome,
    ) -> Result<Self> {
        let width = genome.width();
        if weights.len() != width * width {
            return Err(Error::Shape {
                what: "weights",
                len: weights.len(),
                expected: width * width,
            });
        }

        let network = Self {
            values,
            bias,
            weights: Matrix::new(width, width, weights),
            genome,
            kind: PhantomData,
        };
        network.validate()?;
        Ok(network)
    }

    fn validate(&self) -> Result<()> {
        let width = self.genome.width();
        for (what, len, expected) in [
            ("values", self.values.len(), width),
            ("bias", self.bias.len(), width),
            ("weights", self.weights.data().len(), width * width),
            ("genome", self.genome.len(), width * width),
        ] {
            if len != expected {
                return Err(Error::Shape {
                    what,
                    len,
                    expected,
                });
            }
        }
        Ok(())
    }

    /// Neuron count, which is also every neuron's synapse slot count
    #[inline]
    pub fn width(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    #[inline]
    pub fn genome_mut(&mut self) -> &mut Genome {
        &mut self.genome
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// # Panics
    /// If `neuron` is not below [Network::width]
    #[inline]
    pub fn weights(&self, neuron: usize) -> &[f64] {
        let width = self.width();
        &self.weights.data()[neuron * width..(neuron + 1) * width]
    }

    #[inline]
    pub(crate) fn weights_mut(&mut self, neuron: usize) -> &mut [f64] {
        let width = self.width();
        &mut self.weights.mut_data()[neuron * width..(neuron + 1) * width]
    }

    /// # Panics
    /// If `idx` is not below [Network::width]
    pub fn neuron(&self, idx: usize) -> NeuronRef<'_, N> {
        NeuronRef {
            value: self.values[idx],
            bias: self.bias[idx],
            weights: self.weights(idx),
            kind: PhantomData,
        }
    }

    /// # Panics
    /// If `idx` is not below [Network::width]
    pub fn neuron_mut(&mut self, idx: usize) -> NeuronMut<'_, N> {
        let width = self.width();
        NeuronMut {
            value: &mut self.values[idx],
            bias: self.bias[idx],
            weights: &self.weights.data()[idx * width..(idx + 1) * width],
            kind: PhantomData,
        }
    }

    /// Overwrite the leading neurons' values with sensed input
    ///
    /// # Panics
    /// If there is more input than neurons
    pub fn sense(&mut self, input: &[f64]) {
        self.values[..input.len()].copy_from_slice(input);
    }

    /// The trailing `count` neurons
    pub fn action(&self, count: usize) -> impl Iterator<Item = NeuronRef<'_, N>> {
        let width = self.width();
        (width.saturating_sub(count)..width).map(move |idx| self.neuron(idx))
    }

    /// Zero every neuron's value
    pub fn flush(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0.);
    }

    /// Step every neuron once, in index order. Neuron `i` runs through its slots `j` in order,
    /// and for each slot its genome gates in, accumulates its own running value through weight
    /// `j`; then it activates. Updates happen in place, so a neuron later in the order
    /// already holds the new values of the neurons before it.
    pub fn forward(&mut self) {
        let width = self.width();
        let weights = self.weights.data();
        for i in 0..width {
            let gates = self.genome.row(i);
            let row = &weights[i * width..(i + 1) * width];
            let bias = self.bias[i];

            let mut value = self.values[i];
            for (_, &weight) in gates.iter().zip(row).filter(|(gate, _)| **gate) {
                value = N::accumulate(value, value, weight, bias);
            }
            self.values[i] = N::activate(value);
        }
    }

    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        let network: Self = serde_json::from_str(s)?;
        network.validate()?;
        Ok(network)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_string()?)?;
        Ok(())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_str(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        neuron::{Continuous, Discrete},
        random::WyRng,
    };

    fn fixed<N: Neuron>(bits: &[(usize, usize)]) -> Network<N> {
        let mut genome = Genome::new(3);
        for (i, j) in bits {
            genome.set(i * 3 + j, true);
        }
        Network::from_parts(
            vec![0.5, -0.25, 1.],
            vec![0.1, 0.2, -0.3],
            vec![0.5, -1., 0.25, 2., 0.75, -0.5, 1., 1., -1.],
            genome,
        )
        .unwrap()
    }

    test_t!(
    from_graph[T: Discrete | Continuous]() {
        let graph = Graph::new(4, vec![vec![0, 3], vec![], vec![2, 2, 1], vec![0]]);
        let network = Network::<T>::from_graph(&graph, &mut WyRng::seeded(1)).unwrap();
        assert_eq!(network.width(), 4);
        assert_eq!(network.genome(), &Genome::from_graph(&graph).unwrap());
        assert!(network.values().iter().all(|v| *v == 0.));
        for i in 0..4 {
            let neuron = network.neuron(i);
            assert_eq!(neuron.slots(), 4);
            assert!((-1. ..=1.).contains(&neuron.bias()));
            assert!(neuron.weights().iter().all(|w| (-1. ..=1.).contains(w)));
        }
    });

    test_t!(
    from_graph_rejects_bad_edge[T: Discrete | Continuous]() {
        let graph = Graph::new(2, vec![vec![0], vec![5]]);
        assert!(Network::<T>::from_graph(&graph, &mut WyRng::seeded(1)).is_err());
    });

    test_t!(
    from_parts_shape[T: Discrete | Continuous]() {
        assert!(matches!(
            Network::<T>::from_parts(vec![0.; 2], vec![0.; 2], vec![0.; 3], Genome::new(2)),
            Err(Error::Shape { what: "weights", .. })
        ));
        assert!(matches!(
            Network::<T>::from_parts(vec![0.; 3], vec![0.; 2], vec![0.; 4], Genome::new(2)),
            Err(Error::Shape { what: "values", .. })
        ));
    });

    test_t!(
    forward_no_active_synapses[T: Discrete | Continuous]() {
        let mut network = fixed::<T>(&[]);
        let before = network.values().to_vec();
        network.forward();
        for (have, was) in network.values().iter().zip(before) {
            assert_f64_approx!(*have, T::activate(was));
        }
    });

    test_t!(
    forward_matches_manual_accumulation[T: Discrete | Continuous]() {
        let active = [(0, 0), (0, 2), (1, 1), (2, 0), (2, 1), (2, 2)];
        let mut network = fixed::<T>(&active);
        let before = network.clone();
        network.forward();

        for i in 0..3 {
            let neuron = before.neuron(i);
            let mut value = neuron.value();
            for j in 0..3 {
                if active.contains(&(i, j)) {
                    value = value + value * neuron.weights()[j] + neuron.bias();
                }
            }
            assert_f64_approx!(network.values()[i], T::activate(value), format!("neuron {i}"));
        }
    });

    #[test]
    fn test_forward_continuous_by_hand() {
        // neuron 0 reads slots 0 and 2: 0.5 -> 0.5 + 0.5*0.5 + 0.1 = 0.85 -> 0.85 + 0.85*0.25 + 0.1
        let mut network = fixed::<Continuous>(&[(0, 0), (0, 2)]);
        network.forward();
        let want = 0.85 + 0.85 * 0.25 + 0.1;
        assert_f64_approx!(network.values()[0], Continuous::activate(want));
        assert_f64_approx!(network.values()[1], Continuous::activate(-0.25));
        assert_f64_approx!(network.values()[2], Continuous::activate(1.));
    }

    #[test]
    fn test_forward_discrete_by_hand() {
        // neuron 1 reads slot 1: -0.25 + -0.25*0.75 + 0.2 = -0.2375 -> -1
        let mut network = fixed::<Discrete>(&[(1, 1)]);
        network.forward();
        assert_eq!(network.values(), &[1., -1., 1.]);
    }

    test_t!(
    forward_leaves_parameters[T: Discrete | Continuous]() {
        let graph = Graph::random(6, &mut WyRng::seeded(2));
        let mut network = Network::<T>::from_graph(&graph, &mut WyRng::seeded(3)).unwrap();
        let before = network.clone();
        for _ in 0..10 {
            network.forward();
        }
        assert_eq!(network.genome(), before.genome());
        for i in 0..6 {
            assert_eq!(network.weights(i), before.weights(i));
            assert_eq!(network.neuron(i).bias(), before.neuron(i).bias());
        }
    });

    test_t!(
    sense_and_action[T: Discrete | Continuous]() {
        let mut network = fixed::<T>(&[]);
        network.sense(&[0.9, 0.8]);
        assert_eq!(network.values(), &[0.9, 0.8, 1.]);
        let action = network.action(2).map(|n| n.value()).collect::<Vec<_>>();
        assert_eq!(action, vec![0.8, 1.]);
        network.flush();
        assert!(network.values().iter().all(|v| *v == 0.));
    });

    test_t!(
    neuron_mut_cycle[T: Discrete | Continuous]() {
        let mut network = fixed::<T>(&[]);
        let mut neuron = network.neuron_mut(2);
        neuron.accumulate(1, 2.);
        assert_f64_approx!(neuron.value(), 1. + 2. * 1. - 0.3);
        neuron.activate();
        assert_f64_approx!(network.values()[2], T::activate(2.7));
    });

    test_t!(
    persistence_exact[T: Discrete | Continuous]() {
        let graph = Graph::random(5, &mut WyRng::seeded(8));
        let mut network = Network::<T>::from_graph(&graph, &mut WyRng::seeded(9)).unwrap();
        network.forward();

        let mut loaded = Network::<T>::from_str(&network.to_string().unwrap()).unwrap();
        assert_eq!(loaded.values(), network.values());
        assert_eq!(loaded.genome(), network.genome());
        for i in 0..5 {
            assert_eq!(loaded.weights(i), network.weights(i));
        }

        loaded.forward();
        network.forward();
        assert_eq!(loaded.values(), network.values());
    });

    #[test]
    fn test_from_str_rejects_shape() {
        let mut network = fixed::<Discrete>(&[]);
        network.values.push(0.);
        let json = serde_json::to_string(&network).unwrap();
        assert!(matches!(
            Network::<Discrete>::from_str(&json),
            Err(Error::Shape { what: "values", .. })
        ));
    }
}
