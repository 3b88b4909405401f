//! The connectivity genome, and the graph networks are first built from.

use crate::error::{Error, Result};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// A directed graph over `vertices` neurons. `edges[i]` lists the synapse slots neuron `i` reads,
/// duplicates and empty lists allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub vertices: usize,
    pub edges: Vec<Vec<usize>>,
}

impl Graph {
    pub fn new(vertices: usize, edges: Vec<Vec<usize>>) -> Self {
        Self { vertices, edges }
    }

    /// Every vertex reads `vertices` slots drawn uniformly from `0..vertices`
    pub fn random(vertices: usize, rng: &mut impl RngCore) -> Self {
        let edges = (0..vertices)
            .map(|_| (0..vertices).map(|_| rng.random_range(0..vertices)).collect())
            .collect();
        Self { vertices, edges }
    }

    /// Fails on a vertex count that doesn't match the edge lists, or on any edge outside of
    /// `0..vertices`
    pub fn validate(&self) -> Result<()> {
        if self.edges.len() != self.vertices {
            return Err(Error::VertexCount {
                vertices: self.vertices,
                edges: self.edges.len(),
            });
        }

        for (vertex, edges) in self.edges.iter().enumerate() {
            if let Some(&from) = edges.iter().find(|&&e| e >= self.vertices) {
                return Err(Error::SynapseOutOfRange {
                    vertex,
                    from,
                    vertices: self.vertices,
                });
            }
        }

        Ok(())
    }
}

/// A square bit matrix over a network's neurons, flattened row-major. Bit `i * width + j` set
/// means neuron `i` reads its synapse slot `j` during a forward step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genome {
    width: usize,
    bits: Vec<bool>,
}

impl Genome {
    /// All-inactive genome over `width` neurons
    pub fn new(width: usize) -> Self {
        Self {
            width,
            bits: vec![false; width * width],
        }
    }

    pub fn from_graph(graph: &Graph) -> Result<Self> {
        graph.validate()?;
        let mut genome = Self::new(graph.vertices);
        for (i, edges) in graph.edges.iter().enumerate() {
            for &e in edges {
                genome.set(i * graph.vertices + e, true);
            }
        }
        Ok(genome)
    }

    /// Neuron count this genome spans
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// # Panics
    /// If `idx` is not below [Genome::len]
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        self.bits[idx]
    }

    /// Whether neuron `neuron` reads its slot `slot`
    ///
    /// # Panics
    /// If `neuron` or `slot` is not below [Genome::width]
    #[inline]
    pub fn active(&self, neuron: usize, slot: usize) -> bool {
        assert!(slot < self.width, "slot {slot} out of genome width {}", self.width);
        self.bits[neuron * self.width + slot]
    }

    /// # Panics
    /// If `idx` is not below [Genome::len]
    #[inline]
    pub fn set(&mut self, idx: usize, bit: bool) {
        self.bits[idx] = bit;
    }

    /// # Panics
    /// If `idx` is not below [Genome::len]
    #[inline]
    pub fn flip(&mut self, idx: usize) {
        self.bits[idx] = !self.bits[idx];
    }

    /// The row of bits gating neuron `neuron`'s slots
    #[inline]
    pub fn row(&self, neuron: usize) -> &[bool] {
        &self.bits[neuron * self.width..(neuron + 1) * self.width]
    }

    #[inline]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn count_active(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Number of bits that differ from `other`
    pub fn distance(&self, other: &Self) -> usize {
        debug_assert_eq!(self.len(), other.len());
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(l, r)| l != r)
            .count()
    }
}
