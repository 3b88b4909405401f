use crate::{movement::Position, network::Network, neuron::Neuron};

/// One creature on the grid. Its network survives across generations, only its genome and
/// weights are rewritten by reproduction.
#[derive(Debug, Clone)]
pub struct Agent<N: Neuron> {
    pub network: Network<N>,
    pub position: Position,
    /// Where this generation started
    pub begin: Position,
    pub fitness: i32,
}

impl<N: Neuron> Agent<N> {
    pub fn new(network: Network<N>, start: Position) -> Self {
        Self {
            network,
            position: start,
            begin: start,
            fitness: 0,
        }
    }

    /// Move to `start` and remember it as the generation's starting point
    pub fn place(&mut self, start: Position) {
        self.position = start;
        self.begin = start;
    }
}
