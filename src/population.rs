//! A fixed-size collection of [Agent]s. Ranking reorders agents in place, it never adds or
//! drops any.

use crate::{
    agent::Agent,
    error::Result,
    genome::Graph,
    movement::{Bounds, Position},
    network::Network,
    neuron::Neuron,
};
use rand::{Rng, RngCore};

#[derive(Debug, Clone)]
pub struct Population<N: Neuron> {
    agents: Vec<Agent<N>>,
}

/// A uniformly random position inside `bounds`
pub fn random_position(bounds: Bounds, rng: &mut impl RngCore) -> Position {
    Position::new(
        rng.random_range(0..bounds.width),
        rng.random_range(0..bounds.height),
    )
}

impl<N: Neuron> Population<N> {
    pub fn new(agents: Vec<Agent<N>>) -> Self {
        Self { agents }
    }

    /// `size` agents, each with a network of `neurons` neurons over a fresh random graph, placed
    /// uniformly at random inside `bounds`
    pub fn random(
        size: usize,
        neurons: usize,
        bounds: Bounds,
        rng: &mut impl RngCore,
    ) -> Result<Self> {
        let agents = (0..size)
            .map(|_| -> Result<Agent<N>> {
                let graph = Graph::random(neurons, rng);
                let network = Network::from_graph(&graph, rng)?;
                Ok(Agent::new(network, random_position(bounds, rng)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { agents })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn agents(&self) -> &[Agent<N>] {
        &self.agents
    }

    #[inline]
    pub fn agents_mut(&mut self) -> &mut [Agent<N>] {
        &mut self.agents
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent<N>> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent<N>> {
        self.agents.iter_mut()
    }

    /// Give every agent a fresh random start inside `bounds`
    pub fn scatter(&mut self, bounds: Bounds, rng: &mut impl RngCore) {
        for agent in self.agents.iter_mut() {
            agent.place(random_position(bounds, rng));
        }
    }

    /// Sort fittest first. Equal fitness keeps its prior relative order.
    pub fn rank(&mut self) {
        self.agents.sort_by(|l, r| r.fitness.cmp(&l.fitness));
    }

    /// Size of the run of agents tied with the first one. Meaningful once ranked, and 0 only for
    /// an empty population.
    pub fn elite(&self) -> usize {
        match self.agents.first() {
            Some(head) => self
                .agents
                .iter()
                .take_while(|a| a.fitness == head.fitness)
                .count(),
            None => 0,
        }
    }

    pub fn best_fitness(&self) -> Option<i32> {
        self.agents.iter().map(|a| a.fitness).max()
    }

    /// The fittest agent, the earliest one on ties
    pub fn champion(&self) -> Option<&Agent<N>> {
        self.agents
            .iter()
            .reduce(|best, a| if a.fitness > best.fitness { a } else { best })
    }

    pub fn positions(&self) -> Vec<Position> {
        self.agents.iter().map(|a| a.position).collect()
    }

    pub fn fitnesses(&self) -> Vec<i32> {
        self.agents.iter().map(|a| a.fitness).collect()
    }
}
