//! Scoring a population and breeding the next generation from its elite.

use crate::{
    agent::Agent,
    constants::{CREATURES_MUTATION_CHANCE, CREATURES_STAGNATION_MUTATION_CHANCE},
    crossover::merge_genomes,
    genome::Genome,
    neuron::Neuron,
    population::Population,
};
use rand::{Rng, RngCore};
use tracing::trace;

/// Set every agent's fitness to `score(agent, context)`
pub fn selection<N: Neuron, C: ?Sized>(
    population: &mut Population<N>,
    context: &C,
    score: impl Fn(&Agent<N>, &C) -> i32,
) {
    for agent in population.iter_mut() {
        agent.fitness = score(agent, context);
    }
}

/// Roll once against `chance`, and on success flip one uniformly chosen bit. Returns the
/// flipped index.
pub fn mutation(genome: &mut Genome, chance: f64, rng: &mut impl RngCore) -> Option<usize> {
    if genome.is_empty() || rng.random::<f64>() > chance {
        return None;
    }

    let idx = rng.random_range(0..genome.len());
    genome.flip(idx);
    trace!(idx, "genome bit flipped");
    Some(idx)
}

/// Per-creature chance of a point mutation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationChance {
    pub base: f64,
    /// Used instead of `base` while the best fitness is exactly 0
    pub stagnant: f64,
}

impl Default for MutationChance {
    fn default() -> Self {
        Self {
            base: CREATURES_MUTATION_CHANCE,
            stagnant: CREATURES_STAGNATION_MUTATION_CHANCE,
        }
    }
}

impl MutationChance {
    pub fn for_best(&self, best_fitness: i32) -> f64 {
        if best_fitness == 0 {
            self.stagnant
        } else {
            self.base
        }
    }
}

/// What a call to [reproduce] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reproduction {
    pub best_fitness: i32,
    /// Size of the unchanged top group
    pub elite: usize,
    /// Agents whose genome was rebuilt by crossover
    pub offspring: usize,
    pub mutations: usize,
}

/// Rank `population` fittest first, keep the group tied for first place as is, and rebuild
/// everyone else from it: two parents drawn uniformly from the elite, a breaking point drawn
/// uniformly from `0..population.len()`, then [merge_genomes] and a chance at [mutation].
///
/// When the whole population is tied nothing but the ranking happens. Returns `None` for an
/// empty population.
pub fn reproduce<N: Neuron>(
    population: &mut Population<N>,
    chance: MutationChance,
    rng: &mut impl RngCore,
) -> Option<Reproduction> {
    population.rank();
    let best_fitness = population.agents().first()?.fitness;
    let elite = population.elite();
    let size = population.len();
    let chance = chance.for_best(best_fitness);

    let mut report = Reproduction {
        best_fitness,
        elite,
        offspring: 0,
        mutations: 0,
    };
    if elite == size {
        return Some(report);
    }

    let (parents, children) = population.agents_mut().split_at_mut(elite);
    for child in children.iter_mut() {
        let a = &parents[rng.random_range(0..elite)].network;
        let b = &parents[rng.random_range(0..elite)].network;
        let breaking_point = rng.random_range(0..size);
        merge_genomes(&mut child.network, a, b, breaking_point);
        report.offspring += 1;

        if mutation(child.network.genome_mut(), chance, rng).is_some() {
            report.mutations += 1;
        }
    }

    Some(report)
}
