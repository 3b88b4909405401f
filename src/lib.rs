#![allow(clippy::new_without_default)]

#[macro_use]
mod macros;

pub mod agent;
pub mod config;
pub mod constants;
pub mod crossover;
pub mod error;
pub mod gather;
pub mod genome;
pub mod movement;
pub mod network;
pub mod neuron;
pub mod population;
pub mod random;
pub mod reproduce;
pub mod scenario;
pub mod serialize;

pub use agent::Agent;
pub use config::EvolutionConfig;
pub use error::{Error, Result};
pub use gather::CornerGather;
pub use genome::{Genome, Graph};
pub use movement::{movement, Bounds, Position};
pub use network::Network;
pub use neuron::{Continuous, Discrete, Neuron, NeuronMut, NeuronRef};
pub use population::Population;
pub use random::WyRng;
pub use reproduce::{mutation, reproduce, selection, MutationChance, Reproduction};
pub use scenario::{Environment, Evolution, EvolutionHooks, Evolved, Hook, Stats};
