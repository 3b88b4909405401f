//! Default simulation parameters.
//!
//! Everything here is a default for [crate::config::EvolutionConfig] and carries the
//! `CREATURES_` prefix so it can be told apart from locals at a glance.

// ============================================================================
// Grid
// ============================================================================

/// Width of the grid creatures move on
pub const CREATURES_WIDTH: i32 = 20;

/// Height of the grid creatures move on
pub const CREATURES_HEIGHT: i32 = 15;

// ============================================================================
// Population
// ============================================================================

/// Neurons per network, inputs and outputs included
pub const CREATURES_NEURONS: usize = 20;

/// Creatures per generation
pub const CREATURES_POPULATION: usize = 20;

/// Generations in a full run
pub const CREATURES_GENERATIONS: usize = 20_000;

/// Timesteps simulated per generation
pub const CREATURES_TIMESTEPS: usize = 40;

// ============================================================================
// Mutation
// ============================================================================

/// Chance that a non-elite creature gets one genome bit flipped
pub const CREATURES_MUTATION_CHANCE: f64 = 0.01;

/// Mutation chance used instead while the best fitness is exactly 0
pub const CREATURES_STAGNATION_MUTATION_CHANCE: f64 = 0.7;

// ============================================================================
// Network
// ============================================================================

/// Lower bound of initial bias and weight values
pub const CREATURES_PARAM_MIN: f64 = -1.0;

/// Upper bound of initial bias and weight values
pub const CREATURES_PARAM_MAX: f64 = 1.0;

/// Trailing neurons read as movement along x, then y
pub const CREATURES_ACTION_NEURONS: usize = 2;

// ============================================================================
// Reporting
// ============================================================================

/// Generations between info-level progress reports
pub const CREATURES_REPORT_INTERVAL: usize = 100;
