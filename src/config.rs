use crate::{
    constants::*,
    error::{Error, Result},
    reproduce::MutationChance,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Parameters of a run. Every field has a default, so a config file only needs to name what it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Grid width, used by the bundled gather environment
    pub width: i32,
    /// Grid height, used by the bundled gather environment
    pub height: i32,
    pub neurons: usize,
    pub population: usize,
    pub generations: usize,
    pub timesteps: usize,
    pub mutation_chance: f64,
    pub stagnation_mutation_chance: f64,
    /// Generations between info level progress logs, 0 to disable them
    pub report_interval: usize,
    /// Zero every network's values before each generation
    pub flush_each_generation: bool,
    /// Seed for a reproducible run, /dev/urandom otherwise
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            width: CREATURES_WIDTH,
            height: CREATURES_HEIGHT,
            neurons: CREATURES_NEURONS,
            population: CREATURES_POPULATION,
            generations: CREATURES_GENERATIONS,
            timesteps: CREATURES_TIMESTEPS,
            mutation_chance: CREATURES_MUTATION_CHANCE,
            stagnation_mutation_chance: CREATURES_STAGNATION_MUTATION_CHANCE,
            report_interval: CREATURES_REPORT_INTERVAL,
            flush_each_generation: false,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::InvalidConfig("grid width and height must be positive"));
        }
        if self.neurons == 0 {
            return Err(Error::InvalidConfig("neurons must be non-zero"));
        }
        if self.population == 0 {
            return Err(Error::InvalidConfig("population must be non-zero"));
        }
        if !(0.0..=1.0).contains(&self.mutation_chance) {
            return Err(Error::InvalidConfig("mutation_chance must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.stagnation_mutation_chance) {
            return Err(Error::InvalidConfig(
                "stagnation_mutation_chance must be within [0, 1]",
            ));
        }
        Ok(())
    }

    pub fn mutation(&self) -> MutationChance {
        MutationChance {
            base: self.mutation_chance,
            stagnant: self.stagnation_mutation_chance,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_str(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let config = EvolutionConfig::default();
        config.validate().unwrap();
        assert_eq!(config.neurons, 20);
        assert_eq!(config.timesteps, 40);
        assert_eq!(config.mutation(), MutationChance::default());
    }

    #[test]
    fn test_partial_json() {
        let config =
            EvolutionConfig::from_str(r#"{"population": 8, "seed": 99, "width": 6}"#).unwrap();
        assert_eq!(config.population, 8);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.width, 6);
        assert_eq!(config.height, CREATURES_HEIGHT);
        assert_eq!(config.generations, CREATURES_GENERATIONS);
    }

    #[test]
    fn test_rejects_invalid() {
        for json in [
            r#"{"population": 0}"#,
            r#"{"neurons": 0}"#,
            r#"{"width": 0}"#,
            r#"{"height": -3}"#,
            r#"{"mutation_chance": 1.5}"#,
            r#"{"stagnation_mutation_chance": -0.1}"#,
        ] {
            assert!(
                matches!(EvolutionConfig::from_str(json), Err(Error::InvalidConfig(_))),
                "{json} accepted"
            );
        }
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(
            EvolutionConfig::from_str(r#"{"population": "many"}"#),
            Err(Error::Json(_))
        ));
    }
}
