//! Driving a population through generations: reset, simulate, score, reproduce.

use crate::{
    agent::Agent,
    config::EvolutionConfig,
    constants::CREATURES_ACTION_NEURONS,
    error::{Error, Result},
    movement::{movement, Bounds},
    neuron::Neuron,
    population::Population,
    random::{rng_from, WyRng},
    reproduce::{reproduce, selection, Reproduction},
};
use core::ops::ControlFlow;
use tracing::{debug, info};

/// The world creatures live in. It decides what they sense and how fit they are.
pub trait Environment {
    fn bounds(&self) -> Bounds;

    /// Number of leading neurons [Environment::sense] writes
    fn sensory(&self) -> usize;

    /// Fill `input` (sized to [Environment::sensory]) with what `agents[agent]` senses
    fn sense<N: Neuron>(&self, agent: usize, agents: &[Agent<N>], input: &mut [f64]);

    /// Fitness of an agent at the end of a generation
    fn score<N: Neuron>(&self, agent: &Agent<N>) -> i32;
}

/// Handed to hooks after each generation. The population is ranked, its leading `report.elite`
/// agents are unchanged and the rest already carry the next generation's genomes.
#[derive(Debug)]
pub struct Stats<'a, N: Neuron> {
    pub generation: usize,
    pub report: Reproduction,
    pub population: &'a Population<N>,
}

impl<N: Neuron> Stats<'_, N> {
    pub fn fittest(&self) -> Option<&Agent<N>> {
        self.population.agents().first()
    }
}

pub type Hook<N> = Box<dyn FnMut(&Stats<'_, N>) -> ControlFlow<()>>;

/// Callbacks run in order after every generation, any of them may stop the run
pub struct EvolutionHooks<N: Neuron> {
    hooks: Vec<Hook<N>>,
}

impl<N: Neuron> EvolutionHooks<N> {
    pub fn new(hooks: Vec<Hook<N>>) -> Self {
        Self { hooks }
    }

    pub fn none() -> Self {
        Self { hooks: vec![] }
    }

    fn fire(&mut self, stats: &Stats<'_, N>) -> ControlFlow<()> {
        for hook in self.hooks.iter_mut() {
            hook(stats)?;
        }
        ControlFlow::Continue(())
    }
}

/// How a call to [Evolution::evolve] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evolved {
    pub generations: usize,
    pub best_fitness: Option<i32>,
    pub stopped_early: bool,
}

pub struct Evolution<N: Neuron, E: Environment> {
    config: EvolutionConfig,
    environment: E,
    population: Population<N>,
    rng: WyRng,
    generation: usize,
    input: Vec<f64>,
}

impl<N: Neuron, E: Environment> Evolution<N, E> {
    /// A random population sized and seeded by `config`
    pub fn new(config: EvolutionConfig, environment: E) -> Result<Self> {
        config.validate()?;
        check_bounds(&config, &environment)?;
        check_neurons(config.neurons, &environment)?;
        let mut rng = rng_from(config.seed)?;
        let population = Population::random(
            config.population,
            config.neurons,
            environment.bounds(),
            &mut rng,
        )?;
        Self::with_population(config, environment, population, rng)
    }

    /// Continue from an existing population. Every network must share one width, wide enough
    /// for the environment, and the environment's bounds must match the configured grid.
    pub fn with_population(
        config: EvolutionConfig,
        environment: E,
        population: Population<N>,
        rng: WyRng,
    ) -> Result<Self> {
        config.validate()?;
        check_bounds(&config, &environment)?;
        let Some(first) = population.agents().first() else {
            return Err(Error::InvalidConfig("population must be non-zero"));
        };
        let width = first.network.width();
        check_neurons(width, &environment)?;
        if let Some(other) = population.iter().find(|a| a.network.width() != width) {
            return Err(Error::Shape {
                what: "network width",
                len: other.network.width(),
                expected: width,
            });
        }

        let input = vec![0.; environment.sensory()];
        Ok(Self {
            config,
            environment,
            population,
            rng,
            generation: 0,
            input,
        })
    }

    #[inline]
    pub fn population(&self) -> &Population<N> {
        &self.population
    }

    #[inline]
    pub fn environment(&self) -> &E {
        &self.environment
    }

    #[inline]
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Generations completed so far
    #[inline]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Scatter every agent to a fresh start position
    pub fn scatter(&mut self) {
        self.population
            .scatter(self.environment.bounds(), &mut self.rng);
    }

    /// One timestep: each agent in turn senses, thinks and moves. Later agents sense the moves
    /// earlier agents already made this step.
    pub fn step(&mut self) {
        let bounds = self.environment.bounds();
        for idx in 0..self.population.len() {
            self.environment
                .sense(idx, self.population.agents(), &mut self.input);

            let agent = &mut self.population.agents_mut()[idx];
            agent.network.sense(&self.input);
            agent.network.forward();

            let width = agent.network.width();
            let dx = movement(
                &agent.network.neuron(width - CREATURES_ACTION_NEURONS),
                agent.position.x,
                bounds.width,
                None,
            );
            let dy = movement(
                &agent.network.neuron(width - 1),
                agent.position.y,
                bounds.height,
                None,
            );
            agent.position.x += dx;
            agent.position.y += dy;
        }
    }

    /// Score every agent against the environment
    pub fn score(&mut self) {
        selection(&mut self.population, &self.environment, |agent, env| {
            env.score(agent)
        });
    }

    /// Scatter, simulate every timestep, score and reproduce once
    pub fn run_generation(&mut self) -> Reproduction {
        self.scatter();
        if self.config.flush_each_generation {
            self.population
                .iter_mut()
                .for_each(|agent| agent.network.flush());
        }
        for _ in 0..self.config.timesteps {
            self.step();
        }
        self.score();

        let report = match reproduce(&mut self.population, self.config.mutation(), &mut self.rng)
        {
            Some(report) => report,
            None => unreachable!("populations are never empty once built"),
        };
        self.generation += 1;

        debug!(
            generation = self.generation,
            best_fitness = report.best_fitness,
            elite = report.elite,
            mutations = report.mutations,
            "generation done"
        );
        if self.config.report_interval != 0 && self.generation % self.config.report_interval == 0
        {
            info!(
                generation = self.generation,
                best_fitness = report.best_fitness,
                elite = report.elite,
                "progress"
            );
        }
        report
    }

    /// Run generations until `config.generations` have completed or a hook breaks
    pub fn evolve(&mut self, hooks: &mut EvolutionHooks<N>) -> Evolved {
        let mut best_fitness = None;
        let mut stopped_early = false;
        while self.generation < self.config.generations {
            let report = self.run_generation();
            best_fitness = Some(report.best_fitness);

            let stats = Stats {
                generation: self.generation,
                report,
                population: &self.population,
            };
            if hooks.fire(&stats).is_break() {
                stopped_early = true;
                break;
            }
        }

        info!(
            generations = self.generation,
            best_fitness, stopped_early, "evolution finished"
        );
        Evolved {
            generations: self.generation,
            best_fitness,
            stopped_early,
        }
    }

    /// Watch the current population without scoring or breeding it: scatter, then run
    /// `config.timesteps` steps, showing `observer` the population after each one
    pub fn replay(&mut self, mut observer: impl FnMut(usize, &Population<N>)) {
        self.scatter();
        for timestep in 0..self.config.timesteps {
            self.step();
            observer(timestep, &self.population);
        }
    }
}

fn check_bounds(config: &EvolutionConfig, environment: &impl Environment) -> Result<()> {
    let bounds = environment.bounds();
    if bounds.width <= 0 || bounds.height <= 0 {
        return Err(Error::InvalidConfig("environment bounds must be positive"));
    }
    if bounds != Bounds::new(config.width, config.height) {
        return Err(Error::InvalidConfig(
            "environment bounds differ from the configured grid",
        ));
    }
    Ok(())
}

fn check_neurons(neurons: usize, environment: &impl Environment) -> Result<()> {
    let wanted = environment.sensory() + CREATURES_ACTION_NEURONS;
    if neurons < wanted {
        return Err(Error::TooFewNeurons { neurons, wanted });
    }
    Ok(())
}
