use clap::{Parser, ValueEnum};
use creatures::{
    Bounds, Continuous, CornerGather, Discrete, Evolution, EvolutionConfig, EvolutionHooks,
    Hook, Neuron, Stats,
};
use std::{ops::ControlFlow, path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum NeuronKind {
    Discrete,
    Continuous,
}

#[derive(Parser, Debug)]
#[command(
    name = "creatures",
    version,
    about = "Evolve grid creatures that gather in a corner"
)]
struct Cli {
    /// JSON config file, any field left out keeps its default
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of generations
    #[arg(long)]
    generations: Option<usize>,

    #[arg(long, value_enum, default_value_t = NeuronKind::Continuous)]
    neuron: NeuronKind,

    /// Stop as soon as a generation's best fitness reaches this
    #[arg(long)]
    target: Option<i32>,

    /// Write the champion's network here once evolution ends
    #[arg(long)]
    save: Option<PathBuf>,

    /// Headless replays of the final population, logged per timestep
    #[arg(long, default_value_t = 0)]
    replays: usize,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn run<N: Neuron>(cli: &Cli, config: EvolutionConfig) -> creatures::Result<()> {
    let environment = CornerGather::new(Bounds::new(config.width, config.height));
    let mut evolution = Evolution::<N, _>::new(config, environment)?;
    info!(
        neuron = N::NAME,
        population = evolution.config().population,
        neurons = evolution.config().neurons,
        generations = evolution.config().generations,
        "starting evolution"
    );

    let mut hooks = match cli.target {
        Some(target) => {
            let stop: Hook<N> = Box::new(move |stats: &Stats<'_, N>| {
                if stats.report.best_fitness >= target {
                    info!(generation = stats.generation, target, "target fitness reached");
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });
            EvolutionHooks::new(vec![stop])
        }
        None => EvolutionHooks::none(),
    };
    evolution.evolve(&mut hooks);

    if let Some(path) = &cli.save {
        if let Some(champion) = evolution.population().champion() {
            champion.network.to_file(path)?;
            info!(path = %path.display(), fitness = champion.fitness, "saved champion");
        }
    }

    for replay in 0..cli.replays {
        evolution.replay(|timestep, population| {
            info!(replay, timestep, positions = ?population.positions(), "replay");
        });
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EvolutionConfig::from_file(path),
        None => Ok(EvolutionConfig::default()),
    };
    let mut config = match config {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "could not load config");
            return ExitCode::FAILURE;
        }
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(generations) = cli.generations {
        config.generations = generations;
    }

    let result = match cli.neuron {
        NeuronKind::Discrete => run::<Discrete>(&cli, config),
        NeuronKind::Continuous => run::<Continuous>(&cli, config),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "evolution failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["creatures"]);
        assert_eq!(cli.neuron, NeuronKind::Continuous);
        assert_eq!(cli.replays, 0);
        assert!(cli.config.is_none() && cli.target.is_none());
    }

    #[test]
    fn test_cli_discrete() {
        let cli = Cli::parse_from(["creatures", "--neuron", "discrete", "--seed", "7"]);
        assert_eq!(cli.neuron, NeuronKind::Discrete);
        assert_eq!(cli.seed, Some(7));
    }
}
