use creatures::{
    movement::Bounds,
    population::Population,
    random::WyRng,
    reproduce::{reproduce, MutationChance},
    Discrete,
};
use criterion::Criterion;

fn bench_reproduce(bench: &mut Criterion) {
    let mut rng = WyRng::seeded(0x5eed);
    let mut population =
        Population::<Discrete>::random(100, 20, Bounds::new(20, 15), &mut rng).unwrap();
    for (idx, agent) in population.iter_mut().enumerate() {
        agent.fitness = (idx % 3) as i32;
    }

    bench.bench_function("reproduce-100", |b| {
        b.iter(|| reproduce(&mut population.clone(), MutationChance::default(), &mut rng))
    });
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(1000)
        .significance_level(0.1);
    #[cfg(feature = "smol_bench")]
    let mut criterion: criterion::Criterion<_> = {
        use core::time::Duration;
        Criterion::default()
            .measurement_time(Duration::from_millis(1))
            .sample_size(10)
            .nresamples(1)
            .without_plots()
            .configure_from_args()
    };
    bench_reproduce(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
