use creatures::{
    genome::Graph, network::Network, neuron::Neuron, random::WyRng, Continuous, Discrete,
};
use criterion::Criterion;

fn network<N: Neuron>(width: usize) -> Network<N> {
    let mut rng = WyRng::seeded(0xbe7c4);
    Network::from_graph(&Graph::random(width, &mut rng), &mut rng).unwrap()
}

fn bench_forward(bench: &mut Criterion) {
    let discrete = &mut network::<Discrete>(20);
    let continuous = &mut network::<Continuous>(20);
    let input = [0.25, 0.5, 1., -1.];

    bench.bench_function("forward-discrete-20", |b| {
        b.iter(|| {
            discrete.sense(&input);
            discrete.forward()
        })
    });
    bench.bench_function("forward-continuous-20", |b| {
        b.iter(|| {
            continuous.sense(&input);
            continuous.forward()
        })
    });

    let wide = &mut network::<Continuous>(200);
    bench.bench_function("forward-continuous-200", |b| b.iter(|| wide.forward()));
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
    bench_forward(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
