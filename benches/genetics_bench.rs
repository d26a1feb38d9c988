//! Criterion benchmarks for u-genetics operators and the environment loop.
//!
//! Uses OneMax over binary genomes to measure pure operator overhead
//! independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_genetics::ga::{
    crossover, AlleleMutation, Chromosome, Environment, EnvironmentConfig, Gene,
    GenerationLimit, Genome, Organism, SelectionOperation, Trait, ValueFitness,
};
use u_genetics::random::create_rng;

fn binary_genome(n: usize) -> Genome {
    (0..n)
        .map(|i| Gene::new(format!("bit{i}"), [Trait::from(0), Trait::from(1)]))
        .collect()
}

fn parents(n: usize) -> (Chromosome, Chromosome) {
    (vec![Trait::from(1); n], vec![Trait::from(0); n])
}

// ===========================================================================
// Crossover
// ===========================================================================

fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossover");

    for &n in &[16, 128, 1024] {
        let (a, b) = parents(n);
        let mut rng = create_rng(42);

        group.bench_with_input(BenchmarkId::new("uniform", n), &(a.clone(), b.clone()), |bench, (a, b)| {
            bench.iter(|| black_box(crossover::uniform(black_box(a), black_box(b), 0.5, &mut rng)))
        });
        group.bench_with_input(BenchmarkId::new("revolving", n), &(a.clone(), b.clone()), |bench, (a, b)| {
            bench.iter(|| {
                black_box(crossover::revolving(
                    black_box(a),
                    black_box(b),
                    crossover::DEFAULT_REVOLVING_PROPORTION,
                    false,
                    &mut rng,
                ))
            })
        });
        group.bench_with_input(BenchmarkId::new("single_point", n), &(a, b), |bench, (a, b)| {
            bench.iter(|| black_box(crossover::single_point(black_box(a), black_box(b), n / 2)))
        });
    }
    group.finish();
}

// ===========================================================================
// Environment: OneMax
// ===========================================================================

fn bench_environment_onemax(c: &mut Criterion) {
    let mut group = c.benchmark_group("environment_onemax");
    group.sample_size(10);

    for &(bits, pop, gens) in &[(20, 50, 20), (50, 100, 20), (100, 200, 10)] {
        let genome = binary_genome(bits);
        let config = EnvironmentConfig::default()
            .with_population_size(pop)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("b{bits}_p{pop}_g{gens}"), bits),
            &(genome, config),
            |b, (g, c)| {
                b.iter(|| {
                    let mut env = Environment::<Organism>::random(g, c)
                        .expect("valid config")
                        .with_operation(GenerationLimit::new(gens))
                        .with_operation(ValueFitness::new(1))
                        .with_operation(SelectionOperation::tournament())
                        .with_operation(AlleleMutation::default().with_rate(0.1));
                    env.start();
                    black_box(env.current_generation())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_crossover, bench_environment_onemax);
criterion_main!(benches);
