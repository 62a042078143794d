//! Criterion benchmarks for u-evolve.
//!
//! Uses the Sphere function to measure engine overhead independent of any
//! domain, in both execution modes, plus the raw PCG32 stream.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_evolve::ea::{EaConfig, EvolutionEngine, Execution, GenePolicy};
use u_evolve::random::{Pcg32, RandomSource, UniformSampler};

// ===========================================================================
// Sphere function: minimize sum(x_i^2)
// ===========================================================================

struct Sphere {
    range: UniformSampler<f64>,
}

impl GenePolicy for Sphere {
    type Gene = f64;
    type Input = ();
    type Target = ();
    type Fitness = f64;

    fn initialize(&self, rng: &mut Pcg32) -> f64 {
        self.range.sample(rng)
    }

    fn mutate(&self, gene: &f64, rng: &mut Pcg32) -> f64 {
        (gene + self.range.sample(rng) * 0.1).clamp(self.range.min(), self.range.max())
    }

    fn evaluate(&self, genes: &[f64], _x: &(), _y: &()) -> f64 {
        genes.iter().map(|x| x * x).sum()
    }
}

fn sphere() -> Sphere {
    Sphere {
        range: UniformSampler::new(-5.0, 5.0).expect("non-empty range"),
    }
}

fn bench_ea_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("ea_sphere");
    group.sample_size(10);

    for execution in [Execution::Sequential, Execution::Concurrent] {
        for (dim, pop, gen) in [(10usize, 50usize, 50usize), (50, 100, 30), (100, 1000, 20)] {
            let config = EaConfig::new(dim)
                .with_population_size(pop)
                .with_execution(execution)
                .with_seed(42);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}/d{}_p{}_g{}", execution, dim, pop, gen), dim),
                &config,
                |b, config| {
                    b.iter(|| {
                        let mut engine =
                            EvolutionEngine::new(sphere(), config.clone()).expect("valid config");
                        engine.run(&(), &(), black_box(gen), black_box(0.1));
                        black_box(engine.best_individual(&(), &()).1)
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_pcg32(c: &mut Criterion) {
    let unit = UniformSampler::new(0.0f64, 1.0).expect("non-empty range");
    c.bench_function("pcg32_next_word", |b| {
        let mut rng = Pcg32::new(42, 54);
        b.iter(|| black_box(rng.next_word()))
    });
    c.bench_function("pcg32_uniform_f64", |b| {
        let mut rng = Pcg32::new(42, 54);
        b.iter(|| black_box(unit.sample(&mut rng)))
    });
}

criterion_group!(benches, bench_ea_sphere, bench_pcg32);
criterion_main!(benches);
