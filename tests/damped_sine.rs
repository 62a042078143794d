//! End-to-end fit of a damped sinusoid.
//!
//! One gene holds all four wave parameters; the engine has to recover a curve
//! matching noise-free samples of
//! `1.4 · e^(−1.421·x) · sin(0.333·x + 0.125)` on `x ∈ [0, 10.24)`.

use std::f64::consts::TAU;
use u_evolve::ea::{EaConfig, EvolutionEngine, Execution, GenePolicy};
use u_evolve::random::{self, Pcg32, UniformSampler};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Wave {
    scaling: f64,
    decay: f64,
    frequency: f64,
    phase: f64,
}

impl Wave {
    const TRUTH: Wave = Wave {
        scaling: 1.4,
        decay: 1.421,
        frequency: 0.333,
        phase: 0.125,
    };

    fn from_params([scaling, decay, frequency, phase]: [f64; 4]) -> Self {
        Self {
            scaling,
            decay,
            frequency,
            phase,
        }
    }

    fn params(&self) -> [f64; 4] {
        [self.scaling, self.decay, self.frequency, self.phase]
    }

    fn at(&self, x: f64) -> f64 {
        self.scaling * (-self.decay * x).exp() * (self.frequency * x + self.phase).sin()
    }
}

struct DampedSine {
    ranges: [UniformSampler<f64>; 4],
}

impl DampedSine {
    fn new() -> Self {
        Self {
            ranges: [
                UniformSampler::new(0.0, 10.0).unwrap(),
                UniformSampler::new(0.0, 2.0).unwrap(),
                UniformSampler::new(0.0, TAU).unwrap(),
                UniformSampler::new(0.0, TAU).unwrap(),
            ],
        }
    }
}

impl GenePolicy for DampedSine {
    type Gene = Wave;
    type Input = [f64];
    type Target = [f64];
    type Fitness = f64;

    fn initialize(&self, rng: &mut Pcg32) -> Wave {
        Wave::from_params(self.ranges.map(|range| range.sample(rng)))
    }

    /// Half the time a fresh draw of one parameter, otherwise a creep of up
    /// to 1% of its range.
    fn mutate(&self, wave: &Wave, rng: &mut Pcg32) -> Wave {
        let mut params = wave.params();
        let i = random::index(rng, params.len());
        let range = &self.ranges[i];
        if UniformSampler::UNIT.sample(rng) < 0.5 {
            params[i] = range.sample(rng);
        } else {
            let width = range.max() - range.min();
            let step = (UniformSampler::UNIT.sample(rng) - 0.5) * 0.02 * width;
            params[i] = (params[i] + step).clamp(range.min(), range.max());
        }
        Wave::from_params(params)
    }

    fn evaluate(&self, genes: &[Wave], x: &[f64], y: &[f64]) -> f64 {
        let wave = &genes[0];
        let sse: f64 = x
            .iter()
            .zip(y)
            .map(|(&xi, &yi)| (wave.at(xi) - yi).powi(2))
            .sum();
        sse / x.len() as f64
    }
}

fn samples() -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..1024).map(|i| i as f64 * 0.01).collect();
    let y = x.iter().map(|&xi| Wave::TRUTH.at(xi)).collect();
    (x, y)
}

fn engine(execution: Execution, population: usize, seed: u64) -> EvolutionEngine<DampedSine> {
    let config = EaConfig::new(1)
        .with_population_size(population)
        .with_execution(execution)
        .with_seed(seed);
    EvolutionEngine::new(DampedSine::new(), config).unwrap()
}

#[test]
fn test_recovers_damped_sine() {
    let (x, y) = samples();
    let mut engine = engine(Execution::Concurrent, 1000, 42);
    engine.run(&x, &y, 100, 0.1);

    let (best, mse) = engine.best_individual(&x, &y);
    assert!(mse < 1e-3, "best MSE {mse} with {:?}", best.genes()[0]);

    let wave = best.genes()[0];
    let worst = x
        .iter()
        .zip(&y)
        .map(|(&xi, &yi)| (wave.at(xi) - yi).abs())
        .fold(0.0, f64::max);
    assert!(worst < 0.1, "curve strays {worst} from a sample with {wave:?}");
}

#[test]
fn test_sequential_fit_is_reproducible() {
    let (x, y) = samples();
    let mut a = engine(Execution::Sequential, 100, 7);
    let mut b = engine(Execution::Sequential, 100, 7);
    a.run(&x, &y, 20, 0.1);
    b.run(&x, &y, 20, 0.1);

    let (best_a, mse_a) = a.best_individual(&x, &y);
    let (best_b, mse_b) = b.best_individual(&x, &y);
    assert_eq!(best_a, best_b);
    assert_eq!(mse_a.to_bits(), mse_b.to_bits());
}

#[test]
fn test_fitness_never_regresses() {
    let (x, y) = samples();
    let mut engine = engine(Execution::Concurrent, 200, 3);
    let mut history = Vec::new();
    engine.run_with_observer(&x, &y, 30, 0.1, |stats| history.push(stats.best_fitness));

    assert_eq!(history.len(), 30);
    assert!(history.windows(2).all(|w| w[1] <= w[0]), "{history:?}");
}
