//! Fits a sum of damped sinusoids to sampled data.
//!
//! Each gene is one `scaling · e^(−decay·x) · sin(frequency·x + phase)` term
//! and a genome holds as many terms as the truth has. Fitness is the mean
//! squared error over the samples.
//!
//! ```text
//! RUST_LOG=debug cargo run --release --example damped_sine
//! ```

use std::error::Error;
use std::f64::consts::TAU;
use u_evolve::ea::{EaConfig, EvolutionEngine, GenePolicy};
use u_evolve::random::{self, Pcg32, UniformSampler};

const TRUTH: [Wave; 1] = [Wave {
    scaling: 1.4,
    decay: 1.421,
    frequency: 0.333,
    phase: 0.125,
}];
const NOISE_LEVEL: f64 = 1e-2;
const SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Wave {
    scaling: f64,
    decay: f64,
    frequency: f64,
    phase: f64,
}

impl Wave {
    fn at(&self, x: f64) -> f64 {
        self.scaling * (-self.decay * x).exp() * (self.frequency * x + self.phase).sin()
    }
}

struct DampedSines {
    scaling: UniformSampler<f64>,
    decay: UniformSampler<f64>,
    angle: UniformSampler<f64>,
}

impl DampedSines {
    fn new() -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            scaling: UniformSampler::new(0.0, 10.0)?,
            decay: UniformSampler::new(0.0, 2.0)?,
            angle: UniformSampler::new(0.0, TAU)?,
        })
    }

    /// Creep of up to 1% of the range, or a fresh draw half the time.
    fn nudge(range: &UniformSampler<f64>, value: f64, rng: &mut Pcg32) -> f64 {
        if UniformSampler::UNIT.sample(rng) < 0.5 {
            return range.sample(rng);
        }
        let step = (UniformSampler::UNIT.sample(rng) - 0.5) * 0.02 * (range.max() - range.min());
        (value + step).clamp(range.min(), range.max())
    }
}

impl GenePolicy for DampedSines {
    type Gene = Wave;
    type Input = [f64];
    type Target = [f64];
    type Fitness = f64;

    fn initialize(&self, rng: &mut Pcg32) -> Wave {
        Wave {
            scaling: self.scaling.sample(rng),
            decay: self.decay.sample(rng),
            frequency: self.angle.sample(rng),
            phase: self.angle.sample(rng),
        }
    }

    fn mutate(&self, wave: &Wave, rng: &mut Pcg32) -> Wave {
        let mut w = *wave;
        match random::index(rng, 4) {
            0 => w.scaling = Self::nudge(&self.scaling, w.scaling, rng),
            1 => w.decay = Self::nudge(&self.decay, w.decay, rng),
            2 => w.frequency = Self::nudge(&self.angle, w.frequency, rng),
            _ => w.phase = Self::nudge(&self.angle, w.phase, rng),
        }
        w
    }

    fn evaluate(&self, waves: &[Wave], x: &[f64], y: &[f64]) -> f64 {
        let sse: f64 = x
            .iter()
            .zip(y)
            .map(|(&xi, &yi)| {
                let fit: f64 = waves.iter().map(|w| w.at(xi)).sum();
                (yi - fit).powi(2)
            })
            .sum();
        sse / x.len() as f64
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut noise_rng = Pcg32::new(SEED, 0);
    let noise = UniformSampler::new(-NOISE_LEVEL, NOISE_LEVEL)?;
    let x: Vec<f64> = (0..1024).map(|i| i as f64 * 0.01).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|&xi| TRUTH.iter().map(|w| w.at(xi)).sum::<f64>() + noise.sample(&mut noise_rng))
        .collect();

    let config = EaConfig::new(TRUTH.len())
        .with_population_size(1000)
        .with_seed(SEED);
    let mut engine = EvolutionEngine::new(DampedSines::new()?, config)?;
    engine.run(&x, &y, 100, 0.1);

    let (best, mse) = engine.best_individual(&x, &y);
    println!("best MSE after {} generations: {mse:.3e}", engine.generation());
    for (found, truth) in best.genes().iter().zip(&TRUTH) {
        println!("  found {found:?}");
        println!("  truth {truth:?}");
    }
    Ok(())
}
