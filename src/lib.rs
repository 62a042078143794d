//! Generic evolutionary-algorithm engine.
//!
//! - **Random streams** ([`random`]): a deterministic PCG32 generator with
//!   declared output bounds, a stateless uniform sampler over `[min, max)`
//!   and a simple uniformity report.
//! - **Evolution** ([`ea`]): fixed-length genomes whose genes are created,
//!   mutated and scored by a user-supplied policy, evolved by binary
//!   tournament selection, single-point crossover and elitism, either
//!   sequentially or on the rayon thread pool.
//!
//! Runs are reproducible: with [`ea::EaConfig::seed`] set, both execution
//! modes replay bit for bit.
//!
//! # Example
//!
//! ```
//! use u_evolve::ea::{EaConfig, EvolutionEngine, FnPolicy};
//! use u_evolve::random::{Pcg32, UniformSampler};
//!
//! // Fit `a` in `y = a * x`.
//! let range = UniformSampler::new(-10.0f64, 10.0).unwrap();
//! let policy = FnPolicy::new(
//!     move |rng: &mut Pcg32| range.sample(rng),
//!     move |_a: &f64, rng: &mut Pcg32| range.sample(rng),
//!     |genes: &[f64], x: &[f64], y: &[f64]| {
//!         x.iter().zip(y).map(|(xi, yi)| (genes[0] * xi - yi).powi(2)).sum::<f64>()
//!     },
//! );
//!
//! let x = [1.0, 2.0, 3.0];
//! let y = [2.5, 5.0, 7.5];
//! let config = EaConfig::new(1).with_population_size(200).with_seed(7);
//! let mut engine = EvolutionEngine::new(policy, config).unwrap();
//! engine.run(&x[..], &y[..], 30, 0.2);
//!
//! let (best, _) = engine.best_individual(&x[..], &y[..]);
//! assert!((best.genes()[0] - 2.5).abs() < 0.5);
//! ```

pub mod ea;
pub mod error;
pub mod random;

pub use error::ConfigError;
