//! Generic evolutionary algorithm.
//!
//! A domain-agnostic engine over fixed-length genomes. Users describe their
//! problem with a [`GenePolicy`] (how to create, mutate and score genes);
//! the engine supplies the population, selection, crossover, elitism and the
//! sequential or rayon-backed concurrent schedule.
//!
//! # Core Traits
//!
//! - [`GenePolicy`]: Gene type plus initialize / mutate / evaluate strategies
//! - [`Fitness`]: Comparable fitness value, lower is better
//! - [`Selector`]: Parent selection strategy
//!
//! # Key Types
//!
//! - [`Genome`]: Fixed-length gene sequence with crossover and mutation
//! - [`EaConfig`]: Population shape, execution mode, elitism, seed
//! - [`EvolutionEngine`]: Runs the generational loop
//! - [`Tournament`]: Tournament selection (binary by default)
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod engine;
mod genome;
mod selection;
mod types;

pub use config::{EaConfig, Execution};
pub use engine::{EvolutionEngine, GenerationStats};
pub use genome::Genome;
pub use selection::{Selector, Tournament};
pub use types::{Fitness, FnPolicy, GenePolicy};
