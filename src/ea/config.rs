//! EA configuration.
//!
//! [`EaConfig`] holds the parameters fixed for the lifetime of an
//! [`EvolutionEngine`](super::EvolutionEngine): population shape, execution
//! strategy, elitism and seeding. Per-run parameters (generation count,
//! mutation probability) are arguments of `run` instead.

use crate::error::ConfigError;

/// How the engine schedules work within a generation.
///
/// Both strategies implement the same algorithm and are bit-reproducible
/// under a fixed seed; they differ in which random stream each step draws
/// from (see [`EvolutionEngine`](super::EvolutionEngine)), so the same seed
/// gives different, equally valid, runs in the two modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Execution {
    /// Every step on the calling thread, all draws from the master stream.
    Sequential,

    /// Initialization, evaluation and offspring production on the rayon
    /// pool, each task with its own forked stream.
    #[default]
    Concurrent,
}

/// Configuration for the evolution engine.
///
/// # Defaults
///
/// ```
/// use u_evolve::ea::{EaConfig, Execution};
///
/// let config = EaConfig::new(4);
/// assert_eq!(config.genome_len, 4);
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.execution, Execution::Concurrent);
/// assert!(config.elitism);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ea::{EaConfig, Execution};
///
/// let config = EaConfig::new(1)
///     .with_population_size(1000)
///     .with_execution(Execution::Sequential)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EaConfig {
    /// Number of individuals in the population (and in the offspring buffer).
    pub population_size: usize,

    /// Number of genes in every genome.
    pub genome_len: usize,

    /// Sequential or concurrent scheduling.
    pub execution: Execution,

    /// Whether the best individual of each generation is carried, unmutated,
    /// into offspring slot 0.
    pub elitism: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            genome_len: 1,
            execution: Execution::default(),
            elitism: true,
            seed: None,
        }
    }
}

impl EaConfig {
    /// Default configuration for genomes of `genome_len` genes.
    pub fn new(genome_len: usize) -> Self {
        Self {
            genome_len,
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the genome length.
    pub fn with_genome_len(mut self, n: usize) -> Self {
        self.genome_len = n;
        self
    }

    /// Sets the execution strategy.
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Enables or disables elitism.
    pub fn with_elitism(mut self, elitism: bool) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.genome_len == 0 {
            return Err(ConfigError::EmptyGenome);
        }
        Ok(())
    }
}
