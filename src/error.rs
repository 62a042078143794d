//! Configuration errors.
//!
//! Everything the engine does after construction is an in-memory computation
//! that cannot fail, so the only error surface is invalid configuration,
//! rejected up front by the constructors.

use thiserror::Error;

/// An invalid engine, genome, or sampler configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("population_size must be at least 1")]
    EmptyPopulation,

    #[error("genome length must be at least 1")]
    EmptyGenome,

    #[error("sampling range is empty: min ({min}) must be below max ({max})")]
    EmptyRange { min: String, max: String },
}
