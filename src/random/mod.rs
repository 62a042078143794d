//! Deterministic random streams.
//!
//! The engine draws every random decision (initial genes, parent indices,
//! crossover points, mutation coin flips) from a single [`Pcg32`] stream, so
//! a run started from a fixed seed replays bit for bit.
//!
//! # Key Types
//!
//! - [`RandomSource`]: a stream of 32-bit words with declared output bounds
//! - [`Pcg32`]: the PCG32 (XSH-RR) generator
//! - [`UniformSampler`]: maps one raw draw linearly onto `[min, max)`
//!
//! # References
//!
//! - O'Neill (2014), "PCG: A Family of Simple Fast Space-Efficient
//!   Statistically Good Algorithms for Random Number Generation"

mod pcg;
mod uniform;

pub use pcg::{Pcg32, DEFAULT_STREAM};
pub use uniform::{index, uniformity, UniformGene, UniformSampler, UniformityReport};

/// A stream of 32-bit pseudo-random words.
///
/// `MIN` and `MAX` are the inclusive bounds of [`next_word`](Self::next_word);
/// samplers rescale against them rather than assuming the full `u32` range.
pub trait RandomSource {
    /// Smallest value `next_word` can return.
    const MIN: u32;

    /// Largest value `next_word` can return.
    const MAX: u32;

    /// Advances the stream and returns the next word.
    fn next_word(&mut self) -> u32;
}
