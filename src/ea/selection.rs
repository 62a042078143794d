//! Parent selection.
//!
//! A [`Selector`] picks one parent index per call, given the current
//! population and its fitness values. The engine calls it twice per
//! offspring slot.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"

use super::genome::Genome;
use super::types::GenePolicy;
use crate::random::{self, Pcg32};

/// Chooses a parent from the population.
///
/// `fitness[i]` is the fitness of `population[i]`; lower is better. The
/// returned index must be in `0..population.len()`.
///
/// Any closure `Fn(&[Genome<P>], &[P::Fitness], &mut Pcg32) -> usize` is a
/// selector.
pub trait Selector<P: GenePolicy>: Send + Sync {
    /// Returns the index of the chosen individual.
    fn select(&self, population: &[Genome<P>], fitness: &[P::Fitness], rng: &mut Pcg32) -> usize;
}

impl<P, F> Selector<P> for F
where
    P: GenePolicy,
    F: Fn(&[Genome<P>], &[P::Fitness], &mut Pcg32) -> usize + Send + Sync,
{
    fn select(&self, population: &[Genome<P>], fitness: &[P::Fitness], rng: &mut Pcg32) -> usize {
        self(population, fitness, rng)
    }
}

/// Tournament selection: draw `size` indices uniformly with replacement and
/// keep the fittest.
///
/// A later draw replaces the current champion unless the champion is
/// strictly fitter, so on an exact tie the last-drawn candidate wins. The
/// outcome is fully determined by the draws; no extra randomness breaks ties.
///
/// Higher `size` = stronger selection pressure.
/// - 2: light pressure (the default)
/// - 3-5: moderate pressure
///
/// # Complexity
/// O(size) per selection
///
/// # Examples
///
/// ```
/// use u_evolve::ea::Tournament;
///
/// assert_eq!(Tournament::default(), Tournament::binary());
/// assert_eq!(Tournament::new(0).size(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tournament {
    size: usize,
}

impl Tournament {
    /// Tournament of `size` candidates (at least 1).
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    /// Two-candidate tournament.
    pub fn binary() -> Self {
        Self::new(2)
    }

    /// Number of candidates drawn per selection.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for Tournament {
    fn default() -> Self {
        Self::binary()
    }
}

impl<P: GenePolicy> Selector<P> for Tournament {
    fn select(&self, population: &[Genome<P>], fitness: &[P::Fitness], rng: &mut Pcg32) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );
        debug_assert_eq!(population.len(), fitness.len());

        let n = fitness.len();
        let mut best = random::index(rng, n);
        for _ in 1..self.size {
            let challenger = random::index(rng, n);
            // Negated so ties (and NaN comparisons) go to the challenger.
            if !(fitness[best] < fitness[challenger]) {
                best = challenger;
            }
        }
        best
    }
}
