//! Fixed-length genome and its genetic operators.

use super::types::GenePolicy;
use crate::error::ConfigError;
use crate::random::{self, Pcg32, UniformSampler};
use std::fmt;

/// An ordered, fixed-length sequence of genes: one candidate solution.
///
/// The length is validated once at construction and never changes. Genomes
/// are moved between population slots, never copied behind the caller's
/// back; [`Clone`] is available for callers that explicitly want a copy.
///
/// Fitness is not cached: [`evaluate`](Self::evaluate) calls the policy
/// every time.
pub struct Genome<P: GenePolicy> {
    genes: Box<[P::Gene]>,
}

impl<P: GenePolicy> Genome<P> {
    /// Creates a genome of `len` genes, each from [`GenePolicy::initialize`].
    ///
    /// Fails with [`ConfigError::EmptyGenome`] if `len` is zero.
    pub fn random(policy: &P, len: usize, rng: &mut Pcg32) -> Result<Self, ConfigError> {
        if len == 0 {
            return Err(ConfigError::EmptyGenome);
        }
        let genes = (0..len).map(|_| policy.initialize(rng)).collect();
        Ok(Self { genes })
    }

    /// Wraps caller-provided genes.
    ///
    /// Fails with [`ConfigError::EmptyGenome`] if `genes` is empty.
    pub fn from_genes(genes: Vec<P::Gene>) -> Result<Self, ConfigError> {
        if genes.is_empty() {
            return Err(ConfigError::EmptyGenome);
        }
        Ok(Self {
            genes: genes.into_boxed_slice(),
        })
    }

    /// Read-only view of the genes, in order.
    pub fn genes(&self) -> &[P::Gene] {
        &self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Always `false`: genomes hold at least one gene.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Overwrites every gene with [`GenePolicy::initialize`].
    pub fn random_reset(&mut self, policy: &P, rng: &mut Pcg32) {
        for gene in self.genes.iter_mut() {
            *gene = policy.initialize(rng);
        }
    }

    /// Single-point crossover.
    ///
    /// Draws a cut `c` uniformly in `[0, len)`. The child takes genes
    /// `[0, c)` from `self` and genes `[c, len)` from `other`, each at its
    /// own position. A cut of 0 therefore reproduces `other`.
    ///
    /// # Panics
    /// Panics if the parents have different lengths.
    pub fn crossover(&self, other: &Self, rng: &mut Pcg32) -> Self {
        let cut = self.draw_cut(other, rng);
        let genes = self.genes[..cut]
            .iter()
            .chain(&other.genes[cut..])
            .cloned()
            .collect();
        Self { genes }
    }

    /// Same as [`crossover`](Self::crossover), but writes the child into an
    /// existing genome so its storage is reused.
    ///
    /// # Panics
    /// Panics if `self`, `other` and `child` do not all have the same length.
    pub fn crossover_into(&self, other: &Self, rng: &mut Pcg32, child: &mut Self) {
        assert_eq!(
            self.len(),
            child.len(),
            "child must have the parents' length"
        );
        let cut = self.draw_cut(other, rng);
        child.genes[..cut].clone_from_slice(&self.genes[..cut]);
        child.genes[cut..].clone_from_slice(&other.genes[cut..]);
    }

    fn draw_cut(&self, other: &Self, rng: &mut Pcg32) -> usize {
        assert_eq!(
            self.len(),
            other.len(),
            "parents must have equal length"
        );
        random::index(rng, self.len())
    }

    /// With probability `p_mutation`, applies exactly one
    /// [`mutate_once`](Self::mutate_once).
    ///
    /// This is one coin flip for the whole genome, not one per gene, so at
    /// most one gene changes per call. Returns whether the mutation fired.
    pub fn mutate(&mut self, policy: &P, p_mutation: f64, rng: &mut Pcg32) -> bool {
        let coin = UniformSampler::UNIT.sample(rng);
        if coin < p_mutation {
            self.mutate_once(policy, rng);
            true
        } else {
            false
        }
    }

    /// Replaces one uniformly chosen gene via [`GenePolicy::mutate`].
    pub fn mutate_once(&mut self, policy: &P, rng: &mut Pcg32) {
        let i = random::index(rng, self.len());
        self.genes[i] = policy.mutate(&self.genes[i], rng);
    }

    /// Scores the genes against the evaluation context.
    pub fn evaluate(&self, policy: &P, x: &P::Input, y: &P::Target) -> P::Fitness {
        policy.evaluate(&self.genes, x, y)
    }
}

impl<P: GenePolicy> Clone for Genome<P> {
    fn clone(&self) -> Self {
        Self {
            genes: self.genes.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.genes.clone_from(&source.genes);
    }
}

impl<P: GenePolicy> PartialEq for Genome<P>
where
    P::Gene: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.genes == other.genes
    }
}

impl<P: GenePolicy> fmt::Debug for Genome<P>
where
    P::Gene: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Genome").field("genes", &self.genes).finish()
    }
}
