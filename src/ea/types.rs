//! Core trait definitions for the EA engine.
//!
//! [`GenePolicy`] is the contract between the generic engine and a concrete
//! problem: it names the gene type and supplies the three gene-level
//! strategies (initialize, mutate, evaluate). [`FnPolicy`] builds one from
//! plain closures.

use crate::random::Pcg32;
use std::fmt;
use std::marker::PhantomData;

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// Lower fitness is considered better (minimization).
///
/// Built-in implementations exist for `f64` and `f32`.
/// For maximization problems, negate the fitness or use a wrapper type.
pub trait Fitness: PartialOrd + Copy + Send + Sync + fmt::Debug + 'static {
    /// Converts the fitness to `f64` for logging and statistics.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

impl Fitness for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// Defines the genes of a problem and the operators that act on them.
///
/// The engine never interprets a gene: ranges and meaning belong entirely to
/// the policy. `Input` and `Target` are the read-only evaluation context
/// (for curve fitting, the sample abscissae and ordinates) handed to
/// [`evaluate`](GenePolicy::evaluate) on every call.
///
/// # Thread Safety
///
/// Policies must be `Send + Sync`: in concurrent mode the engine calls them
/// from rayon worker threads, each with its own random stream.
///
/// # Implementing
///
/// ```
/// use u_evolve::ea::GenePolicy;
/// use u_evolve::random::{Pcg32, UniformSampler};
///
/// /// Find `g` minimising the squared distance to every target value.
/// struct Centre {
///     range: UniformSampler<f64>,
/// }
///
/// impl GenePolicy for Centre {
///     type Gene = f64;
///     type Input = ();
///     type Target = [f64];
///     type Fitness = f64;
///
///     fn initialize(&self, rng: &mut Pcg32) -> f64 {
///         self.range.sample(rng)
///     }
///
///     fn mutate(&self, _gene: &f64, rng: &mut Pcg32) -> f64 {
///         self.range.sample(rng)
///     }
///
///     fn evaluate(&self, genes: &[f64], _x: &(), y: &[f64]) -> f64 {
///         y.iter().map(|t| (t - genes[0]).powi(2)).sum()
///     }
/// }
/// ```
pub trait GenePolicy: Send + Sync {
    /// The value held in one genome slot.
    type Gene: Clone + Send + Sync;

    /// First half of the evaluation context.
    type Input: ?Sized + Sync;

    /// Second half of the evaluation context.
    type Target: ?Sized + Sync;

    /// Fitness produced by [`evaluate`](GenePolicy::evaluate).
    type Fitness: Fitness;

    /// Produces a fresh random gene.
    fn initialize(&self, rng: &mut Pcg32) -> Self::Gene;

    /// Produces a replacement for `gene`.
    fn mutate(&self, gene: &Self::Gene, rng: &mut Pcg32) -> Self::Gene;

    /// Scores a full gene sequence. Must be pure: the engine may call it
    /// any number of times, from any thread.
    fn evaluate(&self, genes: &[Self::Gene], x: &Self::Input, y: &Self::Target) -> Self::Fitness;
}

/// A [`GenePolicy`] assembled from three closures.
///
/// # Examples
///
/// ```
/// use u_evolve::ea::FnPolicy;
/// use u_evolve::random::{Pcg32, UniformSampler};
///
/// let range = UniformSampler::new(-5.0f64, 5.0).unwrap();
/// let policy = FnPolicy::new(
///     move |rng: &mut Pcg32| range.sample(rng),
///     move |_gene: &f64, rng: &mut Pcg32| range.sample(rng),
///     |genes: &[f64], _x: &(), _y: &()| genes.iter().map(|g| g * g).sum::<f64>(),
/// );
/// # let _ = policy;
/// ```
pub struct FnPolicy<G, X: ?Sized, Y: ?Sized, F, I, M, E> {
    initialize: I,
    mutate: M,
    evaluate: E,
    _marker: PhantomData<fn(&X, &Y) -> (G, F)>,
}

impl<G, X: ?Sized, Y: ?Sized, F, I, M, E> FnPolicy<G, X, Y, F, I, M, E>
where
    I: Fn(&mut Pcg32) -> G,
    M: Fn(&G, &mut Pcg32) -> G,
    E: Fn(&[G], &X, &Y) -> F,
{
    /// Wraps an initializer, a mutator and an evaluator.
    pub fn new(initialize: I, mutate: M, evaluate: E) -> Self {
        Self {
            initialize,
            mutate,
            evaluate,
            _marker: PhantomData,
        }
    }
}

impl<G, X, Y, F, I, M, E> GenePolicy for FnPolicy<G, X, Y, F, I, M, E>
where
    G: Clone + Send + Sync,
    X: ?Sized + Sync,
    Y: ?Sized + Sync,
    F: Fitness,
    I: Fn(&mut Pcg32) -> G + Send + Sync,
    M: Fn(&G, &mut Pcg32) -> G + Send + Sync,
    E: Fn(&[G], &X, &Y) -> F + Send + Sync,
{
    type Gene = G;
    type Input = X;
    type Target = Y;
    type Fitness = F;

    fn initialize(&self, rng: &mut Pcg32) -> G {
        (self.initialize)(rng)
    }

    fn mutate(&self, gene: &G, rng: &mut Pcg32) -> G {
        (self.mutate)(gene, rng)
    }

    fn evaluate(&self, genes: &[G], x: &X, y: &Y) -> F {
        (self.evaluate)(genes, x, y)
    }
}

impl<G, X: ?Sized, Y: ?Sized, F, I, M, E> fmt::Debug for FnPolicy<G, X, Y, F, I, M, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPolicy").finish_non_exhaustive()
    }
}
