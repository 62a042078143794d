//! Uniform sampling on top of a [`RandomSource`].

use super::RandomSource;
use crate::error::ConfigError;
use std::fmt::Debug;

/// A gene type that can be sampled uniformly.
///
/// Implemented for all primitive integers and for `f32`/`f64`.
pub trait UniformGene: Copy + PartialOrd + Debug {
    /// Maps `offset ∈ [0, count)` linearly onto `[min, max)`.
    fn rescale(min: Self, max: Self, offset: u64, count: u64) -> Self;

    /// Lossy conversion used for statistics.
    fn to_f64(self) -> f64;
}

macro_rules! impl_uniform_int {
    ($($t:ty),*) => {$(
        impl UniformGene for $t {
            fn rescale(min: Self, max: Self, offset: u64, count: u64) -> Self {
                let span = max as i128 - min as i128;
                let scaled = span * offset as i128 / count as i128;
                (min as i128 + scaled) as $t
            }

            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

macro_rules! impl_uniform_float {
    ($($t:ty),*) => {$(
        impl UniformGene for $t {
            fn rescale(min: Self, max: Self, offset: u64, count: u64) -> Self {
                let span = max as f64 - min as f64;
                let value = (min as f64 + offset as f64 * span / count as f64) as $t;
                if value < max {
                    return value;
                }
                // Rounding landed on `max`; step to the closest value below it.
                if max > 0.0 {
                    <$t>::from_bits(max.to_bits() - 1)
                } else if max == 0.0 {
                    -<$t>::from_bits(1)
                } else {
                    <$t>::from_bits(max.to_bits() + 1)
                }
            }

            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

impl_uniform_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
impl_uniform_float!(f32, f64);

/// Uniform distribution over `[min, max)`.
///
/// Holds no state: each [`sample`](Self::sample) consumes exactly one word
/// from the stream and rescales it as
/// `min + (v - R::MIN) * (max - min) / (R::MAX - R::MIN + 1)`.
///
/// # Examples
///
/// ```
/// use u_evolve::random::{Pcg32, UniformSampler};
///
/// let phase = UniformSampler::new(0.0f32, std::f32::consts::TAU).unwrap();
/// let mut rng = Pcg32::new(42, 54);
/// let v = phase.sample(&mut rng);
/// assert!((0.0..std::f32::consts::TAU).contains(&v));
///
/// assert!(UniformSampler::new(3, 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSampler<T> {
    min: T,
    max: T,
}

impl UniformSampler<f64> {
    /// The unit interval `[0, 1)`, used for probability coin flips.
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };
}

impl<T: UniformGene> UniformSampler<T> {
    /// Creates a sampler over `[min, max)`.
    ///
    /// Fails with [`ConfigError::EmptyRange`] unless `min < max`.
    pub fn new(min: T, max: T) -> Result<Self, ConfigError> {
        if min < max {
            Ok(Self { min, max })
        } else {
            Err(ConfigError::EmptyRange {
                min: format!("{min:?}"),
                max: format!("{max:?}"),
            })
        }
    }

    /// Inclusive lower bound.
    pub fn min(&self) -> T {
        self.min
    }

    /// Exclusive upper bound.
    pub fn max(&self) -> T {
        self.max
    }

    /// Draws one value.
    pub fn sample<R: RandomSource>(&self, rng: &mut R) -> T {
        let (offset, count) = raw_draw(rng);
        T::rescale(self.min, self.max, offset, count)
    }
}

/// Draws a uniform index in `[0, len)`.
///
/// # Panics
/// Panics if `len` is zero.
pub fn index<R: RandomSource>(rng: &mut R, len: usize) -> usize {
    assert!(len > 0, "cannot draw an index from an empty range");
    let (offset, count) = raw_draw(rng);
    usize::rescale(0, len, offset, count)
}

fn raw_draw<R: RandomSource>(rng: &mut R) -> (u64, u64) {
    let offset = u64::from(rng.next_word() - R::MIN);
    let count = u64::from(R::MAX - R::MIN) + 1;
    (offset, count)
}

/// Summary statistics of a batch of uniform draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformityReport {
    /// Smallest value drawn.
    pub min: f64,
    /// Largest value drawn.
    pub max: f64,
    /// Sample mean.
    pub mean: f64,
    /// Unbiased sample variance.
    pub variance: f64,
    /// `sqrt(n) * (mean - (min + max) / 2) / sqrt((max - min)^2 / 12)`,
    /// against the sampler's bounds.
    pub z_score: f64,
}

/// Draws `n` values from `sampler` and compares them with the continuous
/// uniform law on the sampler's range.
///
/// # Panics
/// Panics if `n < 2`.
pub fn uniformity<T, R>(rng: &mut R, sampler: &UniformSampler<T>, n: usize) -> UniformityReport
where
    T: UniformGene,
    R: RandomSource,
{
    assert!(n >= 2, "uniformity needs at least two draws");

    let mut lowest = f64::INFINITY;
    let mut highest = f64::NEG_INFINITY;
    let mut mean = 0.0;
    let mut m2 = 0.0;

    // Welford's online update.
    for i in 0..n {
        let v = sampler.sample(rng).to_f64();
        lowest = lowest.min(v);
        highest = highest.max(v);
        let delta = v - mean;
        mean += delta / (i + 1) as f64;
        m2 += delta * (v - mean);
    }

    let a = sampler.min().to_f64();
    let b = sampler.max().to_f64();
    let expected_mean = (a + b) / 2.0;
    let expected_var = (b - a) * (b - a) / 12.0;

    UniformityReport {
        min: lowest,
        max: highest,
        mean,
        variance: m2 / (n - 1) as f64,
        z_score: (n as f64).sqrt() * (mean - expected_mean) / expected_var.sqrt(),
    }
}
