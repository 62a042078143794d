//! PCG32 generator (64-bit state, 32-bit output, XSH-RR output function).

use super::RandomSource;
use rand::rand_core::{impls, RngCore, SeedableRng};

const MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// Stream selector used when only a seed is supplied.
pub const DEFAULT_STREAM: u64 = 0xda3e_39cb_94b9_5bdb;

/// Permuted congruential generator, PCG32 XSH-RR variant.
///
/// Each call advances `state' = state * 6364136223846793005 + inc` and emits
/// a rotated xor-shift of the *previous* state. The period is 2^64 for every
/// stream, and distinct `stream` values give independent sequences.
///
/// # Examples
///
/// ```
/// use u_evolve::random::{Pcg32, RandomSource};
///
/// let mut a = Pcg32::new(42, 54);
/// let mut b = Pcg32::new(42, 54);
/// assert_eq!(a.next_word(), 0xa15c_02b7);
/// assert_eq!(b.next_word(), 0xa15c_02b7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    /// Creates a generator from an initial state and a stream selector,
    /// following the reference `pcg32_srandom_r` seeding procedure.
    pub fn new(seed: u64, stream: u64) -> Self {
        let mut rng = Self {
            state: 0,
            inc: (stream << 1) | 1,
        };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    /// Creates a generator seeded from the thread-local entropy source.
    ///
    /// Runs started this way are not reproducible; use [`Pcg32::new`] or
    /// [`SeedableRng::seed_from_u64`] for that.
    pub fn from_entropy() -> Self {
        Self::new(rand::random(), rand::random())
    }

    /// Derives an independent child generator on `stream`.
    ///
    /// The child's seed is drawn from `self`, so forking advances the parent
    /// by two words and a fixed parent seed yields fixed children.
    pub fn fork(&mut self, stream: u64) -> Self {
        let seed = self.next_u64();
        log::trace!("forking pcg32 stream {stream} (seed {seed:#018x})");
        Self::new(seed, stream)
    }

    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(self.inc | 1);
    }
}

impl RandomSource for Pcg32 {
    const MIN: u32 = u32::MIN;
    const MAX: u32 = u32::MAX;

    fn next_word(&mut self) -> u32 {
        let old = self.state;
        self.step();
        // Output uses the old state so the multiply and the permutation overlap.
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngCore for Pcg32 {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_word());
        let hi = u64::from(self.next_word());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for Pcg32 {
    /// Little-endian initial state followed by little-endian stream selector.
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut state = [0u8; 8];
        let mut stream = [0u8; 8];
        state.copy_from_slice(&seed[..8]);
        stream.copy_from_slice(&seed[8..]);
        Self::new(u64::from_le_bytes(state), u64::from_le_bytes(stream))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state, DEFAULT_STREAM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_reference_sequence() {
        // Output of the reference pcg32-demo for initstate 42, initseq 54.
        let mut rng = Pcg32::new(42, 54);
        let expected = [
            0xa15c_02b7,
            0x7b47_f409,
            0xba1d_3330,
            0x83d2_f293,
            0xbfa4_784b,
            0xcbed_606e,
        ];
        for want in expected {
            assert_eq!(rng.next_word(), want);
        }
    }

    #[test]
    fn test_declared_bounds() {
        assert_eq!(<Pcg32 as RandomSource>::MIN, 0);
        assert_eq!(<Pcg32 as RandomSource>::MAX, u32::MAX);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(a.next_word(), b.next_word());
        }
    }

    #[test]
    fn test_streams_differ() {
        let mut a = Pcg32::new(7, 1);
        let mut b = Pcg32::new(7, 2);
        let same = (0..100).filter(|_| a.next_word() == b.next_word()).count();
        assert!(same < 5, "streams 1 and 2 should be unrelated, {same} equal words");
    }

    #[test]
    fn test_from_seed_layout() {
        let mut seed = [0u8; 16];
        seed[..8].copy_from_slice(&42u64.to_le_bytes());
        seed[8..].copy_from_slice(&54u64.to_le_bytes());
        assert_eq!(Pcg32::from_seed(seed), Pcg32::new(42, 54));
    }

    #[test]
    fn test_fork_is_deterministic_and_advances_parent() {
        let mut parent_a = Pcg32::seed_from_u64(3);
        let mut parent_b = Pcg32::seed_from_u64(3);
        let mut child_a = parent_a.fork(5);
        let mut child_b = parent_b.fork(5);
        assert_eq!(child_a.next_word(), child_b.next_word());
        assert_eq!(parent_a, parent_b);
        assert_ne!(parent_a, Pcg32::seed_from_u64(3));
    }

    #[test]
    fn test_forked_siblings_differ() {
        let mut parent = Pcg32::seed_from_u64(11);
        let mut first = parent.fork(0);
        let mut second = parent.fork(1);
        let same = (0..100)
            .filter(|_| first.next_word() == second.next_word())
            .count();
        assert!(same < 5);
    }

    #[test]
    fn test_next_u64_combines_two_words() {
        let mut words = Pcg32::new(1, 1);
        let mut wide = Pcg32::new(1, 1);
        let lo = u64::from(words.next_word());
        let hi = u64::from(words.next_word());
        assert_eq!(wide.next_u64(), (hi << 32) | lo);
    }

    #[test]
    fn test_usable_as_rand_rng() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..1000 {
            let v: f64 = rng.random_range(-1.0..1.0);
            assert!((-1.0..1.0).contains(&v));
        }
        let mut bytes = [0u8; 13];
        rng.fill_bytes(&mut bytes);
        assert!(bytes.iter().any(|&b| b != 0));
    }
}
