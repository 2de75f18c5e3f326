use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Seed used when the labyrinth is not randomized.
pub const FIXED_SEED: u64 = 10;

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const INCREMENT: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// How the maze generator picks its seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Always [`FIXED_SEED`]: reproducible mazes.
    #[default]
    Fixed,
    /// Wall-clock milliseconds: a different maze per run.
    Clock,
    /// A caller-chosen seed, e.g. one logged by an earlier clock-seeded run.
    Explicit(u64),
}

impl SeedPolicy {
    /// `true` means seed from the clock, `false` means the fixed seed.
    pub fn from_random_flag(random: bool) -> Self {
        if random { Self::Clock } else { Self::Fixed }
    }

    pub fn resolve(self) -> u64 {
        match self {
            Self::Fixed => FIXED_SEED,
            Self::Clock => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_millis() as u64),
            Self::Explicit(seed) => seed,
        }
    }
}

/// 48-bit linear congruential generator.
///
/// Deterministic across platforms and cheap to step. Seeds are scrambled with
/// the multiplier, so nearby seeds still start far apart in the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeRng {
    state: u64,
}

impl MazeRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ MULTIPLIER) & MASK,
        }
    }

    /// Advance and return the top `bits` bits of the state (1..=32).
    fn next_bits(&mut self, bits: u32) -> i32 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & MASK;
        (self.state >> (48 - bits)) as u32 as i32
    }

    /// Uniform integer in `[0, bound)`.
    ///
    /// Power-of-two bounds take the high bits directly; other bounds reject
    /// draws from the short final bucket so every value is equally likely.
    ///
    /// # Panics
    /// If `bound` is zero or above `i32::MAX`.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        assert!(
            bound > 0 && bound <= i32::MAX as u32,
            "bound out of range: {bound}"
        );
        let bound = bound as i32;
        if bound & bound.wrapping_neg() == bound {
            return ((i64::from(bound) * i64::from(self.next_bits(31))) >> 31) as u32;
        }
        loop {
            let bits = self.next_bits(31);
            let value = bits % bound;
            if bits.wrapping_sub(value).wrapping_add(bound - 1) >= 0 {
                return value as u32;
            }
        }
    }
}

impl RngCore for MazeRng {
    fn next_u32(&mut self) -> u32 {
        self.next_bits(32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let high = i64::from(self.next_bits(32)) << 32;
        high.wrapping_add(i64::from(self.next_bits(32))) as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for MazeRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
