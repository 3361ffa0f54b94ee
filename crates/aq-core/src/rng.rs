//! Deterministic per-participant RNG.
//!
//! The scheduler itself is fully deterministic and never draws random
//! numbers.  Randomness is only used to *simulate* participants choosing
//! arrival times.  Each participant gets its own `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (participant_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive IDs uniformly across the seed space, so adding
//! participants does not disturb the draws of existing ones.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ParticipantId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-participant deterministic RNG.
pub struct ParticipantRng(SmallRng);

impl ParticipantRng {
    /// Seed deterministically from the run's global seed and a participant ID.
    pub fn new(global_seed: u64, participant: ParticipantId) -> Self {
        let seed = global_seed ^ (participant.0 as u64).wrapping_mul(MIXING_CONSTANT);
        ParticipantRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
