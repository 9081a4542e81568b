//! Seeded bit-mixing generator behind every game draw.
//!
//! Advancing and drawing are separate steps: callers [`advance`](Prng::advance)
//! once, then [`draw`](Prng::draw) a bounded value from the mixed state.

use rand::SeedableRng;

const MIX_MULTIPLIER: u32 = 0x85eb_ca6b;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prng {
    state: u32,
}

/// One mixing step over a raw state.
pub const fn mix(mut s: u32) -> u32 {
    s ^= s >> 13;
    s = s.wrapping_mul(MIX_MULTIPLIER);
    s ^= s >> 16;
    s
}

impl Prng {
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn advance(&mut self) {
        self.state = mix(self.state);
    }

    /// Low byte of the state mod `size`, in `0..size`.
    ///
    /// # Panics
    /// When `size` is zero.
    pub fn draw(&self, size: u8) -> u8 {
        assert!(size > 0, "draw from an empty range");
        (self.state as u8) % size
    }
}

impl SeedableRng for Prng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
