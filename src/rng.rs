//! Deterministic RNG based on splitmix64. Plugs into `rand` so generators can
//! take any `rand::Rng`, while seeded runs stay reproducible across platforms.

use rand::{RngCore, SeedableRng};

const SALT_GALLERY: u64 = 0x6A1A_C7E5_0000_0001;

#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Seed for the `index`-th image of a gallery batch.
#[inline]
pub fn derive_seed(seed: u64, index: u64) -> u64 {
    splitmix64(seed ^ SALT_GALLERY ^ index.wrapping_mul(0xD1B54A32D192ED03))
}

/// Simple sequential RNG. One instance per generated image.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl RngCore for Rng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.state = splitmix64(self.state);
        self.state
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Rng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    // Keep the raw state so `seed_from_u64(s)` and `new(s)` agree.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
