use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::rules::partition::DIE_FACES;

/// The only source of randomness in the crate: the true roll, the cosmetic
/// display ticks, and the decorative generators all draw from a `Roller`.
#[derive(Debug, Clone)]
pub struct Roller {
    rng: StdRng,
}

impl Roller {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let rng = StdRng::from_os_rng();
        Roller { rng }
    }

    /// Splits off an independently seeded roller, so cosmetic draws can't
    /// shift the sequence of real rolls.
    pub fn fork(&mut self) -> Self {
        let mut seed = [0u8; 32];
        self.rng.fill(&mut seed);
        let rng = StdRng::from_seed(seed);
        Roller { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        let rng = StdRng::seed_from_u64(seed);
        Roller { rng }
    }

    pub fn d(&mut self, die_size: u32) -> u32 {
        self.rng.random_range(1..=die_size)
    }

    /// One roll of the d120.
    pub fn d120(&mut self) -> u32 {
        self.d(DIE_FACES)
    }

    pub fn roll(&mut self, min: u32, max: u32) -> u32 {
        self.rng.random_range(min..=max)
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform in `[low, high)`.
    pub fn between(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.unit()
    }

    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    #[cfg(test)]
    pub fn test_rng() -> Self {
        Self::from_seed(42)
    }
}
