use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::RandomSource;

/// The one random stream a simulation run consumes.
pub struct SeededSource {
    rng: StdRng,
    seed: Option<u64>,
}

impl SeededSource {
    /// Reproducible stream.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            seed: None,
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn draw(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
