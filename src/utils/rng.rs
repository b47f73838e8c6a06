use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_seeder::Seeder;
use serde::{Deserialize, Serialize};

/// Hands out deterministic RNG streams derived from one master seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    master_seed: u64,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self { master_seed: seed }
    }

    /// Get the RNG stream for `name`, seeded from the master seed and the name.
    pub fn get_rng(&self, name: &str) -> ChaCha8Rng {
        Seeder::from((self.master_seed, name)).make_rng()
    }

    /// Stream for `name` when a seed is configured, otherwise an entropy-seeded one.
    pub fn stream(seed: Option<u64>, name: &str) -> ChaCha8Rng {
        match seed {
            Some(seed) => Self::new(seed).get_rng(name),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

// Simple trait for swapping the RNG of a solver instance
pub trait WithRng {
    fn with_rng(self, rng: ChaCha8Rng) -> Self;
}
