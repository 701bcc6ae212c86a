use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform source of random bytes for Cxkk
#[derive(Clone, Debug)]
pub struct ByteSource {
    rng: StdRng,
}

impl ByteSource {
    /// Seeds from the system clock
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        ByteSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_byte(&mut self) -> u8 {
        self.rng.gen()
    }
}

impl Default for ByteSource {
    fn default() -> Self {
        Self::new()
    }
}
