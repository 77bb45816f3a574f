//! Deterministic random streams
//!
//! Every asset draws from its own ChaCha stream derived from one master seed.
//! Stream `i` depends only on (master_seed, i), so adding assets to the
//! catalog never changes the draws of existing ones.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random source used by the simulator
pub type SpinRng = ChaCha8Rng;

/// Master seed plus per-asset stream derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    /// Reproducible bank
    pub fn seeded(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Bank seeded from OS entropy; the chosen seed is still readable via `master_seed`
    pub fn from_entropy() -> Self {
        Self {
            master_seed: rand::random::<u64>(),
        }
    }

    pub fn from_option(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_else(Self::from_entropy)
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Independent stream for the asset at `index`
    pub fn stream(&self, index: u64) -> SpinRng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.master_seed);
        rng.set_stream(index);
        rng
    }
}

/// One-off seeded source, mainly for tests and tools
pub fn seeded_rng(seed: u64) -> SpinRng {
    ChaCha8Rng::seed_from_u64(seed)
}
