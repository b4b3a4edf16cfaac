use log::debug;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Owns the process-wide master generator and hands out independent,
/// deterministically derived streams.
pub struct RngManager {
    seed: u64,
    master: ChaCha8Rng,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            master: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeds the master generator from the wall clock so that runs differ.
    pub fn from_clock() -> Self {
        let now = chrono::Utc::now();
        let seed = now
            .timestamp_nanos_opt()
            .map(|nanos| nanos as u64)
            .unwrap_or_else(|| now.timestamp_micros() as u64);
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derives a fresh stream. Every call advances the master, so two forks
    /// under the same name still yield different sequences.
    pub fn fork(&mut self, name: &str) -> ChaCha8Rng {
        let mut seed_bytes = [0u8; 32];
        self.master.fill_bytes(&mut seed_bytes);
        let mut seed_u64 = [0u8; 8];
        seed_u64.copy_from_slice(&seed_bytes[..8]);
        let derived = u64::from_le_bytes(seed_u64);
        debug!("forked rng stream '{name}' with seed {derived}");
        ChaCha8Rng::seed_from_u64(derived)
    }
}

impl Default for RngManager {
    fn default() -> Self {
        Self::new(42)
    }
}
