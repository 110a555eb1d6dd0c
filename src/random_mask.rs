//! Sparkle thresholds for `Action::Random`
//!
//! The mask holds one threshold per position, reused every 64 LEDs. It only
//! changes on an explicit reseed, which keeps sparkle patterns stable from
//! frame to frame.

use embassy_time::Instant;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::segment::MAX_LEVEL;

/// Number of thresholds in the mask
pub const RANDOM_MASK_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomMask {
    thresholds: [u16; RANDOM_MASK_SIZE],
}

impl RandomMask {
    pub fn new(seed: u64) -> Self {
        let mut mask = Self {
            thresholds: [0; RANDOM_MASK_SIZE],
        };
        mask.reseed(seed);
        mask
    }

    /// Build a mask from known thresholds
    pub const fn from_thresholds(thresholds: [u16; RANDOM_MASK_SIZE]) -> Self {
        Self { thresholds }
    }

    /// Draw a fresh set of thresholds in `0..MAX_LEVEL`
    pub fn reseed(&mut self, seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        for threshold in &mut self.thresholds {
            *threshold = rng.random_range(0..MAX_LEVEL);
        }

        #[cfg(feature = "esp32-log")]
        println!("[RandomMask.reseed] seed {}", seed);
    }

    /// Reseed from the microsecond clock
    pub fn reseed_at(&mut self, now: Instant) {
        self.reseed(now.as_micros());
    }

    /// Threshold for traversal position `position`, wrapping every 64 LEDs
    pub const fn threshold(&self, position: usize) -> u16 {
        self.thresholds[position % RANDOM_MASK_SIZE]
    }

    pub const fn thresholds(&self) -> &[u16; RANDOM_MASK_SIZE] {
        &self.thresholds
    }
}
