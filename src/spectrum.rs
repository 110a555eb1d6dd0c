//! Software gain control over raw band samples
//!
//! Each sampling cycle removes a fixed noise floor from every band and tracks
//! an adaptive per-band maximum. The maximum attacks instantly (it jumps to
//! any higher sample) and decays slowly (a fixed step per cycle, never below
//! the configured floor).

use crate::SpectrumSource;
use crate::band::{Band, NUM_BANDS};

/// Default noise floors, determined by calibration against the analyzer shield
pub const DEFAULT_NOISE_FLOOR: [u16; NUM_BANDS] = [90, 90, 90, 100, 100, 110, 120];

/// Lowest value the adaptive maximum may decay to
pub const DEFAULT_INITIAL_MAX: u16 = 200;

/// Subtracted from every band's maximum on each sampling cycle
pub const DEFAULT_MAX_DECAY: u16 = 2;

/// Analyzer input channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Left,
    Right,
}

/// Configuration for the gain control stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectrumConfig {
    /// Per-band value subtracted from every raw sample
    pub noise_floor: [u16; NUM_BANDS],
    /// Floor for the adaptive maximum, also its value after a reset
    pub initial_max: u16,
    /// Step by which the adaptive maximum decays each cycle
    pub decay: u16,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            noise_floor: DEFAULT_NOISE_FLOOR,
            initial_max: DEFAULT_INITIAL_MAX,
            decay: DEFAULT_MAX_DECAY,
        }
    }
}

/// Per-band level and adaptive maximum
#[derive(Debug, Clone)]
pub struct SpectrumAgc {
    config: SpectrumConfig,
    levels: [u16; NUM_BANDS],
    max_levels: [u16; NUM_BANDS],
}

impl SpectrumAgc {
    pub const fn new(config: SpectrumConfig) -> Self {
        Self {
            levels: [0; NUM_BANDS],
            max_levels: [config.initial_max; NUM_BANDS],
            config,
        }
    }

    pub const fn config(&self) -> &SpectrumConfig {
        &self.config
    }

    /// Noise-corrected level of every band from the last sample
    pub const fn levels(&self) -> &[u16; NUM_BANDS] {
        &self.levels
    }

    /// Adaptive maximum of every band
    pub const fn max_levels(&self) -> &[u16; NUM_BANDS] {
        &self.max_levels
    }

    pub const fn level(&self, band: Band) -> u16 {
        self.levels[band.index()]
    }

    pub const fn max_level(&self, band: Band) -> u16 {
        self.max_levels[band.index()]
    }

    /// Drop every band's maximum back to the floor and clear the levels
    pub fn reset(&mut self) {
        self.levels = [0; NUM_BANDS];
        self.max_levels = [self.config.initial_max; NUM_BANDS];
    }

    /// Read all bands once and update levels and maxima
    ///
    /// When both channels are enabled their reads are averaged. With neither
    /// enabled every band reads as silence.
    pub fn sample<S: SpectrumSource>(&mut self, source: &mut S, left: bool, right: bool) {
        for band in Band::ALL {
            let i = band.index();

            let decayed = self.max_levels[i]
                .saturating_sub(self.config.decay)
                .max(self.config.initial_max);

            let mut raw: u32 = 0;
            if left {
                raw += u32::from(source.read_raw_band(band, Channel::Left));
            }
            if right {
                raw += u32::from(source.read_raw_band(band, Channel::Right));
            }
            if left && right {
                raw >>= 1;
            }

            let level = raw.saturating_sub(u32::from(self.config.noise_floor[i]));
            let level = u16::try_from(level).unwrap_or(u16::MAX);

            self.levels[i] = level;
            self.max_levels[i] = decayed.max(level);
        }
    }
}

impl Default for SpectrumAgc {
    fn default() -> Self {
        Self::new(SpectrumConfig::default())
    }
}
