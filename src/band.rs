//! Spectrum bands
//!
//! The analyzer front end splits audio into seven fixed bands. Band 1 is the
//! lowest frequency. Segments select the bands that drive them with a
//! [`BandMask`].

use bitflags::bitflags;

/// Number of bands delivered by the analyzer
pub const NUM_BANDS: usize = 7;

/// A single spectrum band
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Band {
    /// 63 Hz centre. Mostly rumble, usually left out.
    Band1 = 0,
    /// 160 Hz
    Band2 = 1,
    /// 400 Hz
    Band3 = 2,
    /// 1 kHz
    Band4 = 3,
    /// 2.5 kHz
    Band5 = 4,
    /// 6.25 kHz
    Band6 = 5,
    /// 16 kHz. Mostly noise energy, usually left out.
    Band7 = 6,
}

impl Band {
    /// All bands in sampling order
    pub const ALL: [Band; NUM_BANDS] = [
        Band::Band1,
        Band::Band2,
        Band::Band3,
        Band::Band4,
        Band::Band5,
        Band::Band6,
        Band::Band7,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < NUM_BANDS {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Mask containing only this band
    pub const fn mask(self) -> BandMask {
        BandMask::from_bits_truncate(1 << self as u8)
    }

    /// Centre frequency in Hz
    pub const fn center_hz(self) -> u16 {
        match self {
            Self::Band1 => 63,
            Self::Band2 => 160,
            Self::Band3 => 400,
            Self::Band4 => 1_000,
            Self::Band5 => 2_500,
            Self::Band6 => 6_250,
            Self::Band7 => 16_000,
        }
    }
}

bitflags! {
    /// Set of bands feeding a segment's level
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[repr(transparent)]
    pub struct BandMask: u8 {
        const BAND1 = 0x01;
        const BAND2 = 0x02;
        const BAND3 = 0x04;
        const BAND4 = 0x08;
        const BAND5 = 0x10;
        const BAND6 = 0x20;
        const BAND7 = 0x40;
        /// Bands 2 through 6, skipping the noisy extremes
        const VOCAL = Self::BAND2.bits()
            | Self::BAND3.bits()
            | Self::BAND4.bits()
            | Self::BAND5.bits()
            | Self::BAND6.bits();
    }
}

impl BandMask {
    /// Build a mask from a raw integer, dropping bits above band 7
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn from_raw(raw: i32) -> Self {
        Self::from_bits_truncate((raw & 0x7F) as u8)
    }

    /// Returns true if `band` feeds this mask
    pub const fn has(self, band: Band) -> bool {
        self.bits() & (1 << band as u8) != 0
    }

    /// Iterate the selected bands in ascending order
    pub fn bands(self) -> impl Iterator<Item = Band> {
        Band::ALL.into_iter().filter(move |band| self.has(*band))
    }
}
