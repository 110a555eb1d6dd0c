//! Segment data model
//!
//! A segment is a contiguous, possibly overlapping, run of strip LEDs with its
//! own colors, illumination action and band selection. Segments live in a
//! [`SegmentTable`] and are drawn in index order.

mod context;
mod table;

use bitflags::bitflags;

pub use context::SegmentContext;
pub use table::{SegmentError, SegmentTable};

use crate::band::BandMask;
use crate::bounds::SegmentBounds;
use crate::color::{NO_CHANGE_COLOR, OFF, Rgb, unpack_color};

/// Normalized level ceiling produced by level mapping
pub const MAX_LEVEL: u16 = 1023;

const ACTION_ID_NONE: u8 = 0;
const ACTION_ID_FROM_BOTTOM: u8 = 1;
const ACTION_ID_FROM_TOP: u8 = 2;
const ACTION_ID_FROM_MIDDLE: u8 = 3;
const ACTION_ID_STATIC: u8 = 4;
const ACTION_ID_RANDOM: u8 = 5;

const ACTION_NAME_NONE: &str = "none";
const ACTION_NAME_FROM_BOTTOM: &str = "from_bottom";
const ACTION_NAME_FROM_TOP: &str = "from_top";
const ACTION_NAME_FROM_MIDDLE: &str = "from_middle";
const ACTION_NAME_STATIC: &str = "static";
const ACTION_NAME_RANDOM: &str = "random";

/// Illumination strategy of a segment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Action {
    /// Skipped while rendering, level is still computed
    #[default]
    None = ACTION_ID_NONE,
    /// Fill from the first LED up
    FromBottom = ACTION_ID_FROM_BOTTOM,
    /// Fill from the last LED down
    FromTop = ACTION_ID_FROM_TOP,
    /// Fill outward from the centre
    FromMiddle = ACTION_ID_FROM_MIDDLE,
    /// Light every LED regardless of level
    Static = ACTION_ID_STATIC,
    /// Sparkle: LEDs light where the level beats a per-position threshold
    Random = ACTION_ID_RANDOM,
}

impl Action {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            ACTION_ID_NONE => Self::None,
            ACTION_ID_FROM_BOTTOM => Self::FromBottom,
            ACTION_ID_FROM_TOP => Self::FromTop,
            ACTION_ID_FROM_MIDDLE => Self::FromMiddle,
            ACTION_ID_STATIC => Self::Static,
            ACTION_ID_RANDOM => Self::Random,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => ACTION_NAME_NONE,
            Self::FromBottom => ACTION_NAME_FROM_BOTTOM,
            Self::FromTop => ACTION_NAME_FROM_TOP,
            Self::FromMiddle => ACTION_NAME_FROM_MIDDLE,
            Self::Static => ACTION_NAME_STATIC,
            Self::Random => ACTION_NAME_RANDOM,
        }
    }

    /// Static and random segments always cover every LED; the level only
    /// drives the random threshold and the color blend
    pub const fn fills_whole_segment(self) -> bool {
        matches!(self, Self::Static | Self::Random)
    }
}

bitflags! {
    /// Per-segment rendering options
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[repr(transparent)]
    pub struct SegmentOptions: u8 {
        /// Never write an off pixel, so lower segments show through
        const NO_OFF_OVERWRITE = 0x01;
        /// Blend the foreground from the background by level
        const MODULATE_SEGMENT = 0x02;
        /// Use `MAX_LEVEL - level`
        const INVERT_LEVEL = 0x04;
    }
}

/// Callback run once per cycle after every segment level is computed
///
/// Gets mutable access to its own segment and read access to the others.
pub type SegmentHook = fn(&mut SegmentContext<'_>);

/// One strip region
#[derive(Debug, Clone, Default)]
pub struct Segment {
    bounds: SegmentBounds,
    action: Action,
    fore_color: Rgb,
    back_color: Rgb,
    bands: BandMask,
    spacing: u16,
    options: SegmentOptions,
    hook: Option<SegmentHook>,
    level: u16,
    max_level: u32,
}

impl Segment {
    /// Create a segment with default back color, spacing and options
    pub fn new(first_led: u16, num_leds: u16, action: Action, fore_color: Rgb, bands: BandMask) -> Self {
        Self {
            bounds: SegmentBounds::new(first_led, num_leds),
            action,
            fore_color,
            back_color: OFF,
            bands,
            ..Self::default()
        }
    }

    pub const fn bounds(&self) -> SegmentBounds {
        self.bounds
    }

    pub const fn first_led(&self) -> u16 {
        self.bounds.first
    }

    pub const fn num_leds(&self) -> u16 {
        self.bounds.count
    }

    pub const fn action(&self) -> Action {
        self.action
    }

    pub const fn fore_color(&self) -> Rgb {
        self.fore_color
    }

    pub const fn back_color(&self) -> Rgb {
        self.back_color
    }

    pub const fn bands(&self) -> BandMask {
        self.bands
    }

    pub const fn spacing(&self) -> u16 {
        self.spacing
    }

    pub const fn options(&self) -> SegmentOptions {
        self.options
    }

    pub const fn hook(&self) -> Option<SegmentHook> {
        self.hook
    }

    /// Normalized level from the last mapping pass
    ///
    /// Not guaranteed to lie within `0..=MAX_LEVEL`; the renderer clamps.
    pub const fn level(&self) -> u16 {
        self.level
    }

    /// Sum of the adaptive maxima of the selected bands
    pub const fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn set_first_led(&mut self, first_led: u16) {
        self.bounds.first = first_led;
    }

    pub fn set_num_leds(&mut self, num_leds: u16) {
        self.bounds.count = num_leds;
    }

    pub fn set_action(&mut self, action: Action) {
        self.action = action;
    }

    pub fn set_fore_color(&mut self, color: Rgb) {
        self.fore_color = color;
    }

    pub fn set_back_color(&mut self, color: Rgb) {
        self.back_color = color;
    }

    pub fn set_bands(&mut self, bands: BandMask) {
        self.bands = bands;
    }

    pub fn set_spacing(&mut self, spacing: u16) {
        self.spacing = spacing;
    }

    pub fn set_options(&mut self, options: SegmentOptions) {
        self.options = options;
    }

    pub fn set_hook(&mut self, hook: Option<SegmentHook>) {
        self.hook = hook;
    }

    /// Override the computed level until the next mapping pass
    pub fn set_level(&mut self, level: u16) {
        self.level = level;
    }

    pub(crate) fn set_computed(&mut self, level: u16, max_level: u32) {
        self.level = level;
        self.max_level = max_level;
    }

    /// Apply every field present in `update`
    pub fn apply(&mut self, update: &SegmentUpdate) {
        if let Some(first_led) = update.first_led {
            self.bounds.first = first_led;
        }
        if let Some(num_leds) = update.num_leds {
            self.bounds.count = num_leds;
        }
        if let Some(action) = update.action {
            self.action = action;
        }
        if let Some(color) = update.fore_color {
            self.fore_color = color;
        }
        if let Some(color) = update.back_color {
            self.back_color = color;
        }
        if let Some(bands) = update.bands {
            self.bands = bands;
        }
        if let Some(spacing) = update.spacing {
            self.spacing = spacing;
        }
        if let Some(options) = update.options {
            self.options = options;
        }
    }
}

/// Partial segment update; `None` leaves a field unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentUpdate {
    pub first_led: Option<u16>,
    pub num_leds: Option<u16>,
    pub action: Option<Action>,
    pub fore_color: Option<Rgb>,
    pub back_color: Option<Rgb>,
    pub bands: Option<BandMask>,
    pub spacing: Option<u16>,
    pub options: Option<SegmentOptions>,
}

impl SegmentUpdate {
    /// Build an update from raw values using the sentinel convention
    ///
    /// A negative integer or a color equal to [`NO_CHANGE_COLOR`] leaves the
    /// field unchanged. Action ids with no matching [`Action`] are ignored.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        first_led: i32,
        num_leds: i32,
        action: i32,
        fore_color: u32,
        back_color: u32,
        bands: i32,
        spacing: i32,
        options: i32,
    ) -> Self {
        Self {
            first_led: raw_u16(first_led),
            num_leds: raw_u16(num_leds),
            action: raw_action(action),
            fore_color: raw_color(fore_color),
            back_color: raw_color(back_color),
            bands: (bands >= 0).then(|| BandMask::from_raw(bands)),
            spacing: raw_u16(spacing),
            options: raw_u8(options).map(SegmentOptions::from_bits_truncate),
        }
    }

    pub const fn first_led(mut self, first_led: u16) -> Self {
        self.first_led = Some(first_led);
        self
    }

    pub const fn num_leds(mut self, num_leds: u16) -> Self {
        self.num_leds = Some(num_leds);
        self
    }

    pub const fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub const fn fore_color(mut self, color: Rgb) -> Self {
        self.fore_color = Some(color);
        self
    }

    pub const fn back_color(mut self, color: Rgb) -> Self {
        self.back_color = Some(color);
        self
    }

    pub const fn bands(mut self, bands: BandMask) -> Self {
        self.bands = Some(bands);
        self
    }

    pub const fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub const fn options(mut self, options: SegmentOptions) -> Self {
        self.options = Some(options);
        self
    }
}

fn raw_u16(value: i32) -> Option<u16> {
    if value < 0 {
        return None;
    }
    Some(u16::try_from(value).unwrap_or(u16::MAX))
}

fn raw_u8(value: i32) -> Option<u8> {
    if value < 0 {
        return None;
    }
    Some(u8::try_from(value).unwrap_or(u8::MAX))
}

fn raw_color(value: u32) -> Option<Rgb> {
    (value != NO_CHANGE_COLOR).then(|| unpack_color(value))
}

fn raw_action(value: i32) -> Option<Action> {
    let action = Action::from_raw(raw_u8(value)?);
    if action.is_none() {
        #[cfg(feature = "esp32-log")]
        esp_println::println!("[SegmentUpdate] ignoring unknown action id {}", value);
    }
    action
}
