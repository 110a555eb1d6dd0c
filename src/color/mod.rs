//! 7-bit RGB colors
//!
//! Strip colors carry three channels in `0..=127`. They are stored in
//! [`smart_leds::RGB8`] and expanded to full 8-bit range only when a frame
//! is handed to a physical driver.

mod palette;

pub use palette::*;
use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Largest value a single channel may hold
pub const MAX_CHANNEL: u8 = 0x7F;

/// Packed color value meaning "leave the stored color unchanged"
///
/// All bits set, so a legitimately all-ones color can never be assigned
/// through the packed path.
pub const NO_CHANGE_COLOR: u32 = u32::MAX;

/// Build a color, masking each channel to 7 bits
#[inline]
pub const fn rgb7(r: u8, g: u8, b: u8) -> Rgb {
    Rgb {
        r: r & MAX_CHANNEL,
        g: g & MAX_CHANNEL,
        b: b & MAX_CHANNEL,
    }
}

/// Pack three channels into one integer (`0x00RRGGBB` layout)
#[inline]
pub const fn pack_color(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Pack an [`Rgb`] value
#[inline]
pub const fn pack_rgb(color: Rgb) -> u32 {
    pack_color(color.r, color.g, color.b)
}

/// Unpack an integer color, masking every channel to 7 bits
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn unpack_color(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & MAX_CHANNEL as u32) as u8,
        g: ((color >> 8) & MAX_CHANNEL as u32) as u8,
        b: (color & MAX_CHANNEL as u32) as u8,
    }
}

/// Returns true if every channel is zero
#[inline]
pub const fn is_off(color: Rgb) -> bool {
    color.r == 0 && color.g == 0 && color.b == 0
}

/// Interpolate between `back` and `fore` by `step / steps`
///
/// Integer math, truncating toward zero per channel. `steps == 0` yields
/// `back`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn modulate(back: Rgb, fore: Rgb, step: u16, steps: u16) -> Rgb {
    if steps == 0 {
        return back;
    }
    let lerp = |b: u8, f: u8| -> u8 {
        let delta = i32::from(f) - i32::from(b);
        let value = i32::from(b) + delta * i32::from(step) / i32::from(steps);
        value.clamp(0, i32::from(u8::MAX)) as u8
    };
    Rgb {
        r: lerp(back.r, fore.r),
        g: lerp(back.g, fore.g),
        b: lerp(back.b, fore.b),
    }
}

/// Expand a 7-bit channel color to the 8-bit range drivers expect
#[inline]
pub const fn expand_to_8bit(color: Rgb) -> Rgb {
    Rgb {
        r: (color.r & MAX_CHANNEL) << 1,
        g: (color.g & MAX_CHANNEL) << 1,
        b: (color.b & MAX_CHANNEL) << 1,
    }
}
