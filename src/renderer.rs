#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::PixelSink;
use crate::color::{OFF, Rgb, is_off, modulate};
use crate::random_mask::RandomMask;
use crate::segment::{Action, MAX_LEVEL, Segment, SegmentOptions, SegmentTable};
use crate::traversal::Traversal;

/// Scale a normalized level to a lit-LED count in `0..=num_leds`
pub fn scale_level(level: u16, num_leds: u16) -> u16 {
    let scaled = u32::from(level) * (u32::from(num_leds) + 1) / (u32::from(MAX_LEVEL) + 1);
    u16::try_from(scaled).unwrap_or(u16::MAX).min(num_leds)
}

/// Segment Renderer - turns segment levels into strip pixels
///
/// Every pass blanks the strip once, draws the live segments in index order
/// (so higher indices win on overlap) and flushes the sink once.
#[derive(Debug, Clone)]
pub struct SegmentRenderer {
    led_count: usize,
    random: RandomMask,
}

impl SegmentRenderer {
    pub const fn new(led_count: usize, random: RandomMask) -> Self {
        Self { led_count, random }
    }

    pub const fn led_count(&self) -> usize {
        self.led_count
    }

    pub const fn random_mask(&self) -> &RandomMask {
        &self.random
    }

    pub fn random_mask_mut(&mut self) -> &mut RandomMask {
        &mut self.random
    }

    /// Draw every live segment and flush the sink
    pub fn render_all<const N: usize, P: PixelSink>(
        &self,
        segments: &SegmentTable<N>,
        sink: &mut P,
    ) -> Result<(), P::Error> {
        self.clear(sink);
        for segment in segments.iter() {
            self.render_segment(segment, sink);
        }
        sink.flush()
    }

    /// Set every LED of the strip to off without flushing
    pub fn clear<P: PixelSink>(&self, sink: &mut P) {
        for led in 0..self.led_count {
            sink.set_pixel(led, OFF);
        }
    }

    /// Draw one segment on top of whatever the sink already holds
    pub fn render_segment<P: PixelSink>(&self, segment: &Segment, sink: &mut P) {
        let action = segment.action();
        let num_leds = segment.num_leds();
        if action == Action::None || num_leds == 0 {
            return;
        }
        let options = segment.options();

        let mut level = segment.level().min(MAX_LEVEL);
        if options.contains(SegmentOptions::INVERT_LEVEL) {
            level = MAX_LEVEL - level;
        }
        let segval = scale_level(level, num_leds);
        let lit = if action.fills_whole_segment() {
            num_leds
        } else {
            segval
        };

        let back = segment.back_color();
        let fore = if options.contains(SegmentOptions::MODULATE_SEGMENT) {
            modulate(back, segment.fore_color(), segval, num_leds)
        } else {
            segment.fore_color()
        };
        let keep_off = options.contains(SegmentOptions::NO_OFF_OVERWRITE);

        let traversal = Traversal::for_action(segment.bounds(), action, segment.spacing());
        for step in traversal {
            if !step.on_grid {
                continue;
            }
            let color = if step.position < usize::from(lit) {
                fore
            } else {
                back
            };
            if keep_off && is_off(color) {
                continue;
            }
            if action == Action::Random && self.random.threshold(step.position) > level {
                continue;
            }
            self.write(sink, step.led, color);
        }
    }

    fn write<P: PixelSink>(&self, sink: &mut P, led: usize, color: Rgb) {
        debug_assert!(
            led < self.led_count,
            "segment writes LED {led} past the strip ({} LEDs)",
            self.led_count
        );
        if led >= self.led_count {
            #[cfg(feature = "esp32-log")]
            println!("[SegmentRenderer] dropping write to LED {} (strip has {})", led, self.led_count);
            return;
        }
        sink.set_pixel(led, color);
    }
}
