use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::level;
use crate::random_mask::RandomMask;
use crate::renderer::SegmentRenderer;
use crate::segment::SegmentTable;
use crate::spectrum::{SpectrumAgc, SpectrumConfig};
use crate::{PixelSink, SpectrumSource};

/// Default number of segments a controller can hold
pub const DEFAULT_MAX_SEGMENTS: usize = 100;

/// Configuration for the segment controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Number of LEDs driven by the sink
    pub led_count: usize,
    /// Gain control tuning
    pub spectrum: SpectrumConfig,
    /// Seed for the initial random mask
    pub random_seed: u64,
}

/// Segment Controller - the main orchestrator
///
/// Owns the spectrum source, the pixel sink and all segment and band state.
/// One [`display_spectrum`](Self::display_spectrum) call runs a whole display
/// cycle: sample, map, render, flush.
pub struct SegmentController<S, P, const MAX_SEGMENTS: usize = DEFAULT_MAX_SEGMENTS> {
    // External dependencies
    source: S,
    sink: P,

    // Internal state
    segments: SegmentTable<MAX_SEGMENTS>,
    agc: SpectrumAgc,
    renderer: SegmentRenderer,
}

impl<S, P, const MAX_SEGMENTS: usize> SegmentController<S, P, MAX_SEGMENTS>
where
    S: SpectrumSource,
    P: PixelSink,
{
    /// Create a controller with an empty segment table
    ///
    /// The strip is not touched until the first display cycle or
    /// [`reset_strip`](Self::reset_strip).
    pub fn new(source: S, sink: P, config: &ControllerConfig) -> Self {
        Self {
            source,
            sink,
            segments: SegmentTable::new(),
            agc: SpectrumAgc::new(config.spectrum),
            renderer: SegmentRenderer::new(config.led_count, RandomMask::new(config.random_seed)),
        }
    }

    /// Run one display cycle
    ///
    /// `left` and `right` select the analyzer channels; with both set the
    /// channels are averaged.
    pub fn display_spectrum(&mut self, left: bool, right: bool) -> Result<(), P::Error> {
        self.agc.sample(&mut self.source, left, right);
        level::map_all(&mut self.segments, &self.agc);
        self.renderer.render_all(&self.segments, &mut self.sink)
    }

    /// Map and render without sampling, using the current band state
    pub fn redraw(&mut self) -> Result<(), P::Error> {
        level::map_all(&mut self.segments, &self.agc);
        self.renderer.render_all(&self.segments, &mut self.sink)
    }

    /// Clear every segment, blank the strip and restart gain control
    pub fn reset_strip(&mut self, seed: u64) -> Result<(), P::Error> {
        self.segments.reset();
        self.agc.reset();
        self.reset_random(seed);

        #[cfg(feature = "esp32-log")]
        println!("[SegmentController.reset_strip] strip reset");

        self.renderer.clear(&mut self.sink);
        self.sink.flush()
    }

    /// Draw a new random mask
    pub fn reset_random(&mut self, seed: u64) {
        self.renderer.random_mask_mut().reseed(seed);
    }

    /// Draw a new random mask seeded from the clock
    pub fn reset_random_at(&mut self, now: Instant) {
        self.renderer.random_mask_mut().reseed_at(now);
    }

    pub const fn led_count(&self) -> usize {
        self.renderer.led_count()
    }

    pub const fn segments(&self) -> &SegmentTable<MAX_SEGMENTS> {
        &self.segments
    }

    pub fn segments_mut(&mut self) -> &mut SegmentTable<MAX_SEGMENTS> {
        &mut self.segments
    }

    pub const fn spectrum(&self) -> &SpectrumAgc {
        &self.agc
    }

    pub const fn random_mask(&self) -> &RandomMask {
        self.renderer.random_mask()
    }

    pub const fn sink(&self) -> &P {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut P {
        &mut self.sink
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
