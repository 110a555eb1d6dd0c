#![no_std]

pub mod band;
pub mod bounds;
pub mod color;
pub mod controller;
pub mod frame_scheduler;
pub mod level;
pub mod random_mask;
pub mod renderer;
pub mod segment;
pub mod spectrum;
pub mod strip;
pub mod traversal;

pub use band::{Band, BandMask, NUM_BANDS};
pub use bounds::SegmentBounds;
pub use controller::{ControllerConfig, DEFAULT_MAX_SEGMENTS, SegmentController};
pub use frame_scheduler::{ChannelSelect, FrameResult, FrameScheduler};
pub use random_mask::RandomMask;
pub use renderer::SegmentRenderer;
pub use segment::{
    Action, MAX_LEVEL, Segment, SegmentContext, SegmentError, SegmentHook, SegmentOptions,
    SegmentTable, SegmentUpdate,
};
pub use spectrum::{Channel, SpectrumAgc, SpectrumConfig};
pub use strip::StripBuffer;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// LED strip the renderer draws into
///
/// Implement this trait to support different hardware platforms. Pixels are
/// buffered by the sink and shown on [`flush`](Self::flush).
pub trait PixelSink {
    type Error;

    /// Set a buffered pixel
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Push the buffered pixels to the strip
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Spectrum analyzer front end
///
/// Called once per band and enabled channel, in band order, on every sampling
/// cycle. Strobing the analyzer to the next band is up to the implementation.
pub trait SpectrumSource {
    /// Read the raw sample of `band` on `channel`
    fn read_raw_band(&mut self, band: Band, channel: Channel) -> u16;
}
