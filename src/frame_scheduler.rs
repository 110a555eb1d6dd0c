//! Frame scheduling and timing utilities.
//!
//! Provides portable display-cycle pacing without async/await or
//! platform-specific timers. The caller is responsible for sleeping between
//! frames.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::controller::SegmentController;
use crate::{PixelSink, SpectrumSource};

/// Default target frame rate (90 FPS).
pub const DEFAULT_FPS: u32 = 90;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Analyzer channels sampled on every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSelect {
    pub left: bool,
    pub right: bool,
}

impl ChannelSelect {
    pub const LEFT: Self = Self {
        left: true,
        right: false,
    };
    pub const RIGHT: Self = Self {
        left: false,
        right: true,
    };
    pub const BOTH: Self = Self {
        left: true,
        right: true,
    };
}

/// Portable frame scheduler around a [`SegmentController`].
///
/// This scheduler:
/// - Tracks frame timing with drift correction
/// - Runs one display cycle per tick
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(controller, ChannelSelect::BOTH);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now))?;
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<S, P, const MAX_SEGMENTS: usize> {
    controller: SegmentController<S, P, MAX_SEGMENTS>,
    channels: ChannelSelect,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<S, P, const MAX_SEGMENTS: usize> FrameScheduler<S, P, MAX_SEGMENTS>
where
    S: SpectrumSource,
    P: PixelSink,
{
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (90 FPS) for frame timing.
    pub fn new(controller: SegmentController<S, P, MAX_SEGMENTS>, channels: ChannelSelect) -> Self {
        Self::with_frame_duration(controller, channels, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        controller: SegmentController<S, P, MAX_SEGMENTS>,
        channels: ChannelSelect,
        frame_duration: Duration,
    ) -> Self {
        Self {
            controller,
            channels,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Run one display cycle and return timing information.
    ///
    /// If we have fallen more than two frames behind, the schedule restarts
    /// from `now` instead of bursting through the backlog.
    pub fn tick(&mut self, now: Instant) -> Result<FrameResult, P::Error> {
        if now.saturating_duration_since(self.next_frame) > self.frame_duration * 2 {
            #[cfg(feature = "esp32-log")]
            println!("[FrameScheduler] behind schedule, restarting from now");
            self.next_frame = now;
        }

        self.controller
            .display_spectrum(self.channels.left, self.channels.right)?;
        self.next_frame += self.frame_duration;

        Ok(FrameResult {
            next_deadline: self.next_frame,
            sleep_duration: self.next_frame.saturating_duration_since(now),
        })
    }

    pub fn set_channels(&mut self, channels: ChannelSelect) {
        self.channels = channels;
    }

    pub const fn channels(&self) -> ChannelSelect {
        self.channels
    }

    pub const fn controller(&self) -> &SegmentController<S, P, MAX_SEGMENTS> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SegmentController<S, P, MAX_SEGMENTS> {
        &mut self.controller
    }

    pub fn into_controller(self) -> SegmentController<S, P, MAX_SEGMENTS> {
        self.controller
    }
}
