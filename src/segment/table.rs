use core::fmt;

use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{Action, Segment, SegmentUpdate};
use crate::band::BandMask;
use crate::color::Rgb;

/// Error returned by index-addressed table operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentError {
    /// Index is not below the table capacity
    IndexOutOfRange { index: usize, capacity: usize },
    /// Index is within capacity but above the highest defined segment
    NotDefined { index: usize },
    /// Every slot up to the capacity is already in use
    TableFull,
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, capacity } => {
                write!(f, "segment index {index} out of range (capacity {capacity})")
            }
            Self::NotDefined { index } => write!(f, "segment {index} is not defined"),
            Self::TableFull => f.write_str("segment table is full"),
        }
    }
}

impl core::error::Error for SegmentError {}

/// Fixed-capacity segment storage
///
/// Slots up to the highest defined index are live and visited every display
/// cycle. A cursor names the "current" segment for cursor-addressed updates
/// and for the next [`define`](Self::define).
///
/// N is the maximum number of segments
#[derive(Debug, Clone, Default)]
pub struct SegmentTable<const N: usize> {
    segments: Vec<Segment, N>,
    cursor: usize,
}

impl<const N: usize> SegmentTable<N> {
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
            cursor: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of live slots (highest defined index + 1)
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Highest defined index
    pub fn watermark(&self) -> Option<usize> {
        self.segments.len().checked_sub(1)
    }

    pub const fn current_index(&self) -> usize {
        self.cursor
    }

    /// Move the cursor
    pub fn set_current_index(&mut self, index: usize) -> Result<(), SegmentError> {
        self.check_capacity(index)?;
        self.cursor = index;
        Ok(())
    }

    /// Define a new segment and return its index
    ///
    /// The first definition after a reset lands at index 0; later ones land
    /// right after the cursor. Slots skipped by repositioning the cursor are
    /// left with `Action::None`.
    pub fn define(
        &mut self,
        first_led: u16,
        num_leds: u16,
        action: Action,
        fore_color: Rgb,
        bands: BandMask,
    ) -> Result<usize, SegmentError> {
        let index = if self.segments.is_empty() {
            0
        } else {
            self.cursor + 1
        };
        if index >= N {
            #[cfg(feature = "esp32-log")]
            println!("[SegmentTable.define] table full ({} segments)", N);
            return Err(SegmentError::TableFull);
        }
        if index >= self.segments.len() {
            self.segments
                .resize_default(index + 1)
                .map_err(|()| SegmentError::TableFull)?;
        }
        self.segments[index] = Segment::new(first_led, num_leds, action, fore_color, bands);
        self.cursor = index;

        #[cfg(feature = "esp32-log")]
        println!(
            "[SegmentTable.define] segment {} = {} leds {}..{}",
            index,
            action.as_str(),
            first_led,
            u32::from(first_led) + u32::from(num_leds)
        );

        Ok(index)
    }

    pub fn get(&self, index: usize) -> Result<&Segment, SegmentError> {
        self.check_defined(index)?;
        Ok(&self.segments[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Segment, SegmentError> {
        self.check_defined(index)?;
        Ok(&mut self.segments[index])
    }

    /// Segment under the cursor
    pub fn current(&self) -> Result<&Segment, SegmentError> {
        self.get(self.cursor)
    }

    pub fn current_mut(&mut self) -> Result<&mut Segment, SegmentError> {
        self.get_mut(self.cursor)
    }

    /// Apply a partial update to segment `index`
    pub fn update(&mut self, index: usize, update: &SegmentUpdate) -> Result<(), SegmentError> {
        self.get_mut(index)?.apply(update);
        Ok(())
    }

    /// Apply a partial update to the segment under the cursor
    pub fn update_current(&mut self, update: &SegmentUpdate) -> Result<(), SegmentError> {
        self.update(self.cursor, update)
    }

    /// Drop every segment and rewind cursor and watermark
    pub fn reset(&mut self) {
        self.segments.clear();
        self.cursor = 0;

        #[cfg(feature = "esp32-log")]
        println!("[SegmentTable.reset] all segments cleared");
    }

    /// Live segments in index order
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    fn check_capacity(&self, index: usize) -> Result<(), SegmentError> {
        if index >= N {
            #[cfg(feature = "esp32-log")]
            println!("[SegmentTable] index {} out of range", index);
            return Err(SegmentError::IndexOutOfRange { index, capacity: N });
        }
        Ok(())
    }

    fn check_defined(&self, index: usize) -> Result<(), SegmentError> {
        self.check_capacity(index)?;
        if index >= self.segments.len() {
            return Err(SegmentError::NotDefined { index });
        }
        Ok(())
    }
}
