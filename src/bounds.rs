/// Range of strip LEDs owned by a segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentBounds {
    pub first: u16,
    pub count: u16,
}

impl SegmentBounds {
    pub const fn new(first: u16, count: u16) -> Self {
        Self { first, count }
    }

    pub const fn is_empty(self) -> bool {
        self.count == 0
    }

    /// Index of the last LED, `None` for an empty range
    pub const fn last(self) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        Some(self.first as usize + self.count as usize - 1)
    }

    /// One past the last LED
    pub const fn end(self) -> usize {
        self.first as usize + self.count as usize
    }

    /// Centre LED, rounding toward the lower index for even counts
    pub const fn center(self) -> usize {
        self.first as usize + (self.count.saturating_sub(1) / 2) as usize
    }

    pub const fn contains(self, led: usize) -> bool {
        led >= self.first as usize && led < self.end()
    }
}
