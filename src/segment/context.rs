use super::Segment;

/// View handed to a [`SegmentHook`](super::SegmentHook)
///
/// The hooked segment is mutable; every other defined segment is read-only
/// and already carries this cycle's level.
pub struct SegmentContext<'a> {
    index: usize,
    segment: &'a mut Segment,
    before: &'a [Segment],
    after: &'a [Segment],
}

impl<'a> SegmentContext<'a> {
    /// Split `segments` around `index`
    ///
    /// Returns `None` if `index` is out of range.
    pub(crate) fn split(segments: &'a mut [Segment], index: usize) -> Option<Self> {
        if index >= segments.len() {
            return None;
        }
        let (before, rest) = segments.split_at_mut(index);
        let (segment, after) = rest.split_first_mut()?;
        Some(Self {
            index,
            segment,
            before,
            after,
        })
    }

    /// Index of the hooked segment
    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn segment(&self) -> &Segment {
        &*self.segment
    }

    pub fn segment_mut(&mut self) -> &mut Segment {
        &mut *self.segment
    }

    /// Any defined segment, including the hooked one
    pub fn get(&self, index: usize) -> Option<&Segment> {
        if index < self.index {
            self.before.get(index)
        } else if index == self.index {
            Some(&*self.segment)
        } else {
            self.after.get(index - self.index - 1)
        }
    }

    /// Level computed this cycle for segment `index`
    pub fn level_of(&self, index: usize) -> Option<u16> {
        self.get(index).map(Segment::level)
    }

    /// Number of defined segments visible to the hook
    pub fn segment_count(&self) -> usize {
        self.before.len() + 1 + self.after.len()
    }
}
