//! LED visiting order within a segment
//!
//! Every action visits each LED of its segment exactly once. The order decides
//! which LEDs count as "lit first" when a segment is partially filled, and the
//! spacing grid is laid along that same order.

use crate::bounds::SegmentBounds;
use crate::segment::Action;

/// Direction of a traversal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// First LED up
    Ascending,
    /// Last LED down
    Descending,
    /// Centre, then alternately one further above and below
    Outward,
}

impl Order {
    pub const fn for_action(action: Action) -> Self {
        match action {
            Action::FromTop => Self::Descending,
            Action::FromMiddle => Self::Outward,
            Action::None | Action::FromBottom | Action::Static | Action::Random => Self::Ascending,
        }
    }
}

/// A visited LED
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Index within the traversal, `0..count`
    pub position: usize,
    /// Strip index of the LED
    pub led: usize,
    /// False if spacing blanks this position
    pub on_grid: bool,
}

/// Iterator over the LEDs of a segment in action order
#[derive(Clone, Debug)]
pub struct Traversal {
    bounds: SegmentBounds,
    order: Order,
    spacing: u16,
    position: usize,
    countdown: u32,
}

impl Traversal {
    pub const fn new(bounds: SegmentBounds, order: Order, spacing: u16) -> Self {
        Self {
            bounds,
            order,
            spacing,
            position: 0,
            countdown: 0,
        }
    }

    pub const fn for_action(bounds: SegmentBounds, action: Action, spacing: u16) -> Self {
        Self::new(bounds, Order::for_action(action), spacing)
    }

    fn led_at(&self, position: usize) -> usize {
        match self.order {
            Order::Ascending => self.bounds.first as usize + position,
            Order::Descending => self.bounds.end() - 1 - position,
            Order::Outward => {
                let center = self.bounds.center();
                let step = position.div_ceil(2);
                if position % 2 == 1 {
                    center + step
                } else {
                    center - step
                }
            }
        }
    }

    // Outward traversals advance the grid once per mirrored pair (centre,
    // then c+1/c-1, c+2/c-2, ...), so spaced fills stay symmetric.
    fn advances_grid(&self, position: usize) -> bool {
        self.order != Order::Outward || position % 2 == 0
    }
}

impl Iterator for Traversal {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let position = self.position;
        if position >= self.bounds.count as usize {
            return None;
        }

        let on_grid = self.countdown == 0;
        if self.advances_grid(position) {
            if on_grid {
                self.countdown = u32::from(self.spacing) + 1;
            }
            self.countdown -= 1;
        }
        self.position += 1;

        Some(Step {
            position,
            led: self.led_at(position),
            on_grid,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.bounds.count as usize).saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Traversal {}
