//! Band-to-segment level mapping
//!
//! Aggregates the bands selected by each segment into one normalized level in
//! `0..=MAX_LEVEL`, then runs the segment hooks once every level is fresh.

use crate::segment::{MAX_LEVEL, SegmentContext, SegmentTable};
use crate::spectrum::SpectrumAgc;

/// Normalize a summed band level against the summed band maxima
///
/// `max_sum` is floored at 1 to keep empty masks from dividing by zero. The
/// result is not clamped: a sample above its maximum maps above `MAX_LEVEL`.
pub fn normalize(sample_sum: u32, max_sum: u32) -> u16 {
    let max_sum = max_sum.max(1);
    let level = u64::from(sample_sum) * u64::from(MAX_LEVEL) / u64::from(max_sum);
    u16::try_from(level).unwrap_or(u16::MAX)
}

/// Compute every live segment's level, then run their hooks in index order
///
/// Segments with `Action::None` are mapped too, so a hook can still switch
/// them on for this cycle.
pub fn map_all<const N: usize>(segments: &mut SegmentTable<N>, agc: &SpectrumAgc) {
    let levels = agc.levels();
    let max_levels = agc.max_levels();

    for segment in segments.as_mut_slice() {
        let mut sample_sum = 0u32;
        let mut max_sum = 0u32;
        for band in segment.bands().bands() {
            sample_sum += u32::from(levels[band.index()]);
            max_sum += u32::from(max_levels[band.index()]);
        }
        let max_sum = max_sum.max(1);
        segment.set_computed(normalize(sample_sum, max_sum), max_sum);
    }

    run_hooks(segments);
}

/// Invoke each live segment's hook with a view of the whole table
pub fn run_hooks<const N: usize>(segments: &mut SegmentTable<N>) {
    let slots = segments.as_mut_slice();
    for index in 0..slots.len() {
        let Some(hook) = slots[index].hook() else {
            continue;
        };
        if let Some(mut context) = SegmentContext::split(slots, index) {
            hook(&mut context);
        }
    }
}
