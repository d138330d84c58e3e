use crate::baseline::Baseline;
use crate::config::SlotRounding;
use crate::page::{Layout, Page};

/// Numbering slots consumed by one page.
///
/// The first page never starts a spread. Spreads take
/// `single_max_ratio / ratio` slots so panoramas wider than two pages get
/// more than two numbers; everything else takes one.
pub fn slot_count(
    index: usize,
    layout: Layout,
    ratio: f64,
    baseline: &Baseline,
    rounding: SlotRounding,
) -> u32 {
    if index == 0 || !layout.is_spread() {
        return 1;
    }
    let slots = rounding.apply(baseline.single_max_ratio / ratio);
    if slots.is_finite() && slots >= 1.0 {
        slots as u32
    } else {
        1
    }
}

/// Sum of all slot counts, `None` if it does not fit in a `u32`.
pub fn total_length(pages: &[Page]) -> Option<u32> {
    pages
        .iter()
        .try_fold(0u32, |total, page| total.checked_add(page.slot_count))
}
