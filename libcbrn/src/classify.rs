//! Page layout classification.
//!
//! Horizontal pages (wider than tall) are compared against the reversed
//! reference ratios, vertical pages against the direct ones. Spread checks
//! run first; a page is only tested for irregularity when it is not a spread.
//! Square pages match neither orientation and are always [`Layout::Single`].

use crate::baseline::Baseline;
use crate::page::{Layout, Orientation, Size};
use crate::utils::{is_inside, is_outside};

fn is_horizontal_spread(size: Size, ratio: f64, baseline: &Baseline, tolerance: f64) -> bool {
    size.orientation() == Orientation::Horizontal
        && is_inside(ratio, baseline.spread_max_ratio, tolerance)
}

fn is_vertical_spread(size: Size, ratio: f64, baseline: &Baseline, tolerance: f64) -> bool {
    size.orientation() == Orientation::Vertical
        && is_inside(ratio, baseline.spread_max_ratio_reverse, tolerance)
}

fn is_horizontal_irregular(size: Size, ratio: f64, baseline: &Baseline, tolerance: f64) -> bool {
    size.orientation() == Orientation::Horizontal
        && is_outside(ratio, baseline.single_max_ratio_reverse, tolerance)
}

fn is_vertical_irregular(size: Size, ratio: f64, baseline: &Baseline, tolerance: f64) -> bool {
    size.orientation() == Orientation::Vertical
        && is_outside(ratio, baseline.single_max_ratio, tolerance)
}

pub fn classify(size: Size, ratio: f64, baseline: &Baseline, tolerance: f64) -> Layout {
    if is_horizontal_spread(size, ratio, baseline, tolerance) {
        Layout::SpreadHorizontal
    } else if is_vertical_spread(size, ratio, baseline, tolerance) {
        Layout::SpreadVertical
    } else if is_horizontal_irregular(size, ratio, baseline, tolerance) {
        Layout::IrregularHorizontal
    } else if is_vertical_irregular(size, ratio, baseline, tolerance) {
        Layout::IrregularVertical
    } else {
        Layout::Single
    }
}
