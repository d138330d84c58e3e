pub const RATIO_PRECISION: f64 = 10_000.0;

/// Rounds a ratio to 4 decimal places.
pub fn round_ratio(value: f64) -> f64 {
    (value * RATIO_PRECISION).round() / RATIO_PRECISION
}

/// Strict band check: `center - radius < point < center + radius`.
pub fn is_inside(point: f64, center: f64, radius: f64) -> bool {
    point < center + radius && point > center - radius
}

pub fn is_outside(point: f64, center: f64, radius: f64) -> bool {
    !is_inside(point, center, radius)
}
