use crate::error::CalibrationFailure;
use crate::page::Size;
use crate::utils::round_ratio;
use serde::{Deserialize, Serialize};

/// Reference ratios of an issue, derived once from its first image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baseline {
    pub single_max_ratio: f64,
    pub spread_max_ratio: f64,
    pub single_max_ratio_reverse: f64,
    pub spread_max_ratio_reverse: f64,
}

impl Baseline {
    /// A two-up spread of the same stock is half as tall relative to its width.
    pub fn from_ratio(ratio: f64) -> Self {
        let spread = ratio / 2.0;
        Self {
            single_max_ratio: ratio,
            spread_max_ratio: spread,
            single_max_ratio_reverse: round_ratio(1.0 / ratio),
            spread_max_ratio_reverse: round_ratio(1.0 / spread),
        }
    }
}

/// Calibrates against the first usable size in reading order.
pub fn calibrate<'a, I>(sizes: I) -> Result<Baseline, CalibrationFailure>
where
    I: IntoIterator<Item = &'a Size>,
{
    sizes
        .into_iter()
        .find(|size| !size.is_empty())
        .map(|size| Baseline::from_ratio(size.ratio()))
        .ok_or(CalibrationFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_all_four_ratios() {
        let baseline = Baseline::from_ratio(1.5);
        assert_eq!(baseline.single_max_ratio, 1.5);
        assert_eq!(baseline.spread_max_ratio, 0.75);
        assert_eq!(baseline.single_max_ratio_reverse, 0.6667);
        assert_eq!(baseline.spread_max_ratio_reverse, 1.3333);
    }

    #[test]
    fn uses_first_usable_size() {
        let sizes = [Size::new(0, 0), Size::new(1000, 1500), Size::new(1000, 1400)];
        let baseline = calibrate(&sizes).expect("baseline");
        assert_eq!(baseline.single_max_ratio, 1.5);
    }

    #[test]
    fn fails_without_images() {
        let empty: [Size; 0] = [];
        assert_eq!(calibrate(&empty), Err(CalibrationFailure));
        assert_eq!(calibrate(&[Size::new(0, 10)]), Err(CalibrationFailure));
    }
}
