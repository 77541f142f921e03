//! Small numeric helpers shared by the resolver and the scorer.

/// Clamp `value` into `[lo, hi]`.
///
/// A NaN `value` comes out as `lo`; callers guard against non-finite inputs
/// before clamping.
#[must_use]
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Round half away from zero to `digits` decimal places.
#[must_use]
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Relative change from `old` to `new`, absent when either side is missing
/// or `old` is zero.
#[must_use]
pub fn pct_change(new: Option<f64>, old: Option<f64>) -> Option<f64> {
    match (new, old) {
        (Some(new), Some(old)) if old != 0.0 => Some((new - old) / old),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds_both_sides() {
        assert_eq!(clamp(120.0, 55.0, 99.0), 99.0);
        assert_eq!(clamp(10.0, 55.0, 99.0), 55.0);
        assert_eq!(clamp(70.25, 55.0, 99.0), 70.25);
    }

    #[test]
    fn round_to_four_digits() {
        assert_eq!(round_to(92.123_456, 4), 92.1235);
        assert_eq!(round_to(0.333_333_3, 4), 0.3333);
        assert_eq!(round_to(-0.000_04, 4), -0.0);
    }

    #[test]
    fn pct_change_requires_nonzero_base() {
        assert_eq!(pct_change(Some(90.0), Some(100.0)), Some(-0.1));
        assert_eq!(pct_change(Some(90.0), Some(0.0)), None);
        assert_eq!(pct_change(None, Some(100.0)), None);
        assert_eq!(pct_change(Some(90.0), None), None);
    }
}
