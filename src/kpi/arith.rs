//! Guarded arithmetic shared by every KPI formula

/// `numerator / denominator` when the denominator is positive and finite, NaN otherwise.
///
/// Zero, negative and NaN denominators all yield NaN, so a ratio keyed on a
/// count of zero failures is undefined rather than infinite. A quotient that
/// overflows (tiny denominator) is NaN as well.
#[inline]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 && denominator.is_finite() {
        finite(numerator / denominator)
    } else {
        f64::NAN
    }
}

/// `x` if finite, NaN otherwise
#[inline]
pub fn finite(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        f64::NAN
    }
}

/// Reciprocal of a mean-time metric: defined only for positive inputs
#[inline]
pub fn reciprocal(mean_time: f64) -> f64 {
    safe_div(1.0, mean_time)
}

/// Scale a per-hour rate to failures per 10^9 hours
#[inline]
pub fn to_fit(lambda: f64) -> f64 {
    finite(lambda * 1e9)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_div() {
        assert_eq!(safe_div(10.0, 5.0), 2.0);
        assert!(safe_div(10.0, 0.0).is_nan());
        assert!(safe_div(10.0, -1.0).is_nan());
        assert!(safe_div(10.0, f64::NAN).is_nan());
        assert!(safe_div(f64::NAN, 2.0).is_nan());
    }

    #[test]
    fn test_safe_div_never_infinite() {
        assert!(safe_div(5000.0, 1e-320).is_nan());
        assert!(safe_div(5000.0, f64::INFINITY).is_nan());
        assert!(safe_div(f64::INFINITY, 2.0).is_nan());
        assert!(safe_div(f64::MAX, 0.5).is_nan());
    }

    #[test]
    fn test_reciprocal() {
        assert_eq!(reciprocal(4.0), 0.25);
        assert!(reciprocal(0.0).is_nan());
        assert!(reciprocal(-8.0).is_nan());
    }

    #[test]
    fn test_to_fit() {
        assert!((to_fit(0.0002) - 200_000.0).abs() < 1e-6);
        assert!(to_fit(f64::NAN).is_nan());
    }
}
