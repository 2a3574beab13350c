//! Numeric helpers shared by the sweeps and the tests.

/// Assert that `actual` lies within `max_deviation` percent of `expected`.
///
/// The tolerance is relative, see [`deviation`].
#[macro_export]
macro_rules! assert_deviation {
    ($actual:expr, $expected:expr, $max_deviation:expr) => {
        {
            let actual_val = $actual;
            let expected_val = $expected;
            let max_dev = $max_deviation;
            let actual_deviation = $crate::math_utils::deviation(actual_val, expected_val);

            if actual_deviation >= max_dev {
                panic!(
                    "assertion failed: deviation {:.3}% >= {:.3}%\n  actual: {:?},\n  expected: {:?}",
                    actual_deviation, max_dev, actual_val, expected_val
                );
            }
        }
    };
    ($actual:expr, $expected:expr, $max_deviation:expr, $($arg:tt)+) => {
        {
            let actual_val = $actual;
            let expected_val = $expected;
            let max_dev = $max_deviation;
            let actual_deviation = $crate::math_utils::deviation(actual_val, expected_val);

            if actual_deviation >= max_dev {
                panic!(
                    "assertion failed: deviation {:.3}% >= {:.3}%: {}\n  actual: {:?},\n  expected: {:?}",
                    actual_deviation, max_dev, format_args!($($arg)+), actual_val, expected_val
                );
            }
        }
    };
}

/// Percentage deviation of `actual` from `expected` (always positive).
///
/// # Examples
/// ```
/// use glacier_dynamics::math_utils::deviation;
///
/// // a 22.5 km glacier is 2.27% longer than a 22 km one
/// assert!((deviation(22_500.0, 22_000.0) - 2.2727).abs() < 1e-3);
/// assert_eq!(deviation(0.0, 0.0), 0.0);
/// ```
pub fn deviation(actual: f64, expected: f64) -> f64 {
    if expected.abs() < f64::EPSILON {
        if actual.abs() < f64::EPSILON {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        ((actual - expected).abs() / expected.abs()) * 100.0
    }
}

/// Evenly spaced values in `[start, stop)` with the given `step`.
///
/// Values are computed as `start + i * step` rather than by accumulation so
/// long ranges do not drift.
///
/// # Examples
/// ```
/// use glacier_dynamics::math_utils::arange;
///
/// assert_eq!(arange(4000.0, 4300.0, 100.0), vec![4000.0, 4100.0, 4200.0]);
/// assert!(arange(1.0, 0.0, 1.0).is_empty());
/// ```
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || !step.is_finite() || stop <= start {
        return Vec::new();
    }
    let count = ((stop - start) / step).ceil() as usize;
    (0..count)
        .map(|i| start + i as f64 * step)
        .filter(|v| *v < stop)
        .collect()
}
