/// Asserts that a numerical value is in the provided interval `[a,b]` and panics
/// with a helpful message if not
///
/// ### Example
/// ```ignore
/// let epsilon = 2.0;
/// assert_interval!(epsilon, 0.0, 1.0);
/// ```
/// This will panic with the message "Invalid value for \`epsilon\`. Must be in the interval \[0, 1\]."
#[macro_export]
macro_rules! assert_interval {
    ($var:expr, $a:expr, $b:expr) => {
        assert!(
            $var >= $a && $var <= $b,
            "Invalid value for `{}`. Must be in the interval [{}, {}].",
            stringify!($var),
            $a,
            $b,
        );
    };
}

/// Index of the first maximal value
///
/// The first NaN entry, if any, is treated as the maximum.
///
/// **Panics** if `values` is empty
pub(crate) fn argmax(values: &[f64]) -> usize {
    assert!(!values.is_empty(), "argmax of an empty slice");
    values
        .iter()
        .enumerate()
        .skip(1)
        .fold(0, |best, (i, &v)| {
            if v > values[best] || (v.is_nan() && !values[best].is_nan()) {
                i
            } else {
                best
            }
        })
}
