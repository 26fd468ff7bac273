use thiserror::Error;

/// Invalid hyperparameters, reported before training starts
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid value for `{name}`: {value} (must be in the interval {interval})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        interval: &'static str,
    },

    #[error("`{name}` must be greater than zero")]
    NotPositive { name: &'static str },
}

/// Check `value` against an interval given as `(low, low_inclusive, high, high_inclusive)`
pub(crate) fn check_range(
    name: &'static str,
    value: f64,
    interval: &'static str,
    (low, low_inclusive): (f64, bool),
    (high, high_inclusive): (f64, bool),
) -> Result<(), ConfigError> {
    let above = if low_inclusive { value >= low } else { value > low };
    let below = if high_inclusive { value <= high } else { value < high };
    (above && below)
        .then_some(())
        .ok_or(ConfigError::OutOfRange {
            name,
            value,
            interval,
        })
}
