use crate::error::{check_range, ConfigError};

/// A strategy for annealing a value one step at a time
pub trait Decay {
    /// Value one step after `current`
    fn step(&self, current: f64) -> f64;

    /// Value after `t` steps starting from `initial`
    fn evaluate(&self, initial: f64, t: u32) -> f64 {
        (0..t).fold(initial, |v, _| self.step(v))
    }
}

/// A value that never changes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Constant;

impl Decay for Constant {
    fn step(&self, current: f64) -> f64 {
        current
    }
}

/// v<sub>t+1</sub> = max(v<sub>t</sub> * r, v<sub>f</sub>)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometric {
    rate: f64,
    floor: f64,
}

impl Geometric {
    /// `rate` must be in `(0, 1]` and `floor` in `[0, 1]`
    pub fn new(rate: f64, floor: f64) -> Result<Self, ConfigError> {
        check_range("eps_decay", rate, "(0, 1]", (0.0, false), (1.0, true))?;
        check_range("eps_min", floor, "[0, 1]", (0.0, true), (1.0, true))?;
        Ok(Self { rate, floor })
    }

    /// Lowest value the decay can reach
    pub fn floor(&self) -> f64 {
        self.floor
    }
}

impl Decay for Geometric {
    fn step(&self, current: f64) -> f64 {
        (current * self.rate).max(self.floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_decay() {
        assert_eq!(Constant.step(0.3), 0.3);
        assert_eq!(Constant.evaluate(0.3, 1000), 0.3);
    }

    #[test]
    fn geometric_decay() {
        let x = Geometric::new(0.5, 0.1).unwrap();
        assert_eq!(x.step(1.0), 0.5);
        assert_eq!(x.evaluate(1.0, 2), 0.25);
        assert_eq!(x.evaluate(1.0, 3), 0.125);
        assert_eq!(x.evaluate(1.0, 4), 0.1, "floored");
    }

    #[test]
    fn geometric_floor_is_absorbing() {
        let x = Geometric::new(0.95, 0.01).unwrap();
        let mut eps = 1.0;
        let mut reached = None;
        for t in 0..10_000 {
            eps = x.step(eps);
            if eps == 0.01 && reached.is_none() {
                reached = Some(t);
            }
            if reached.is_some() {
                assert_eq!(eps, 0.01, "no further decrease after reaching the floor");
            }
        }
        assert!(reached.is_some(), "floor reached exactly");
    }

    #[test]
    fn geometric_validation() {
        assert!(Geometric::new(1.0, 0.0).is_ok());
        assert!(Geometric::new(0.0, 0.0).is_err());
        assert!(Geometric::new(1.1, 0.0).is_err());
        assert_eq!(
            Geometric::new(0.9, -0.1),
            Err(ConfigError::OutOfRange {
                name: "eps_min",
                value: -0.1,
                interval: "[0, 1]"
            })
        );
    }
}
