use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::RouterError;

/// Graded reward in [0.0, 1.0]. 1.0 is full success, 0.0 full failure.
///
/// Normalising raw delay or efficiency metrics into this range is the
/// caller's job.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Outcome(f64);

impl Outcome {
    /// Validate and wrap a reward. NaN and values outside [0, 1] are rejected.
    pub fn new(value: f64) -> Result<Self, RouterError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RouterError::InvalidOutcome { value })
        }
    }

    pub fn success() -> Self {
        Self(1.0)
    }

    pub fn failure() -> Self {
        Self(0.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// The failure share, `1 - value`.
    pub fn complement(self) -> f64 {
        1.0 - self.0
    }
}

impl From<bool> for Outcome {
    fn from(success: bool) -> Self {
        if success {
            Self::success()
        } else {
            Self::failure()
        }
    }
}

impl TryFrom<f64> for Outcome {
    type Error = RouterError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Outcome> for f64 {
    fn from(o: Outcome) -> Self {
        o.0
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_closed_unit_interval() {
        assert_eq!(Outcome::new(0.0).unwrap().value(), 0.0);
        assert_eq!(Outcome::new(1.0).unwrap().value(), 1.0);
        assert_eq!(Outcome::new(0.25).unwrap().complement(), 0.75);
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        for v in [1.5, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Outcome::new(v),
                Err(RouterError::InvalidOutcome { .. })
            ));
        }
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<Outcome>("0.4").is_ok());
        assert!(serde_json::from_str::<Outcome>("1.5").is_err());
    }

    #[test]
    fn bool_maps_to_binary_reward() {
        assert_eq!(Outcome::from(true), Outcome::success());
        assert_eq!(Outcome::from(false).value(), 0.0);
    }
}
