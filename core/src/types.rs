//! Shared primitive types used across the gauge.

use crate::error::GaugeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A whole percentage, 0–100.
pub type Percent = u8;

/// Lowest probability the estimator ever reports.
pub const MIN_PROBABILITY: Percent = 5;

/// Highest probability the estimator ever reports.
pub const MAX_PROBABILITY: Percent = 99;

/// Churn risk as a whole percentage. Always within
/// [MIN_PROBABILITY, MAX_PROBABILITY].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RiskProbability(Percent);

impl RiskProbability {
    pub const MIN: RiskProbability = RiskProbability(MIN_PROBABILITY);
    pub const MAX: RiskProbability = RiskProbability(MAX_PROBABILITY);

    /// Returns None when `value` is outside the reportable range.
    pub fn new(value: Percent) -> Option<Self> {
        (MIN_PROBABILITY..=MAX_PROBABILITY)
            .contains(&value)
            .then_some(Self(value))
    }

    /// Clamp an already-rounded percentage into range.
    /// NaN never reaches here from the estimator; it maps to the floor.
    pub fn clamped(rounded: f64) -> Self {
        let clamped = rounded.clamp(MIN_PROBABILITY as f64, MAX_PROBABILITY as f64);
        if clamped.is_nan() {
            Self::MIN
        } else {
            Self(clamped as Percent)
        }
    }

    pub fn get(self) -> Percent {
        self.0
    }

    /// "<p>%", as shown in the readout.
    pub fn as_text(self) -> String {
        self.to_string()
    }
}

impl TryFrom<u8> for RiskProbability {
    type Error = GaugeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(GaugeError::ProbabilityOutOfRange {
            value,
            min: MIN_PROBABILITY,
            max: MAX_PROBABILITY,
        })
    }
}

impl From<RiskProbability> for u8 {
    fn from(p: RiskProbability) -> u8 {
        p.0
    }
}

impl fmt::Display for RiskProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_values_outside_range() {
        assert!(RiskProbability::new(4).is_none());
        assert!(RiskProbability::new(100).is_none());
        assert_eq!(RiskProbability::new(5), Some(RiskProbability::MIN));
        assert_eq!(RiskProbability::new(99), Some(RiskProbability::MAX));
    }

    #[test]
    fn clamped_saturates_at_both_ends() {
        assert_eq!(RiskProbability::clamped(-40.0).get(), 5);
        assert_eq!(RiskProbability::clamped(f64::INFINITY).get(), 99);
        assert_eq!(RiskProbability::clamped(f64::NEG_INFINITY).get(), 5);
        assert_eq!(RiskProbability::clamped(f64::NAN).get(), 5);
        assert_eq!(RiskProbability::clamped(66.0).get(), 66);
    }

    #[test]
    fn displays_with_percent_sign() {
        assert_eq!(RiskProbability::clamped(66.0).as_text(), "66%");
    }

    #[test]
    fn deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<RiskProbability>("42").is_ok());
        assert!(serde_json::from_str::<RiskProbability>("3").is_err());
    }
}
