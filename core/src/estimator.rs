//! Risk estimator: fixed-weight linear churn formula.
//!
//! raw = BASE_RISK
//!     + (days / DAYS_WINDOW) * DAYS_WINDOW_WEIGHT
//!     + frequency adjustment   (-10 above 4 visits, +10 below 2)
//!     + spending adjustment    (-5 above 150)
//!
//! The result is rounded half-up, then clamped to [5, 99].
//! The weights are fixed; nothing here is configurable.

use crate::{metrics::Metrics, types::RiskProbability};
use serde::{Deserialize, Serialize};

/// Baseline churn rate, percent.
pub const BASE_RISK: f64 = 25.8;

/// A full window of inactivity (days) adds DAYS_WINDOW_WEIGHT points.
pub const DAYS_WINDOW: f64 = 30.0;
pub const DAYS_WINDOW_WEIGHT: f64 = 40.0;

pub const HIGH_FREQUENCY_ABOVE: f64 = 4.0;
pub const LOW_FREQUENCY_BELOW: f64 = 2.0;
pub const FREQUENCY_ADJUSTMENT: f64 = 10.0;

pub const HIGH_SPENDING_ABOVE: f64 = 150.0;
pub const HIGH_SPENDING_DISCOUNT: f64 = 5.0;

/// Named components of a single estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub base:             f64,
    pub days_factor:      f64,
    pub frequency_factor: f64,
    pub spending_factor:  f64,
    /// Unrounded sum of the components.
    pub raw:              f64,
    pub probability:      RiskProbability,
}

/// Estimate from plain numbers. NaN inputs count as 0.
pub fn estimate(days: f64, spending: f64, frequency: f64) -> RiskProbability {
    estimate_metrics(&Metrics::new(days, spending, frequency))
}

pub fn estimate_metrics(metrics: &Metrics) -> RiskProbability {
    breakdown(metrics).probability
}

pub fn breakdown(metrics: &Metrics) -> RiskBreakdown {
    let base = BASE_RISK;
    let days_factor = (metrics.days / DAYS_WINDOW) * DAYS_WINDOW_WEIGHT;
    let frequency_factor = frequency_adjustment(metrics.frequency);
    let spending_factor = spending_adjustment(metrics.spending);

    let raw = base + days_factor + frequency_factor + spending_factor;
    let probability = RiskProbability::clamped(round_half_up(raw));

    RiskBreakdown {
        base,
        days_factor,
        frequency_factor,
        spending_factor,
        raw,
        probability,
    }
}

fn frequency_adjustment(frequency: f64) -> f64 {
    if frequency > HIGH_FREQUENCY_ABOVE {
        -FREQUENCY_ADJUSTMENT
    } else if frequency < LOW_FREQUENCY_BELOW {
        FREQUENCY_ADJUSTMENT
    } else {
        0.0
    }
}

fn spending_adjustment(spending: f64) -> f64 {
    if spending > HIGH_SPENDING_ABOVE {
        -HIGH_SPENDING_DISCOUNT
    } else {
        0.0
    }
}

/// Round to the nearest integer; exact halves go toward +∞
/// (so -2.5 → -2, 2.5 → 3).
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
