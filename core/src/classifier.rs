//! Risk classifier: probability → category, display style and pie share.
//!
//! One partition serves both the label and the pie chart:
//!   p < 30        Safe
//!   30 ≤ p ≤ 60   Warning
//!   p > 60        Critical

use crate::types::{Percent, RiskProbability};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Probabilities strictly above this are Critical.
pub const CRITICAL_ABOVE: Percent = 60;

/// Probabilities at or above this (and not Critical) are Warning.
pub const WARNING_FROM: Percent = 30;

// ── Colors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// "#RRGGBB", upper-case.
    pub fn hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub const RED:    Rgb = Rgb::new(0xF4, 0x43, 0x36);
pub const YELLOW: Rgb = Rgb::new(0xFF, 0xC1, 0x07);
pub const GREEN:  Rgb = Rgb::new(0x4C, 0xAF, 0x50);
pub const WHITE:  Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
pub const BLACK:  Rgb = Rgb::new(0x00, 0x00, 0x00);

// ── Category ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Safe,
    Warning,
    Critical,
}

impl RiskCategory {
    /// Pie-chart segment order.
    pub const ALL: [RiskCategory; 3] = [RiskCategory::Safe, RiskCategory::Warning, RiskCategory::Critical];

    pub fn from_percent(p: Percent) -> Self {
        if p > CRITICAL_ABOVE {
            RiskCategory::Critical
        } else if p >= WARNING_FROM {
            RiskCategory::Warning
        } else {
            RiskCategory::Safe
        }
    }

    pub fn from_probability(p: RiskProbability) -> Self {
        Self::from_percent(p.get())
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::Safe     => "安全 (Safe)",
            RiskCategory::Warning  => "警告 (Warning)",
            RiskCategory::Critical => "危險 (Critical)",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            RiskCategory::Safe     => GREEN,
            RiskCategory::Warning  => YELLOW,
            RiskCategory::Critical => RED,
        }
    }

    /// Label text must stay readable on the category color.
    pub fn text_color(self) -> Rgb {
        match self {
            RiskCategory::Critical => WHITE,
            RiskCategory::Safe | RiskCategory::Warning => BLACK,
        }
    }

    /// Theme variable the host stylesheet binds to `color()`.
    pub fn theme_token(self) -> &'static str {
        match self {
            RiskCategory::Safe     => "--risk-safe",
            RiskCategory::Warning  => "--risk-warning",
            RiskCategory::Critical => "--risk-critical",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskCategory::Safe     => "safe",
            RiskCategory::Warning  => "warning",
            RiskCategory::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Classification ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub probability: RiskProbability,
    pub category:    RiskCategory,
    pub label:       &'static str,
    pub color:       Rgb,
    pub text_color:  Rgb,
    pub theme_token: &'static str,
}

pub fn classify(probability: RiskProbability) -> Classification {
    let category = RiskCategory::from_probability(probability);
    Classification {
        probability,
        category,
        label:       category.label(),
        color:       category.color(),
        text_color:  category.text_color(),
        theme_token: category.theme_token(),
    }
}

// ── Pie distribution ─────────────────────────────────────────────────────────

/// Share of the pie per category. One-hot: the current category holds
/// 100, the other two hold 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieDistribution {
    pub safe:     Percent,
    pub warning:  Percent,
    pub critical: Percent,
}

impl PieDistribution {
    pub fn for_category(category: RiskCategory) -> Self {
        let share = |c: RiskCategory| if c == category { 100 } else { 0 };
        Self {
            safe:     share(RiskCategory::Safe),
            warning:  share(RiskCategory::Warning),
            critical: share(RiskCategory::Critical),
        }
    }

    pub fn for_probability(probability: RiskProbability) -> Self {
        Self::for_category(RiskCategory::from_probability(probability))
    }

    pub fn share(&self, category: RiskCategory) -> Percent {
        match category {
            RiskCategory::Safe     => self.safe,
            RiskCategory::Warning  => self.warning,
            RiskCategory::Critical => self.critical,
        }
    }

    /// (Safe%, Warning%, Critical%)
    pub fn as_tuple(&self) -> (Percent, Percent, Percent) {
        (self.safe, self.warning, self.critical)
    }

    pub fn total(&self) -> u16 {
        self.safe as u16 + self.warning as u16 + self.critical as u16
    }

    pub fn percent_text(&self, category: RiskCategory) -> String {
        format!("{}%", self.share(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_render_as_hex() {
        assert_eq!(RED.hex(), "#F44336");
        assert_eq!(YELLOW.hex(), "#FFC107");
        assert_eq!(GREEN.hex(), "#4CAF50");
        assert_eq!(serde_json::to_string(&WHITE).unwrap(), "\"#FFFFFF\"");
    }

    #[test]
    fn partition_edges() {
        assert_eq!(RiskCategory::from_percent(29), RiskCategory::Safe);
        assert_eq!(RiskCategory::from_percent(30), RiskCategory::Warning);
        assert_eq!(RiskCategory::from_percent(60), RiskCategory::Warning);
        assert_eq!(RiskCategory::from_percent(61), RiskCategory::Critical);
    }

    #[test]
    fn percent_text_per_segment() {
        let pie = PieDistribution::for_category(RiskCategory::Warning);
        assert_eq!(pie.percent_text(RiskCategory::Warning), "100%");
        assert_eq!(pie.percent_text(RiskCategory::Safe), "0%");
        assert_eq!(pie.as_tuple(), (0, 100, 0));
    }
}
