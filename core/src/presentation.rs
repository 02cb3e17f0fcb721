//! Presentation sinks.
//!
//! RULE: sinks only receive rendered values. They never call back into
//! the estimator or classifier, and the widget never reads them to
//! compute anything.

use crate::{
    classifier::{Classification, PieDistribution, RiskCategory, Rgb},
    types::Percent,
};
use serde::Serialize;

// ── Rendered values ──────────────────────────────────────────────────────────

/// What the numeric readout and the risk label display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readout {
    /// "<p>%"
    pub probability_text: String,
    pub label:            &'static str,
    /// Readout text color and label background.
    pub color:            Rgb,
    /// Label foreground.
    pub text_color:       Rgb,
    pub theme_token:      &'static str,
    pub category:         RiskCategory,
}

impl Readout {
    pub fn from_classification(c: &Classification) -> Self {
        Self {
            probability_text: c.probability.as_text(),
            label:            c.label,
            color:            c.color,
            text_color:       c.text_color,
            theme_token:      c.theme_token,
            category:         c.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub category:     RiskCategory,
    pub label:        &'static str,
    pub percent:      Percent,
    pub percent_text: String,
    pub color:        Rgb,
}

/// The three pie segments, in Safe, Warning, Critical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieRender {
    pub slices: Vec<PieSlice>,
}

impl PieRender {
    pub fn from_distribution(pie: &PieDistribution) -> Self {
        let slices = RiskCategory::ALL
            .iter()
            .map(|&category| PieSlice {
                category,
                label:        category.label(),
                percent:      pie.share(category),
                percent_text: pie.percent_text(category),
                color:        category.color(),
            })
            .collect();
        Self { slices }
    }

    pub fn percentages(&self) -> Vec<Percent> {
        self.slices.iter().map(|s| s.percent).collect()
    }

    pub fn slice(&self, category: RiskCategory) -> Option<&PieSlice> {
        self.slices.iter().find(|s| s.category == category)
    }
}

// ── Sink contracts ───────────────────────────────────────────────────────────

/// Receives the numeric readout and label on every evaluation.
pub trait ReadoutSink {
    fn render(&mut self, readout: &Readout);
}

/// Receives the pie chart segments on every evaluation.
pub trait PieChartSink {
    fn render(&mut self, chart: &PieRender);
}

// ── Retained sinks ───────────────────────────────────────────────────────────

/// Readout sink that keeps the last rendered value, the way a text
/// element keeps its content.
#[derive(Debug, Default)]
pub struct TextPanel {
    last:    Option<Readout>,
    renders: u64,
}

impl TextPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Readout> {
        self.last.as_ref()
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }
}

impl ReadoutSink for TextPanel {
    fn render(&mut self, readout: &Readout) {
        self.last = Some(readout.clone());
        self.renders += 1;
    }
}

/// Pie chart sink that keeps the last rendered segments.
#[derive(Debug, Default)]
pub struct PieChart {
    last:    Option<PieRender>,
    renders: u64,
}

impl PieChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&PieRender> {
        self.last.as_ref()
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }
}

impl PieChartSink for PieChart {
    fn render(&mut self, chart: &PieRender) {
        self.last = Some(chart.clone());
        self.renders += 1;
    }
}

impl<S: ReadoutSink + ?Sized> ReadoutSink for Box<S> {
    fn render(&mut self, readout: &Readout) {
        (**self).render(readout)
    }
}

impl<S: PieChartSink + ?Sized> PieChartSink for Box<S> {
    fn render(&mut self, chart: &PieRender) {
        (**self).render(chart)
    }
}
