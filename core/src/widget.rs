//! The risk widget: owns the input values and its presentation sinks.
//!
//! RULES:
//!   - Every input change recomputes from scratch. Nothing is cached.
//!   - The widget renders once on construction so the default inputs
//!     are shown before the first change.
//!   - The pie chart is optional. Without one, only the readout renders.

use crate::{
    classifier::{classify, Classification, PieDistribution},
    config::GaugeConfig,
    estimator::{self, RiskBreakdown},
    metrics::{InputField, Metrics},
    presentation::{PieChart, PieChartSink, PieRender, Readout, ReadoutSink, TextPanel},
    types::RiskProbability,
};
use serde::{Deserialize, Serialize};

/// Raw text currently held by each input control.
/// An unbound control reads as empty text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputValues {
    pub days:      String,
    pub spending:  String,
    pub frequency: String,
}

impl InputValues {
    pub fn new(days: impl Into<String>, spending: impl Into<String>, frequency: impl Into<String>) -> Self {
        Self {
            days:      days.into(),
            spending:  spending.into(),
            frequency: frequency.into(),
        }
    }

    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::Days      => &self.days,
            InputField::Spending  => &self.spending,
            InputField::Frequency => &self.frequency,
        }
    }

    pub fn set(&mut self, field: InputField, value: impl Into<String>) {
        let slot = match field {
            InputField::Days      => &mut self.days,
            InputField::Spending  => &mut self.spending,
            InputField::Frequency => &mut self.frequency,
        };
        *slot = value.into();
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::from_text(&self.days, &self.spending, &self.frequency)
    }
}

/// Everything derived from one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub metrics:        Metrics,
    pub breakdown:      RiskBreakdown,
    pub classification: Classification,
    pub pie:            PieDistribution,
}

impl Evaluation {
    pub fn probability(&self) -> RiskProbability {
        self.breakdown.probability
    }
}

/// Estimate, classify and distribute. Pure.
pub fn evaluate(metrics: Metrics) -> Evaluation {
    let breakdown = estimator::breakdown(&metrics);
    let classification = classify(breakdown.probability);
    Evaluation {
        metrics,
        breakdown,
        classification,
        pie: PieDistribution::for_probability(breakdown.probability),
    }
}

pub struct RiskWidget<T: ReadoutSink = TextPanel, P: PieChartSink = PieChart> {
    inputs:   InputValues,
    defaults: InputValues,
    text:     T,
    chart:    Option<P>,
}

impl<T: ReadoutSink, P: PieChartSink> RiskWidget<T, P> {
    /// Build the widget and render the initial inputs.
    pub fn new(inputs: InputValues, text: T, chart: Option<P>) -> Self {
        let mut widget = Self {
            defaults: inputs.clone(),
            inputs,
            text,
            chart,
        };
        widget.refresh();
        widget
    }

    /// The input-change callback. Stores the new field text and
    /// re-renders.
    pub fn on_change(&mut self, field: InputField, value: &str) -> Evaluation {
        self.inputs.set(field, value);
        self.refresh()
    }

    /// Replace every field at once, then render once.
    pub fn set_all(&mut self, inputs: InputValues) -> Evaluation {
        self.inputs = inputs;
        self.refresh()
    }

    /// Restore the values the widget was built with.
    pub fn reset(&mut self) -> Evaluation {
        self.inputs = self.defaults.clone();
        self.refresh()
    }

    /// Recompute from the current inputs and push to the sinks.
    pub fn refresh(&mut self) -> Evaluation {
        let evaluation = self.evaluate();
        let b = &evaluation.breakdown;
        log::debug!(
            "widget: days={} spending={} frequency={} raw={:.2} -> {} ({})",
            evaluation.metrics.days,
            evaluation.metrics.spending,
            evaluation.metrics.frequency,
            b.raw,
            b.probability,
            evaluation.classification.category,
        );

        self.text.render(&Readout::from_classification(&evaluation.classification));
        if let Some(chart) = self.chart.as_mut() {
            chart.render(&PieRender::from_distribution(&evaluation.pie));
        }
        evaluation
    }

    /// Evaluate the current inputs without rendering.
    pub fn evaluate(&self) -> Evaluation {
        evaluate(self.inputs.metrics())
    }

    /// Attach a pie chart and render the current state into it.
    pub fn attach_chart(&mut self, mut chart: P) {
        chart.render(&PieRender::from_distribution(&self.evaluate().pie));
        self.chart = Some(chart);
    }

    pub fn detach_chart(&mut self) -> Option<P> {
        self.chart.take()
    }

    pub fn inputs(&self) -> &InputValues {
        &self.inputs
    }

    pub fn text_sink(&self) -> &T {
        &self.text
    }

    pub fn chart(&self) -> Option<&P> {
        self.chart.as_ref()
    }

    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }
}

impl RiskWidget<TextPanel, PieChart> {
    /// Widget with retained sinks, wired from config.
    pub fn from_config(config: &GaugeConfig) -> Self {
        let chart = config.pie_chart.then(PieChart::new);
        Self::new(config.initial.clone(), TextPanel::new(), chart)
    }
}
