//! Widget state as the host sees it: current field text, what each
//! sink last rendered, and the estimate behind it.

use crate::{
    estimator::RiskBreakdown,
    metrics::Metrics,
    presentation::{PieChart, PieRender, Readout, TextPanel},
    widget::{InputValues, RiskWidget},
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSnapshot {
    pub inputs:    InputValues,
    pub metrics:   Metrics,
    pub breakdown: RiskBreakdown,
    pub readout:   Option<Readout>,
    /// None when no pie chart is attached.
    pub pie:       Option<PieRender>,
}

impl RiskWidget<TextPanel, PieChart> {
    pub fn snapshot(&self) -> WidgetSnapshot {
        let evaluation = self.evaluate();
        WidgetSnapshot {
            inputs:    self.inputs().clone(),
            metrics:   evaluation.metrics,
            breakdown: evaluation.breakdown,
            readout:   self.text_sink().last().cloned(),
            pie:       self.chart().and_then(|c| c.last().cloned()),
        }
    }
}
