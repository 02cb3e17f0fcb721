//! Widget configuration: initial field values and which sinks to wire.
//!
//! The estimator weights and classifier thresholds are constants in
//! their own modules and are deliberately absent here.

use crate::{error::GaugeResult, widget::InputValues};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GaugeConfig {
    /// Field text shown when the widget first renders.
    #[serde(default = "default_initial")]
    pub initial: InputValues,
    /// Attach the pie chart sink.
    #[serde(default = "default_pie_chart")]
    pub pie_chart: bool,
}

fn default_initial() -> InputValues {
    InputValues::new("0", "0", "0")
}

fn default_pie_chart() -> bool {
    true
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            initial:   default_initial(),
            pie_chart: default_pie_chart(),
        }
    }
}

impl GaugeConfig {
    /// Load from a JSON file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {path}: {e}"))?;
        log::info!("config: loaded {path} (pie_chart={})", config.pie_chart);
        Ok(config)
    }

    pub fn from_json(content: &str) -> GaugeResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Readout only, no pie chart.
    pub fn without_chart(mut self) -> Self {
        self.pie_chart = false;
        self
    }
}
