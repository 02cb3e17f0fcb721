//! churn-risk-core: churn risk estimation and classification for the
//! risk gauge widget.
//!
//! Data flow, every input change:
//!   1. metrics     raw field text → coerced numbers
//!   2. estimator   numbers → RiskProbability in [5, 99]
//!   3. classifier  probability → category, colors, pie distribution
//!   4. widget      pushes the result into its presentation sinks
//!
//! Nothing here does I/O except `GaugeConfig::load`.

pub mod classifier;
pub mod command;
pub mod config;
pub mod error;
pub mod estimator;
pub mod metrics;
pub mod presentation;
pub mod snapshot;
pub mod types;
pub mod widget;
