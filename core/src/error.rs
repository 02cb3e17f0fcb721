use crate::types::Percent;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GaugeError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Probability {value} outside [{min}, {max}]")]
    ProbabilityOutOfRange { value: Percent, min: Percent, max: Percent },

    #[error("Unknown input field '{name}'")]
    UnknownField { name: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GaugeResult<T> = Result<T, GaugeError>;
