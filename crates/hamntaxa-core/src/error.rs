use crate::model::TariffComponent;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TariffError {
    #[error("failed to load tariff dataset from {}: {reason}", path.display())]
    DatasetLoad { path: PathBuf, reason: String },

    #[error("invalid tariff dataset: {0}")]
    DatasetInvalid(String),

    #[error(
        "ambiguous tariff rules for {component}: '{first}' and '{second}' share priority {priority} and can match the same call"
    )]
    AmbiguousRules {
        component: TariffComponent,
        first: String,
        second: String,
        priority: u32,
    },

    #[error("invalid query: {field} {reason}")]
    InvalidQuery { field: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
