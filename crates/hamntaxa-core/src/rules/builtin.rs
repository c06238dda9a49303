use crate::error::TariffError;
use crate::rules::{parse_dataset, TariffDatabase};

const GOTHENBURG_2025_JSON: &str = include_str!("../../../../rules/gothenburg-2025.json");

/// Available predefined tariff datasets.
pub const PRESETS: &[&str] = &["gothenburg-2025"];

pub const DEFAULT_PRESET: &str = "gothenburg-2025";

/// Load a predefined tariff dataset by name.
pub fn load_preset(name: &str) -> Result<TariffDatabase, TariffError> {
    match name {
        "gothenburg-2025" => parse_dataset(GOTHENBURG_2025_JSON),
        _ => Err(TariffError::DatasetInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
