use hamntaxa_core::rules::builtin;
use hamntaxa_core::{compute_total, load_dataset, QueryParameters, TariffDatabase, TariffError};
use std::path::PathBuf;

use crate::output;

pub fn run(
    query_file: PathBuf,
    rules: Option<PathBuf>,
    preset: Option<String>,
    output_format: &str,
    out: Option<PathBuf>,
    verbose: bool,
) -> Result<(), TariffError> {
    let database: TariffDatabase = match (rules, preset) {
        (Some(path), _) => load_dataset(&path)?,
        (None, Some(name)) => builtin::load_preset(&name)?,
        (None, None) => builtin::load_preset(builtin::DEFAULT_PRESET)?,
    };

    let json_bytes = std::fs::read(&query_file)?;
    let query: QueryParameters = serde_json::from_slice(&json_bytes)?;

    let result = compute_total(&query, &database)?;

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print(&result, &database, verbose),
    }

    if let Some(path) = out {
        std::fs::write(&path, serde_json::to_string_pretty(&result)?)?;
    }

    Ok(())
}
