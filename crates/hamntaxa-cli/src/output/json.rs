use hamntaxa_core::{CalculationResult, TariffError};

pub fn print(result: &CalculationResult) -> Result<(), TariffError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
