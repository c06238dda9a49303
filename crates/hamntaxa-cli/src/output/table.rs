use hamntaxa_core::{CalculationResult, LineOutcome, TariffDatabase};

pub fn print(result: &CalculationResult, database: &TariffDatabase, verbose: bool) {
    println!(
        "{} tariff, version {} ({})\n",
        database.port_name(),
        database.version(),
        result.currency
    );

    let max_name = result
        .line_items
        .keys()
        .map(|c| c.to_string().len())
        .max()
        .unwrap_or(20);

    for (component, item) in &result.line_items {
        let name = component.to_string();
        match &item.outcome {
            LineOutcome::Charged(charge) => {
                println!(
                    "  {:<width$}  {:>12}",
                    name,
                    format!("{:.2}", charge.amount),
                    width = max_name
                );
                if verbose {
                    println!(
                        "    rule {}: band {} @ {} x {}",
                        charge.rule_id, charge.band, charge.band.rate, charge.quantity
                    );
                    if let Some(rule) = database
                        .rules()
                        .iter()
                        .find(|r| r.id == charge.rule_id)
                    {
                        if let Some(desc) = &rule.description {
                            println!("    {desc}");
                        }
                    }
                }
                for adj in &charge.adjustments {
                    println!(
                        "    {:<width$}  {:>12}  {}",
                        "",
                        format!("{:.2}", adj.delta),
                        adj.description,
                        width = max_name - 2
                    );
                }
            }
            LineOutcome::NotApplicable { reason } => {
                println!(
                    "  {:<width$}  {:>12}  {}",
                    name,
                    "-",
                    reason,
                    width = max_name
                );
            }
        }
    }

    println!();
    println!(
        "  {:<width$}  {:>12} {}",
        "Total",
        format!("{:.2}", result.total),
        result.currency,
        width = max_name
    );
}
