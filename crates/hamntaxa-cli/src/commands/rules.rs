use hamntaxa_core::model::TariffComponent;
use hamntaxa_core::rules::builtin;
use hamntaxa_core::rules::schema::{AdjustmentKind, ChargingBasis};
use hamntaxa_core::{load_dataset, TariffError};
use std::path::Path;

pub fn list() -> Result<(), TariffError> {
    println!("Available predefined tariff datasets:\n");
    for name in builtin::PRESETS {
        let db = builtin::load_preset(name)?;
        println!(
            "  {:<18} {} (v{})",
            name,
            db.port_name(),
            db.version()
        );
        println!(
            "                     {} rules, {} of {} components covered",
            db.rule_count(),
            db.components_covered().count(),
            TariffComponent::ALL.len()
        );
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), TariffError> {
    let db = builtin::load_preset(preset)?;

    println!(
        "{} tariff, version {} (currency {})\n",
        db.port_name(),
        db.version(),
        db.currency()
    );
    println!(
        "{} rules across {} components. For each component the first rule",
        db.rule_count(),
        db.components_covered().count()
    );
    println!("whose vessel-type filter and conditions match a call is priced;");
    println!("lower priority values win.\n");

    for component in TariffComponent::ALL {
        let rules: Vec<_> = db.rules_for_component(component).collect();
        if rules.is_empty() {
            continue;
        }
        println!("{component}:");
        for rule in rules {
            let vessels = match &rule.vessel_types {
                None => "any vessel type".to_string(),
                Some(list) => list
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            };
            println!("  {} (priority {}, {})", rule.id, rule.priority, vessels);
            if let Some(desc) = &rule.description {
                println!("    {desc}");
            }
            for cond in &rule.conditions {
                println!("    when {cond}");
            }
            let basis = match rule.basis {
                ChargingBasis::PerCall => "per call".to_string(),
                ChargingBasis::PerUnit(field) => format!("per unit of {field}"),
            };
            match rule.band_key {
                Some(key) => println!("    {basis}, banded on {key}:"),
                None => println!("    {basis}:"),
            }
            for band in &rule.bands {
                let interval = match band.upper {
                    Some(upper) => format!("[{}, {})", band.lower, upper),
                    None => format!("[{}, ...)", band.lower),
                };
                print!("      {:<18} {:>10}", interval, band.rate.to_string());
                if let Some(min) = band.min_charge {
                    print!("  min {min}");
                }
                if let Some(max) = band.max_charge {
                    print!("  max {max}");
                }
                println!();
            }
            for adj in &rule.adjustments {
                let kind = match adj.kind {
                    AdjustmentKind::Flat => "flat",
                    AdjustmentKind::PerUnit => "per unit",
                };
                let label = adj
                    .description
                    .as_deref()
                    .unwrap_or("adjustment");
                print!("    adjustment: {label} ({} {kind})", adj.amount);
                if !adj.when.is_empty() {
                    let when = adj
                        .when
                        .iter()
                        .map(|c| c.to_string())
                        .collect::<Vec<_>>()
                        .join(" and ");
                    print!(" when {when}");
                }
                println!();
            }
            println!();
        }
    }

    let uncovered: Vec<String> = TariffComponent::ALL
        .iter()
        .filter(|c| db.rules_for_component(**c).next().is_none())
        .map(|c| c.to_string())
        .collect();
    if !uncovered.is_empty() {
        println!(
            "Components without rules report \"not applicable\": {}.",
            uncovered.join(", ")
        );
    }

    Ok(())
}

pub fn schema() -> Result<(), TariffError> {
    print!(
        r#"JSON Dataset Schema
===================

A dataset file defines the tariff rules for one port and year. When you
run `hamntaxa calculate`, every known component is evaluated against
these rules and priced into one line item each.

Top-level fields:
  version       (string, optional)  Tariff year or revision (default "2025")
  port_name     (string, optional)  Port the tariff belongs to
  currency      (string, optional)  Currency code (default "SEK")
  rules         (array, required)   List of tariff rules (see below)

Each rule in the "rules" array:
  id            (string, required)  Stable unique identifier. Line items
                                    reference it.
  component     (string, required)  One of the closed component names,
                                    e.g. "port_infrastructure_dues",
                                    "sludge_oily_bilge_water".
  vessel_types  (array, optional)   Vessel types the rule applies to.
                                    Omit the field to apply to any type.
  priority      (number, required)  Lower value wins when several rules
                                    match the same call. Two rules with
                                    equal priority must be provably
                                    mutually exclusive or the dataset is
                                    rejected at load time.
  conditions    (array, optional)   Predicates combined with AND. Each is
                                    {{ "field": ..., "op": ..., "value": ... }}
                                    with ops eq, ne, gt, gte, lt, lte, in,
                                    not_in. An entry may instead be an
                                    {{ "any_of": [...] }} group of
                                    alternatives.
  basis         (required)          "per_call", or
                                    {{ "per_unit": "<numeric field>" }}.
  band_key      (string, optional)  Numeric field keying the bands.
                                    Required when there is more than one
                                    band; a keyless rule has a single
                                    band spanning [0, unbounded).
  bands         (array, required)   Ordered half-open [lower, upper)
                                    tiers, contiguous, ascending. Leave
                                    "upper" unset on the last band for an
                                    unbounded tail. Each band carries
                                    "rate" and optional "min_charge" /
                                    "max_charge".
  adjustments   (array, optional)   Conditional discounts or surcharges:
                                    {{ "when": [...], "kind": "flat" |
                                    "per_unit", "amount": ...,
                                    "description": ... }}. Negative
                                    amounts are discounts; "per_unit"
                                    multiplies by the charged quantity.
                                    Adjustments apply additively after
                                    min/max clamping, in dataset order.
  description   (string, optional)  Human-readable summary.
  notes         (string, optional)  Regulatory reference or caveat.

Example:
{{
  "version": "2025",
  "port_name": "Port of Gothenburg",
  "currency": "SEK",
  "rules": [
    {{
      "id": "pid-tankers",
      "component": "port_infrastructure_dues",
      "vessel_types": ["tankers"],
      "priority": 10,
      "basis": {{ "per_unit": "gross_tonnage" }},
      "band_key": "gross_tonnage",
      "bands": [
        {{ "lower": "0", "upper": "2300", "rate": "2.85" }},
        {{ "lower": "2300", "rate": "3.04" }}
      ],
      "adjustments": [
        {{
          "when": [ {{ "field": "esi_score", "op": "gte", "value": "30" }} ],
          "kind": "per_unit",
          "amount": "-0.30",
          "description": "ESI 30+ environmental discount"
        }}
      ]
    }}
  ]
}}

Note: rates, bounds and condition thresholds must be quoted strings, not
bare numbers, to preserve exact decimal precision ("2.85" not 2.85).
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), TariffError> {
    let db = load_dataset(file)?;

    println!(
        "Dataset '{}' (v{}) is valid.",
        db.port_name(),
        db.version()
    );
    println!("  Currency: {}", db.currency());
    println!("  Rules: {}", db.rule_count());
    println!(
        "  Components covered: {} of {}",
        db.components_covered().count(),
        TariffComponent::ALL.len()
    );

    // Check for potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    for component in TariffComponent::ALL {
        if db.rules_for_component(component).next().is_none() {
            warnings.push(format!(
                "component '{component}' has no rules and will always report not applicable"
            ));
        }
    }
    for rule in db.rules() {
        for adj in &rule.adjustments {
            if adj.when.is_empty() {
                warnings.push(format!(
                    "rule '{}' has an unconditional adjustment; consider folding it into the rate",
                    rule.id
                ));
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {w}");
        }
    }

    Ok(())
}
