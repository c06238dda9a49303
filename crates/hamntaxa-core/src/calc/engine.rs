use crate::calc::component;
use crate::calc::outcome::{CalculationResult, LineItem};
use crate::error::TariffError;
use crate::model::{QueryParameters, TariffComponent};
use crate::rules::TariffDatabase;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Compute the full itemized tariff for one call: one line item per known
/// component (applicable or not), totalled over the applicable ones.
///
/// Components are mutually independent, so evaluation order cannot change
/// the result; line items are keyed by component, not by arrival order.
pub fn compute_total(
    query: &QueryParameters,
    database: &TariffDatabase,
) -> Result<CalculationResult, TariffError> {
    validate_query(query)?;

    let mut line_items: BTreeMap<TariffComponent, LineItem> = BTreeMap::new();
    for comp in TariffComponent::ALL {
        let item = component::calculate(comp, query, database);
        line_items.insert(comp, item);
    }

    let total: Decimal = line_items.values().filter_map(LineItem::amount).sum();
    tracing::debug!(
        vessel_type = %query.vessel_type,
        applicable = line_items.values().filter(|i| i.is_applicable()).count(),
        %total,
        "tariff computed"
    );

    Ok(CalculationResult {
        line_items,
        total,
        currency: database.currency().to_string(),
    })
}

/// Reject structurally invalid queries before any rule is consulted.
/// Enumerations are already closed at the type level; what remains is
/// sign-checking the measurable quantities.
fn validate_query(query: &QueryParameters) -> Result<(), TariffError> {
    let checks: [(&'static str, Option<Decimal>); 11] = [
        ("gross_tonnage", query.vessel_details.gross_tonnage),
        ("deadweight_tonnage", query.vessel_details.deadweight_tonnage),
        ("length_overall_m", query.vessel_details.length_overall_m),
        ("sludge_volume_m3", query.quantities.sludge_volume_m3),
        (
            "solid_waste_volume_m3",
            query.quantities.solid_waste_volume_m3,
        ),
        ("fresh_water_m3", query.quantities.fresh_water_m3),
        ("rinsing_water_tons", query.quantities.rinsing_water_tons),
        ("black_grey_water_m3", query.quantities.black_grey_water_m3),
        ("cargo_tonnage_tons", query.quantities.cargo_tonnage_tons),
        ("esi_score", query.environmental.esi_score),
        (
            "fossil_free_fuel_share",
            query.environmental.fossil_free_fuel_share,
        ),
    ];

    for (field, value) in checks {
        if let Some(v) = value {
            if v < Decimal::ZERO {
                return Err(TariffError::InvalidQuery {
                    field,
                    reason: format!("must be non-negative, got {v}"),
                });
            }
        }
    }

    Ok(())
}
