//! Integration tests for compute_total() end-to-end over the builtin
//! Gothenburg preset.
//!
//! Exercises the full path: preset load and validation, vessel-type
//! pre-filtering, condition evaluation, band resolution, adjustments,
//! and aggregation into an itemized result.

use hamntaxa_core::model::{NumericField, Region};
use hamntaxa_core::rules::builtin::load_preset;
use hamntaxa_core::{
    compute_total, Charge, LineOutcome, NotApplicableReason, QueryParameters, TariffComponent,
    TariffError, VesselType,
};
use rust_decimal_macros::dec;

fn charge(
    result: &hamntaxa_core::CalculationResult,
    component: TariffComponent,
) -> &Charge {
    match &result.line_items[&component].outcome {
        LineOutcome::Charged(charge) => charge,
        LineOutcome::NotApplicable { reason } => {
            panic!("{component} should be charged, got not-applicable: {reason}")
        }
    }
}

fn reason(
    result: &hamntaxa_core::CalculationResult,
    component: TariffComponent,
) -> &NotApplicableReason {
    match &result.line_items[&component].outcome {
        LineOutcome::Charged(charge) => {
            panic!("{component} should be not-applicable, got charge {}", charge.amount)
        }
        LineOutcome::NotApplicable { reason } => reason,
    }
}

// ---------------------------------------------------------------------------
// Test 1: Tanker call with ESI discount, certificate sludge discount, and
// an uncovered component
// ---------------------------------------------------------------------------
#[test]
fn tanker_call_end_to_end() {
    let db = load_preset("gothenburg-2025").unwrap();

    let mut query = QueryParameters::new(VesselType::Tankers);
    query.vessel_details.gross_tonnage = Some(dec!(14000));
    query.call_context.arrival_region = Some(Region::Eu);
    query.environmental.esi_score = Some(dec!(30));
    query.environmental.waste_certificate = Some(true);
    query.quantities.sludge_volume_m3 = Some(dec!(15));

    let result = compute_total(&query, &db).unwrap();

    // Port dues: GT 14000 lands in the [2300, 15000) band at 3.04/GT,
    // ESI 30 qualifies for the -0.30/GT discount (inclusive threshold).
    let dues = charge(&result, TariffComponent::PortInfrastructureDues);
    assert_eq!(dues.rule_id, "pid-tankers");
    assert_eq!(dues.band.rate, dec!(3.04));
    assert_eq!(dues.adjustments.len(), 1);
    assert_eq!(dues.adjustments[0].delta, dec!(-4200.00));
    assert_eq!(dues.amount, dec!(38360.00));

    // Sludge: 0.17/GT base; certificate valid and sludge > 11 m3 fires
    // the -0.05/GT discount.
    let sludge = charge(&result, TariffComponent::SludgeOilyBilgeWater);
    assert_eq!(sludge.rule_id, "sludge-base");
    assert_eq!(sludge.base_amount, dec!(2380.00));
    assert_eq!(sludge.adjustments.len(), 1);
    assert_eq!(sludge.amount, dec!(1680.00));

    // Solid waste: EU arrival rate.
    let waste = charge(&result, TariffComponent::ShipGeneratedSolidWaste);
    assert_eq!(waste.rule_id, "solid-waste-eu");
    assert_eq!(waste.amount, dec!(4060.00));

    // ISPS: flat per-call fee.
    assert_eq!(
        charge(&result, TariffComponent::IspsFees).amount,
        dec!(950.00)
    );

    // Pilotage is not covered by the dataset; reported, not silently zero.
    assert_eq!(
        reason(&result, TariffComponent::Pilotage),
        &NotApplicableReason::NoRulesForComponent
    );

    // Passenger dues only cover cruise and RoPax vessels.
    assert_eq!(
        reason(&result, TariffComponent::PassengerDues),
        &NotApplicableReason::VesselTypeExcluded(VesselType::Tankers)
    );

    assert_eq!(result.total, dec!(45050.00));
    assert_eq!(result.currency, "SEK");
}

// ---------------------------------------------------------------------------
// Test 2: Exactly one line item per known component; total is the sum of
// the applicable amounts
// ---------------------------------------------------------------------------
#[test]
fn one_line_item_per_component_and_total_is_sum() {
    let db = load_preset("gothenburg-2025").unwrap();

    let mut query = QueryParameters::new(VesselType::Tankers);
    query.vessel_details.gross_tonnage = Some(dec!(8000));
    let result = compute_total(&query, &db).unwrap();

    assert_eq!(result.line_items.len(), TariffComponent::ALL.len());
    for comp in TariffComponent::ALL {
        assert!(result.line_items.contains_key(&comp));
    }

    let sum = result
        .line_items
        .values()
        .filter_map(|item| item.amount())
        .sum::<rust_decimal::Decimal>();
    assert_eq!(result.total, sum);
}

// ---------------------------------------------------------------------------
// Test 3: Band boundaries are half-open; the boundary value belongs to the
// higher band
// ---------------------------------------------------------------------------
#[test]
fn band_boundaries_are_half_open() {
    let db = load_preset("gothenburg-2025").unwrap();

    let rate_for = |gt| {
        let mut query = QueryParameters::new(VesselType::Tankers);
        query.vessel_details.gross_tonnage = Some(gt);
        let result = compute_total(&query, &db).unwrap();
        charge(&result, TariffComponent::PortInfrastructureDues)
            .band
            .rate
    };

    assert_eq!(rate_for(dec!(2299.99)), dec!(2.85));
    assert_eq!(rate_for(dec!(2300)), dec!(3.04));
    assert_eq!(rate_for(dec!(14999.99)), dec!(3.04));
    assert_eq!(rate_for(dec!(15000)), dec!(3.22));
}

// ---------------------------------------------------------------------------
// Test 4: Arrival region selects between equal-priority solid waste rules;
// an unstated region falls through to the lower-priority base rule
// ---------------------------------------------------------------------------
#[test]
fn arrival_region_differentiates_solid_waste() {
    let db = load_preset("gothenburg-2025").unwrap();

    let mut query = QueryParameters::new(VesselType::Tankers);
    query.vessel_details.gross_tonnage = Some(dec!(10000));

    query.call_context.arrival_region = Some(Region::Eu);
    let eu = compute_total(&query, &db).unwrap();
    let eu_waste = charge(&eu, TariffComponent::ShipGeneratedSolidWaste);
    assert_eq!(eu_waste.rule_id, "solid-waste-eu");
    assert_eq!(eu_waste.amount, dec!(2900.00));

    query.call_context.arrival_region = Some(Region::NonEu);
    let non_eu = compute_total(&query, &db).unwrap();
    let non_eu_waste = charge(&non_eu, TariffComponent::ShipGeneratedSolidWaste);
    assert_eq!(non_eu_waste.rule_id, "solid-waste-non-eu");
    assert_eq!(non_eu_waste.amount, dec!(4400.00));

    query.call_context.arrival_region = None;
    let unknown = compute_total(&query, &db).unwrap();
    let fallback = charge(&unknown, TariffComponent::ShipGeneratedSolidWaste);
    assert_eq!(fallback.rule_id, "solid-waste-base");
    assert_eq!(fallback.amount, dec!(2900.00));
}

// ---------------------------------------------------------------------------
// Test 5: Cruise call — vessel-specific ISPS rule outranks the general one,
// passenger dues are per head
// ---------------------------------------------------------------------------
#[test]
fn cruise_call_uses_specific_rules() {
    let db = load_preset("gothenburg-2025").unwrap();

    let mut query = QueryParameters::new(VesselType::CruiseVessels);
    query.vessel_details.gross_tonnage = Some(dec!(50000));
    query.vessel_details.passengers = Some(2000);

    let result = compute_total(&query, &db).unwrap();

    let isps = charge(&result, TariffComponent::IspsFees);
    assert_eq!(isps.rule_id, "isps-cruise");
    assert_eq!(isps.amount, dec!(4500.00));

    let passengers = charge(&result, TariffComponent::PassengerDues);
    assert_eq!(passengers.quantity, dec!(2000));
    assert_eq!(passengers.amount, dec!(43000.00));

    let dues = charge(&result, TariffComponent::PortInfrastructureDues);
    assert_eq!(dues.rule_id, "pid-cruise");
    assert_eq!(dues.amount, dec!(122500.00));
}

// ---------------------------------------------------------------------------
// Test 6: Lay-up dues band on days laid up while charging per GT
// ---------------------------------------------------------------------------
#[test]
fn lay_up_rate_drops_from_day_thirty() {
    let db = load_preset("gothenburg-2025").unwrap();

    let mut query = QueryParameters::new(VesselType::Tankers);
    query.vessel_details.gross_tonnage = Some(dec!(14000));

    query.call_context.layup_days = Some(10);
    let short = compute_total(&query, &db).unwrap();
    assert_eq!(
        charge(&short, TariffComponent::LayUpDues).amount,
        dec!(6440.00)
    );

    query.call_context.layup_days = Some(45);
    let long = compute_total(&query, &db).unwrap();
    let lay_up = charge(&long, TariffComponent::LayUpDues);
    assert_eq!(lay_up.band.rate, dec!(0.35));
    assert_eq!(lay_up.amount, dec!(4900.00));

    // No lay-up declared: the qualifying condition fails, nothing charged.
    query.call_context.layup_days = None;
    let none = compute_total(&query, &db).unwrap();
    assert_eq!(
        reason(&none, TariffComponent::LayUpDues),
        &NotApplicableReason::ConditionsNotMet
    );
}

// ---------------------------------------------------------------------------
// Test 7: Yacht call is priced per call, no tonnage needed
// ---------------------------------------------------------------------------
#[test]
fn yacht_flat_call_charge_without_tonnage() {
    let db = load_preset("gothenburg-2025").unwrap();

    let query = QueryParameters::new(VesselType::Yachts);
    let result = compute_total(&query, &db).unwrap();

    let dues = charge(&result, TariffComponent::PortInfrastructureDues);
    assert_eq!(dues.rule_id, "pid-yachts");
    assert_eq!(dues.quantity, dec!(1));
    assert_eq!(dues.amount, dec!(1450.00));

    assert_eq!(
        charge(&result, TariffComponent::IspsFees).amount,
        dec!(950.00)
    );
    assert_eq!(result.total, dec!(2400.00));
}

// ---------------------------------------------------------------------------
// Test 8: Missing per-unit quantities are reported with the field name
// ---------------------------------------------------------------------------
#[test]
fn missing_quantities_are_reported() {
    let db = load_preset("gothenburg-2025").unwrap();

    let mut query = QueryParameters::new(VesselType::Tankers);
    query.vessel_details.gross_tonnage = Some(dec!(8000));
    let result = compute_total(&query, &db).unwrap();

    assert_eq!(
        reason(&result, TariffComponent::FreshWater),
        &NotApplicableReason::MissingQuantity(NumericField::FreshWater)
    );
    assert_eq!(
        reason(&result, TariffComponent::PortDuesForCargo),
        &NotApplicableReason::MissingQuantity(NumericField::CargoTonnage)
    );
    assert_eq!(
        reason(&result, TariffComponent::PassingVesselDues),
        &NotApplicableReason::ConditionsNotMet
    );
}

// ---------------------------------------------------------------------------
// Test 9: Negative gross tonnage is an invalid query, not a coerced lookup
// ---------------------------------------------------------------------------
#[test]
fn negative_gross_tonnage_is_invalid_query() {
    let db = load_preset("gothenburg-2025").unwrap();

    let mut query = QueryParameters::new(VesselType::Tankers);
    query.vessel_details.gross_tonnage = Some(dec!(-5));

    let result = compute_total(&query, &db);
    assert!(matches!(
        result,
        Err(TariffError::InvalidQuery {
            field: "gross_tonnage",
            ..
        })
    ));
}

// ---------------------------------------------------------------------------
// Test 10: Repeated evaluation of the same query is byte-identical
// ---------------------------------------------------------------------------
#[test]
fn repeated_evaluation_is_byte_identical() {
    let db = load_preset("gothenburg-2025").unwrap();

    let mut query = QueryParameters::new(VesselType::ContainerVessels);
    query.vessel_details.gross_tonnage = Some(dec!(24000));
    query.vessel_details.teu = Some(2400);
    query.call_context.arrival_region = Some(Region::NonEu);
    query.environmental.esi_score = Some(dec!(35));

    let first = serde_json::to_string(&compute_total(&query, &db).unwrap()).unwrap();
    let second = serde_json::to_string(&compute_total(&query, &db).unwrap()).unwrap();
    assert_eq!(first, second);
}
