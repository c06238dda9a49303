use crate::calc::bands;
use crate::calc::conditions;
use crate::calc::outcome::{
    AppliedAdjustment, BandRef, Charge, LineItem, LineOutcome, NotApplicableReason,
};
use crate::model::{QueryParameters, TariffComponent};
use crate::rules::schema::{AdjustmentKind, ChargingBasis, TariffRuleDef};
use crate::rules::TariffDatabase;
use rust_decimal::{Decimal, RoundingStrategy};

/// Minor-unit precision of the supported currencies (SEK ore).
const MINOR_UNIT_DP: u32 = 2;

/// Calculate one component for one call. Total function: every failure
/// mode becomes a not-applicable reason on the line item, so one bad
/// component never aborts the rest of the calculation.
pub fn calculate(
    component: TariffComponent,
    query: &QueryParameters,
    database: &TariffDatabase,
) -> LineItem {
    let mut saw_rule = false;
    let mut saw_vessel_match = false;
    let mut candidates: Vec<&TariffRuleDef> = Vec::new();

    for rule in database.rules_for_component(component) {
        saw_rule = true;
        if !rule.applies_to(query.vessel_type) {
            continue;
        }
        saw_vessel_match = true;
        if conditions::evaluate(&rule.conditions, query) {
            candidates.push(rule);
        }
    }

    if candidates.is_empty() {
        let reason = if !saw_rule {
            NotApplicableReason::NoRulesForComponent
        } else if !saw_vessel_match {
            NotApplicableReason::VesselTypeExcluded(query.vessel_type)
        } else {
            NotApplicableReason::ConditionsNotMet
        };
        return LineItem::not_applicable(component, reason);
    }

    // Load-time validation rejects equal-priority co-matches, so the
    // lowest priority value is unique among the candidates.
    candidates.sort_by_key(|rule| rule.priority);
    let rule = candidates[0];
    tracing::debug!(component = %component, rule = %rule.id, "rule matched");

    price_rule(component, rule, query)
}

fn price_rule(
    component: TariffComponent,
    rule: &TariffRuleDef,
    query: &QueryParameters,
) -> LineItem {
    let band = match rule.band_key {
        None => &rule.bands[0],
        Some(key) => {
            let Some(key_value) = query.numeric(key) else {
                return LineItem::not_applicable(
                    component,
                    NotApplicableReason::MissingBandKey(key),
                );
            };
            match bands::resolve(&rule.bands, key_value) {
                Some(band) => band,
                None => {
                    return LineItem::not_applicable(
                        component,
                        NotApplicableReason::OutOfBandRange {
                            key,
                            value: key_value,
                        },
                    );
                }
            }
        }
    };

    let quantity = match rule.basis {
        ChargingBasis::PerCall => Decimal::ONE,
        ChargingBasis::PerUnit(field) => match query.numeric(field) {
            Some(quantity) => quantity,
            None => {
                return LineItem::not_applicable(
                    component,
                    NotApplicableReason::MissingQuantity(field),
                );
            }
        },
    };

    let mut base_amount = band.rate * quantity;
    if let Some(min) = band.min_charge {
        if base_amount < min {
            base_amount = min;
        }
    }
    if let Some(max) = band.max_charge {
        if base_amount > max {
            base_amount = max;
        }
    }

    // Adjustments compose additively against the clamped base, in dataset
    // order; each delta is flat or per unit of the charged quantity.
    let mut amount = base_amount;
    let mut applied = Vec::new();
    for adjustment in &rule.adjustments {
        if !conditions::evaluate(&adjustment.when, query) {
            continue;
        }
        let delta = match adjustment.kind {
            AdjustmentKind::Flat => adjustment.amount,
            AdjustmentKind::PerUnit => adjustment.amount * quantity,
        };
        amount += delta;
        applied.push(AppliedAdjustment {
            description: adjustment
                .description
                .clone()
                .unwrap_or_else(|| match adjustment.kind {
                    AdjustmentKind::Flat => format!("flat adjustment {}", adjustment.amount),
                    AdjustmentKind::PerUnit => {
                        format!("{} per unit adjustment", adjustment.amount)
                    }
                }),
            delta,
        });
    }

    // Single round-half-up at the end of the component, never per step.
    let amount = amount.round_dp_with_strategy(MINOR_UNIT_DP, RoundingStrategy::MidpointAwayFromZero);

    LineItem {
        component,
        outcome: LineOutcome::Charged(Charge {
            rule_id: rule.id.clone(),
            band: BandRef {
                lower: band.lower,
                upper: band.upper,
                rate: band.rate,
            },
            quantity,
            base_amount,
            adjustments: applied,
            amount,
        }),
    }
}
