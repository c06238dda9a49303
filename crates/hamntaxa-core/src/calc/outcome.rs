use crate::model::{NumericField, TariffComponent, VesselType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The band a charge was priced from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandRef {
    pub lower: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

impl fmt::Display for BandRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "[{}, {})", self.lower, upper),
            None => write!(f, "[{}, ...)", self.lower),
        }
    }
}

/// An adjustment clause that fired, with the delta it contributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedAdjustment {
    pub description: String,
    pub delta: Decimal,
}

/// A priced component: which rule and band applied, and how the amount
/// came about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub rule_id: String,
    pub band: BandRef,
    pub quantity: Decimal,
    /// Rate x quantity after min/max clamping, before adjustments and
    /// rounding.
    pub base_amount: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<AppliedAdjustment>,
    /// Final amount, rounded to the currency's minor unit.
    pub amount: Decimal,
}

/// Why a component produced no charge. A normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotApplicableReason {
    NoRulesForComponent,
    VesselTypeExcluded(VesselType),
    ConditionsNotMet,
    MissingBandKey(NumericField),
    OutOfBandRange { key: NumericField, value: Decimal },
    MissingQuantity(NumericField),
}

impl fmt::Display for NotApplicableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotApplicableReason::NoRulesForComponent => {
                write!(f, "no tariff rules for this component")
            }
            NotApplicableReason::VesselTypeExcluded(vt) => {
                write!(f, "no rule covers {vt}")
            }
            NotApplicableReason::ConditionsNotMet => {
                write!(f, "no rule's conditions are met by this call")
            }
            NotApplicableReason::MissingBandKey(field) => {
                write!(f, "query does not provide {field}, which the pricing bands are keyed on")
            }
            NotApplicableReason::OutOfBandRange { key, value } => {
                write!(f, "{key} {value} falls outside every pricing band")
            }
            NotApplicableReason::MissingQuantity(field) => {
                write!(f, "query does not provide {field}, which the charge is per unit of")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineOutcome {
    Charged(Charge),
    NotApplicable { reason: NotApplicableReason },
}

/// Per-component result of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub component: TariffComponent,
    pub outcome: LineOutcome,
}

impl LineItem {
    pub fn not_applicable(component: TariffComponent, reason: NotApplicableReason) -> Self {
        LineItem {
            component,
            outcome: LineOutcome::NotApplicable { reason },
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self.outcome, LineOutcome::Charged(_))
    }

    /// The charged amount, if this line item is applicable.
    pub fn amount(&self) -> Option<Decimal> {
        match &self.outcome {
            LineOutcome::Charged(charge) => Some(charge.amount),
            LineOutcome::NotApplicable { .. } => None,
        }
    }
}

/// Itemized result of one calculation: exactly one line item per known
/// component, plus the total over the applicable ones. Created fresh per
/// query, never mutated after return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub line_items: BTreeMap<TariffComponent, LineItem>,
    pub total: Decimal,
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_only_for_charged_lines() {
        let charged = LineItem {
            component: TariffComponent::FreshWater,
            outcome: LineOutcome::Charged(Charge {
                rule_id: "fresh-water".into(),
                band: BandRef {
                    lower: dec!(0),
                    upper: None,
                    rate: dec!(28.50),
                },
                quantity: dec!(10),
                base_amount: dec!(285),
                adjustments: vec![],
                amount: dec!(285.00),
            }),
        };
        assert_eq!(charged.amount(), Some(dec!(285.00)));

        let skipped = LineItem::not_applicable(
            TariffComponent::Pilotage,
            NotApplicableReason::NoRulesForComponent,
        );
        assert_eq!(skipped.amount(), None);
        assert!(!skipped.is_applicable());
    }

    #[test]
    fn test_reason_display_names_the_field() {
        let reason = NotApplicableReason::OutOfBandRange {
            key: NumericField::GrossTonnage,
            value: dec!(250),
        };
        let text = reason.to_string();
        assert!(text.contains("gross tonnage"));
        assert!(text.contains("250"));
    }
}
