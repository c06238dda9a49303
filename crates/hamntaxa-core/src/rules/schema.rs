use crate::model::{FlagField, NumericField, Region, TariffComponent, VesselType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator of a condition predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Comparison::Eq => "=",
            Comparison::Ne => "!=",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
            Comparison::In => "in",
            Comparison::NotIn => "not in",
        };
        write!(f, "{s}")
    }
}

/// Single-variant marker so `arrival_region` parses alongside the numeric
/// and flag field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionField {
    ArrivalRegion,
}

/// Subject of a predicate: exactly one query attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionField {
    Numeric(NumericField),
    Flag(FlagField),
    Region(RegionField),
}

/// Constant a predicate compares against. Typed; a mismatch against the
/// field's value kind evaluates to false rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CondValue {
    Flag(bool),
    Region(Region),
    Number(Decimal),
    NumberList(Vec<Decimal>),
}

impl fmt::Display for ConditionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionField::Numeric(field) => write!(f, "{field}"),
            ConditionField::Flag(field) => write!(f, "{field}"),
            ConditionField::Region(_) => write!(f, "arrival region"),
        }
    }
}

impl fmt::Display for CondValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CondValue::Flag(v) => write!(f, "{v}"),
            CondValue::Region(r) => write!(f, "{r}"),
            CondValue::Number(n) => write!(f, "{n}"),
            CondValue::NumberList(list) => {
                write!(f, "[")?;
                for (i, n) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{n}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// One predicate over one query attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: ConditionField,
    pub op: Comparison,
    pub value: CondValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.value)
    }
}

/// Entry in a rule's condition list. Entries combine with AND; an `any_of`
/// group is satisfied when any of its alternatives holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionDef {
    AnyOf { any_of: Vec<Predicate> },
    Single(Predicate),
}

impl fmt::Display for ConditionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionDef::Single(p) => write!(f, "{p}"),
            ConditionDef::AnyOf { any_of } => {
                for (i, p) in any_of.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{p}")?;
                }
                Ok(())
            }
        }
    }
}

/// What one unit of the charge is. `per_call` prices the call itself
/// (quantity 1); `per_unit` multiplies the band rate by a query attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargingBasis {
    PerCall,
    PerUnit(NumericField),
}

/// One pricing tier. Intervals are half-open `[lower, upper)`; the last
/// band of a rule may leave `upper` unset for an unbounded tail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandDef {
    pub lower: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_charge: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_charge: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Flat,
    PerUnit,
}

/// Conditional discount or surcharge. `amount` is the delta (negative for
/// discounts); `per_unit` multiplies it by the rule's charged quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentDef {
    #[serde(default)]
    pub when: Vec<ConditionDef>,
    pub kind: AdjustmentKind,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One pricing rule for one component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffRuleDef {
    /// Stable identifier; matching outcomes reference it.
    pub id: String,
    pub component: TariffComponent,
    /// Vessel types this rule applies to; omitted means any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vessel_types: Option<Vec<VesselType>>,
    /// Lower value wins when several rules match the same call.
    pub priority: u32,
    #[serde(default)]
    pub conditions: Vec<ConditionDef>,
    pub basis: ChargingBasis,
    /// Attribute keying the bands. Required when there is more than one
    /// band; a keyless rule has a single `[0, unbounded)` band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band_key: Option<NumericField>,
    pub bands: Vec<BandDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<AdjustmentDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TariffRuleDef {
    pub fn applies_to(&self, vessel_type: VesselType) -> bool {
        match &self.vessel_types {
            None => true,
            Some(list) => list.contains(&vessel_type),
        }
    }
}

fn default_version() -> String {
    "2025".to_string()
}

fn default_port_name() -> String {
    "Port of Gothenburg".to_string()
}

fn default_currency() -> String {
    "SEK".to_string()
}

/// On-disk shape of a tariff dataset: an envelope of rule records. The
/// exact JSON contract is owned by the extraction pipeline; this is the
/// minimum it must preserve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffDatasetDef {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_port_name")]
    pub port_name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub rules: Vec<TariffRuleDef>,
}
