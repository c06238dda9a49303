pub mod builtin;
pub mod schema;

use crate::error::TariffError;
use crate::model::{TariffComponent, VesselType};
use rust_decimal::Decimal;
use schema::{
    Comparison, CondValue, ConditionDef, Predicate, TariffDatasetDef, TariffRuleDef,
};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Load a tariff dataset from a JSON file.
pub fn load_dataset(path: &Path) -> Result<TariffDatabase, TariffError> {
    let content = std::fs::read_to_string(path).map_err(|e| TariffError::DatasetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let def: TariffDatasetDef =
        serde_json::from_str(&content).map_err(|e| TariffError::DatasetLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    TariffDatabase::from_def(def)
}

/// Parse a tariff dataset from a JSON string.
pub fn parse_dataset(json: &str) -> Result<TariffDatabase, TariffError> {
    let def: TariffDatasetDef = serde_json::from_str(json)?;
    TariffDatabase::from_def(def)
}

/// The validated, immutable rule collection. Built once, shared by
/// reference across any number of concurrent calculations; no query path
/// mutates it.
#[derive(Debug, Clone)]
pub struct TariffDatabase {
    version: String,
    port_name: String,
    currency: String,
    rules: Vec<TariffRuleDef>,
    by_component: BTreeMap<TariffComponent, Vec<usize>>,
}

impl TariffDatabase {
    /// Validate a parsed dataset and build the component index. Any
    /// invariant violation refuses the whole dataset; a partially valid
    /// database is never returned.
    pub fn from_def(def: TariffDatasetDef) -> Result<Self, TariffError> {
        validate_dataset(&def)?;

        let mut by_component: BTreeMap<TariffComponent, Vec<usize>> = BTreeMap::new();
        for (idx, rule) in def.rules.iter().enumerate() {
            by_component.entry(rule.component).or_default().push(idx);
        }

        tracing::info!(
            rules = def.rules.len(),
            port = %def.port_name,
            version = %def.version,
            "tariff dataset loaded"
        );

        Ok(TariffDatabase {
            version: def.version,
            port_name: def.port_name,
            currency: def.currency,
            rules: def.rules,
            by_component,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rules(&self) -> &[TariffRuleDef] {
        &self.rules
    }

    /// All rules for one component, in dataset order.
    pub fn rules_for_component(
        &self,
        component: TariffComponent,
    ) -> impl Iterator<Item = &TariffRuleDef> + '_ {
        self.by_component
            .get(&component)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.rules[idx])
    }

    /// Rules for one component whose vessel-type filter admits the given
    /// vessel type.
    pub fn rules_for(
        &self,
        component: TariffComponent,
        vessel_type: VesselType,
    ) -> impl Iterator<Item = &TariffRuleDef> + '_ {
        self.rules_for_component(component)
            .filter(move |rule| rule.applies_to(vessel_type))
    }

    /// Components for which the dataset carries at least one rule.
    pub fn components_covered(&self) -> impl Iterator<Item = TariffComponent> + '_ {
        self.by_component.keys().copied()
    }
}

fn validate_dataset(def: &TariffDatasetDef) -> Result<(), TariffError> {
    if def.rules.is_empty() {
        return Err(TariffError::DatasetInvalid(
            "rules must not be empty".into(),
        ));
    }

    let mut ids: HashSet<&str> = HashSet::new();
    for rule in &def.rules {
        validate_rule(rule)?;
        if !ids.insert(rule.id.as_str()) {
            return Err(TariffError::DatasetInvalid(format!(
                "duplicate rule id '{}'",
                rule.id
            )));
        }
    }

    check_priority_conflicts(&def.rules)
}

fn validate_rule(rule: &TariffRuleDef) -> Result<(), TariffError> {
    if rule.id.is_empty() {
        return Err(TariffError::DatasetInvalid(
            "rule id must not be empty".into(),
        ));
    }

    if let Some(list) = &rule.vessel_types {
        if list.is_empty() {
            return Err(TariffError::DatasetInvalid(format!(
                "rule '{}' has an empty vessel type list (omit the field for 'any')",
                rule.id
            )));
        }
    }

    if rule.bands.is_empty() {
        return Err(TariffError::DatasetInvalid(format!(
            "rule '{}' has no bands",
            rule.id
        )));
    }

    if rule.band_key.is_none() {
        if rule.bands.len() > 1 {
            return Err(TariffError::DatasetInvalid(format!(
                "rule '{}' has {} bands but no band_key",
                rule.id,
                rule.bands.len()
            )));
        }
        let band = &rule.bands[0];
        if !band.lower.is_zero() || band.upper.is_some() {
            return Err(TariffError::DatasetInvalid(format!(
                "rule '{}' has no band_key; its single band must span [0, unbounded)",
                rule.id
            )));
        }
    }

    for (i, band) in rule.bands.iter().enumerate() {
        if band.lower < Decimal::ZERO {
            return Err(TariffError::DatasetInvalid(format!(
                "rule '{}' band {} has a negative lower bound",
                rule.id, i
            )));
        }
        if let Some(upper) = band.upper {
            if upper <= band.lower {
                return Err(TariffError::DatasetInvalid(format!(
                    "rule '{}' band {} is empty: [{}, {})",
                    rule.id, i, band.lower, upper
                )));
            }
        }
        if let (Some(min), Some(max)) = (band.min_charge, band.max_charge) {
            if min > max {
                return Err(TariffError::DatasetInvalid(format!(
                    "rule '{}' band {} has min_charge {} above max_charge {}",
                    rule.id, i, min, max
                )));
            }
        }
    }

    for pair in rule.bands.windows(2) {
        match pair[0].upper {
            None => {
                return Err(TariffError::DatasetInvalid(format!(
                    "rule '{}': only the last band may be unbounded",
                    rule.id
                )));
            }
            Some(upper) if upper != pair[1].lower => {
                return Err(TariffError::DatasetInvalid(format!(
                    "rule '{}': bands are not contiguous ({} then {})",
                    rule.id, upper, pair[1].lower
                )));
            }
            Some(_) => {}
        }
    }

    Ok(())
}

/// Reject rule pairs that could both match the same call with equal
/// declared priority. Caught here so matching never has to tie-break at
/// query time.
fn check_priority_conflicts(rules: &[TariffRuleDef]) -> Result<(), TariffError> {
    let mut groups: BTreeMap<(TariffComponent, u32), Vec<&TariffRuleDef>> = BTreeMap::new();
    for rule in rules {
        groups
            .entry((rule.component, rule.priority))
            .or_default()
            .push(rule);
    }

    for ((component, priority), group) in &groups {
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                if !vessel_filters_intersect(a, b) {
                    continue;
                }
                if !mutually_exclusive(&a.conditions, &b.conditions) {
                    return Err(TariffError::AmbiguousRules {
                        component: *component,
                        first: a.id.clone(),
                        second: b.id.clone(),
                        priority: *priority,
                    });
                }
            }
        }
    }

    Ok(())
}

fn vessel_filters_intersect(a: &TariffRuleDef, b: &TariffRuleDef) -> bool {
    match (&a.vessel_types, &b.vessel_types) {
        (Some(va), Some(vb)) => va.iter().any(|v| vb.contains(v)),
        _ => true,
    }
}

/// Syntactic proof that two condition sets can never both hold: some field
/// carries equality constraints on distinct constants, or disjoint numeric
/// intervals. Anything weaker is treated as a potential co-match.
fn mutually_exclusive(a: &[ConditionDef], b: &[ConditionDef]) -> bool {
    let a_preds = top_level_predicates(a);
    let b_preds = top_level_predicates(b);
    for pa in &a_preds {
        for pb in &b_preds {
            if pa.field == pb.field && predicates_disjoint(pa, pb) {
                return true;
            }
        }
    }
    false
}

fn top_level_predicates(conditions: &[ConditionDef]) -> Vec<&Predicate> {
    conditions
        .iter()
        .filter_map(|c| match c {
            ConditionDef::Single(p) => Some(p),
            // OR-groups never prove exclusivity on their own.
            ConditionDef::AnyOf { .. } => None,
        })
        .collect()
}

fn predicates_disjoint(a: &Predicate, b: &Predicate) -> bool {
    if a.op == Comparison::Eq && b.op == Comparison::Eq && a.value != b.value {
        return true;
    }
    if let (Some(ia), Some(ib)) = (numeric_interval(a), numeric_interval(b)) {
        return intervals_disjoint(ia, ib);
    }
    false
}

type Bound = Option<(Decimal, bool)>; // (limit, inclusive)
type Interval = (Bound, Bound); // (lower, upper)

fn numeric_interval(p: &Predicate) -> Option<Interval> {
    let CondValue::Number(n) = &p.value else {
        return None;
    };
    let n = *n;
    match p.op {
        Comparison::Eq => Some((Some((n, true)), Some((n, true)))),
        Comparison::Gt => Some((Some((n, false)), None)),
        Comparison::Gte => Some((Some((n, true)), None)),
        Comparison::Lt => Some((None, Some((n, false)))),
        Comparison::Lte => Some((None, Some((n, true)))),
        _ => None,
    }
}

fn intervals_disjoint(a: Interval, b: Interval) -> bool {
    ends_before(a.1, b.0) || ends_before(b.1, a.0)
}

fn ends_before(upper: Bound, lower: Bound) -> bool {
    match (upper, lower) {
        (Some((u, u_incl)), Some((l, l_incl))) => u < l || (u == l && !(u_incl && l_incl)),
        _ => false,
    }
}
