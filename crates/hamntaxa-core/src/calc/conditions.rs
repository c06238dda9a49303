use crate::model::{QueryParameters, Region};
use crate::rules::schema::{
    Comparison, CondValue, ConditionDef, ConditionField, Predicate,
};
use rust_decimal::Decimal;

/// Evaluate a rule's eligibility conditions against a query. Entries are
/// AND-combined; an `any_of` entry holds when any alternative does. A
/// predicate over an unset or wrongly-typed query field is false, never an
/// error, so the owning rule is simply skipped.
pub fn evaluate(conditions: &[ConditionDef], query: &QueryParameters) -> bool {
    conditions.iter().all(|c| match c {
        ConditionDef::Single(p) => evaluate_predicate(p, query),
        ConditionDef::AnyOf { any_of } => any_of.iter().any(|p| evaluate_predicate(p, query)),
    })
}

fn evaluate_predicate(p: &Predicate, query: &QueryParameters) -> bool {
    match p.field {
        ConditionField::Numeric(field) => match query.numeric(field) {
            Some(value) => compare_number(value, p.op, &p.value),
            None => false,
        },
        ConditionField::Flag(field) => match query.flag(field) {
            Some(value) => compare_flag(value, p.op, &p.value),
            None => false,
        },
        ConditionField::Region(_) => match query.call_context.arrival_region {
            Some(value) => compare_region(value, p.op, &p.value),
            None => false,
        },
    }
}

fn compare_number(value: Decimal, op: Comparison, target: &CondValue) -> bool {
    match (op, target) {
        (Comparison::Eq, CondValue::Number(t)) => value == *t,
        (Comparison::Ne, CondValue::Number(t)) => value != *t,
        (Comparison::Gt, CondValue::Number(t)) => value > *t,
        (Comparison::Gte, CondValue::Number(t)) => value >= *t,
        (Comparison::Lt, CondValue::Number(t)) => value < *t,
        (Comparison::Lte, CondValue::Number(t)) => value <= *t,
        (Comparison::In, CondValue::NumberList(list)) => list.contains(&value),
        (Comparison::NotIn, CondValue::NumberList(list)) => !list.contains(&value),
        _ => false,
    }
}

fn compare_flag(value: bool, op: Comparison, target: &CondValue) -> bool {
    match (op, target) {
        (Comparison::Eq, CondValue::Flag(t)) => value == *t,
        (Comparison::Ne, CondValue::Flag(t)) => value != *t,
        _ => false,
    }
}

fn compare_region(value: Region, op: Comparison, target: &CondValue) -> bool {
    match (op, target) {
        (Comparison::Eq, CondValue::Region(t)) => value == *t,
        (Comparison::Ne, CondValue::Region(t)) => value != *t,
        _ => false,
    }
}
