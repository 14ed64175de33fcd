//! In-process evaluation of filters and sort keys over documents.
//!
//! Comparison rules, shared with the SQL compiled by the PostgreSQL backend:
//!
//! - an array field matches when any of its elements matches
//! - number fields compare numerically against the operand parsed as a number
//! - string fields compare bytewise against the raw operand
//! - boolean fields match only the operands `true` and `false`
//! - missing and `null` fields never match
//!
//! Sorting ranks values by JSON type first (missing/null, string, number,
//! boolean, array, object) and then by value within a type.

use std::cmp::Ordering;

use serde_json::Value;

use devcamper_core::{Condition, Filter, Operand, Predicate, SortKey};

use crate::store::Document;

pub fn matches(doc: &Document, filter: &Filter) -> bool {
    filter
        .conditions()
        .iter()
        .all(|condition| condition_matches(doc, condition))
}

fn condition_matches(doc: &Document, condition: &Condition) -> bool {
    match condition.field.lookup(doc) {
        None => false,
        Some(Value::Array(items)) => items
            .iter()
            .any(|item| value_matches(item, &condition.predicate)),
        Some(value) => value_matches(value, &condition.predicate),
    }
}

fn value_matches(value: &Value, predicate: &Predicate) -> bool {
    let test = |operand: &Operand, accept: fn(Ordering) -> bool| {
        compare_operand(value, operand).is_some_and(accept)
    };

    match predicate {
        Predicate::Eq(op) => test(op, Ordering::is_eq),
        Predicate::Gt(op) => test(op, Ordering::is_gt),
        Predicate::Gte(op) => test(op, Ordering::is_ge),
        Predicate::Lt(op) => test(op, Ordering::is_lt),
        Predicate::Lte(op) => test(op, Ordering::is_le),
        Predicate::In(ops) => ops.iter().any(|op| test(op, Ordering::is_eq)),
    }
}

/// Orders a document value against a query operand, or `None` when the two
/// are not comparable.
fn compare_operand(value: &Value, operand: &Operand) -> Option<Ordering> {
    match value {
        Value::Number(n) => n.as_f64()?.partial_cmp(&operand.as_number()?),
        Value::String(s) => Some(s.as_str().cmp(operand.as_str())),
        Value::Bool(b) => Some(b.cmp(&operand.as_bool()?)),
        _ => None,
    }
}

/// Compares two documents by `sort`, falling back to `id`.
pub fn compare_documents(a: &Document, b: &Document, sort: &[SortKey]) -> Ordering {
    sort.iter()
        .map(|key| {
            let ordering = compare_values(key.field.lookup(a), key.field.lookup(b));
            if key.descending {
                ordering.reverse()
            } else {
                ordering
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| compare_values(a.get("id"), b.get("id")))
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::String(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::Bool(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devcamper_core::FieldPath;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    fn filter(field: &'static str, predicate: Predicate) -> Filter {
        Filter::all().and(FieldPath::from_static(field), predicate)
    }

    #[test]
    fn test_numeric_comparison_uses_number_semantics() {
        let cheap = doc(json!({"averageCost": 9000}));
        let pricey = doc(json!({"averageCost": 12000}));
        let lte = filter("averageCost", Predicate::Lte("10000".into()));

        assert!(matches(&cheap, &lte));
        assert!(!matches(&pricey, &lte));
    }

    #[test]
    fn test_non_numeric_operand_never_matches_number() {
        let d = doc(json!({"averageCost": 9000}));
        assert!(!matches(&d, &filter("averageCost", Predicate::Lt("abc".into()))));
    }

    #[test]
    fn test_string_and_boolean_equality() {
        let d = doc(json!({"location": {"state": "MA"}, "housing": true}));

        assert!(matches(&d, &Filter::eq("location.state", "MA")));
        assert!(!matches(&d, &Filter::eq("location.state", "ma")));
        assert!(matches(&d, &Filter::eq("housing", "true")));
        assert!(!matches(&d, &Filter::eq("housing", "1")));
    }

    #[test]
    fn test_array_field_matches_any_element() {
        let d = doc(json!({"careers": ["Web Development", "Business"]}));
        let wanted = filter(
            "careers",
            Predicate::In(vec!["UI/UX".into(), "Business".into()]),
        );

        assert!(matches(&d, &wanted));
        assert!(matches(&d, &Filter::eq("careers", "Web Development")));
        assert!(!matches(&d, &Filter::eq("careers", "Data Science")));
    }

    #[test]
    fn test_missing_and_null_never_match() {
        let d = doc(json!({"website": null}));
        assert!(!matches(&d, &Filter::eq("website", "null")));
        assert!(!matches(&d, &Filter::eq("phone", "")));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(matches(&doc(json!({})), &Filter::all()));
    }

    #[test]
    fn test_sort_by_number_then_id() {
        let a = doc(json!({"id": "a", "averageCost": 10}));
        let b = doc(json!({"id": "b", "averageCost": 10}));
        let c = doc(json!({"id": "c", "averageCost": 2}));
        let sort = SortKey::parse_list("-averageCost").unwrap();

        let mut docs = vec![c.clone(), b.clone(), a.clone()];
        docs.sort_by(|x, y| compare_documents(x, y, &sort));

        assert_eq!(docs, vec![a, b, c]);
    }

    #[test]
    fn test_missing_values_sort_first_ascending() {
        let with = doc(json!({"id": "1", "name": "x"}));
        let without = doc(json!({"id": "2"}));
        let sort = SortKey::parse_list("name").unwrap();

        assert_eq!(compare_documents(&without, &with, &sort), Ordering::Less);
    }
}
