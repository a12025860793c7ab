use griddle_core::stmt::{FieldFilter, FieldOp, Filter, Record, Value};

/// Evaluates a where-condition against a record.
///
/// Pure; field-level checks and every present combinator must all hold.
/// Fields absent from the record read as `Null`.
pub(crate) fn matches(filter: &Filter, record: &Record) -> bool {
    let fields_hold = filter
        .fields
        .iter()
        .all(|(name, field)| matches_field(field, record.get_or_null(name)));

    let and_holds = filter.and.iter().all(|branch| matches(branch, record));

    // An empty OR list imposes no constraint.
    let or_holds = filter.or.is_empty() || filter.or.iter().any(|branch| matches(branch, record));

    let not_holds = filter.not.iter().all(|branch| !matches(branch, record));

    fields_hold && and_holds && or_holds && not_holds
}

fn matches_field(filter: &FieldFilter, value: &Value) -> bool {
    match filter {
        FieldFilter::Literal(expected) => value.equals(expected),
        FieldFilter::All(ops) => ops.iter().all(|op| matches_op(op, value)),
    }
}

fn matches_op(op: &FieldOp, value: &Value) -> bool {
    use std::cmp::Ordering;

    match op {
        FieldOp::Equals(expected) => value.equals(expected),
        FieldOp::In(list) => list.iter().any(|candidate| value.equals(candidate)),
        FieldOp::NotIn(list) => !list.iter().any(|candidate| value.equals(candidate)),
        FieldOp::Gt(bound) => value.compare(bound) == Some(Ordering::Greater),
        FieldOp::Gte(bound) => matches!(
            value.compare(bound),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        FieldOp::Lt(bound) => value.compare(bound) == Some(Ordering::Less),
        FieldOp::Lte(bound) => {
            matches!(value.compare(bound), Some(Ordering::Less | Ordering::Equal))
        }
        FieldOp::Contains(needle) => match value {
            Value::String(haystack) => needle
                .as_str()
                .is_some_and(|needle| haystack.contains(needle)),
            Value::List(items) => items.iter().any(|item| item.equals(needle)),
            _ => false,
        },
        FieldOp::StartsWith(prefix) => value.as_str().is_some_and(|s| s.starts_with(prefix)),
        FieldOp::EndsWith(suffix) => value.as_str().is_some_and(|s| s.ends_with(suffix)),
        FieldOp::Not(inner) => !matches_field(inner, value),
    }
}
