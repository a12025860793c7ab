use griddle_core::stmt::{Direction, OrderBy, Record, Value};

use std::cmp::Ordering;

/// Builds a total order over records from a sequence of ordering
/// specifications, evaluated left-to-right with short-circuiting on the
/// first field where the records differ.
pub(crate) fn comparator(order: &[OrderBy]) -> impl Fn(&Record, &Record) -> Ordering + '_ {
    move |a, b| {
        for step in order {
            let ordering = compare_field(a, b, &step.field);

            let ordering = match step.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            };

            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }
}

/// Field comparison: absent sorts before null, null before defined values.
/// The direction sign is applied by the caller to this result as a whole, so
/// the absent/null ranking flips along with the values.
fn compare_field(a: &Record, b: &Record, field: &str) -> Ordering {
    let a = a.get(field);
    let b = b.get(field);

    let rank_a = rank(a);
    let rank_b = rank(b);

    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }

    match (a, b) {
        // Values with no defined mutual ordering stay put.
        (Some(a), Some(b)) => a.compare(b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        None => 0,
        Some(Value::Null) => 1,
        Some(_) => 2,
    }
}
