//! Query evaluation over JSON documents, following the document database's
//! value ordering: null < boolean < number < string < array < map.

use std::cmp::Ordering;

use serde_json::{Number, Value};

use crate::document::Document;
use crate::query::{field_path, Direction, Operator, OrderBy, WhereClause, DOCUMENT_ID};

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Integers compare exactly; anything fractional falls back to f64.
fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    match (as_integer(a), as_integer(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => {
            let x = a.as_f64().unwrap_or(f64::NAN);
            let y = b.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Total order over JSON values.
pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (left, right) in x.iter().zip(y.iter()) {
                let ordering = compare_values(left, right);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => {
            let mut left: Vec<_> = x.iter().collect();
            let mut right: Vec<_> = y.iter().collect();
            left.sort_by(|p, q| p.0.cmp(q.0));
            right.sort_by(|p, q| p.0.cmp(q.0));
            for ((lk, lv), (rk, rv)) in left.iter().zip(right.iter()) {
                let ordering = lk.cmp(rk).then_with(|| compare_values(lv, rv));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            left.len().cmp(&right.len())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    compare_values(a, b) == Ordering::Equal
}

/// Resolve a field path against a document; `__name__` is the document id.
pub(crate) fn field_value(doc: &Document, path: &str) -> Option<Value> {
    if path == DOCUMENT_ID {
        return Some(Value::String(doc.id.clone()));
    }
    field_path::lookup(&doc.data, path).cloned()
}

/// Whether `doc` satisfies a single `where` clause.
///
/// Documents without the field never match; inequality filters also skip
/// documents whose field is null.
pub(crate) fn matches(doc: &Document, clause: &WhereClause) -> bool {
    let Some(field) = field_value(doc, &clause.field_path) else {
        return false;
    };
    let expected = &clause.value;

    match clause.operator {
        Operator::Equal => values_equal(&field, expected),
        Operator::NotEqual => !field.is_null() && !values_equal(&field, expected),
        Operator::LessThan
        | Operator::LessThanOrEqual
        | Operator::GreaterThan
        | Operator::GreaterThanOrEqual => {
            if type_rank(&field) != type_rank(expected) {
                return false;
            }
            let ordering = compare_values(&field, expected);
            match clause.operator {
                Operator::LessThan => ordering == Ordering::Less,
                Operator::LessThanOrEqual => ordering != Ordering::Greater,
                Operator::GreaterThan => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            }
        }
        Operator::ArrayContains => field
            .as_array()
            .is_some_and(|items| items.iter().any(|v| values_equal(v, expected))),
        Operator::ArrayContainsAny => match (field.as_array(), expected.as_array()) {
            (Some(items), Some(wanted)) => items
                .iter()
                .any(|v| wanted.iter().any(|w| values_equal(v, w))),
            _ => false,
        },
        Operator::In => expected
            .as_array()
            .is_some_and(|list| list.iter().any(|v| values_equal(&field, v))),
        Operator::NotIn => {
            !field.is_null()
                && expected
                    .as_array()
                    .is_some_and(|list| !list.iter().any(|v| values_equal(&field, v)))
        }
    }
}

/// Compare two documents under `order_by`, breaking remaining ties by id,
/// descending. Cursors always resume on `__name__ desc`, so the implicit
/// order has to agree with it.
pub(crate) fn compare_docs(a: &Document, b: &Document, order_by: &[OrderBy]) -> Ordering {
    for clause in order_by {
        let left = field_value(a, &clause.field_path).unwrap_or(Value::Null);
        let right = field_value(b, &clause.field_path).unwrap_or(Value::Null);
        let ordering = directed(compare_values(&left, &right), clause.direction);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    b.id.cmp(&a.id)
}

/// Whether `doc` sorts strictly after the position described by `cursor`.
pub(crate) fn is_after_cursor(doc: &Document, order_by: &[OrderBy], cursor: &[Value]) -> bool {
    for (clause, position) in order_by.iter().zip(cursor.iter()) {
        let value = field_value(doc, &clause.field_path).unwrap_or(Value::Null);
        match directed(compare_values(&value, position), clause.direction) {
            Ordering::Greater => return true,
            Ordering::Less => return false,
            Ordering::Equal => {}
        }
    }
    false
}

fn directed(ordering: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}
