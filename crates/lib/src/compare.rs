//! Comparison rules used by the sorting family.
//!
//! Every comparison here is a total preorder: numbers and numeric strings all compare
//! as `f64`, so integers beyond 2^53 that round to the same float are equal rather than
//! ordered one way against each other and another way against a string. [`SortFlags`]
//! selects how two values are compared.

use std::cmp::Ordering;

use crate::{Key, Value};

/// Selects how values (or keys) are compared when sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortFlags {
    /// Numbers and numeric strings compare numerically, other strings bytewise,
    /// mixed types by a fixed type rank
    #[default]
    Regular,
    /// Both operands coerced to numbers
    Numeric,
    /// Both operands compared by their string forms
    String,
    /// String forms compared after lowercasing
    StringCaseInsensitive,
    /// Natural-order comparison of string forms ("img2" before "img10")
    Natural,
    /// Natural-order comparison ignoring case
    NaturalCaseInsensitive,
}

/// Compare two values under `flags`.
pub fn compare_values(a: &Value, b: &Value, flags: SortFlags) -> Ordering {
    match flags {
        SortFlags::Regular => regular(a, b),
        SortFlags::Numeric => cmp_f64(to_number(a), to_number(b)),
        SortFlags::String => string_form(a).cmp(&string_form(b)),
        SortFlags::StringCaseInsensitive => string_form(a)
            .to_lowercase()
            .cmp(&string_form(b).to_lowercase()),
        SortFlags::Natural => natural_cmp(&string_form(a), &string_form(b), false),
        SortFlags::NaturalCaseInsensitive => natural_cmp(&string_form(a), &string_form(b), true),
    }
}

/// Compare two keys under `flags`, using the rules for their integer or string forms.
pub fn compare_keys(a: &Key, b: &Key, flags: SortFlags) -> Ordering {
    match (a, b, flags) {
        (Key::Int(x), Key::Int(y), SortFlags::Regular | SortFlags::Numeric)
            if exact_in_f64(*x) && exact_in_f64(*y) =>
        {
            x.cmp(y)
        }
        _ => compare_values(&a.to_value(), &b.to_value(), flags),
    }
}

/// Largest magnitude below which every integer has an exact `f64` form.
const F64_EXACT_INT: i64 = 1 << 53;

fn exact_in_f64(n: i64) -> bool {
    (-F64_EXACT_INT..=F64_EXACT_INT).contains(&n)
}

/// Type rank used when two values are not otherwise comparable.
fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(s) if numeric_str(s).is_some() => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn regular(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x.len().cmp(&y.len()).then_with(|| {
            x.iter()
                .zip(y)
                .map(|(l, r)| regular(l, r))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()).then_with(|| {
            x.values()
                .zip(y.values())
                .map(|(l, r)| regular(l, r))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        _ => match (rank(a), rank(b)) {
            (2, 2) => cmp_f64(to_number(a), to_number(b)),
            (3, 3) => string_form(a).cmp(&string_form(b)),
            (ra, rb) => ra.cmp(&rb),
        },
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Parses a fully numeric string: optional surrounding whitespace, sign, digits,
/// fraction and exponent. Words such as `inf` or `nan` are not numeric.
pub fn numeric_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if !trimmed.bytes().any(|c| c.is_ascii_digit())
        || !trimmed
            .bytes()
            .all(|c| c.is_ascii_digit() || matches!(c, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    trimmed.parse().ok()
}

/// Longest numeric prefix of `s` (after leading whitespace), or 0.
fn leading_number(s: &str) -> f64 {
    let s = s.trim_start();
    let end = s
        .bytes()
        .position(|c| !(c.is_ascii_digit() || matches!(c, b'+' | b'-' | b'.' | b'e' | b'E')))
        .unwrap_or(s.len());
    (1..=end)
        .rev()
        .find_map(|len| numeric_str(&s[..len]))
        .unwrap_or(0.0)
}

/// Numeric form of a value. Containers count as their length.
fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => leading_number(s),
        Value::Array(items) => items.len() as f64,
        Value::Object(map) => map.len() as f64,
    }
}

/// String form of a value: `null` is empty, booleans are `"1"`/`""`,
/// containers are their JSON text.
pub fn string_form(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Natural-order string comparison.
///
/// Runs of digits compare by numeric magnitude, so `"img2" < "img10"`. A run with a
/// leading zero compares digit by digit as a fraction (`"x01" < "x1"`). Whitespace is
/// skipped.
///
/// ```
/// use std::cmp::Ordering;
/// use keyarray::compare::natural_cmp;
///
/// assert_eq!(natural_cmp("img2", "img10", false), Ordering::Less);
/// assert_eq!(natural_cmp("IMG2", "img10", true), Ordering::Less);
/// assert_eq!(natural_cmp("a", "a", false), Ordering::Equal);
/// ```
pub fn natural_cmp(a: &str, b: &str, case_insensitive: bool) -> Ordering {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (mut i, mut j) = (0, 0);

    loop {
        while i < a.len() && a[i].is_whitespace() {
            i += 1;
        }
        while j < b.len() && b[j].is_whitespace() {
            j += 1;
        }

        match (a.get(i), b.get(j)) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let run_a = digit_run(&a[i..]);
                let run_b = digit_run(&b[j..]);
                let ord = if a[i] == '0' || b[j] == '0' {
                    // Fractional: compare left-aligned, shorter run first on a tie
                    run_a.iter().cmp(run_b.iter())
                } else {
                    run_a.len().cmp(&run_b.len()).then_with(|| run_a.cmp(run_b))
                };
                if ord.is_ne() {
                    return ord;
                }
                i += run_a.len();
                j += run_b.len();
            }
            (Some(&ca), Some(&cb)) => {
                let ord = if case_insensitive {
                    ca.to_lowercase().cmp(cb.to_lowercase())
                } else {
                    ca.cmp(&cb)
                };
                if ord.is_ne() {
                    return ord;
                }
                i += 1;
                j += 1;
            }
        }
    }
}

fn digit_run(chars: &[char]) -> &[char] {
    let len = chars
        .iter()
        .position(|c| !c.is_ascii_digit())
        .unwrap_or(chars.len());
    &chars[..len]
}
