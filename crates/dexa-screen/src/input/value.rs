//! Typed cell values.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Tokens read as a missing value. Matching is case-sensitive.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single cell of a dataset.
///
/// Equality is explicit: numbers compare numerically (so `Integer(1)` equals
/// `Number(1.0)`), text compares exactly, two missing cells are equal, and
/// values of different kinds never are.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Whole-number cell, kept exact.
    Integer(i64),
    /// Numeric cell. Never NaN.
    Number(f64),
    /// Non-numeric cell, kept verbatim.
    Text(String),
    /// Empty cell or an NA token.
    Missing,
}

impl Value {
    /// Check if a raw cell represents a missing value.
    pub fn is_na_token(raw: &str) -> bool {
        NA_TOKENS.contains(&raw)
    }

    /// Parse a raw cell as a whole number, if it is one.
    pub fn parse_integer(raw: &str) -> Option<i64> {
        raw.trim().parse::<i64>().ok()
    }

    /// Parse a raw cell as a number, if it is one.
    pub fn parse_number(raw: &str) -> Option<f64> {
        raw.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
    }

    /// Whether this value is missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Type a whole column of raw cells.
    ///
    /// The column is integer when every non-missing cell is a whole number,
    /// numeric when every non-missing cell parses as a number, and otherwise
    /// all of its non-missing cells are text.
    pub fn type_column<'a, I>(cells: I) -> Vec<Value>
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: Clone,
    {
        let cells = cells.into_iter();
        let present = cells.clone().filter(|c| !Self::is_na_token(c));
        let integer = present.clone().all(|c| Self::parse_integer(c).is_some());
        let numeric = integer || present.clone().all(|c| Self::parse_number(c).is_some());

        // Both parses below were checked by the scans above.
        cells
            .map(|c| {
                if Self::is_na_token(c) {
                    Value::Missing
                } else if integer {
                    Self::parse_integer(c).map_or(Value::Missing, Value::Integer)
                } else if numeric {
                    Self::parse_number(c).map_or(Value::Missing, Value::Number)
                } else {
                    Value::Text(c.to_string())
                }
            })
            .collect()
    }
}

/// The `i64` a float is exactly equal to, if any.
fn exact_integer(n: f64) -> Option<i64> {
    // 2^63 is exactly representable; every float below it in magnitude
    // with no fraction converts without loss.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (n.fract() == 0.0 && (-LIMIT..LIMIT).contains(&n)).then(|| n as i64)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Integer(a), Value::Number(b)) | (Value::Number(b), Value::Integer(a)) => {
                exact_integer(*b) == Some(*a)
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Missing, Value::Missing) => true,
            _ => false,
        }
    }
}

// Numbers are never NaN, so equality is reflexive.
impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Whole floats hash as the integer they equal; this also folds -0.0
        // into 0.
        match self {
            Value::Integer(i) => (0u8, *i).hash(state),
            Value::Number(n) => match exact_integer(*n) {
                Some(i) => (0u8, i).hash(state),
                None => (1u8, n.to_bits()).hash(state),
            },
            Value::Text(s) => (2u8, s).hash(state),
            Value::Missing => 3u8.hash(state),
        }
    }
}

/// Renders numbers in shortest round-trip form. Whole floats print without a
/// fractional part (`80`), where a pandas float column would print `80.0`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Missing => f.write_str("nan"),
        }
    }
}
