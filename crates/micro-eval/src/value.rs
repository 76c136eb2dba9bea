//! Runtime values.

use micro_types::ast::{format_number, BinOp};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A dynamically typed variable value.
///
/// Serializes as a plain JSON number or string. Infinities and `NaN`, which
/// JSON cannot hold, are written as `{"number": "Infinity"}` and friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(#[serde(with = "number_repr")] f64),
    Text(String),
}

mod number_repr {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Finite(f64),
        NonFinite { number: NonFinite },
    }

    #[derive(Serialize, Deserialize)]
    enum NonFinite {
        Infinity,
        #[serde(rename = "-Infinity")]
        NegInfinity,
        NaN,
    }

    pub fn serialize<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = if n.is_finite() {
            Repr::Finite(*n)
        } else if n.is_nan() {
            Repr::NonFinite { number: NonFinite::NaN }
        } else if *n > 0.0 {
            Repr::NonFinite { number: NonFinite::Infinity }
        } else {
            Repr::NonFinite { number: NonFinite::NegInfinity }
        };
        repr.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Finite(n) => n,
            Repr::NonFinite { number } => match number {
                NonFinite::Infinity => f64::INFINITY,
                NonFinite::NegInfinity => f64::NEG_INFINITY,
                NonFinite::NaN => f64::NAN,
            },
        })
    }
}

impl Value {
    /// Value of a variable that was never assigned.
    pub const ZERO: Value = Value::Number(0.0);

    /// Non-zero numbers and non-empty text are true; `NaN` is false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// Numeric view of the value. Blank text is `0`, unparsable text `NaN`.
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
        }
    }

    fn from_bool(b: bool) -> Self {
        Self::Number(if b { 1.0 } else { 0.0 })
    }

    /// Apply a binary operator.
    ///
    /// `+` concatenates when either side is text; the other arithmetic
    /// operators work on the numeric view. Comparisons and logic yield
    /// `1` or `0`.
    pub fn apply(op: BinOp, left: &Value, right: &Value) -> Value {
        match op {
            BinOp::Add => match (left, right) {
                (Self::Number(a), Self::Number(b)) => Self::Number(a + b),
                _ => Self::Text(format!("{left}{right}")),
            },
            BinOp::Sub => Self::Number(left.as_number() - right.as_number()),
            BinOp::Mul => Self::Number(left.as_number() * right.as_number()),
            BinOp::Div => Self::Number(left.as_number() / right.as_number()),
            BinOp::Eq => Self::from_bool(left.strict_eq(right)),
            BinOp::NotEq => Self::from_bool(!left.strict_eq(right)),
            BinOp::Less => Self::from_bool(left.compare(right) == Some(Ordering::Less)),
            BinOp::Greater => Self::from_bool(left.compare(right) == Some(Ordering::Greater)),
            BinOp::LessEq => Self::from_bool(matches!(
                left.compare(right),
                Some(Ordering::Less | Ordering::Equal)
            )),
            BinOp::GreaterEq => Self::from_bool(matches!(
                left.compare(right),
                Some(Ordering::Greater | Ordering::Equal)
            )),
            BinOp::And => Self::from_bool(left.is_truthy() && right.is_truthy()),
            BinOp::Or => Self::from_bool(left.is_truthy() || right.is_truthy()),
        }
    }

    /// Equality without coercion: values of different types are never equal.
    fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }

    /// Ordering for relational operators. Text compares lexicographically
    /// with text; mixed pairs compare numerically. `None` when unordered.
    fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => self.as_number().partial_cmp(&other.as_number()),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    fn text(s: &str) -> Value {
        Value::from(s)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(Value::apply(BinOp::Add, &num(2.0), &num(3.0)), num(5.0));
        assert_eq!(Value::apply(BinOp::Sub, &num(2.0), &num(3.0)), num(-1.0));
        assert_eq!(Value::apply(BinOp::Mul, &num(2.0), &num(3.0)), num(6.0));
        assert_eq!(Value::apply(BinOp::Div, &num(3.0), &num(2.0)), num(1.5));
    }

    #[test]
    fn test_division_by_zero_follows_ieee() {
        assert_eq!(Value::apply(BinOp::Div, &num(1.0), &num(0.0)), num(f64::INFINITY));
        let Value::Number(n) = Value::apply(BinOp::Div, &num(0.0), &num(0.0)) else {
            panic!("expected number");
        };
        assert!(n.is_nan());
    }

    #[test]
    fn test_plus_concatenates_text() {
        assert_eq!(Value::apply(BinOp::Add, &text("n="), &num(4.0)), text("n=4"));
        assert_eq!(Value::apply(BinOp::Add, &num(1.5), &text("x")), text("1.5x"));
    }

    #[test]
    fn test_comparisons() {
        assert!(Value::apply(BinOp::Less, &num(1.0), &num(2.0)).is_truthy());
        assert!(Value::apply(BinOp::GreaterEq, &num(2.0), &num(2.0)).is_truthy());
        assert!(Value::apply(BinOp::Less, &text("abc"), &text("abd")).is_truthy());
        assert!(Value::apply(BinOp::Less, &text("2"), &num(10.0)).is_truthy());
        assert!(!Value::apply(BinOp::Less, &text("x"), &num(10.0)).is_truthy());
        assert!(!Value::apply(BinOp::Greater, &text("x"), &num(10.0)).is_truthy());
    }

    #[test]
    fn test_equality_is_strict() {
        assert!(Value::apply(BinOp::Eq, &num(3.0), &num(3.0)).is_truthy());
        assert!(!Value::apply(BinOp::Eq, &text("3"), &num(3.0)).is_truthy());
        assert!(Value::apply(BinOp::NotEq, &text("3"), &num(3.0)).is_truthy());
    }

    #[test]
    fn test_truthiness_and_logic() {
        assert!(!Value::ZERO.is_truthy());
        assert!(!text("").is_truthy());
        assert!(!num(f64::NAN).is_truthy());
        assert!(Value::apply(BinOp::Or, &num(0.0), &text("y")).is_truthy());
        assert!(!Value::apply(BinOp::And, &num(1.0), &num(0.0)).is_truthy());
    }

    #[test]
    fn test_display_and_json() {
        assert_eq!(num(3.0).to_string(), "3");
        assert_eq!(text("hi").to_string(), "hi");
        assert_eq!(serde_json::to_string(&num(2.5)).unwrap(), "2.5");
        assert_eq!(serde_json::to_string(&text("a")).unwrap(), "\"a\"");
        let back: Value = serde_json::from_str("7").unwrap();
        assert_eq!(back, num(7.0));
    }

    #[test]
    fn test_non_finite_numbers_round_trip() {
        for n in [f64::INFINITY, f64::NEG_INFINITY] {
            let json = serde_json::to_string(&num(n)).unwrap();
            let back: Value = serde_json::from_str(&json).unwrap();
            assert_eq!(back, num(n));
        }
        assert_eq!(
            serde_json::to_string(&num(f64::INFINITY)).unwrap(),
            r#"{"number":"Infinity"}"#
        );
        let json = serde_json::to_string(&num(f64::NAN)).unwrap();
        assert_eq!(json, r#"{"number":"NaN"}"#);
        let Value::Number(n) = serde_json::from_str(&json).unwrap() else {
            panic!("expected number");
        };
        assert!(n.is_nan());
    }

    #[test]
    fn test_text_that_looks_special_stays_text() {
        let json = serde_json::to_string(&text("Infinity")).unwrap();
        assert_eq!(json, "\"Infinity\"");
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, text("Infinity"));
    }
}
