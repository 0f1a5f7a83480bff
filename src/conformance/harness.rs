//! Differential test harness comparing this parser with `serde_json`.

use crate::error::ErrorCode;
use crate::json::{parse_with_limits, JsonValue, Limits};

/// Result of a differential test.
#[derive(Debug)]
pub enum DiffResult {
    /// Both parsers accepted the input and produced equivalent trees.
    Match,
    /// Both parsers accepted the input but the trees differ.
    Mismatch {
        /// Our tree, debug-formatted.
        ours: String,
        /// The reference tree, debug-formatted.
        reference: String,
    },
    /// Both parsers rejected the input.
    BothRejected {
        /// Our error.
        error: ErrorCode,
    },
    /// Only this parser rejected the input.
    OursRejected {
        /// Our error.
        error: ErrorCode,
    },
    /// Only `serde_json` rejected the input.
    ReferenceRejected {
        /// The reference error message.
        reason: String,
    },
}

impl DiffResult {
    /// Check if both parsers agree, on a tree or on rejection.
    pub fn is_agreement(&self) -> bool {
        matches!(self, Self::Match | Self::BothRejected { .. })
    }

    /// Check if the result is a match.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Differential harness running both parsers over the same text.
#[derive(Debug, Default)]
pub struct DiffTestHarness {
    limits: Limits,
}

impl DiffTestHarness {
    /// Create a harness parsing with the given limits.
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// Parse `input` with both parsers and compare the outcomes.
    pub fn compare(&self, input: &str) -> DiffResult {
        let ours = parse_with_limits(input.as_bytes(), self.limits);
        let reference = serde_json::from_str::<serde_json::Value>(input);

        match (ours, reference) {
            (Ok(ours), Ok(reference)) => {
                if equivalent(&ours, &reference) {
                    DiffResult::Match
                } else {
                    DiffResult::Mismatch {
                        ours: format!("{:?}", ours),
                        reference: format!("{:?}", reference),
                    }
                }
            }
            (Err(error), Err(_)) => DiffResult::BothRejected { error },
            (Err(error), Ok(_)) => DiffResult::OursRejected { error },
            (Ok(_), Err(e)) => DiffResult::ReferenceRejected {
                reason: e.to_string(),
            },
        }
    }
}

/// Structural equivalence between a parsed value and a `serde_json` value.
///
/// Arrays compare element by element in order, objects key by key. Numbers
/// compare as `f64` within one relative epsilon: without its
/// `float_roundtrip` feature, `serde_json` converts decimal text to `f64`
/// with a fast path that may land one ulp away from the correctly rounded
/// value this crate produces.
pub fn equivalent(ours: &JsonValue, reference: &serde_json::Value) -> bool {
    use serde_json::Value;

    match (ours, reference) {
        (JsonValue::Null, Value::Null) => true,
        (JsonValue::Bool(a), Value::Bool(b)) => a == b,
        (JsonValue::Number(a), Value::Number(b)) => b.as_f64().is_some_and(|b| numbers_close(*a, b)),
        (JsonValue::String(a), Value::String(b)) => a == b,
        (JsonValue::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| equivalent(x, y))
        }
        (JsonValue::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, value)| b.get(key).is_some_and(|other| equivalent(value, other)))
        }
        _ => false,
    }
}

/// Equal, or at most one ulp-scaled epsilon apart.
fn numbers_close(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equivalent_trees() {
        let ours = crate::json::parse_str(r#"{"b": [1, 2.5, null], "a": {"x": "y"}}"#).unwrap();
        let reference = json!({"a": {"x": "y"}, "b": [1, 2.5, null]});
        assert!(equivalent(&ours, &reference));
    }

    #[test]
    fn test_number_tolerance_is_one_ulp() {
        assert!(numbers_close(0.1, 0.1));
        assert!(numbers_close(1.0, 1.0 + f64::EPSILON));
        assert!(numbers_close(1e300, f64::from_bits(1e300_f64.to_bits() + 1)));

        assert!(!numbers_close(1.0, 1.0 + 4.0 * f64::EPSILON));
        assert!(!numbers_close(0.1, 0.2));
        assert!(!numbers_close(1.0, -1.0));
    }

    #[test]
    fn test_array_order_matters() {
        let ours = crate::json::parse_str("[1, 2]").unwrap();
        assert!(!equivalent(&ours, &json!([2, 1])));
    }

    #[test]
    fn test_type_difference() {
        let ours = crate::json::parse_str(r#""1""#).unwrap();
        assert!(!equivalent(&ours, &json!(1)));
    }

    #[test]
    fn test_compare_outcomes() {
        let harness = DiffTestHarness::default();
        assert!(harness.compare(r#"{"a": [true, false]}"#).is_match());
        assert!(matches!(
            harness.compare("[1,]"),
            DiffResult::BothRejected {
                error: ErrorCode::E113_TrailingComma(3)
            }
        ));
        // permissive number scanning accepts what the reference rejects
        assert!(matches!(
            harness.compare("01"),
            DiffResult::ReferenceRejected { .. }
        ));
    }
}
