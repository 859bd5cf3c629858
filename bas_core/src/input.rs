//! # Numeric Input Coercion
//!
//! Raw text arrives from the presentation layer one field at a time. Every
//! field is coerced with [`parse_number`] before a calculator body runs, and
//! anything that is not a plain finite number becomes `f64::NAN`.
//!
//! ## Example
//!
//! ```rust
//! use bas_core::input::{parse_number, RawInputs};
//!
//! assert_eq!(parse_number(" 12.5 "), 12.5);
//! assert!(parse_number("").is_nan());
//! assert!(parse_number("1,000").is_nan());
//!
//! let inputs = RawInputs::new().with("flow", "40").with("dp", "4");
//! assert_eq!(inputs.number("flow"), 40.0);
//! assert!(inputs.number("sg").is_nan());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calculators::Selector;
use crate::errors::{CalcError, CalcResult};

/// Parse raw text into a number, or `NaN` when it is not computable.
///
/// Surrounding whitespace is ignored. Empty strings, thousands separators,
/// trailing garbage and the literals `inf`/`nan` are all rejected.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => f64::NAN,
    }
}

/// Split a `name=value` assignment as typed on a command line.
pub fn parse_assignment(raw: &str) -> CalcResult<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(CalcError::malformed_assignment(raw)),
    }
}

/// Snapshot of the raw text for every field of one calculator.
///
/// Missing fields read as the empty string, so they coerce to `NaN` like any
/// other blank input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInputs(BTreeMap<String, String>);

impl RawInputs {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set the raw text of a field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Build a snapshot from `name=value` assignments.
    pub fn from_assignments<I, S>(assignments: I) -> CalcResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inputs = Self::new();
        for raw in assignments {
            let (name, value) = parse_assignment(raw.as_ref())?;
            inputs.set(name, value);
        }
        Ok(inputs)
    }

    /// Raw text of a field ("" when absent).
    pub fn raw(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    /// Coerced numeric value of a field.
    pub fn number(&self, name: &str) -> f64 {
        parse_number(self.raw(name))
    }

    /// Selected key for an enumerated field.
    ///
    /// An absent or blank selection resolves to the selector's declared
    /// default. Anything else is returned trimmed and ASCII-lowercased, so
    /// "4-20mA" and "4-20ma" pick the same option while unknown keys still
    /// reach the calculator to be rejected.
    pub fn selection(&self, selector: &Selector) -> String {
        let raw = self.raw(selector.name).trim();
        if raw.is_empty() {
            selector.default.to_string()
        } else {
            raw.to_ascii_lowercase()
        }
    }

    /// Iterate over (name, raw text) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// True when every value is a usable number.
pub fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_number("42"), 42.0);
        assert_eq!(parse_number("-3.5"), -3.5);
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number(".5"), 0.5);
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        assert_eq!(parse_number("  7.25\t"), 7.25);
        assert_eq!(parse_number("\n0\n"), 0.0);
    }

    #[test]
    fn test_parse_rejects_blank_and_garbage() {
        assert!(parse_number("").is_nan());
        assert!(parse_number("   ").is_nan());
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("12abc").is_nan());
        assert!(parse_number("1,000").is_nan());
        assert!(parse_number("1 000").is_nan());
    }

    #[test]
    fn test_parse_rejects_non_finite_literals() {
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("-infinity").is_nan());
        assert!(parse_number("NaN").is_nan());
        assert!(parse_number("1e400").is_nan());
    }

    #[test]
    fn test_missing_field_is_nan() {
        let inputs = RawInputs::new().with("a", "1");
        assert_eq!(inputs.raw("b"), "");
        assert!(inputs.number("b").is_nan());
    }

    #[test]
    fn test_assignments() {
        let inputs = RawInputs::from_assignments(["rh=50", "t = 75", "note="]).unwrap();
        assert_eq!(inputs.number("rh"), 50.0);
        assert_eq!(inputs.number("t"), 75.0);
        assert_eq!(inputs.raw("note"), "");

        let err = RawInputs::from_assignments(["=5"]).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_ASSIGNMENT");
        assert!(parse_assignment("nothing").is_err());
    }

    #[test]
    fn test_selection_falls_back_to_default_only_when_blank() {
        let selector = Selector {
            name: "class",
            label: "Thermal Mass",
            options: &["light", "medium", "heavy"],
            default: "medium",
        };
        assert_eq!(RawInputs::new().selection(&selector), "medium");
        assert_eq!(RawInputs::new().with("class", " ").selection(&selector), "medium");
        assert_eq!(RawInputs::new().with("class", "heavy").selection(&selector), "heavy");
        assert_eq!(RawInputs::new().with("class", "granite").selection(&selector), "granite");
        assert_eq!(RawInputs::new().with("class", " HEAVY ").selection(&selector), "heavy");
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let inputs = RawInputs::new().with("flow", "40");
        let json = serde_json::to_string(&inputs).unwrap();
        assert_eq!(json, r#"{"flow":"40"}"#);
    }
}
