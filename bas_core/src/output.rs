//! # Calculator Output
//!
//! Every calculator answers with a [`CalculatorResult`]: an ordered list of
//! labelled, unit-tagged, already-formatted strings. An output whose inputs
//! are not computable carries the empty string. There is no error variant.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "calculator": "valve-cv",
//!   "outputs": [
//!     { "key": "cv", "label": "Flow Coefficient", "value": "20.00", "unit": "Cv" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Format a value to a fixed number of decimals.
///
/// Returns the empty string for `NaN` and infinities, so a numeric domain
/// failure can never leak into displayed text.
///
/// ```rust
/// use bas_core::output::fixed;
///
/// assert_eq!(fixed(2.0 / 3.0, 2), "0.67");
/// assert_eq!(fixed(f64::NAN, 2), "");
/// assert_eq!(fixed(-0.0004, 1), "0.0");
/// ```
pub fn fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let text = format!("{:.*}", decimals, value);
    // "-0.00" -> "0.00"
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

/// A single named output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcOutput {
    /// Stable machine key (e.g. "grains_per_lb")
    pub key: String,
    /// Human label (e.g. "Humidity Ratio")
    pub label: String,
    /// Formatted value, or "" when not computable
    pub value: String,
    /// Unit tag (e.g. "gr/lb")
    pub unit: String,
}

impl CalcOutput {
    /// True when there is nothing to show.
    pub fn is_blank(&self) -> bool {
        self.value.is_empty()
    }
}

/// All outputs of one calculator evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorResult {
    /// Id of the calculator that produced this result
    pub calculator: String,
    /// Outputs in declaration order
    pub outputs: Vec<CalcOutput>,
}

impl CalculatorResult {
    /// Look up an output by key.
    pub fn get(&self, key: &str) -> Option<&CalcOutput> {
        self.outputs.iter().find(|o| o.key == key)
    }

    /// Formatted value of an output ("" when blank or unknown).
    pub fn value(&self, key: &str) -> &str {
        self.get(key).map(|o| o.value.as_str()).unwrap_or("")
    }

    /// Replace the unit of one output. Used when a selector decides the unit.
    pub fn with_unit(mut self, key: &str, unit: &str) -> Self {
        if let Some(output) = self.outputs.iter_mut().find(|o| o.key == key) {
            output.unit = unit.to_string();
        }
        self
    }

    /// True when every output is blank.
    pub fn is_blank(&self) -> bool {
        self.outputs.iter().all(CalcOutput::is_blank)
    }

    /// True when at least one output is blank.
    pub fn has_blank(&self) -> bool {
        self.outputs.iter().any(CalcOutput::is_blank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CalculatorResult {
        CalculatorResult {
            calculator: "ohms-law".to_string(),
            outputs: vec![
                CalcOutput {
                    key: "resistance".to_string(),
                    label: "Resistance".to_string(),
                    value: String::new(),
                    unit: "Ω".to_string(),
                },
                CalcOutput {
                    key: "power".to_string(),
                    label: "Power".to_string(),
                    value: "0.00".to_string(),
                    unit: "W".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_fixed_rounding() {
        assert_eq!(fixed(1.2, 3), "1.200");
        assert_eq!(fixed(101001.0, 0), "101001");
        assert_eq!(fixed(9.004, 2), "9.00");
    }

    #[test]
    fn test_fixed_blanks_non_finite() {
        assert_eq!(fixed(f64::INFINITY, 1), "");
        assert_eq!(fixed(f64::NEG_INFINITY, 1), "");
        assert_eq!(fixed(f64::NAN, 0), "");
    }

    #[test]
    fn test_fixed_normalizes_negative_zero() {
        assert_eq!(fixed(-0.0, 2), "0.00");
        assert_eq!(fixed(-0.001, 0), "0");
        assert_eq!(fixed(-0.6, 0), "-1");
    }

    #[test]
    fn test_result_lookup() {
        let result = sample();
        assert_eq!(result.value("power"), "0.00");
        assert_eq!(result.value("missing"), "");
        assert!(result.get("resistance").unwrap().is_blank());
        assert!(result.has_blank());
        assert!(!result.is_blank());
    }

    #[test]
    fn test_with_unit() {
        let result = sample().with_unit("power", "kW");
        assert_eq!(result.get("power").unwrap().unit, "kW");
    }
}
