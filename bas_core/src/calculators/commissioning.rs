//! # Commissioning
//!
//! Test-and-balance airflow verification and sensor calibration offsets.

use super::{guarded_div, Calculator, Category, InputField, OutputField};
use crate::input::{all_finite, RawInputs};
use crate::output::{fixed, CalculatorResult};

/// Allowed deviation from design airflow (%)
pub const AIRFLOW_TOLERANCE_PCT: f64 = 10.0;

pub static AIRFLOW_VERIFICATION: Calculator = Calculator {
    id: "airflow-verification",
    name: "Airflow Verification",
    category: Category::Commissioning,
    inputs: &[
        InputField::new("measured", "Measured Airflow", "CFM"),
        InputField::new("design", "Design Airflow", "CFM"),
    ],
    selector: None,
    outputs: &[
        OutputField::new("percent", "Percent of Design", "%"),
        OutputField::new("status", "Result", ""),
    ],
    formula: "percent = measured / design · 100; PASS within ±10 %",
    example: &[("measured", "950"), ("design", "1000")],
    compute: airflow_verification,
};

fn airflow_verification(inputs: &RawInputs) -> CalculatorResult {
    let measured = inputs.number("measured");
    let design = inputs.number("design");
    if !all_finite(&[measured, design]) || design == 0.0 {
        return AIRFLOW_VERIFICATION.blank();
    }
    let percent = guarded_div(measured, design) * 100.0;
    // Compare in CFM so 1100/1000 does not land at 110.00000000000001 %.
    let allowed = design.abs() * AIRFLOW_TOLERANCE_PCT / 100.0;
    let status = if (measured - design).abs() <= allowed {
        "PASS"
    } else {
        "FAIL"
    };
    AIRFLOW_VERIFICATION.fill([fixed(percent, 1), status.to_string()])
}

pub static SENSOR_OFFSET: Calculator = Calculator {
    id: "sensor-offset",
    name: "Sensor Calibration Offset",
    category: Category::Commissioning,
    inputs: &[
        InputField::new("reference", "Reference Reading", ""),
        InputField::new("measured", "Sensor Reading", ""),
    ],
    selector: None,
    outputs: &[
        OutputField::new("offset", "Offset to Apply", ""),
        OutputField::new("error_pct", "Sensor Error", "%"),
    ],
    formula: "offset = reference − measured; error = (measured − reference) / reference · 100",
    example: &[("reference", "72.0"), ("measured", "73.4")],
    compute: sensor_offset,
};

fn sensor_offset(inputs: &RawInputs) -> CalculatorResult {
    let reference = inputs.number("reference");
    let measured = inputs.number("measured");
    if !all_finite(&[reference, measured]) {
        return SENSOR_OFFSET.blank();
    }
    let error_pct = guarded_div(measured - reference, reference) * 100.0;
    SENSOR_OFFSET.fill([fixed(reference - measured, 2), fixed(error_pct, 2)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verify(measured: &str, design: &str) -> CalculatorResult {
        let inputs = RawInputs::new().with("measured", measured).with("design", design);
        AIRFLOW_VERIFICATION.evaluate(&inputs)
    }

    #[test]
    fn test_airflow_within_tolerance_passes() {
        let result = verify("950", "1000");
        assert_eq!(result.value("percent"), "95.0");
        assert_eq!(result.value("status"), "PASS");
        assert_eq!(verify("1100", "1000").value("status"), "PASS");
    }

    #[test]
    fn test_airflow_outside_tolerance_fails() {
        assert_eq!(verify("850", "1000").value("status"), "FAIL");
        assert_eq!(verify("1150", "1000").value("status"), "FAIL");
    }

    #[test]
    fn test_airflow_tolerance_boundaries_are_symmetric() {
        for (measured, design) in [("1100", "1000"), ("900", "1000"), ("110", "100"), ("90", "100"), ("2750", "2500")] {
            assert_eq!(verify(measured, design).value("status"), "PASS", "{}/{}", measured, design);
        }
        for (measured, design) in [("1101", "1000"), ("899", "1000"), ("110.1", "100")] {
            assert_eq!(verify(measured, design).value("status"), "FAIL", "{}/{}", measured, design);
        }
        assert_eq!(verify("1100", "1000").value("percent"), "110.0");
    }

    #[test]
    fn test_airflow_zero_design_blanks() {
        assert!(verify("500", "0").is_blank());
    }

    #[test]
    fn test_sensor_offset() {
        let inputs = RawInputs::new().with("reference", "72.0").with("measured", "73.4");
        let result = SENSOR_OFFSET.evaluate(&inputs);
        assert_eq!(result.value("offset"), "-1.40");
        assert_eq!(result.value("error_pct"), "1.94");
    }

    #[test]
    fn test_sensor_offset_zero_reference_blanks_error_only() {
        let inputs = RawInputs::new().with("reference", "0").with("measured", "0.3");
        let result = SENSOR_OFFSET.evaluate(&inputs);
        assert_eq!(result.value("offset"), "-0.30");
        assert_eq!(result.value("error_pct"), "");
    }
}
