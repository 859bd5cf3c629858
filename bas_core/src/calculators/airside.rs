//! # Airside
//!
//! Air handler calculations: mixed air temperature, economizer changeover
//! enthalpy, duct airflow from a velocity traverse, and sensible load.

use super::{Calculator, Category, InputField, OutputField};
use crate::input::{all_finite, RawInputs};
use crate::models::psychro::MoistAir;
use crate::output::{fixed, CalculatorResult};
use crate::units::Fahrenheit;

/// Sensible heat factor for standard air (BTU/h per CFM·°F)
pub const SENSIBLE_HEAT_FACTOR: f64 = 1.08;

/// BTU/h in one ton of refrigeration
pub const BTUH_PER_TON: f64 = 12_000.0;

pub static MIXED_AIR: Calculator = Calculator {
    id: "mixed-air",
    name: "Mixed Air Temperature",
    category: Category::Airside,
    inputs: &[
        InputField::new("oa_temp", "Outside Air Temperature", "°F"),
        InputField::new("ra_temp", "Return Air Temperature", "°F"),
        InputField::new("oa_pct", "Outside Air Damper", "%"),
    ],
    selector: None,
    outputs: &[OutputField::new("mat", "Mixed Air Temperature", "°F")],
    formula: "MAT = OAT · (OA% / 100) + RAT · (1 − OA% / 100)",
    example: &[("oa_temp", "40"), ("ra_temp", "72"), ("oa_pct", "25")],
    compute: mixed_air,
};

fn mixed_air(inputs: &RawInputs) -> CalculatorResult {
    let oa = inputs.number("oa_temp");
    let ra = inputs.number("ra_temp");
    let pct = inputs.number("oa_pct");
    if !all_finite(&[oa, ra, pct]) {
        return MIXED_AIR.blank();
    }
    let fraction = pct / 100.0;
    let mat = oa * fraction + ra * (1.0 - fraction);
    MIXED_AIR.fill([fixed(mat, 1)])
}

pub static ECONOMIZER_ENTHALPY: Calculator = Calculator {
    id: "economizer-enthalpy",
    name: "Economizer Enthalpy",
    category: Category::Airside,
    inputs: &[
        InputField::new("dry_bulb", "Outside Air Dry Bulb", "°F"),
        InputField::new("rh", "Outside Air Relative Humidity", "%"),
    ],
    selector: None,
    outputs: &[OutputField::new("enthalpy", "Outside Air Enthalpy", "BTU/lb")],
    formula: "h = 0.24·t + W·(1061 + 0.444·t)",
    example: &[("dry_bulb", "65"), ("rh", "60")],
    compute: economizer_enthalpy,
};

fn economizer_enthalpy(inputs: &RawInputs) -> CalculatorResult {
    let t = inputs.number("dry_bulb");
    let rh = inputs.number("rh");
    if !all_finite(&[t, rh]) {
        return ECONOMIZER_ENTHALPY.blank();
    }
    let air = MoistAir::at(Fahrenheit(t), rh);
    ECONOMIZER_ENTHALPY.fill([fixed(air.enthalpy, 2)])
}

pub static DUCT_AIRFLOW: Calculator = Calculator {
    id: "duct-airflow",
    name: "Duct Airflow",
    category: Category::Airside,
    inputs: &[
        InputField::new("velocity", "Average Velocity", "FPM"),
        InputField::new("width", "Duct Width", "in"),
        InputField::new("height", "Duct Height", "in"),
    ],
    selector: None,
    outputs: &[
        OutputField::new("area", "Free Area", "ft²"),
        OutputField::new("cfm", "Airflow", "CFM"),
    ],
    formula: "CFM = FPM · (W · H / 144)",
    example: &[("velocity", "800"), ("width", "24"), ("height", "12")],
    compute: duct_airflow,
};

fn duct_airflow(inputs: &RawInputs) -> CalculatorResult {
    let velocity = inputs.number("velocity");
    let width = inputs.number("width");
    let height = inputs.number("height");
    if !all_finite(&[velocity, width, height]) {
        return DUCT_AIRFLOW.blank();
    }
    let area = width * height / 144.0;
    DUCT_AIRFLOW.fill([fixed(area, 2), fixed(velocity * area, 0)])
}

pub static SENSIBLE_HEAT: Calculator = Calculator {
    id: "sensible-heat",
    name: "Sensible Heat",
    category: Category::Airside,
    inputs: &[
        InputField::new("cfm", "Airflow", "CFM"),
        InputField::new("delta_t", "Temperature Difference", "°F"),
    ],
    selector: None,
    outputs: &[
        OutputField::new("btuh", "Sensible Load", "BTU/h"),
        OutputField::new("tons", "Sensible Load", "tons"),
    ],
    formula: "Q = 1.08 · CFM · ΔT",
    example: &[("cfm", "2000"), ("delta_t", "20")],
    compute: sensible_heat,
};

fn sensible_heat(inputs: &RawInputs) -> CalculatorResult {
    let cfm = inputs.number("cfm");
    let delta_t = inputs.number("delta_t");
    if !all_finite(&[cfm, delta_t]) {
        return SENSIBLE_HEAT.blank();
    }
    let btuh = SENSIBLE_HEAT_FACTOR * cfm * delta_t;
    SENSIBLE_HEAT.fill([fixed(btuh, 0), fixed(btuh / BTUH_PER_TON, 2)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_air_weighted_average() {
        let inputs = RawInputs::new()
            .with("oa_temp", "40")
            .with("ra_temp", "72")
            .with("oa_pct", "25");
        assert_eq!(MIXED_AIR.evaluate(&inputs).value("mat"), "64.0");
    }

    #[test]
    fn test_mixed_air_damper_extremes() {
        let closed = RawInputs::new().with("oa_temp", "10").with("ra_temp", "70").with("oa_pct", "0");
        assert_eq!(MIXED_AIR.evaluate(&closed).value("mat"), "70.0");
        let open = closed.with("oa_pct", "100");
        assert_eq!(MIXED_AIR.evaluate(&open).value("mat"), "10.0");
    }

    #[test]
    fn test_economizer_enthalpy_comfort_point() {
        let inputs = RawInputs::new().with("dry_bulb", "75").with("rh", "50");
        let value: f64 = ECONOMIZER_ENTHALPY.evaluate(&inputs).value("enthalpy").parse().unwrap();
        assert!((value - 28.1).abs() < 0.2, "got {}", value);
    }

    #[test]
    fn test_duct_airflow() {
        let inputs = RawInputs::new().with("velocity", "800").with("width", "24").with("height", "12");
        let result = DUCT_AIRFLOW.evaluate(&inputs);
        assert_eq!(result.value("area"), "2.00");
        assert_eq!(result.value("cfm"), "1600");
    }

    #[test]
    fn test_sensible_heat() {
        let inputs = RawInputs::new().with("cfm", "2000").with("delta_t", "20");
        let result = SENSIBLE_HEAT.evaluate(&inputs);
        assert_eq!(result.value("btuh"), "43200");
        assert_eq!(result.value("tons"), "3.60");
    }
}
