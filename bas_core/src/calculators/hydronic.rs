//! # Hydronic
//!
//! Control valve sizing, coil water flow and pump brake horsepower.

use super::{guarded_div, Calculator, Category, InputField, OutputField};
use crate::input::{all_finite, RawInputs};
use crate::output::{fixed, CalculatorResult};

/// BTU/h per GPM·°F for water (8.33 lb/gal · 60 min/h)
pub const WATER_HEAT_FACTOR: f64 = 500.0;

/// GPM·ft per water horsepower
pub const PUMP_HP_CONSTANT: f64 = 3960.0;

/// Kilowatts per horsepower
pub const KW_PER_HP: f64 = 0.7457;

pub static VALVE_CV: Calculator = Calculator {
    id: "valve-cv",
    name: "Valve Cv",
    category: Category::Hydronic,
    inputs: &[
        InputField::new("flow", "Flow", "GPM"),
        InputField::new("dp", "Pressure Drop", "psi"),
        InputField::new("sg", "Specific Gravity", ""),
    ],
    selector: None,
    outputs: &[OutputField::new("cv", "Flow Coefficient", "Cv")],
    formula: "Cv = Q / √(ΔP / SG)",
    example: &[("flow", "40"), ("dp", "4"), ("sg", "1")],
    compute: valve_cv,
};

/// `Q / √(ΔP / SG)`; `NaN` when the root argument is zero or negative.
pub fn flow_coefficient(flow_gpm: f64, dp_psi: f64, specific_gravity: f64) -> f64 {
    let ratio = guarded_div(dp_psi, specific_gravity);
    if !(ratio > 0.0) {
        return f64::NAN;
    }
    flow_gpm / ratio.sqrt()
}

fn valve_cv(inputs: &RawInputs) -> CalculatorResult {
    let flow = inputs.number("flow");
    let dp = inputs.number("dp");
    let sg = inputs.number("sg");
    if !all_finite(&[flow, dp, sg]) {
        return VALVE_CV.blank();
    }
    VALVE_CV.fill([fixed(flow_coefficient(flow, dp, sg), 2)])
}

pub static HYDRONIC_FLOW: Calculator = Calculator {
    id: "hydronic-flow",
    name: "Hydronic Flow",
    category: Category::Hydronic,
    inputs: &[
        InputField::new("btuh", "Load", "BTU/h"),
        InputField::new("delta_t", "Water Temperature Difference", "°F"),
    ],
    selector: None,
    outputs: &[OutputField::new("gpm", "Water Flow", "GPM")],
    formula: "GPM = BTU/h / (500 · ΔT)",
    example: &[("btuh", "120000"), ("delta_t", "20")],
    compute: hydronic_flow,
};

fn hydronic_flow(inputs: &RawInputs) -> CalculatorResult {
    let btuh = inputs.number("btuh");
    let delta_t = inputs.number("delta_t");
    if !all_finite(&[btuh, delta_t]) {
        return HYDRONIC_FLOW.blank();
    }
    let gpm = guarded_div(btuh, WATER_HEAT_FACTOR * delta_t);
    HYDRONIC_FLOW.fill([fixed(gpm, 1)])
}

pub static PUMP_POWER: Calculator = Calculator {
    id: "pump-power",
    name: "Pump Power",
    category: Category::Hydronic,
    inputs: &[
        InputField::new("gpm", "Flow", "GPM"),
        InputField::new("head", "Total Head", "ft"),
        InputField::new("efficiency", "Pump Efficiency", "%"),
    ],
    selector: None,
    outputs: &[
        OutputField::new("bhp", "Brake Horsepower", "hp"),
        OutputField::new("kw", "Shaft Power", "kW"),
    ],
    formula: "BHP = GPM · Head / (3960 · η)",
    example: &[("gpm", "100"), ("head", "60"), ("efficiency", "70")],
    compute: pump_power,
};

fn pump_power(inputs: &RawInputs) -> CalculatorResult {
    let gpm = inputs.number("gpm");
    let head = inputs.number("head");
    let efficiency = inputs.number("efficiency");
    if !all_finite(&[gpm, head, efficiency]) {
        return PUMP_POWER.blank();
    }
    let bhp = guarded_div(gpm * head, PUMP_HP_CONSTANT * efficiency / 100.0);
    PUMP_POWER.fill([fixed(bhp, 2), fixed(bhp * KW_PER_HP, 2)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cv(flow: &str, dp: &str, sg: &str) -> String {
        let inputs = RawInputs::new().with("flow", flow).with("dp", dp).with("sg", sg);
        VALVE_CV.evaluate(&inputs).value("cv").to_string()
    }

    #[test]
    fn test_valve_cv() {
        assert_eq!(cv("40", "4", "1"), "20.00");
        assert_eq!(cv("10", "1", "1.2"), "10.95");
    }

    #[test]
    fn test_valve_cv_zero_dp_blanks() {
        assert_eq!(cv("40", "0", "1"), "");
        assert_eq!(cv("40", "-4", "1"), "");
        assert_eq!(cv("40", "4", "0"), "");
    }

    #[test]
    fn test_cv_linear_in_flow() {
        let base = flow_coefficient(10.0, 5.0, 1.1);
        for k in [2.0, 3.5, 10.0] {
            assert_relative_eq!(flow_coefficient(10.0 * k, 5.0, 1.1), base * k, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_hydronic_flow() {
        let inputs = RawInputs::new().with("btuh", "120000").with("delta_t", "20");
        assert_eq!(HYDRONIC_FLOW.evaluate(&inputs).value("gpm"), "12.0");
        let no_dt = inputs.with("delta_t", "0");
        assert_eq!(HYDRONIC_FLOW.evaluate(&no_dt).value("gpm"), "");
    }

    #[test]
    fn test_pump_power() {
        let inputs = RawInputs::new().with("gpm", "100").with("head", "60").with("efficiency", "70");
        let result = PUMP_POWER.evaluate(&inputs);
        assert_eq!(result.value("bhp"), "2.16");
        assert_eq!(result.value("kw"), "1.61");
    }

    #[test]
    fn test_pump_power_zero_efficiency_blanks() {
        let inputs = RawInputs::new().with("gpm", "100").with("head", "60").with("efficiency", "0");
        assert!(PUMP_POWER.evaluate(&inputs).is_blank());
    }
}
