//! # Energy
//!
//! Operating cost and fan affinity-law savings.

use super::{Calculator, Category, InputField, OutputField};
use crate::input::{all_finite, RawInputs};
use crate::output::{fixed, CalculatorResult};

pub static ENERGY_COST: Calculator = Calculator {
    id: "energy-cost",
    name: "Energy Cost",
    category: Category::Energy,
    inputs: &[
        InputField::new("kw", "Average Demand", "kW"),
        InputField::new("hours", "Operating Hours", "h"),
        InputField::new("rate", "Utility Rate", "$/kWh"),
    ],
    selector: None,
    outputs: &[
        OutputField::new("kwh", "Energy", "kWh"),
        OutputField::new("cost", "Cost", "$"),
    ],
    formula: "kWh = kW · hours; cost = kWh · rate",
    example: &[("kw", "15"), ("hours", "3120"), ("rate", "0.12")],
    compute: energy_cost,
};

fn energy_cost(inputs: &RawInputs) -> CalculatorResult {
    let kw = inputs.number("kw");
    let hours = inputs.number("hours");
    let rate = inputs.number("rate");
    if !all_finite(&[kw, hours, rate]) {
        return ENERGY_COST.blank();
    }
    let kwh = kw * hours;
    ENERGY_COST.fill([fixed(kwh, 0), fixed(kwh * rate, 2)])
}

/// Fraction of full-speed power drawn at a speed fraction (cube law).
pub fn affinity_power_fraction(speed_fraction: f64) -> f64 {
    speed_fraction.powi(3)
}

pub static FAN_AFFINITY: Calculator = Calculator {
    id: "fan-affinity",
    name: "Fan Affinity Savings",
    category: Category::Energy,
    inputs: &[
        InputField::new("base_kw", "Full Speed Power", "kW"),
        InputField::new("speed_pct", "Reduced Speed", "%"),
    ],
    selector: None,
    outputs: &[
        OutputField::new("kw", "Reduced Speed Power", "kW"),
        OutputField::new("savings_pct", "Power Savings", "%"),
    ],
    formula: "P₂ = P₁ · (N₂ / N₁)³",
    example: &[("base_kw", "10"), ("speed_pct", "80")],
    compute: fan_affinity,
};

fn fan_affinity(inputs: &RawInputs) -> CalculatorResult {
    let base_kw = inputs.number("base_kw");
    let speed_pct = inputs.number("speed_pct");
    if !all_finite(&[base_kw, speed_pct]) {
        return FAN_AFFINITY.blank();
    }
    let fraction = affinity_power_fraction(speed_pct / 100.0);
    FAN_AFFINITY.fill([fixed(base_kw * fraction, 2), fixed((1.0 - fraction) * 100.0, 1)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_cost() {
        let inputs = RawInputs::new().with("kw", "15").with("hours", "3120").with("rate", "0.12");
        let result = ENERGY_COST.evaluate(&inputs);
        assert_eq!(result.value("kwh"), "46800");
        assert_eq!(result.value("cost"), "5616.00");
    }

    #[test]
    fn test_fan_affinity_cube_law() {
        let inputs = RawInputs::new().with("base_kw", "10").with("speed_pct", "80");
        let result = FAN_AFFINITY.evaluate(&inputs);
        assert_eq!(result.value("kw"), "5.12");
        assert_eq!(result.value("savings_pct"), "48.8");
    }

    #[test]
    fn test_fan_affinity_full_speed_saves_nothing() {
        let inputs = RawInputs::new().with("base_kw", "7.5").with("speed_pct", "100");
        let result = FAN_AFFINITY.evaluate(&inputs);
        assert_eq!(result.value("kw"), "7.50");
        assert_eq!(result.value("savings_pct"), "0.0");
    }
}
