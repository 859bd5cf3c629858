//! # Scheduling
//!
//! Optimal start lead time and annual equipment runtime.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Calculator, Category, InputField, OutputField, Selector};
use crate::input::{all_finite, RawInputs};
use crate::output::{fixed, CalculatorResult};

/// Weeks per year used for runtime totals
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Building thermal mass class for optimal start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThermalMass {
    Light,
    Medium,
    Heavy,
}

impl ThermalMass {
    /// Recovery minutes per °F of setback
    pub fn minutes_per_degree(self) -> f64 {
        match self {
            ThermalMass::Light => 3.0,
            ThermalMass::Medium => 5.0,
            ThermalMass::Heavy => 8.0,
        }
    }
}

impl FromStr for ThermalMass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThermalMass::Light),
            "medium" => Ok(ThermalMass::Medium),
            "heavy" => Ok(ThermalMass::Heavy),
            _ => Err(()),
        }
    }
}

const MASS: Selector = Selector {
    name: "mass",
    label: "Thermal Mass",
    options: &["light", "medium", "heavy"],
    default: "medium",
};

pub static OPTIMAL_START: Calculator = Calculator {
    id: "optimal-start",
    name: "Optimal Start",
    category: Category::Scheduling,
    inputs: &[InputField::new("delta_t", "Setback Recovery", "°F")],
    selector: Some(MASS),
    outputs: &[OutputField::new("minutes", "Start Lead Time", "min")],
    formula: "lead = ΔT · factor(light 3, medium 5, heavy 8)",
    example: &[("delta_t", "6"), ("mass", "heavy")],
    compute: optimal_start,
};

fn optimal_start(inputs: &RawInputs) -> CalculatorResult {
    let Ok(mass) = inputs.selection(&MASS).parse::<ThermalMass>() else {
        return OPTIMAL_START.blank();
    };
    let delta_t = inputs.number("delta_t");
    if !delta_t.is_finite() {
        return OPTIMAL_START.blank();
    }
    OPTIMAL_START.fill([fixed(delta_t * mass.minutes_per_degree(), 0)])
}

pub static ANNUAL_RUNTIME: Calculator = Calculator {
    id: "annual-runtime",
    name: "Annual Runtime",
    category: Category::Scheduling,
    inputs: &[
        InputField::new("hours_per_day", "Occupied Hours per Day", "h"),
        InputField::new("days_per_week", "Occupied Days per Week", "d"),
    ],
    selector: None,
    outputs: &[
        OutputField::new("weekly", "Weekly Runtime", "h/wk"),
        OutputField::new("annual", "Annual Runtime", "h/yr"),
    ],
    formula: "annual = hours/day · days/week · 52",
    example: &[("hours_per_day", "12"), ("days_per_week", "5")],
    compute: annual_runtime,
};

fn annual_runtime(inputs: &RawInputs) -> CalculatorResult {
    let hours = inputs.number("hours_per_day");
    let days = inputs.number("days_per_week");
    if !all_finite(&[hours, days]) {
        return ANNUAL_RUNTIME.blank();
    }
    let weekly = hours * days;
    ANNUAL_RUNTIME.fill([fixed(weekly, 1), fixed(weekly * WEEKS_PER_YEAR, 0)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_start_factors() {
        for (mass, expected) in [("light", "30"), ("medium", "50"), ("heavy", "80")] {
            let inputs = RawInputs::new().with("delta_t", "10").with("mass", mass);
            assert_eq!(OPTIMAL_START.evaluate(&inputs).value("minutes"), expected, "{}", mass);
        }
    }

    #[test]
    fn test_optimal_start_defaults_to_medium() {
        let inputs = RawInputs::new().with("delta_t", "4");
        assert_eq!(OPTIMAL_START.evaluate(&inputs).value("minutes"), "20");
    }

    #[test]
    fn test_optimal_start_unknown_mass_blanks() {
        let inputs = RawInputs::new().with("delta_t", "4").with("mass", "granite");
        assert!(OPTIMAL_START.evaluate(&inputs).is_blank());
    }

    #[test]
    fn test_annual_runtime() {
        let inputs = RawInputs::new().with("hours_per_day", "12").with("days_per_week", "5");
        let result = ANNUAL_RUNTIME.evaluate(&inputs);
        assert_eq!(result.value("weekly"), "60.0");
        assert_eq!(result.value("annual"), "3120");
    }
}
