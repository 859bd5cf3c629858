//! # Unit Conversion
//!
//! Each converter turns the input into its family's canonical unit once and
//! then fans out to every unit from that canonical value. Results are never
//! chained from one target unit to the next, so rounding does not compound.
//!
//! The unit tables live in [`crate::units`].

use super::{Calculator, Category, InputField, OutputField, Selector};
use crate::input::RawInputs;
use crate::output::{fixed, CalculatorResult};
use crate::units::{FlowUnit, PressureUnit, TemperatureUnit};

/// Canonical value to every unit in `units`, each at its own precision.
fn fan_out<U: Copy>(
    canonical: f64,
    units: &[U],
    from_canonical: impl Fn(U, f64) -> f64,
    decimals: impl Fn(U) -> usize,
) -> Vec<String> {
    units
        .iter()
        .map(|&unit| fixed(from_canonical(unit, canonical), decimals(unit)))
        .collect()
}

const VALUE: &[InputField] = &[InputField::new("value", "Value", "")];

// ============================================================================
// Pressure
// ============================================================================

const PRESSURE_FROM: Selector = Selector {
    name: "from",
    label: "From Unit",
    options: PressureUnit::KEYS,
    default: "in_wc",
};

pub static PRESSURE_CONVERT: Calculator = Calculator {
    id: "pressure-convert",
    name: "Pressure Conversion",
    category: Category::UnitConversion,
    inputs: VALUE,
    selector: Some(PRESSURE_FROM),
    outputs: &[
        OutputField::new("in_wc", "Inches of Water", "in WC"),
        OutputField::new("pa", "Pascals", "Pa"),
        OutputField::new("kpa", "Kilopascals", "kPa"),
        OutputField::new("psi", "Pounds per Square Inch", "psi"),
        OutputField::new("in_hg", "Inches of Mercury", "in Hg"),
        OutputField::new("mbar", "Millibar", "mbar"),
    ],
    formula: "Pa = value · factor(from); out = Pa / factor(to)",
    example: &[("value", "1"), ("from", "in_wc")],
    compute: pressure_convert,
};

fn pressure_convert(inputs: &RawInputs) -> CalculatorResult {
    let Ok(from) = inputs.selection(&PRESSURE_FROM).parse::<PressureUnit>() else {
        return PRESSURE_CONVERT.blank();
    };
    let value = inputs.number("value");
    if !value.is_finite() {
        return PRESSURE_CONVERT.blank();
    }
    PRESSURE_CONVERT.fill(fan_out(
        from.to_canonical(value),
        PressureUnit::ALL,
        PressureUnit::from_canonical,
        PressureUnit::decimals,
    ))
}

// ============================================================================
// Flow
// ============================================================================

const FLOW_FROM: Selector = Selector {
    name: "from",
    label: "From Unit",
    options: FlowUnit::KEYS,
    default: "cfm",
};

pub static FLOW_CONVERT: Calculator = Calculator {
    id: "flow-convert",
    name: "Flow Conversion",
    category: Category::UnitConversion,
    inputs: VALUE,
    selector: Some(FLOW_FROM),
    outputs: &[
        OutputField::new("cfm", "Cubic Feet per Minute", "CFM"),
        OutputField::new("gpm", "Gallons per Minute", "GPM"),
        OutputField::new("lps", "Litres per Second", "L/s"),
        OutputField::new("m3h", "Cubic Metres per Hour", "m³/h"),
    ],
    formula: "L/s = value · factor(from); out = L/s / factor(to)",
    example: &[("value", "1000"), ("from", "cfm")],
    compute: flow_convert,
};

fn flow_convert(inputs: &RawInputs) -> CalculatorResult {
    let Ok(from) = inputs.selection(&FLOW_FROM).parse::<FlowUnit>() else {
        return FLOW_CONVERT.blank();
    };
    let value = inputs.number("value");
    if !value.is_finite() {
        return FLOW_CONVERT.blank();
    }
    FLOW_CONVERT.fill(fan_out(
        from.to_canonical(value),
        FlowUnit::ALL,
        FlowUnit::from_canonical,
        FlowUnit::decimals,
    ))
}

// ============================================================================
// Temperature
// ============================================================================

const TEMPERATURE_FROM: Selector = Selector {
    name: "from",
    label: "From Unit",
    options: TemperatureUnit::KEYS,
    default: "f",
};

pub static TEMPERATURE_CONVERT: Calculator = Calculator {
    id: "temperature-convert",
    name: "Temperature Conversion",
    category: Category::UnitConversion,
    inputs: VALUE,
    selector: Some(TEMPERATURE_FROM),
    outputs: &[
        OutputField::new("f", "Fahrenheit", "°F"),
        OutputField::new("c", "Celsius", "°C"),
        OutputField::new("k", "Kelvin", "K"),
        OutputField::new("r", "Rankine", "°R"),
    ],
    formula: "°C = (value + offset(from)) · factor(from); out from °C",
    example: &[("value", "72"), ("from", "f")],
    compute: temperature_convert,
};

fn temperature_convert(inputs: &RawInputs) -> CalculatorResult {
    let Ok(from) = inputs.selection(&TEMPERATURE_FROM).parse::<TemperatureUnit>() else {
        return TEMPERATURE_CONVERT.blank();
    };
    let value = inputs.number("value");
    if !value.is_finite() {
        return TEMPERATURE_CONVERT.blank();
    }
    TEMPERATURE_CONVERT.fill(fan_out(
        from.to_canonical(value),
        TemperatureUnit::ALL,
        TemperatureUnit::from_canonical,
        TemperatureUnit::decimals,
    ))
}
