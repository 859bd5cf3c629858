//! # Electrical
//!
//! Power, low-voltage wire sizing, Ohm's law and Class 2 transformer sizing.

use super::{guarded_div, Calculator, Category, InputField, OutputField};
use crate::input::{all_finite, RawInputs};
use crate::output::{fixed, CalculatorResult};

/// Loop resistance factor used for the 24 VAC voltage-drop estimate (Ω/ft)
pub const WIRE_DROP_FACTOR: f64 = 0.00328;

/// Headroom applied to connected VA when sizing a transformer
pub const TRANSFORMER_SAFETY_FACTOR: f64 = 1.25;

/// Standard Class 2 transformer ratings (VA), smallest first
pub const CLASS_2_SIZES_VA: [f64; 5] = [20.0, 40.0, 50.0, 75.0, 100.0];

// ============================================================================
// Three-Phase Power
// ============================================================================

pub static THREE_PHASE_POWER: Calculator = Calculator {
    id: "three-phase-power",
    name: "Three-Phase Power",
    category: Category::Electrical,
    inputs: &[
        InputField::new("voltage", "Line Voltage", "V"),
        InputField::new("current", "Line Current", "A"),
        InputField::new("pf", "Power Factor", ""),
    ],
    selector: None,
    outputs: &[
        OutputField::new("kw", "Real Power", "kW"),
        OutputField::new("kva", "Apparent Power", "kVA"),
    ],
    formula: "kW = V · I · √3 · PF / 1000",
    example: &[("voltage", "480"), ("current", "20"), ("pf", "0.85")],
    compute: three_phase_power,
};

fn three_phase_power(inputs: &RawInputs) -> CalculatorResult {
    let voltage = inputs.number("voltage");
    let current = inputs.number("current");
    let pf = inputs.number("pf");
    if !all_finite(&[voltage, current, pf]) {
        return THREE_PHASE_POWER.blank();
    }
    let kva = voltage * current * 3f64.sqrt() / 1000.0;
    THREE_PHASE_POWER.fill([fixed(kva * pf, 2), fixed(kva, 2)])
}

// ============================================================================
// 24 VAC Wire Gauge
// ============================================================================

/// Estimated round-trip voltage drop on a 24 VAC run.
pub fn voltage_drop_24vac(distance_ft: f64, current_a: f64) -> f64 {
    2.0 * distance_ft * current_a * WIRE_DROP_FACTOR
}

/// Map a voltage drop onto the recommended conductor size.
pub fn gauge_for_drop(drop_v: f64) -> &'static str {
    if drop_v <= 0.5 {
        "20 AWG"
    } else if drop_v <= 1.0 {
        "18 AWG"
    } else if drop_v <= 2.0 {
        "16 AWG"
    } else {
        "14 AWG"
    }
}

pub static WIRE_GAUGE_24VAC: Calculator = Calculator {
    id: "wire-gauge-24vac",
    name: "24 VAC Wire Gauge",
    category: Category::Electrical,
    inputs: &[
        InputField::new("distance", "One-Way Distance", "ft"),
        InputField::new("current", "Load Current", "A"),
    ],
    selector: None,
    outputs: &[
        OutputField::new("drop", "Voltage Drop", "V"),
        OutputField::new("gauge", "Recommended Wire", ""),
    ],
    formula: "Vdrop = 2 · distance · I · 0.00328",
    example: &[("distance", "150"), ("current", "1.5")],
    compute: wire_gauge_24vac,
};

fn wire_gauge_24vac(inputs: &RawInputs) -> CalculatorResult {
    let distance = inputs.number("distance");
    let current = inputs.number("current");
    if !all_finite(&[distance, current]) {
        return WIRE_GAUGE_24VAC.blank();
    }
    let drop = voltage_drop_24vac(distance, current);
    WIRE_GAUGE_24VAC.fill([fixed(drop, 2), gauge_for_drop(drop).to_string()])
}

// ============================================================================
// Ohm's Law
// ============================================================================

pub static OHMS_LAW: Calculator = Calculator {
    id: "ohms-law",
    name: "Ohm's Law",
    category: Category::Electrical,
    inputs: &[
        InputField::new("voltage", "Voltage", "V"),
        InputField::new("current", "Current", "A"),
    ],
    selector: None,
    outputs: &[
        OutputField::new("resistance", "Resistance", "Ω"),
        OutputField::new("power", "Power", "W"),
    ],
    formula: "R = V / I; P = V · I",
    example: &[("voltage", "24"), ("current", "0.5")],
    compute: ohms_law,
};

fn ohms_law(inputs: &RawInputs) -> CalculatorResult {
    let voltage = inputs.number("voltage");
    let current = inputs.number("current");
    if !all_finite(&[voltage, current]) {
        return OHMS_LAW.blank();
    }
    OHMS_LAW.fill([
        fixed(guarded_div(voltage, current), 2),
        fixed(voltage * current, 2),
    ])
}

// ============================================================================
// Transformer Sizing
// ============================================================================

/// Smallest standard Class 2 rating that covers the required VA.
pub fn class_2_size(required_va: f64) -> Option<f64> {
    CLASS_2_SIZES_VA.iter().copied().find(|size| *size >= required_va)
}

pub static TRANSFORMER_SIZING: Calculator = Calculator {
    id: "transformer-sizing",
    name: "Control Transformer Sizing",
    category: Category::Electrical,
    inputs: &[InputField::new("load_va", "Connected Load", "VA")],
    selector: None,
    outputs: &[
        OutputField::new("required_va", "Required Capacity", "VA"),
        OutputField::new("size", "Recommended Transformer", ""),
    ],
    formula: "required = connected · 1.25 → next standard Class 2 size",
    example: &[("load_va", "45")],
    compute: transformer_sizing,
};

fn transformer_sizing(inputs: &RawInputs) -> CalculatorResult {
    let load = inputs.number("load_va");
    if !load.is_finite() {
        return TRANSFORMER_SIZING.blank();
    }
    let required = load * TRANSFORMER_SAFETY_FACTOR;
    let size = match class_2_size(required) {
        Some(va) => format!("{} VA", va),
        None => "Exceeds Class 2 (100 VA)".to_string(),
    };
    TRANSFORMER_SIZING.fill([fixed(required, 1), size])
}
