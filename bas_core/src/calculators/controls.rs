//! # Controls Math
//!
//! Loop tuning and setpoint arithmetic for DDC programming.
//!
//! ## Ziegler-Nichols
//!
//! The closed-loop method takes the ultimate gain `Ku` (the proportional gain
//! at which the loop sustains oscillation) and the oscillation period `Tu`
//! in seconds, and returns classic PID gains:
//!
//! | Gain | Formula        |
//! |------|----------------|
//! | Kp   | 0.6 · Ku       |
//! | Ki   | 1.2 · Ku / Tu  |
//! | Kd   | 0.075 · Ku · Tu |

use super::signal::scale_linear;
use super::{guarded_div, Calculator, Category, InputField, OutputField, Selector};
use crate::input::{all_finite, RawInputs};
use crate::output::{fixed, CalculatorResult};

// ============================================================================
// PID Tuning
// ============================================================================

/// Gains produced by the Ziegler-Nichols closed-loop rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidGains {
    pub kp: f64,
    /// `NaN` when the period is zero
    pub ki: f64,
    pub kd: f64,
}

impl PidGains {
    pub fn ziegler_nichols(ku: f64, tu: f64) -> Self {
        PidGains {
            kp: 0.6 * ku,
            ki: guarded_div(1.2 * ku, tu),
            kd: 0.075 * ku * tu,
        }
    }
}

pub static PID_TUNING: Calculator = Calculator {
    id: "pid-tuning",
    name: "PID Tuning (Ziegler-Nichols)",
    category: Category::ControlsMath,
    inputs: &[
        InputField::new("ku", "Ultimate Gain", "Ku"),
        InputField::new("tu", "Oscillation Period", "s"),
    ],
    selector: None,
    outputs: &[
        OutputField::new("kp", "Proportional Gain", "Kp"),
        OutputField::new("ki", "Integral Gain", "Ki"),
        OutputField::new("kd", "Derivative Gain", "Kd"),
    ],
    formula: "Kp = 0.6·Ku; Ki = 1.2·Ku / Tu; Kd = 0.075·Ku·Tu",
    example: &[("ku", "2"), ("tu", "60")],
    compute: pid_tuning,
};

fn pid_tuning(inputs: &RawInputs) -> CalculatorResult {
    let ku = inputs.number("ku");
    let tu = inputs.number("tu");
    if !all_finite(&[ku, tu]) {
        return PID_TUNING.blank();
    }
    let gains = PidGains::ziegler_nichols(ku, tu);
    PID_TUNING.fill([fixed(gains.kp, 3), fixed(gains.ki, 4), fixed(gains.kd, 2)])
}

// ============================================================================
// Outside Air Reset
// ============================================================================

/// Reverse-acting reset: the setpoint is `sp_max` at or below `oat_min` and
/// `sp_min` at or above `oat_max`, linear in between.
///
/// `NaN` when the outside air span is empty.
pub fn oat_reset_setpoint(oat_min: f64, oat_max: f64, sp_min: f64, sp_max: f64, oat: f64) -> f64 {
    let ratio = guarded_div(oat - oat_min, oat_max - oat_min);
    if ratio.is_nan() {
        return f64::NAN;
    }
    sp_max - ratio.clamp(0.0, 1.0) * (sp_max - sp_min)
}

pub static OAT_RESET: Calculator = Calculator {
    id: "oat-reset",
    name: "Outside Air Reset",
    category: Category::ControlsMath,
    inputs: &[
        InputField::new("oat_min", "Outside Air Low Limit", "°F"),
        InputField::new("oat_max", "Outside Air High Limit", "°F"),
        InputField::new("sp_min", "Setpoint at High OAT", "°F"),
        InputField::new("sp_max", "Setpoint at Low OAT", "°F"),
        InputField::new("oat", "Current Outside Air", "°F"),
    ],
    selector: None,
    outputs: &[OutputField::new("setpoint", "Reset Setpoint", "°F")],
    formula: "ratio = clamp((OAT − OATmin) / (OATmax − OATmin), 0, 1); SP = SPmax − ratio·(SPmax − SPmin)",
    example: &[
        ("oat_min", "0"),
        ("oat_max", "60"),
        ("sp_min", "120"),
        ("sp_max", "180"),
        ("oat", "30"),
    ],
    compute: oat_reset,
};

fn oat_reset(inputs: &RawInputs) -> CalculatorResult {
    let values = [
        inputs.number("oat_min"),
        inputs.number("oat_max"),
        inputs.number("sp_min"),
        inputs.number("sp_max"),
        inputs.number("oat"),
    ];
    if !all_finite(&values) {
        return OAT_RESET.blank();
    }
    let [oat_min, oat_max, sp_min, sp_max, oat] = values;
    OAT_RESET.fill([fixed(oat_reset_setpoint(oat_min, oat_max, sp_min, sp_max, oat), 1)])
}

// ============================================================================
// Analog Output
// ============================================================================

/// Output signal ranges for a 0-100 % command.
fn signal_range(key: &str) -> Option<(f64, f64, &'static str)> {
    match key {
        "0-10v" => Some((0.0, 10.0, "V")),
        "2-10v" => Some((2.0, 10.0, "V")),
        "4-20ma" => Some((4.0, 20.0, "mA")),
        _ => None,
    }
}

const SIGNAL: Selector = Selector {
    name: "signal",
    label: "Output Signal",
    options: &["0-10v", "2-10v", "4-20ma"],
    default: "0-10v",
};

pub static ANALOG_OUTPUT: Calculator = Calculator {
    id: "analog-output",
    name: "Analog Output Signal",
    category: Category::ControlsMath,
    inputs: &[InputField::new("percent", "Command", "%")],
    selector: Some(SIGNAL),
    outputs: &[OutputField::new("signal", "Output Signal", "V")],
    formula: "signal = low + percent / 100 · (high − low)",
    example: &[("percent", "50"), ("signal", "4-20ma")],
    compute: analog_output,
};

fn analog_output(inputs: &RawInputs) -> CalculatorResult {
    let Some((low, high, unit)) = signal_range(&inputs.selection(&SIGNAL)) else {
        return ANALOG_OUTPUT.blank();
    };
    let percent = inputs.number("percent");
    if !percent.is_finite() {
        return ANALOG_OUTPUT.blank();
    }
    let signal = scale_linear(percent, 0.0, 100.0, low, high);
    ANALOG_OUTPUT
        .fill([fixed(signal, 2)])
        .with_unit("signal", unit)
}
