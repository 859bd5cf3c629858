//! # Signal Scaling
//!
//! Converting field signals into engineering values: linear analog scaling,
//! NTC thermistor curves, and 4-20 mA current loops.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{guarded_div, Calculator, Category, InputField, OutputField, Selector};
use crate::input::{all_finite, RawInputs};
use crate::output::{fixed, CalculatorResult};
use crate::units::{Celsius, Fahrenheit};

// ============================================================================
// Analog Input Scaling
// ============================================================================

pub static ANALOG_SCALING: Calculator = Calculator {
    id: "analog-scaling",
    name: "Analog Input Scaling",
    category: Category::SignalScaling,
    inputs: &[
        InputField::new("raw_min", "Raw Minimum", "counts"),
        InputField::new("raw_max", "Raw Maximum", "counts"),
        InputField::new("eng_min", "Engineering Minimum", ""),
        InputField::new("eng_max", "Engineering Maximum", ""),
        InputField::new("raw", "Raw Value", "counts"),
    ],
    selector: None,
    outputs: &[OutputField::new("scaled", "Scaled Value", "eng")],
    formula: "scaled = (raw − rawMin) / (rawMax − rawMin) · (engMax − engMin) + engMin",
    example: &[
        ("raw_min", "0"),
        ("raw_max", "4095"),
        ("eng_min", "0"),
        ("eng_max", "100"),
        ("raw", "2048"),
    ],
    compute: analog_scaling,
};

/// Linear interpolation from the raw span onto the engineering span.
///
/// `NaN` when the raw span is empty.
pub fn scale_linear(raw: f64, raw_min: f64, raw_max: f64, eng_min: f64, eng_max: f64) -> f64 {
    let fraction = guarded_div(raw - raw_min, raw_max - raw_min);
    fraction * (eng_max - eng_min) + eng_min
}

fn analog_scaling(inputs: &RawInputs) -> CalculatorResult {
    let raw_min = inputs.number("raw_min");
    let raw_max = inputs.number("raw_max");
    let eng_min = inputs.number("eng_min");
    let eng_max = inputs.number("eng_max");
    let raw = inputs.number("raw");
    if !all_finite(&[raw_min, raw_max, eng_min, eng_max, raw]) || raw_min == raw_max {
        return ANALOG_SCALING.blank();
    }
    let scaled = scale_linear(raw, raw_min, raw_max, eng_min, eng_max);
    ANALOG_SCALING.fill([fixed(scaled, 2)])
}

// ============================================================================
// Thermistor
// ============================================================================

/// Supported NTC thermistor curves with their Steinhart-Hart coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThermistorCurve {
    /// 10 kΩ @ 25 °C, Type II
    TenKType2,
    /// 10 kΩ @ 25 °C, Type III
    TenKType3,
    /// 3 kΩ @ 25 °C
    ThreeK,
}

impl ThermistorCurve {
    pub const KEYS: &'static [&'static str] = &["10k-type2", "10k-type3", "3k"];

    /// Steinhart-Hart coefficients (a, b, c)
    pub fn coefficients(self) -> (f64, f64, f64) {
        match self {
            ThermistorCurve::TenKType2 => (0.001129148, 0.000234125, 8.76741e-8),
            ThermistorCurve::TenKType3 => (1.0295e-3, 2.391e-4, 1.568e-7),
            ThermistorCurve::ThreeK => (1.4051e-3, 2.369e-4, 1.019e-7),
        }
    }

    /// Temperature for a resistance in ohms. `NaN` for non-positive resistance.
    pub fn temperature(self, ohms: f64) -> Celsius {
        if !(ohms > 0.0) {
            return Celsius(f64::NAN);
        }
        let (a, b, c) = self.coefficients();
        let ln_r = ohms.ln();
        let kelvin = 1.0 / (a + b * ln_r + c * ln_r.powi(3));
        Celsius(kelvin - 273.15)
    }
}

impl FromStr for ThermistorCurve {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "10k-type2" => Ok(ThermistorCurve::TenKType2),
            "10k-type3" => Ok(ThermistorCurve::TenKType3),
            "3k" => Ok(ThermistorCurve::ThreeK),
            _ => Err(()),
        }
    }
}

const CURVE: Selector = Selector {
    name: "curve",
    label: "Thermistor Type",
    options: ThermistorCurve::KEYS,
    default: "10k-type2",
};

pub static THERMISTOR: Calculator = Calculator {
    id: "thermistor",
    name: "Thermistor Temperature",
    category: Category::SignalScaling,
    inputs: &[InputField::new("resistance", "Resistance", "Ω")],
    selector: Some(CURVE),
    outputs: &[
        OutputField::new("celsius", "Temperature", "°C"),
        OutputField::new("fahrenheit", "Temperature", "°F"),
    ],
    formula: "1/T = a + b·ln(R) + c·ln(R)³",
    example: &[("resistance", "10000"), ("curve", "10k-type2")],
    compute: thermistor,
};

fn thermistor(inputs: &RawInputs) -> CalculatorResult {
    let Ok(curve) = inputs.selection(&CURVE).parse::<ThermistorCurve>() else {
        return THERMISTOR.blank();
    };
    let resistance = inputs.number("resistance");
    if !resistance.is_finite() || resistance <= 0.0 {
        return THERMISTOR.blank();
    }
    let celsius = curve.temperature(resistance);
    let fahrenheit = Fahrenheit::from(celsius);
    THERMISTOR.fill([fixed(celsius.0, 1), fixed(fahrenheit.0, 1)])
}

// ============================================================================
// 4-20 mA Current Loop
// ============================================================================

pub static CURRENT_LOOP: Calculator = Calculator {
    id: "current-loop",
    name: "4-20 mA Current Loop",
    category: Category::SignalScaling,
    inputs: &[
        InputField::new("ma", "Loop Current", "mA"),
        InputField::new("eng_min", "Engineering Minimum", ""),
        InputField::new("eng_max", "Engineering Maximum", ""),
    ],
    selector: None,
    outputs: &[
        OutputField::new("percent", "Percent of Span", "%"),
        OutputField::new("value", "Engineering Value", "eng"),
    ],
    formula: "value = engMin + (mA − 4) / 16 · (engMax − engMin)",
    example: &[("ma", "12"), ("eng_min", "0"), ("eng_max", "2")],
    compute: current_loop,
};

fn current_loop(inputs: &RawInputs) -> CalculatorResult {
    let ma = inputs.number("ma");
    let eng_min = inputs.number("eng_min");
    let eng_max = inputs.number("eng_max");
    if !all_finite(&[ma, eng_min, eng_max]) {
        return CURRENT_LOOP.blank();
    }
    let percent = (ma - 4.0) / 16.0 * 100.0;
    let value = scale_linear(ma, 4.0, 20.0, eng_min, eng_max);
    CURRENT_LOOP.fill([fixed(percent, 1), fixed(value, 2)])
}
