//! # Psychrometrics
//!
//! Dew point (Magnus form), wet bulb (Stull 2011), and the moist-air
//! enthalpy and humidity ratio from [`crate::models::psychro`].
//!
//! Wet bulb does not go through the saturation-pressure model. Stull's fit
//! takes dry bulb and RH directly and is good to about ±1 °C over ordinary
//! conditions.

use super::{Calculator, Category, InputField, OutputField};
use crate::input::{all_finite, RawInputs};
use crate::models::psychro::MoistAir;
use crate::output::{fixed, CalculatorResult};
use crate::units::{Celsius, Fahrenheit};

/// Magnus coefficients
const MAGNUS_A: f64 = 17.27;
const MAGNUS_B: f64 = 237.7;

/// Dew point by the Magnus approximation. `NaN` when RH is not positive.
pub fn dew_point(dry_bulb: Fahrenheit, rh_pct: f64) -> Celsius {
    if !(rh_pct > 0.0) {
        return Celsius(f64::NAN);
    }
    let t = Celsius::from(dry_bulb).0;
    let gamma = (rh_pct / 100.0).ln() + MAGNUS_A * t / (MAGNUS_B + t);
    Celsius(MAGNUS_B * gamma / (MAGNUS_A - gamma))
}

/// Wet bulb by Stull's empirical arctangent fit. `NaN` when RH is negative.
pub fn wet_bulb(dry_bulb: Fahrenheit, rh_pct: f64) -> Celsius {
    if !(rh_pct >= 0.0) {
        return Celsius(f64::NAN);
    }
    let t = Celsius::from(dry_bulb).0;
    let rh = rh_pct;
    let tw = t * (0.151977 * (rh + 8.313659).sqrt()).atan() + (t + rh).atan()
        - (rh - 1.676331).atan()
        + 0.00391838 * rh.powf(1.5) * (0.023101 * rh).atan()
        - 4.686035;
    Celsius(tw)
}

fn dry_bulb_and_rh(inputs: &RawInputs) -> Option<(Fahrenheit, f64)> {
    let t = inputs.number("dry_bulb");
    let rh = inputs.number("rh");
    all_finite(&[t, rh]).then_some((Fahrenheit(t), rh))
}

const DRY_BULB_RH: &[InputField] = &[
    InputField::new("dry_bulb", "Dry Bulb Temperature", "°F"),
    InputField::new("rh", "Relative Humidity", "%"),
];

pub static DEW_POINT: Calculator = Calculator {
    id: "dew-point",
    name: "Dew Point",
    category: Category::Psychrometrics,
    inputs: DRY_BULB_RH,
    selector: None,
    outputs: &[
        OutputField::new("fahrenheit", "Dew Point", "°F"),
        OutputField::new("celsius", "Dew Point", "°C"),
    ],
    formula: "γ = ln(RH/100) + a·T/(b + T); Td = b·γ / (a − γ)",
    example: &[("dry_bulb", "75"), ("rh", "50")],
    compute: dew_point_calc,
};

fn dew_point_calc(inputs: &RawInputs) -> CalculatorResult {
    let Some((t, rh)) = dry_bulb_and_rh(inputs) else {
        return DEW_POINT.blank();
    };
    if rh <= 0.0 {
        return DEW_POINT.blank();
    }
    let td = dew_point(t, rh);
    DEW_POINT.fill([fixed(Fahrenheit::from(td).0, 1), fixed(td.0, 1)])
}

pub static WET_BULB: Calculator = Calculator {
    id: "wet-bulb",
    name: "Wet Bulb",
    category: Category::Psychrometrics,
    inputs: DRY_BULB_RH,
    selector: None,
    outputs: &[
        OutputField::new("fahrenheit", "Wet Bulb", "°F"),
        OutputField::new("celsius", "Wet Bulb", "°C"),
    ],
    formula: "Tw = T·atan(0.151977·√(RH + 8.313659)) + atan(T + RH) − atan(RH − 1.676331) + 0.00391838·RH^1.5·atan(0.023101·RH) − 4.686035",
    example: &[("dry_bulb", "75"), ("rh", "50")],
    compute: wet_bulb_calc,
};

fn wet_bulb_calc(inputs: &RawInputs) -> CalculatorResult {
    let Some((t, rh)) = dry_bulb_and_rh(inputs) else {
        return WET_BULB.blank();
    };
    let tw = wet_bulb(t, rh);
    WET_BULB.fill([fixed(Fahrenheit::from(tw).0, 1), fixed(tw.0, 1)])
}

pub static ENTHALPY: Calculator = Calculator {
    id: "enthalpy",
    name: "Enthalpy",
    category: Category::Psychrometrics,
    inputs: DRY_BULB_RH,
    selector: None,
    outputs: &[OutputField::new("enthalpy", "Enthalpy", "BTU/lb")],
    formula: "h = 0.24·t + W·(1061 + 0.444·t)",
    example: &[("dry_bulb", "75"), ("rh", "50")],
    compute: enthalpy_calc,
};

fn enthalpy_calc(inputs: &RawInputs) -> CalculatorResult {
    let Some((t, rh)) = dry_bulb_and_rh(inputs) else {
        return ENTHALPY.blank();
    };
    ENTHALPY.fill([fixed(MoistAir::at(t, rh).enthalpy, 2)])
}

pub static HUMIDITY_RATIO: Calculator = Calculator {
    id: "humidity-ratio",
    name: "Humidity Ratio",
    category: Category::Psychrometrics,
    inputs: DRY_BULB_RH,
    selector: None,
    outputs: &[
        OutputField::new("grains", "Humidity Ratio", "gr/lb"),
        OutputField::new("lb_per_1000", "Humidity Ratio", "lb/1000 lb"),
    ],
    formula: "W = 0.62198·φ·pws / (14.696 − φ·pws)",
    example: &[("dry_bulb", "75"), ("rh", "50")],
    compute: humidity_ratio_calc,
};

fn humidity_ratio_calc(inputs: &RawInputs) -> CalculatorResult {
    let Some((t, rh)) = dry_bulb_and_rh(inputs) else {
        return HUMIDITY_RATIO.blank();
    };
    let air = MoistAir::at(t, rh);
    if !air.humidity_ratio.is_finite() {
        return HUMIDITY_RATIO.blank();
    }
    HUMIDITY_RATIO.fill([fixed(air.grains_per_lb(), 1), fixed(air.lb_per_1000_lb(), 2)])
}
