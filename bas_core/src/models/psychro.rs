//! Moist-air properties in IP units at standard sea-level pressure.
//!
//! Saturation pressure uses the exponential/power correlation
//! `pws = exp(77.345 + 0.0057·T − 7235/T) / T^8.2`, which is fitted with `T`
//! in kelvin and returns pascals. Dry-bulb input is in °F and the result is
//! converted to psia before it meets the 14.696 psia atmosphere. There is no
//! ice-phase branch, so values near and below freezing are approximate.
//!
//! Every calculator that needs humidity ratio or enthalpy goes through
//! [`MoistAir::at`], so the "Enthalpy" and "Economizer Enthalpy" results can
//! never drift apart.

use serde::{Deserialize, Serialize};

use crate::units::{Celsius, Fahrenheit};

/// Standard atmospheric pressure (psia)
pub const ATMOSPHERIC_PSIA: f64 = 14.696;

/// Ratio of molecular weights of water vapour and dry air
pub const MOLECULAR_WEIGHT_RATIO: f64 = 0.62198;

/// Grains per pound
pub const GRAINS_PER_LB: f64 = 7000.0;

const PA_PER_PSI: f64 = 6894.757293;

/// Saturation vapour pressure of water over liquid (psia).
pub fn saturation_pressure(dry_bulb: Fahrenheit) -> f64 {
    let kelvin = Celsius::from(dry_bulb).0 + 273.15;
    if kelvin <= 0.0 {
        return f64::NAN;
    }
    let pws_pa = (77.345 + 0.0057 * kelvin - 7235.0 / kelvin).exp() / kelvin.powf(8.2);
    pws_pa / PA_PER_PSI
}

/// Humidity ratio (lb water / lb dry air).
///
/// Returns `NaN` when the partial vapour pressure would reach the total
/// pressure.
pub fn humidity_ratio(dry_bulb: Fahrenheit, rh_pct: f64) -> f64 {
    let pw = rh_pct / 100.0 * saturation_pressure(dry_bulb);
    let dry_air = ATMOSPHERIC_PSIA - pw;
    if !(dry_air > 0.0) {
        return f64::NAN;
    }
    MOLECULAR_WEIGHT_RATIO * pw / dry_air
}

/// Specific enthalpy of moist air (BTU / lb dry air).
pub fn enthalpy(dry_bulb: Fahrenheit, rh_pct: f64) -> f64 {
    MoistAir::at(dry_bulb, rh_pct).enthalpy
}

/// Psychrometric state derived from one dry-bulb / RH pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoistAir {
    /// Dry-bulb temperature (°F)
    pub dry_bulb: Fahrenheit,
    /// Relative humidity (%)
    pub rh_pct: f64,
    /// Saturation pressure at dry-bulb (psia)
    pub saturation_psia: f64,
    /// Humidity ratio (lb/lb)
    pub humidity_ratio: f64,
    /// Enthalpy (BTU/lb dry air)
    pub enthalpy: f64,
}

impl MoistAir {
    /// Evaluate the state. Non-computable inputs yield `NaN` fields.
    pub fn at(dry_bulb: Fahrenheit, rh_pct: f64) -> Self {
        let t = dry_bulb.0;
        let w = humidity_ratio(dry_bulb, rh_pct);
        MoistAir {
            dry_bulb,
            rh_pct,
            saturation_psia: saturation_pressure(dry_bulb),
            humidity_ratio: w,
            enthalpy: 0.24 * t + w * (1061.0 + 0.444 * t),
        }
    }

    /// Humidity ratio in grains per pound of dry air
    pub fn grains_per_lb(&self) -> f64 {
        self.humidity_ratio * GRAINS_PER_LB
    }

    /// Humidity ratio in pounds of water per 1000 lb of dry air
    pub fn lb_per_1000_lb(&self) -> f64 {
        self.humidity_ratio * 1000.0
    }
}
