//! # Unit Types
//!
//! Lightweight wrappers for the units BAS calculators pass around, plus the
//! unit families used by the conversion calculators.
//!
//! ## Design Philosophy
//!
//! Temperatures are simple newtypes so a Celsius value cannot be handed to a
//! psychrometric routine that expects Fahrenheit. The conversion families
//! (pressure, flow, temperature) each have one canonical unit; every
//! conversion goes source → canonical → target, never pairwise, so rounding
//! error does not compound between units.
//!
//! | Family      | Canonical | Units                          |
//! |-------------|-----------|--------------------------------|
//! | Pressure    | Pa        | in WC, Pa, kPa, psi, in Hg, mbar |
//! | Flow        | L/s       | CFM, GPM, L/s, m³/h            |
//! | Temperature | °C        | °F, °C, K, °R                  |
//!
//! ## Example
//!
//! ```rust
//! use bas_core::units::{Celsius, Fahrenheit, PressureUnit};
//!
//! let room: Celsius = Fahrenheit(68.0).into();
//! assert!((room.0 - 20.0).abs() < 1e-9);
//!
//! let pa = PressureUnit::InWc.to_canonical(1.0);
//! assert!((PressureUnit::InWc.from_canonical(pa) - 1.0).abs() < 1e-12);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fahrenheit(pub f64);

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Self {
        Celsius((f.0 - 32.0) * 5.0 / 9.0)
    }
}

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Self {
        Fahrenheit(c.0 * 9.0 / 5.0 + 32.0)
    }
}

// ============================================================================
// Conversion Families
// ============================================================================

/// Error returned when a unit key is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownUnit(pub String);

impl fmt::Display for UnknownUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown unit '{}'", self.0)
    }
}

impl std::error::Error for UnknownUnit {}

/// Generates a unit family: key/symbol tables, `FromStr`, and the linear
/// to/from canonical conversions (`canonical = value * factor + offset`).
macro_rules! unit_family {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => ($key:literal, $symbol:literal, $factor:expr, $offset:expr, $decimals:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Every unit in display order
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Every selector key in display order
            pub const KEYS: &'static [&'static str] = &[ $( $key ),+ ];

            /// Selector key (e.g. "in_wc")
            pub fn key(self) -> &'static str {
                match self { $( $name::$variant => $key ),+ }
            }

            /// Display symbol (e.g. "in WC")
            pub fn symbol(self) -> &'static str {
                match self { $( $name::$variant => $symbol ),+ }
            }

            /// Decimal places used when this unit is displayed
            pub fn decimals(self) -> usize {
                match self { $( $name::$variant => $decimals ),+ }
            }

            /// Convert a value in this unit to the canonical unit.
            pub fn to_canonical(self, value: f64) -> f64 {
                match self { $( $name::$variant => value * $factor + $offset ),+ }
            }

            /// Convert a canonical value into this unit.
            pub fn from_canonical(self, canonical: f64) -> f64 {
                match self { $( $name::$variant => (canonical - $offset) / $factor ),+ }
            }
        }

        impl FromStr for $name {
            type Err = UnknownUnit;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $( $key => Ok($name::$variant), )+
                    other => Err(UnknownUnit(other.to_string())),
                }
            }
        }
    };
}

unit_family! {
    /// Pressure units; canonical unit is the pascal.
    PressureUnit {
        InWc => ("in_wc", "in WC", 249.08891, 0.0, 3),
        Pa => ("pa", "Pa", 1.0, 0.0, 1),
        KPa => ("kpa", "kPa", 1000.0, 0.0, 3),
        Psi => ("psi", "psi", 6894.757293, 0.0, 4),
        InHg => ("in_hg", "in Hg", 3386.389, 0.0, 3),
        Mbar => ("mbar", "mbar", 100.0, 0.0, 2),
    }
}

unit_family! {
    /// Volumetric flow units; canonical unit is litres per second.
    FlowUnit {
        Cfm => ("cfm", "CFM", 0.471947443, 0.0, 1),
        Gpm => ("gpm", "GPM", 0.0630901964, 0.0, 2),
        Lps => ("lps", "L/s", 1.0, 0.0, 2),
        M3h => ("m3h", "m³/h", 1.0 / 3.6, 0.0, 2),
    }
}

unit_family! {
    /// Temperature units; canonical unit is degrees Celsius.
    TemperatureUnit {
        F => ("f", "°F", 5.0 / 9.0, -32.0 * 5.0 / 9.0, 1),
        C => ("c", "°C", 1.0, 0.0, 1),
        K => ("k", "K", 1.0, -273.15, 2),
        R => ("r", "°R", 5.0 / 9.0, -273.15, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fahrenheit_to_celsius() {
        let c: Celsius = Fahrenheit(212.0).into();
        assert_relative_eq!(c.0, 100.0, epsilon = 1e-12);
        let f: Fahrenheit = Celsius(-40.0).into();
        assert_relative_eq!(f.0, -40.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pressure_factors() {
        assert_relative_eq!(PressureUnit::Psi.to_canonical(1.0), 6894.757293);
        assert_relative_eq!(PressureUnit::KPa.from_canonical(249.08891), 0.24908891);
    }

    #[test]
    fn test_temperature_family() {
        assert_relative_eq!(TemperatureUnit::F.to_canonical(32.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(TemperatureUnit::K.to_canonical(0.0), -273.15);
        assert_relative_eq!(TemperatureUnit::R.from_canonical(0.0), 491.67, epsilon = 1e-9);
        assert_relative_eq!(TemperatureUnit::F.from_canonical(100.0), 212.0, epsilon = 1e-9);
    }

    #[test]
    fn test_round_trip_every_unit() {
        for unit in PressureUnit::ALL {
            assert_relative_eq!(unit.from_canonical(unit.to_canonical(3.7)), 3.7, epsilon = 1e-9);
        }
        for unit in FlowUnit::ALL {
            assert_relative_eq!(unit.from_canonical(unit.to_canonical(3.7)), 3.7, epsilon = 1e-9);
        }
        for unit in TemperatureUnit::ALL {
            assert_relative_eq!(unit.from_canonical(unit.to_canonical(3.7)), 3.7, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("IN_WC".parse::<PressureUnit>(), Ok(PressureUnit::InWc));
        assert_eq!(" gpm ".parse::<FlowUnit>(), Ok(FlowUnit::Gpm));
        assert_eq!("k".parse::<TemperatureUnit>(), Ok(TemperatureUnit::K));
        assert!("bar".parse::<PressureUnit>().is_err());
        assert_eq!(PressureUnit::KEYS.len(), PressureUnit::ALL.len());
    }

    #[test]
    fn test_serialization() {
        let f = Fahrenheit(72.5);
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, "72.5");
        let roundtrip: Fahrenheit = serde_json::from_str(&json).unwrap();
        assert_eq!(f, roundtrip);
    }
}
