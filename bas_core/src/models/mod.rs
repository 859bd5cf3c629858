//! # Shared Physical Models
//!
//! Formulas used by more than one calculator live here, so every consumer
//! evaluates exactly the same expression.
//!
//! - [`psychro`] - Saturation pressure, humidity ratio and enthalpy of moist air (IP units)
//! - [`ipv4`] - Dotted-quad parsing and CIDR bit-packing

pub mod ipv4;
pub mod psychro;

pub use ipv4::{parse_prefix, parse_quad, to_quad, Subnet};
pub use psychro::{enthalpy, humidity_ratio, saturation_pressure, MoistAir};
