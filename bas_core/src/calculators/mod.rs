//! # BAS Calculators
//!
//! Every calculator is a pure function from a [`RawInputs`] snapshot to a
//! [`CalculatorResult`]. Each one is described by a static [`Calculator`]
//! record that carries its metadata (inputs, optional selector, outputs,
//! formula, worked example) alongside the function pointer.
//!
//! The contract shared by all of them:
//!
//! - Every declared input is coerced with [`crate::input::parse_number`].
//! - If a required input is not a number, the outputs depending on it are
//!   the empty string.
//! - Division by zero, logs of non-positive values and square roots of
//!   negatives are guarded before the operation, and [`crate::output::fixed`] blanks
//!   anything non-finite that slips through.
//! - Nothing panics and nothing returns an error.
//!
//! ## Categories
//!
//! - [`signal`] - Analog scaling, thermistors, 4-20 mA loops
//! - [`airside`] - Mixed air, economizer enthalpy, duct airflow, sensible heat
//! - [`network`] - BACnet instances, MS/TP trunks, IP subnets
//! - [`hydronic`] - Valve Cv, coil flow, pump power
//! - [`electrical`] - Three-phase power, 24 VAC wire sizing, Ohm's law, transformers
//! - [`psychrometric`] - Dew point, wet bulb, enthalpy, humidity ratio
//! - [`scheduling`] - Optimal start, annual runtime
//! - [`commissioning`] - Airflow verification, sensor offsets
//! - [`energy`] - Energy cost, fan affinity savings
//! - [`controls`] - PID tuning, OAT reset, analog output signals
//! - [`conversion`] - Pressure, flow and temperature conversion
//!
//! ## Example
//!
//! ```rust
//! use bas_core::calculators;
//! use bas_core::input::RawInputs;
//!
//! let calc = calculators::find("valve-cv").unwrap();
//! let inputs = RawInputs::new().with("flow", "40").with("dp", "4").with("sg", "1");
//! let result = calc.evaluate(&inputs);
//! assert_eq!(result.value("cv"), "20.00");
//! ```

pub mod airside;
pub mod commissioning;
pub mod controls;
pub mod conversion;
pub mod electrical;
pub mod energy;
pub mod hydronic;
pub mod network;
pub mod psychrometric;
pub mod scheduling;
pub mod signal;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::errors::{CalcError, CalcResult};
use crate::input::RawInputs;
use crate::output::{CalcOutput, CalculatorResult};

// ============================================================================
// Categories
// ============================================================================

/// Thematic grouping used for menus and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    SignalScaling,
    Airside,
    Network,
    Hydronic,
    Electrical,
    Psychrometrics,
    Scheduling,
    Commissioning,
    Energy,
    ControlsMath,
    UnitConversion,
}

impl Category {
    /// All categories in menu order
    pub const ALL: [Category; 11] = [
        Category::SignalScaling,
        Category::Airside,
        Category::Network,
        Category::Hydronic,
        Category::Electrical,
        Category::Psychrometrics,
        Category::Scheduling,
        Category::Commissioning,
        Category::Energy,
        Category::ControlsMath,
        Category::UnitConversion,
    ];

    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::SignalScaling => "Signal Scaling",
            Category::Airside => "Airside",
            Category::Network => "Network",
            Category::Hydronic => "Hydronic",
            Category::Electrical => "Electrical",
            Category::Psychrometrics => "Psychrometrics",
            Category::Scheduling => "Scheduling",
            Category::Commissioning => "Commissioning",
            Category::Energy => "Energy",
            Category::ControlsMath => "Controls Math",
            Category::UnitConversion => "Unit Conversion",
        }
    }

    /// Short key used on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Category::SignalScaling => "signal",
            Category::Airside => "airside",
            Category::Network => "network",
            Category::Hydronic => "hydronic",
            Category::Electrical => "electrical",
            Category::Psychrometrics => "psychrometrics",
            Category::Scheduling => "scheduling",
            Category::Commissioning => "commissioning",
            Category::Energy => "energy",
            Category::ControlsMath => "controls",
            Category::UnitConversion => "conversion",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.key() == wanted || c.display_name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// A numeric (or free-text) input field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputField {
    /// Key in the [`RawInputs`] snapshot
    pub name: &'static str,
    /// Human label
    pub label: &'static str,
    /// Unit hint (may be empty)
    pub unit: &'static str,
}

impl InputField {
    pub const fn new(name: &'static str, label: &'static str, unit: &'static str) -> Self {
        InputField { name, label, unit }
    }
}

/// A closed set of choices that picks a formula variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Selector {
    /// Key in the [`RawInputs`] snapshot
    pub name: &'static str,
    /// Human label
    pub label: &'static str,
    /// Every accepted key
    pub options: &'static [&'static str],
    /// Key used when the field is absent or blank
    pub default: &'static str,
}

/// A declared output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputField {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
}

impl OutputField {
    pub const fn new(key: &'static str, label: &'static str, unit: &'static str) -> Self {
        OutputField { key, label, unit }
    }
}

/// A registered calculator.
#[derive(Serialize)]
pub struct Calculator {
    /// Stable id (e.g. "valve-cv")
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    pub category: Category,
    pub inputs: &'static [InputField],
    pub selector: Option<Selector>,
    pub outputs: &'static [OutputField],
    /// Formula as shown to users
    pub formula: &'static str,
    /// A worked example as `(field, raw text)` pairs
    pub example: &'static [(&'static str, &'static str)],
    #[serde(skip)]
    pub(crate) compute: fn(&RawInputs) -> CalculatorResult,
}

impl fmt::Debug for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calculator")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("inputs", &self.inputs.len())
            .field("outputs", &self.outputs.len())
            .finish()
    }
}

impl Calculator {
    /// Run the calculator on a snapshot.
    pub fn evaluate(&self, inputs: &RawInputs) -> CalculatorResult {
        let result = (self.compute)(inputs);
        trace!(calculator = self.id, blank = result.is_blank(), "evaluated");
        result
    }

    /// Snapshot built from the worked example.
    pub fn example_inputs(&self) -> RawInputs {
        self.example
            .iter()
            .fold(RawInputs::new(), |inputs, (name, value)| inputs.with(*name, *value))
    }

    /// Every output blank.
    pub(crate) fn blank(&self) -> CalculatorResult {
        self.fill(std::iter::repeat(String::new()))
    }

    /// Pair formatted values with the declared outputs, in order. Missing
    /// values are blank.
    pub(crate) fn fill<I>(&self, values: I) -> CalculatorResult
    where
        I: IntoIterator<Item = String>,
    {
        let mut values = values.into_iter();
        let outputs = self
            .outputs
            .iter()
            .map(|field| CalcOutput {
                key: field.key.to_string(),
                label: field.label.to_string(),
                value: values.next().unwrap_or_default(),
                unit: field.unit.to_string(),
            })
            .collect();
        CalculatorResult {
            calculator: self.id.to_string(),
            outputs,
        }
    }
}

/// Division that yields `NaN` instead of an infinity when the divisor is zero.
pub(crate) fn guarded_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return f64::NAN;
    }
    numerator / denominator
}

// ============================================================================
// Registry
// ============================================================================

static CALCULATORS: &[&Calculator] = &[
    &signal::ANALOG_SCALING,
    &signal::THERMISTOR,
    &signal::CURRENT_LOOP,
    &airside::MIXED_AIR,
    &airside::ECONOMIZER_ENTHALPY,
    &airside::DUCT_AIRFLOW,
    &airside::SENSIBLE_HEAT,
    &network::BACNET_INSTANCE,
    &network::MSTP_TRUNK,
    &network::IP_SUBNET,
    &hydronic::VALVE_CV,
    &hydronic::HYDRONIC_FLOW,
    &hydronic::PUMP_POWER,
    &electrical::THREE_PHASE_POWER,
    &electrical::WIRE_GAUGE_24VAC,
    &electrical::OHMS_LAW,
    &electrical::TRANSFORMER_SIZING,
    &psychrometric::DEW_POINT,
    &psychrometric::WET_BULB,
    &psychrometric::ENTHALPY,
    &psychrometric::HUMIDITY_RATIO,
    &scheduling::OPTIMAL_START,
    &scheduling::ANNUAL_RUNTIME,
    &commissioning::AIRFLOW_VERIFICATION,
    &commissioning::SENSOR_OFFSET,
    &energy::ENERGY_COST,
    &energy::FAN_AFFINITY,
    &controls::PID_TUNING,
    &controls::OAT_RESET,
    &controls::ANALOG_OUTPUT,
    &conversion::PRESSURE_CONVERT,
    &conversion::FLOW_CONVERT,
    &conversion::TEMPERATURE_CONVERT,
];

static INDEX: Lazy<HashMap<&'static str, &'static Calculator>> =
    Lazy::new(|| CALCULATORS.iter().map(|calc| (calc.id, *calc)).collect());

/// Every calculator in menu order.
pub fn all() -> &'static [&'static Calculator] {
    CALCULATORS
}

/// Look up a calculator by id.
pub fn find(id: &str) -> CalcResult<&'static Calculator> {
    INDEX
        .get(id.trim())
        .copied()
        .ok_or_else(|| CalcError::unknown_calculator(id))
}

/// Calculators in one category, in menu order.
pub fn by_category(category: Category) -> impl Iterator<Item = &'static Calculator> {
    CALCULATORS
        .iter()
        .copied()
        .filter(move |calc| calc.category == category)
}

/// Look up and run a calculator in one step.
pub fn evaluate(id: &str, inputs: &RawInputs) -> CalcResult<CalculatorResult> {
    Ok(find(id)?.evaluate(inputs))
}
