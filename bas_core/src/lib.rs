//! # bas_core - Building Automation Calculation Engine
//!
//! `bas_core` is the computational heart of the BAS Toolkit: about thirty
//! small engineering calculators used by controls technicians in the field,
//! covering sensor signal scaling, psychrometrics, hydronics, electrical
//! sizing, network addressing, loop tuning and unit conversion.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every calculator is a pure function of a raw-text snapshot
//! - **Never fails**: invalid input produces a blank output, not an error
//! - **JSON-First**: inputs, results and calculator metadata all serialize
//! - **One model, many consumers**: shared physics lives in [`models`]
//!
//! ## Quick Start
//!
//! ```rust
//! use bas_core::calculators;
//! use bas_core::input::RawInputs;
//!
//! let inputs = RawInputs::new().with("dry_bulb", "75").with("rh", "50");
//! let result = calculators::evaluate("dew-point", &inputs).unwrap();
//! assert_eq!(result.value("fahrenheit"), "55.1");
//!
//! // A blank field never panics; the outputs just come back empty
//! let partial = RawInputs::new().with("dry_bulb", "75");
//! assert!(calculators::evaluate("dew-point", &partial).unwrap().is_blank());
//! ```
//!
//! ## Modules
//!
//! - [`calculators`] - The calculator registry and every calculator
//! - [`input`] - Raw text snapshots and numeric coercion
//! - [`output`] - Formatted, unit-tagged results
//! - [`models`] - Shared psychrometric and IPv4 models
//! - [`units`] - Type-safe temperatures and conversion unit tables
//! - [`worksheet`] - Saved lists of calculator entries
//! - [`file_io`] - Atomic worksheet saves and loads
//! - [`errors`] - Structured error types

pub mod calculators;
pub mod errors;
pub mod file_io;
pub mod input;
pub mod models;
pub mod output;
pub mod units;
pub mod worksheet;

// Re-export commonly used types at crate root for convenience
pub use calculators::{Calculator, Category};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_worksheet, save_worksheet};
pub use input::RawInputs;
pub use output::{CalcOutput, CalculatorResult};
pub use worksheet::{DisplaySettings, Worksheet, WorksheetEntry};
