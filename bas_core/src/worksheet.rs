//! # Worksheets
//!
//! A [`Worksheet`] is a named list of calculator entries, each holding only
//! the raw text typed into its fields. Results are recomputed from those
//! inputs every time the sheet is evaluated and are never written to disk.
//!
//! ## Structure
//!
//! ```text
//! Worksheet
//! ├── meta: WorksheetMeta (schema version, title, author, timestamps)
//! ├── settings: DisplaySettings (blank placeholder, unit display)
//! └── entries: Vec<WorksheetEntry> (id, label, calculator id, raw inputs)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bas_core::input::RawInputs;
//! use bas_core::worksheet::Worksheet;
//!
//! let mut sheet = Worksheet::new("AHU-1 Startup", "Controls Tech");
//! let inputs = RawInputs::new().with("measured", "950").with("design", "1000");
//! let id = sheet.add_entry("Supply airflow", "airflow-verification", inputs).unwrap();
//!
//! let results = sheet.evaluate();
//! assert_eq!(results[0].0.id, id);
//! assert_eq!(results[0].1.as_ref().unwrap().value("status"), "PASS");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::calculators;
use crate::errors::{CalcError, CalcResult};
use crate::input::RawInputs;
use crate::output::{CalcOutput, CalculatorResult};

/// Current schema version for worksheet files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root worksheet container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    pub meta: WorksheetMeta,

    pub settings: DisplaySettings,

    /// Entries in the order they were added
    pub entries: Vec<WorksheetEntry>,
}

impl Worksheet {
    /// Create an empty worksheet.
    ///
    /// ```rust
    /// use bas_core::worksheet::Worksheet;
    ///
    /// let sheet = Worksheet::new("Boiler Plant", "J. Smith");
    /// assert_eq!(sheet.meta.title, "Boiler Plant");
    /// assert!(sheet.entries.is_empty());
    /// ```
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        let now = Utc::now();
        Worksheet {
            meta: WorksheetMeta {
                version: SCHEMA_VERSION.to_string(),
                title: title.into(),
                author: author.into(),
                created: now,
                modified: now,
            },
            settings: DisplaySettings::default(),
            entries: Vec::new(),
        }
    }

    /// Append an entry for a registered calculator.
    ///
    /// Returns the UUID assigned to the entry, or
    /// [`CalcError::UnknownCalculator`] if the id is not registered.
    pub fn add_entry(
        &mut self,
        label: impl Into<String>,
        calculator: &str,
        inputs: RawInputs,
    ) -> CalcResult<Uuid> {
        let calc = calculators::find(calculator)?;
        let id = Uuid::new_v4();
        self.entries.push(WorksheetEntry {
            id,
            label: label.into(),
            calculator: calc.id.to_string(),
            inputs,
        });
        self.touch();
        Ok(id)
    }

    /// Remove an entry by UUID.
    pub fn remove_entry(&mut self, id: &Uuid) -> CalcResult<WorksheetEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == *id)
            .ok_or_else(|| CalcError::entry_not_found(id.to_string()))?;
        let entry = self.entries.remove(index);
        self.touch();
        Ok(entry)
    }

    /// Get an entry by UUID.
    pub fn get_entry(&self, id: &Uuid) -> Option<&WorksheetEntry> {
        self.entries.iter().find(|entry| entry.id == *id)
    }

    /// Get a mutable entry by UUID. Marks the sheet as modified when found.
    pub fn get_entry_mut(&mut self, id: &Uuid) -> Option<&mut WorksheetEntry> {
        let entry = self.entries.iter_mut().find(|entry| entry.id == *id)?;
        self.meta.modified = Utc::now();
        Some(entry)
    }

    /// Evaluate every entry in order.
    ///
    /// An entry naming an unknown calculator yields an error for that entry
    /// alone; the rest of the sheet still evaluates.
    pub fn evaluate(&self) -> Vec<(&WorksheetEntry, CalcResult<CalculatorResult>)> {
        self.entries
            .iter()
            .map(|entry| (entry, entry.evaluate()))
            .collect()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl Default for Worksheet {
    fn default() -> Self {
        Worksheet::new("", "")
    }
}

/// Worksheet metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetMeta {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub title: String,

    pub author: String,

    /// When the worksheet was created
    pub created: DateTime<Utc>,

    /// When the worksheet was last modified
    pub modified: DateTime<Utc>,
}

/// How a front end should render results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Shown in place of a blank output
    pub placeholder: String,

    /// Print the unit after each value
    pub show_units: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            placeholder: "—".to_string(),
            show_units: true,
        }
    }
}

impl DisplaySettings {
    /// Display text for one output.
    ///
    /// ```rust
    /// use bas_core::output::CalcOutput;
    /// use bas_core::worksheet::DisplaySettings;
    ///
    /// let settings = DisplaySettings::default();
    /// let output = CalcOutput {
    ///     key: "gpm".into(),
    ///     label: "Water Flow".into(),
    ///     value: "12.0".into(),
    ///     unit: "GPM".into(),
    /// };
    /// assert_eq!(settings.render(&output), "12.0 GPM");
    /// assert_eq!(settings.render(&CalcOutput { value: String::new(), ..output }), "—");
    /// ```
    pub fn render(&self, output: &CalcOutput) -> String {
        if output.is_blank() {
            return self.placeholder.clone();
        }
        if self.show_units && !output.unit.is_empty() {
            format!("{} {}", output.value, output.unit)
        } else {
            output.value.clone()
        }
    }
}

/// One calculator invocation saved in a worksheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetEntry {
    pub id: Uuid,

    /// User label (e.g. "AHU-1 supply fan")
    pub label: String,

    /// Calculator id
    pub calculator: String,

    /// Raw text per field, exactly as entered
    pub inputs: RawInputs,
}

impl WorksheetEntry {
    /// Run this entry's calculator on its stored inputs.
    pub fn evaluate(&self) -> CalcResult<CalculatorResult> {
        calculators::evaluate(&self.calculator, &self.inputs).map_err(|err| {
            warn!(entry = %self.id, calculator = %self.calculator, "skipping entry: {}", err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Worksheet {
        let mut sheet = Worksheet::new("RTU-3", "Tech");
        sheet
            .add_entry(
                "Coil flow",
                "hydronic-flow",
                RawInputs::new().with("btuh", "120000").with("delta_t", "20"),
            )
            .unwrap();
        sheet
            .add_entry("Trunk", "mstp-trunk", RawInputs::new().with("devices", "11"))
            .unwrap();
        sheet
    }

    #[test]
    fn test_worksheet_creation() {
        let sheet = Worksheet::new("RTU-3", "Tech");
        assert_eq!(sheet.meta.version, SCHEMA_VERSION);
        assert_eq!(sheet.meta.author, "Tech");
        assert_eq!(sheet.settings.placeholder, "—");
        assert_eq!(sheet.entry_count(), 0);
    }

    #[test]
    fn test_add_rejects_unknown_calculator() {
        let mut sheet = Worksheet::new("RTU-3", "Tech");
        let err = sheet.add_entry("?", "warp-drive", RawInputs::new()).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CALCULATOR");
        assert_eq!(sheet.entry_count(), 0);
    }

    #[test]
    fn test_add_get_remove() {
        let mut sheet = sample();
        let id = sheet.entries[0].id;
        assert_eq!(sheet.get_entry(&id).unwrap().label, "Coil flow");

        let removed = sheet.remove_entry(&id).unwrap();
        assert_eq!(removed.calculator, "hydronic-flow");
        assert_eq!(sheet.entry_count(), 1);
        assert!(sheet.get_entry(&id).is_none());
        assert_eq!(sheet.remove_entry(&id).unwrap_err().error_code(), "ENTRY_NOT_FOUND");
    }

    #[test]
    fn test_evaluate_in_order() {
        let sheet = sample();
        let results = sheet.evaluate();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].1.as_ref().unwrap().value("gpm"), "12.0");
        assert_eq!(results[1].1.as_ref().unwrap().value("max_length"), "3200");
    }

    #[test]
    fn test_unknown_calculator_fails_only_its_entry() {
        let mut sheet = sample();
        sheet.entries[0].calculator = "retired-calc".to_string();
        let results = sheet.evaluate();
        assert_eq!(results[0].1.as_ref().unwrap_err().error_code(), "UNKNOWN_CALCULATOR");
        assert!(results[1].1.is_ok());
    }

    #[test]
    fn test_edit_inputs_in_place() {
        let mut sheet = sample();
        let id = sheet.entries[0].id;
        sheet.get_entry_mut(&id).unwrap().inputs.set("delta_t", "10");
        let result = sheet.get_entry(&id).unwrap().evaluate().unwrap();
        assert_eq!(result.value("gpm"), "24.0");
    }

    #[test]
    fn test_edit_missing_entry_leaves_sheet_untouched() {
        let mut sheet = sample();
        let modified = sheet.meta.modified;
        assert!(sheet.get_entry_mut(&Uuid::new_v4()).is_none());
        assert_eq!(sheet.meta.modified, modified);
    }

    #[test]
    fn test_serialization_keeps_inputs_not_results() {
        let sheet = sample();
        let json = serde_json::to_string_pretty(&sheet).unwrap();
        assert!(json.contains("\"btuh\": \"120000\""));
        assert!(!json.contains("\"outputs\""));

        let roundtrip: Worksheet = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.entries[1].calculator, "mstp-trunk");
        assert_eq!(roundtrip.entries[0].id, sheet.entries[0].id);
    }

    #[test]
    fn test_render_respects_settings() {
        let output = CalcOutput {
            key: "kw".into(),
            label: "Real Power".into(),
            value: "14.13".into(),
            unit: "kW".into(),
        };
        let mut settings = DisplaySettings::default();
        assert_eq!(settings.render(&output), "14.13 kW");
        settings.show_units = false;
        assert_eq!(settings.render(&output), "14.13");
        settings.placeholder = "n/a".into();
        let blank = CalcOutput { value: String::new(), ..output };
        assert_eq!(settings.render(&blank), "n/a");
    }
}
