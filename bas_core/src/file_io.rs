//! # File I/O Module
//!
//! Worksheet persistence with two safety features:
//! - **Atomic saves**: write to a `.tmp` sibling, sync, re-read and parse it,
//!   then rename over the target
//! - **Version validation**: refuse files written by a newer schema
//!
//! ## File Format
//!
//! Worksheets are pretty-printed JSON, conventionally named `*.bas.json`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bas_core::file_io::{load_worksheet, save_worksheet};
//! use bas_core::worksheet::Worksheet;
//! use std::path::Path;
//!
//! let sheet = Worksheet::new("AHU-1", "Controls Tech");
//! let path = Path::new("ahu-1.bas.json");
//!
//! save_worksheet(&sheet, path).unwrap();
//! let loaded = load_worksheet(path).unwrap();
//! assert_eq!(loaded.meta.title, "AHU-1");
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::worksheet::{Worksheet, SCHEMA_VERSION};

/// Save a worksheet with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to `<path>.tmp` and fsync
/// 3. Read the temp file back and parse it
/// 4. Rename over `path`
///
/// An interrupted save leaves the previous file untouched.
pub fn save_worksheet(sheet: &Worksheet, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(sheet)?;
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    if let Err(err) = read_worksheet(&tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), entries = sheet.entry_count(), "worksheet saved");
    Ok(())
}

/// Load a worksheet from a file.
///
/// # Returns
///
/// * `Ok(Worksheet)` - Successfully loaded
/// * `Err(CalcError::VersionMismatch)` - Written by an incompatible schema
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_worksheet(path: &Path) -> CalcResult<Worksheet> {
    let sheet = read_worksheet(path)?;
    validate_version(&sheet.meta.version)?;
    debug!(path = %path.display(), entries = sheet.entry_count(), "worksheet loaded");
    Ok(sheet)
}

fn read_worksheet(path: &Path) -> CalcResult<Worksheet> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// `sheet.bas.json` -> `sheet.bas.json.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Validate that a file version is compatible with the current schema.
///
/// Major versions must match. While the schema is 0.x, a file with a newer
/// minor version is also rejected.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<Vec<u32>> {
        v.split('.').map(|p| p.parse().ok()).collect()
    };
    let (Some(file_parts), Some(current_parts)) = (parse(file_version), parse(SCHEMA_VERSION)) else {
        return Err(mismatch());
    };
    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    if current_parts[0] == 0 && file_parts.get(1) > current_parts.get(1) {
        return Err(mismatch());
    }

    Ok(())
}
