//! # Calculator Settings
//!
//! Display preferences shared by every mode: how many significant digits to
//! print and which output unit to use when an input does not ask for one.
//! Settings are stored as JSON and every field has a default, so a partial
//! file is valid.
//!
//! ## Example
//!
//! ```json
//! {
//!   "eng_digits": 4,
//!   "plain_digits": 6,
//!   "angle_unit": "deg",
//!   "divergence_unit": "mrad",
//!   "line_density_unit": "lines/mm",
//!   "intensity_unit": "W/cm2"
//! }
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{require_dimension, Dimension};

/// Display preferences for reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorSettings {
    /// Significant digits for engineering-notation results (default 4)
    pub eng_digits: usize,

    /// Significant digits for angles, line densities and orders (default 6)
    pub plain_digits: usize,

    /// Output unit for grating diffraction angles
    pub angle_unit: String,

    /// Output unit for beam divergence
    pub divergence_unit: String,

    /// Output unit for grating line density
    pub line_density_unit: String,

    /// Output unit for power density
    pub intensity_unit: String,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        CalculatorSettings {
            eng_digits: crate::format::ENG_DIGITS,
            plain_digits: 6,
            angle_unit: "deg".to_string(),
            divergence_unit: "mrad".to_string(),
            line_density_unit: "lines/mm".to_string(),
            intensity_unit: "W/cm2".to_string(),
        }
    }
}

impl CalculatorSettings {
    /// Validate digit counts and that each unit measures the right dimension.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, digits) in [("eng_digits", self.eng_digits), ("plain_digits", self.plain_digits)] {
            if !(1..=15).contains(&digits) {
                return Err(CalcError::invalid_input(
                    field,
                    digits.to_string(),
                    "Significant digits must be between 1 and 15",
                ));
            }
        }
        require_dimension("angle_unit", &self.angle_unit, Dimension::Angle)?;
        require_dimension("divergence_unit", &self.divergence_unit, Dimension::Angle)?;
        require_dimension("line_density_unit", &self.line_density_unit, Dimension::LineDensity)?;
        require_dimension("intensity_unit", &self.intensity_unit, Dimension::Intensity)?;
        Ok(())
    }
}

/// Load and validate settings from a JSON file.
pub fn load_settings(path: &Path) -> CalcResult<CalculatorSettings> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let settings: CalculatorSettings =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    settings.validate()?;
    debug!("loaded settings from {}", path.display());
    Ok(settings)
}

/// Save settings with an atomic write (temp file, sync, rename).
pub fn save_settings(settings: &CalculatorSettings, path: &Path) -> CalcResult<()> {
    settings.validate()?;
    let json = serde_json::to_string_pretty(settings)?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = CalculatorSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.eng_digits, 4);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: CalculatorSettings = serde_json::from_str(r#"{"angle_unit": "rad"}"#).unwrap();
        assert_eq!(settings.angle_unit, "rad");
        assert_eq!(settings.intensity_unit, "W/cm2");
        assert_eq!(settings.plain_digits, 6);
    }

    #[test]
    fn test_wrong_dimension_rejected() {
        let settings = CalculatorSettings {
            intensity_unit: "mW".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.validate().unwrap_err().error_code(), "DIMENSION_MISMATCH");
    }

    #[test]
    fn test_digit_range() {
        let settings = CalculatorSettings {
            eng_digits: 0,
            ..Default::default()
        };
        assert_eq!(settings.validate().unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opticalc.json");

        let settings = CalculatorSettings {
            angle_unit: "rad".to_string(),
            plain_digits: 8,
            ..Default::default()
        };
        save_settings(&settings, &path).unwrap();

        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
