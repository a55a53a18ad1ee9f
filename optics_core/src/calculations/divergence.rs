//! # Beam Divergence
//!
//! Far-field divergence of a Gaussian beam from its waist radius and
//! wavelength, scaled by the beam-quality factor M² for real beams.

use serde::{Deserialize, Serialize};

use super::require_positive;
use crate::equations::{self, Formula};
use crate::errors::{CalcError, CalcResult};
use crate::format::format_angle;
use crate::report::Report;
use crate::settings::CalculatorSettings;
use crate::units::{from_si, require_dimension, Dimension, Quantity};

/// Angle convention for the reported divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleConvention {
    #[default]
    Half,
    Full,
}

/// Input parameters for beam divergence.
///
/// ## JSON Example
///
/// ```json
/// {
///   "wavelength": { "value": 1030.0, "unit": "nm" },
///   "waist": { "value": 5.0, "unit": "um" },
///   "m_squared": 1.0,
///   "convention": "Full",
///   "output_unit": "mrad"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergenceInput {
    /// Wavelength (length units)
    pub wavelength: Quantity,

    /// 1/e² waist radius (length units)
    pub waist: Quantity,

    /// Beam-quality factor M² ≥ 1
    #[serde(default = "default_m_squared")]
    pub m_squared: f64,

    #[serde(default)]
    pub convention: AngleConvention,

    /// Angle unit for the report (settings default when absent)
    #[serde(default)]
    pub output_unit: Option<String>,
}

fn default_m_squared() -> f64 {
    1.0
}

impl DivergenceInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.resolve().map(|_| ())
    }

    fn resolve(&self) -> CalcResult<(f64, f64)> {
        let wavelength = self.wavelength.to_si_in("wavelength", Dimension::Length)?;
        let waist = self.waist.to_si_in("waist", Dimension::Length)?;

        require_positive("wavelength", wavelength, "Wavelength and waist must both be greater than 0")?;
        require_positive("waist", waist, "Wavelength and waist must both be greater than 0")?;
        if !(self.m_squared.is_finite() && self.m_squared >= 1.0) {
            return Err(CalcError::invalid_input(
                "m_squared",
                self.m_squared.to_string(),
                "M² must be at least 1 (1 = ideal TEM00)",
            ));
        }
        if let Some(unit) = &self.output_unit {
            require_dimension("output_unit", unit, Dimension::Angle)?;
        }
        Ok((wavelength, waist))
    }
}

/// Results from the divergence calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergenceResult {
    /// Half-angle divergence θ (rad)
    pub half_angle_rad: f64,

    /// Full-angle divergence 2θ (rad)
    pub full_angle_rad: f64,

    pub convention: AngleConvention,

    pub output_unit: Option<String>,
}

impl DivergenceResult {
    pub fn report(&self, settings: &CalculatorSettings) -> CalcResult<Report> {
        let unit = self.output_unit.as_deref().unwrap_or(&settings.divergence_unit);
        let digits = settings.plain_digits;

        let report = Report::new("Beam Divergence");
        let report = match self.convention {
            AngleConvention::Half => report.with_line(
                "θ (half-angle)",
                format_angle(from_si(self.half_angle_rad, unit)?, unit, digits),
            ),
            AngleConvention::Full => report.with_line(
                "2θ (full-angle)",
                format_angle(from_si(self.full_angle_rad, unit)?, unit, digits),
            ),
        };
        let report = report.with_formula(Formula::DivergenceHalfAngle);
        Ok(match self.convention {
            AngleConvention::Half => report,
            AngleConvention::Full => report.with_formula(Formula::DivergenceFullAngle),
        })
    }
}

/// Calculate θ_half = M²λ/(πw0) and θ_full = 2θ_half.
pub fn calculate(input: &DivergenceInput) -> CalcResult<DivergenceResult> {
    let (wavelength, waist) = input.resolve()?;
    let half = equations::divergence_half_angle(input.m_squared, wavelength, waist);

    Ok(DivergenceResult {
        half_angle_rad: half,
        full_angle_rad: equations::divergence_full_angle(half),
        convention: input.convention,
        output_unit: input.output_unit.clone(),
    })
}
