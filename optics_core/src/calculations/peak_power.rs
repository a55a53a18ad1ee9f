//! # Peak Power
//!
//! Peak power from pulse energy and duration, either as a rectangular
//! equivalent or with the Gaussian FWHM correction.

use serde::{Deserialize, Serialize};

use super::{require_non_negative, require_positive};
use crate::equations::{self, Formula};
use crate::errors::CalcResult;
use crate::format::format_eng_with;
use crate::report::Report;
use crate::settings::CalculatorSettings;
use crate::units::{Dimension, Quantity};

/// Temporal pulse shape assumed for the duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PulseShape {
    /// No correction: constant power over τ
    #[default]
    Rectangular,
    /// Gaussian pulse, τ is the intensity FWHM
    GaussianFwhm,
}

/// Input parameters for peak power.
///
/// ## JSON Example
///
/// ```json
/// {
///   "energy": { "value": 10.0, "unit": "uJ" },
///   "duration": { "value": 300.0, "unit": "fs" },
///   "shape": "GaussianFwhm"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakPowerInput {
    /// Pulse energy (energy units)
    pub energy: Quantity,

    /// Pulse duration (time units)
    pub duration: Quantity,

    /// Pulse shape correction
    #[serde(default)]
    pub shape: PulseShape,
}

impl PeakPowerInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.resolve().map(|_| ())
    }

    fn resolve(&self) -> CalcResult<(f64, f64)> {
        let energy = self.energy.to_si_in("energy", Dimension::Energy)?;
        let duration = self.duration.to_si_in("duration", Dimension::Time)?;

        require_non_negative("energy", energy, "Pulse energy cannot be negative")?;
        require_positive("duration", duration, "Pulse duration must be greater than 0")?;
        Ok((energy, duration))
    }
}

/// Results from the peak power calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakPowerResult {
    /// Peak power (W)
    pub peak_power_w: f64,

    /// Shape the peak power was computed for
    pub shape: PulseShape,
}

impl PeakPowerResult {
    pub fn report(&self, settings: &CalculatorSettings) -> CalcResult<Report> {
        let formula = match self.shape {
            PulseShape::Rectangular => Formula::PeakPowerRectangular,
            PulseShape::GaussianFwhm => Formula::PeakPowerGaussian,
        };
        Ok(Report::new("Peak Power")
            .with_line("P_peak", format_eng_with(self.peak_power_w, "W", settings.eng_digits))
            .with_formula(formula))
    }
}

/// Calculate peak power for the selected pulse shape.
pub fn calculate(input: &PeakPowerInput) -> CalcResult<PeakPowerResult> {
    let (energy, duration) = input.resolve()?;

    let peak_power_w = match input.shape {
        PulseShape::Rectangular => equations::peak_power_rectangular(energy, duration),
        PulseShape::GaussianFwhm => equations::peak_power_gaussian(energy, duration),
    };

    Ok(PeakPowerResult {
        peak_power_w,
        shape: input.shape,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_input(shape: PulseShape) -> PeakPowerInput {
        PeakPowerInput {
            energy: Quantity::new(10.0, "uJ"),
            duration: Quantity::new(300.0, "fs"),
            shape,
        }
    }

    #[test]
    fn test_rectangular() {
        let result = calculate(&test_input(PulseShape::Rectangular)).unwrap();
        assert_relative_eq!(result.peak_power_w, 10e-6 / 300e-15, max_relative = 1e-12);

        let report = result.report(&CalculatorSettings::default()).unwrap();
        assert_eq!(report.headline(), Some("33.33 MW"));
    }

    #[test]
    fn test_gaussian_correction() {
        let rect = calculate(&test_input(PulseShape::Rectangular)).unwrap();
        let gauss = calculate(&test_input(PulseShape::GaussianFwhm)).unwrap();
        assert_relative_eq!(rect.peak_power_w / gauss.peak_power_w, 1.0644670194, max_relative = 1e-9);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut input = test_input(PulseShape::Rectangular);
        input.duration = Quantity::new(0.0, "ps");
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }
}
