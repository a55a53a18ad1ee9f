//! # Rayleigh Range and Depth of Focus
//!
//! Rayleigh range of a Gaussian beam and the confocal parameter 2z_R used as
//! depth of focus. The waist is either given directly or estimated from the
//! focusing NA as w0 = λ/(πNA).

use serde::{Deserialize, Serialize};

use super::require_positive;
use crate::equations::{self, Formula};
use crate::errors::CalcResult;
use crate::format::format_eng_with;
use crate::report::Report;
use crate::settings::CalculatorSettings;
use crate::units::{Dimension, Quantity};

/// Where the waist radius comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source")]
pub enum WaistSource {
    /// 1/e² waist radius entered directly
    Direct { waist: Quantity },
    /// Estimated from numerical aperture
    FromNa { na: f64 },
}

/// Input parameters for the Rayleigh range.
///
/// ## JSON Example
///
/// ```json
/// {
///   "wavelength": { "value": 1030.0, "unit": "nm" },
///   "waist": { "source": "Direct", "waist": { "value": 5.0, "unit": "um" } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayleighRangeInput {
    /// Wavelength (length units)
    pub wavelength: Quantity,

    /// Waist radius or the NA to derive it from
    pub waist: WaistSource,
}

impl RayleighRangeInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.resolve().map(|_| ())
    }

    /// SI wavelength and waist, plus whether the waist was derived
    fn resolve(&self) -> CalcResult<(f64, f64, bool)> {
        let wavelength = self.wavelength.to_si_in("wavelength", Dimension::Length)?;

        let (waist, derived) = match &self.waist {
            WaistSource::Direct { waist } => (waist.to_si_in("waist", Dimension::Length)?, false),
            WaistSource::FromNa { na } => {
                require_positive("na", *na, "NA must be greater than 0")?;
                (equations::gaussian_waist_from_na(wavelength, *na), true)
            }
        };

        require_positive("wavelength", wavelength, "Wavelength and waist must both be greater than 0")?;
        require_positive("waist", waist, "Wavelength and waist must both be greater than 0")?;
        Ok((wavelength, waist, derived))
    }
}

/// Results from the Rayleigh range calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayleighRangeResult {
    /// Rayleigh range z_R (m)
    pub rayleigh_range_m: f64,

    /// Depth of focus 2z_R (m)
    pub depth_of_focus_m: f64,

    /// Waist radius used (m)
    pub waist_radius_m: f64,

    /// True when the waist was estimated from NA
    pub waist_derived: bool,
}

impl RayleighRangeResult {
    pub fn report(&self, settings: &CalculatorSettings) -> CalcResult<Report> {
        let digits = settings.eng_digits;
        let mut report = Report::new("Rayleigh Range")
            .with_line("z_R", format_eng_with(self.rayleigh_range_m, "m", digits))
            .with_line("DOF (2z_R)", format_eng_with(self.depth_of_focus_m, "m", digits));
        if self.waist_derived {
            report = report
                .with_line("w0 (from NA)", format_eng_with(self.waist_radius_m, "m", digits))
                .with_formula(Formula::GaussianWaistFromNa);
        }
        Ok(report
            .with_formula(Formula::RayleighRange)
            .with_formula(Formula::DepthOfFocus))
    }
}

/// Calculate z_R = πw0²/λ and DOF = 2z_R.
pub fn calculate(input: &RayleighRangeInput) -> CalcResult<RayleighRangeResult> {
    let (wavelength, waist, derived) = input.resolve()?;
    let z_r = equations::rayleigh_range(waist, wavelength);

    Ok(RayleighRangeResult {
        rayleigh_range_m: z_r,
        depth_of_focus_m: equations::depth_of_focus(z_r),
        waist_radius_m: waist,
        waist_derived: derived,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_input() -> RayleighRangeInput {
        RayleighRangeInput {
            wavelength: Quantity::new(1030.0, "nm"),
            waist: WaistSource::Direct {
                waist: Quantity::new(5.0, "um"),
            },
        }
    }

    #[test]
    fn test_direct_waist() {
        let result = calculate(&test_input()).unwrap();
        let expected = std::f64::consts::PI * 25e-12 / 1030e-9;
        assert_relative_eq!(result.rayleigh_range_m, expected, max_relative = 1e-12);
        assert_relative_eq!(result.depth_of_focus_m, 2.0 * expected, max_relative = 1e-12);
        assert!(!result.waist_derived);

        let report = result.report(&CalculatorSettings::default()).unwrap();
        assert_eq!(report.headline(), Some("76.25 µm"));
        assert_eq!(report.value_of("DOF (2z_R)"), Some("152.5 µm"));
    }

    #[test]
    fn test_waist_from_na() {
        let input = RayleighRangeInput {
            wavelength: Quantity::new(1030.0, "nm"),
            waist: WaistSource::FromNa { na: 0.10 },
        };
        let result = calculate(&input).unwrap();
        assert!(result.waist_derived);
        assert_relative_eq!(result.waist_radius_m, 3.2786e-6, max_relative = 1e-4);

        // z_R = λ/(π NA²) when w0 = λ/(π NA)
        let expected = 1030e-9 / (std::f64::consts::PI * 0.01);
        assert_relative_eq!(result.rayleigh_range_m, expected, max_relative = 1e-12);

        let report = result.report(&CalculatorSettings::default()).unwrap();
        assert!(report.value_of("w0 (from NA)").is_some());
    }

    #[test]
    fn test_invalid_na() {
        let input = RayleighRangeInput {
            wavelength: Quantity::new(1030.0, "nm"),
            waist: WaistSource::FromNa { na: -0.1 },
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_zero_waist_rejected() {
        let input = RayleighRangeInput {
            wavelength: Quantity::new(1030.0, "nm"),
            waist: WaistSource::Direct {
                waist: Quantity::new(0.0, "um"),
            },
        };
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_serialization() {
        let input = test_input();
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"source\":\"Direct\""));
        let roundtrip: RayleighRangeInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
