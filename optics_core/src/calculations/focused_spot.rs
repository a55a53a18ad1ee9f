//! # Focused Spot
//!
//! Diffraction-limited spot size for a beam focused at numerical aperture NA.
//! Both common spot definitions are computed; the input picks which one is
//! reported as the headline.

use serde::{Deserialize, Serialize};

use super::require_positive;
use crate::equations::{self, Formula};
use crate::errors::CalcResult;
use crate::format::format_eng_with;
use crate::report::Report;
use crate::settings::CalculatorSettings;
use crate::units::{Dimension, Quantity};

/// Which spot size is the headline result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpotDefinition {
    /// Airy disk diameter to the first dark ring
    #[default]
    AiryDiameter,
    /// Gaussian 1/e² waist radius
    GaussianWaist,
}

/// Input parameters for the focused spot estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "wavelength": { "value": 1030.0, "unit": "nm" },
///   "na": 0.1,
///   "spot": "GaussianWaist"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusedSpotInput {
    /// Wavelength (length units)
    pub wavelength: Quantity,

    /// Numerical aperture of the focusing optic
    pub na: f64,

    /// Spot definition to report
    #[serde(default)]
    pub spot: SpotDefinition,
}

impl FocusedSpotInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.resolve().map(|_| ())
    }

    fn resolve(&self) -> CalcResult<f64> {
        let wavelength = self.wavelength.to_si_in("wavelength", Dimension::Length)?;
        require_positive("wavelength", wavelength, "Wavelength must be greater than 0")?;
        require_positive("na", self.na, "NA must be greater than 0")?;
        Ok(wavelength)
    }
}

/// Results from the focused spot estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusedSpotResult {
    /// Airy disk diameter 1.22λ/NA (m)
    pub airy_diameter_m: f64,

    /// Gaussian 1/e² waist radius λ/(πNA) (m)
    pub waist_radius_m: f64,

    /// Definition chosen for the headline
    pub spot: SpotDefinition,
}

impl FocusedSpotResult {
    pub fn report(&self, settings: &CalculatorSettings) -> CalcResult<Report> {
        let digits = settings.eng_digits;
        let report = Report::new("Focused Spot");
        let report = match self.spot {
            SpotDefinition::AiryDiameter => report
                .with_line("d_Airy", format_eng_with(self.airy_diameter_m, "m", digits))
                .with_formula(Formula::AiryDiameter),
            SpotDefinition::GaussianWaist => report
                .with_line("w0", format_eng_with(self.waist_radius_m, "m", digits))
                .with_formula(Formula::GaussianWaistFromNa),
        };
        Ok(report.with_note("If the beam is not an ideal TEM00, multiply by M² (the spot grows)."))
    }
}

/// Calculate Airy diameter and Gaussian waist.
pub fn calculate(input: &FocusedSpotInput) -> CalcResult<FocusedSpotResult> {
    let wavelength = input.resolve()?;

    Ok(FocusedSpotResult {
        airy_diameter_m: equations::airy_diameter(wavelength, input.na),
        waist_radius_m: equations::gaussian_waist_from_na(wavelength, input.na),
        spot: input.spot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_input() -> FocusedSpotInput {
        FocusedSpotInput {
            wavelength: Quantity::new(1030.0, "nm"),
            na: 0.10,
            spot: SpotDefinition::AiryDiameter,
        }
    }

    #[test]
    fn test_spot_sizes() {
        let result = calculate(&test_input()).unwrap();
        assert_relative_eq!(result.airy_diameter_m, 1.2566e-5, max_relative = 1e-9);
        assert_relative_eq!(result.waist_radius_m, 3.2786e-6, max_relative = 1e-4);
    }

    #[test]
    fn test_report_headline_follows_definition() {
        let settings = CalculatorSettings::default();
        let airy = calculate(&test_input()).unwrap().report(&settings).unwrap();
        assert_eq!(airy.headline(), Some("12.57 µm"));

        let mut input = test_input();
        input.spot = SpotDefinition::GaussianWaist;
        let waist = calculate(&input).unwrap().report(&settings).unwrap();
        assert_eq!(waist.headline(), Some("3.279 µm"));
    }

    #[test]
    fn test_zero_na_rejected() {
        let mut input = test_input();
        input.na = 0.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_spot_defaults_to_airy() {
        let input: FocusedSpotInput =
            serde_json::from_str(r#"{"wavelength": {"value": 532.0, "unit": "nm"}, "na": 0.5}"#).unwrap();
        assert_eq!(input.spot, SpotDefinition::AiryDiameter);
    }
}
