//! # Power Density
//!
//! Average power density (intensity) of a laser spot, for a uniform top-hat
//! spot or a Gaussian spot given its 1/e² radius. For pulsed lasers the
//! instantaneous peak intensity follows by using the peak power instead.

use serde::{Deserialize, Serialize};

use super::{require_non_negative, require_positive};
use crate::equations::{self, Formula};
use crate::errors::CalcResult;
use crate::format::format_sig;
use crate::report::Report;
use crate::settings::CalculatorSettings;
use crate::units::{from_si, require_dimension, Dimension, Quantity};

/// Spatial profile of the spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "profile")]
pub enum SpotProfile {
    /// Uniform circular spot of radius r
    TopHat { radius: Quantity },
    /// Gaussian spot with 1/e² radius w
    Gaussian { radius: Quantity },
}

/// Input parameters for power density.
///
/// ## JSON Example
///
/// ```json
/// {
///   "average_power": { "value": 1.0, "unit": "W" },
///   "spot": { "profile": "Gaussian", "radius": { "value": 50.0, "unit": "um" } },
///   "output_unit": "W/cm2"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerDensityInput {
    /// Average power (power units)
    pub average_power: Quantity,

    pub spot: SpotProfile,

    /// Intensity unit for the report (settings default when absent)
    #[serde(default)]
    pub output_unit: Option<String>,
}

impl PowerDensityInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.resolve().map(|_| ())
    }

    fn resolve(&self) -> CalcResult<(f64, f64)> {
        let power = self.average_power.to_si_in("average_power", Dimension::Power)?;
        require_non_negative("average_power", power, "Average power cannot be negative")?;

        let radius = match &self.spot {
            SpotProfile::TopHat { radius } | SpotProfile::Gaussian { radius } => {
                radius.to_si_in("radius", Dimension::Length)?
            }
        };
        require_positive("radius", radius, "Radius must be greater than 0")?;

        if let Some(unit) = &self.output_unit {
            require_dimension("output_unit", unit, Dimension::Intensity)?;
        }
        Ok((power, radius))
    }
}

/// Profile tag carried into the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileKind {
    TopHat,
    Gaussian,
}

/// Results from the power density calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerDensityResult {
    /// Top-hat intensity, or Gaussian on-axis peak I0 (W/m²)
    pub intensity_w_per_m2: f64,

    /// Gaussian only: characteristic average P/(πw²) (W/m²)
    pub reference_average_w_per_m2: Option<f64>,

    pub profile: ProfileKind,

    pub output_unit: Option<String>,
}

impl PowerDensityResult {
    pub fn report(&self, settings: &CalculatorSettings) -> CalcResult<Report> {
        let unit = self.output_unit.as_deref().unwrap_or(&settings.intensity_unit);
        let digits = settings.eng_digits;
        let render = |value_si: f64| -> CalcResult<String> {
            Ok(format!("{} {}", format_sig(from_si(value_si, unit)?, digits), unit))
        };

        let report = Report::new("Power Density");
        Ok(match self.profile {
            ProfileKind::TopHat => report
                .with_line("I", render(self.intensity_w_per_m2)?)
                .with_formula(Formula::TopHatIntensity),
            ProfileKind::Gaussian => {
                let mut report = report.with_line("I0 (peak)", render(self.intensity_w_per_m2)?);
                if let Some(avg) = self.reference_average_w_per_m2 {
                    report = report.with_line("P/(πw²) (reference)", render(avg)?);
                }
                report.with_formula(Formula::GaussianPeakIntensity)
            }
        })
    }
}

/// Calculate spot power density.
pub fn calculate(input: &PowerDensityInput) -> CalcResult<PowerDensityResult> {
    let (power, radius) = input.resolve()?;

    let (profile, intensity, reference) = match input.spot {
        SpotProfile::TopHat { .. } => (ProfileKind::TopHat, equations::top_hat_intensity(power, radius), None),
        SpotProfile::Gaussian { .. } => (
            ProfileKind::Gaussian,
            equations::gaussian_peak_intensity(power, radius),
            Some(equations::gaussian_reference_intensity(power, radius)),
        ),
    };

    Ok(PowerDensityResult {
        intensity_w_per_m2: intensity,
        reference_average_w_per_m2: reference,
        profile,
        output_unit: input.output_unit.clone(),
    })
}
