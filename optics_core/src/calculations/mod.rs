//! # Optics Calculations
//!
//! This module contains all calculation modes. Each calculation follows the
//! pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, quantities carry units)
//! - `*Result` - Calculation results in SI (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//! - `*Result::report(settings)` - Human-readable rendering
//!
//! [`CalculationItem`] wraps every input behind a `"mode"` tag so a single
//! JSON document can select and parameterise any mode; [`evaluate`] runs it.
//!
//! ## Available Calculations
//!
//! - [`pulse_energy`] - Energy per pulse from average power and rep rate
//! - [`focused_spot`] - Diffraction-limited spot size from NA
//! - [`rayleigh_range`] - Rayleigh range and depth of focus
//! - [`peak_power`] - Peak power from pulse energy and duration
//! - [`angle`] - Degrees/radians conversion
//! - [`grating`] - Grating equation (angle, line density, max order)
//! - [`power_density`] - Spot intensity, top-hat or Gaussian
//! - [`optical_delay`] - Path-length difference and time delay
//! - [`divergence`] - Far-field beam divergence

pub mod angle;
pub mod divergence;
pub mod focused_spot;
pub mod grating;
pub mod optical_delay;
pub mod peak_power;
pub mod power_density;
pub mod pulse_energy;
pub mod rayleigh_range;

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::equations::Formula;
use crate::errors::{CalcError, CalcResult};
use crate::report::Report;
use crate::settings::CalculatorSettings;

// Re-export commonly used types
pub use angle::{AngleDirection, AngleInput, AngleResult};
pub use divergence::{AngleConvention, DivergenceInput, DivergenceResult};
pub use focused_spot::{FocusedSpotInput, FocusedSpotResult, SpotDefinition};
pub use grating::{GratingInput, GratingResult, GratingSolve};
pub use optical_delay::{DelayConversion, OpticalDelayInput, OpticalDelayResult, PassCount};
pub use peak_power::{PeakPowerInput, PeakPowerResult, PulseShape};
pub use power_density::{PowerDensityInput, PowerDensityResult, SpotProfile};
pub use pulse_energy::{PulseEnergyInput, PulseEnergyResult};
pub use rayleigh_range::{RayleighRangeInput, RayleighRangeResult, WaistSource};

/// Reject anything that is not strictly positive (NaN included).
pub(crate) fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), reason))
    }
}

/// Reject negative values and NaN.
pub(crate) fn require_non_negative(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), reason))
    }
}

/// The nine calculation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    PulseEnergy,
    FocusedSpot,
    RayleighRange,
    PeakPower,
    AngleConversion,
    Grating,
    PowerDensity,
    OpticalDelay,
    Divergence,
}

impl Mode {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::PulseEnergy => "Pulse Energy",
            Mode::FocusedSpot => "Focused Spot Size",
            Mode::RayleighRange => "Rayleigh Range",
            Mode::PeakPower => "Peak Power",
            Mode::AngleConversion => "Angle Conversion",
            Mode::Grating => "Grating Equation",
            Mode::PowerDensity => "Power Density",
            Mode::OpticalDelay => "Optical Delay",
            Mode::Divergence => "Beam Divergence",
        }
    }

    /// Command-line name, e.g. `rayleigh-range`
    pub fn slug(&self) -> &'static str {
        match self {
            Mode::PulseEnergy => "pulse-energy",
            Mode::FocusedSpot => "focused-spot",
            Mode::RayleighRange => "rayleigh-range",
            Mode::PeakPower => "peak-power",
            Mode::AngleConversion => "angle",
            Mode::Grating => "grating",
            Mode::PowerDensity => "power-density",
            Mode::OpticalDelay => "optical-delay",
            Mode::Divergence => "divergence",
        }
    }

    pub fn all() -> [Mode; 9] {
        [
            Mode::PulseEnergy,
            Mode::FocusedSpot,
            Mode::RayleighRange,
            Mode::PeakPower,
            Mode::AngleConversion,
            Mode::Grating,
            Mode::PowerDensity,
            Mode::OpticalDelay,
            Mode::Divergence,
        ]
    }

    /// Formulas this mode can evaluate
    pub fn formulas(&self) -> Vec<Formula> {
        Formula::for_mode(*self)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Enum wrapper for all calculation inputs.
///
/// ## JSON Example
///
/// ```json
/// {
///   "mode": "PulseEnergy",
///   "average_power": { "value": 1.0, "unit": "W" },
///   "rep_rate": { "value": 100.0, "unit": "kHz" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum CalculationItem {
    PulseEnergy(PulseEnergyInput),
    FocusedSpot(FocusedSpotInput),
    RayleighRange(RayleighRangeInput),
    PeakPower(PeakPowerInput),
    AngleConversion(AngleInput),
    Grating(GratingInput),
    PowerDensity(PowerDensityInput),
    OpticalDelay(OpticalDelayInput),
    Divergence(DivergenceInput),
}

impl CalculationItem {
    /// Mode selected by this item
    pub fn mode(&self) -> Mode {
        match self {
            CalculationItem::PulseEnergy(_) => Mode::PulseEnergy,
            CalculationItem::FocusedSpot(_) => Mode::FocusedSpot,
            CalculationItem::RayleighRange(_) => Mode::RayleighRange,
            CalculationItem::PeakPower(_) => Mode::PeakPower,
            CalculationItem::AngleConversion(_) => Mode::AngleConversion,
            CalculationItem::Grating(_) => Mode::Grating,
            CalculationItem::PowerDensity(_) => Mode::PowerDensity,
            CalculationItem::OpticalDelay(_) => Mode::OpticalDelay,
            CalculationItem::Divergence(_) => Mode::Divergence,
        }
    }

    /// Validate the wrapped input without evaluating it.
    pub fn validate(&self) -> CalcResult<()> {
        match self {
            CalculationItem::PulseEnergy(i) => i.validate(),
            CalculationItem::FocusedSpot(i) => i.validate(),
            CalculationItem::RayleighRange(i) => i.validate(),
            CalculationItem::PeakPower(i) => i.validate(),
            CalculationItem::AngleConversion(_) => Ok(()),
            CalculationItem::Grating(i) => i.validate(),
            CalculationItem::PowerDensity(i) => i.validate(),
            CalculationItem::OpticalDelay(i) => i.validate(),
            CalculationItem::Divergence(i) => i.validate(),
        }
    }
}

/// Result of [`evaluate`], tagged by mode like [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum CalculationOutput {
    PulseEnergy(PulseEnergyResult),
    FocusedSpot(FocusedSpotResult),
    RayleighRange(RayleighRangeResult),
    PeakPower(PeakPowerResult),
    AngleConversion(AngleResult),
    Grating(GratingResult),
    PowerDensity(PowerDensityResult),
    OpticalDelay(OpticalDelayResult),
    Divergence(DivergenceResult),
}

impl CalculationOutput {
    pub fn mode(&self) -> Mode {
        match self {
            CalculationOutput::PulseEnergy(_) => Mode::PulseEnergy,
            CalculationOutput::FocusedSpot(_) => Mode::FocusedSpot,
            CalculationOutput::RayleighRange(_) => Mode::RayleighRange,
            CalculationOutput::PeakPower(_) => Mode::PeakPower,
            CalculationOutput::AngleConversion(_) => Mode::AngleConversion,
            CalculationOutput::Grating(_) => Mode::Grating,
            CalculationOutput::PowerDensity(_) => Mode::PowerDensity,
            CalculationOutput::OpticalDelay(_) => Mode::OpticalDelay,
            CalculationOutput::Divergence(_) => Mode::Divergence,
        }
    }

    /// Render the result with the given output settings.
    pub fn report(&self, settings: &CalculatorSettings) -> CalcResult<Report> {
        match self {
            CalculationOutput::PulseEnergy(r) => r.report(settings),
            CalculationOutput::FocusedSpot(r) => r.report(settings),
            CalculationOutput::RayleighRange(r) => r.report(settings),
            CalculationOutput::PeakPower(r) => r.report(settings),
            CalculationOutput::AngleConversion(r) => r.report(settings),
            CalculationOutput::Grating(r) => r.report(settings),
            CalculationOutput::PowerDensity(r) => r.report(settings),
            CalculationOutput::OpticalDelay(r) => r.report(settings),
            CalculationOutput::Divergence(r) => r.report(settings),
        }
    }
}

/// Run the calculation selected by `item`.
///
/// Every rejection is returned as a [`CalcError`]; nothing panics and no
/// state is kept between calls.
pub fn evaluate(item: &CalculationItem) -> CalcResult<CalculationOutput> {
    let mode = item.mode();
    debug!("evaluating {}: {:?}", mode.slug(), item);

    let output = match item {
        CalculationItem::PulseEnergy(i) => pulse_energy::calculate(i).map(CalculationOutput::PulseEnergy),
        CalculationItem::FocusedSpot(i) => focused_spot::calculate(i).map(CalculationOutput::FocusedSpot),
        CalculationItem::RayleighRange(i) => rayleigh_range::calculate(i).map(CalculationOutput::RayleighRange),
        CalculationItem::PeakPower(i) => peak_power::calculate(i).map(CalculationOutput::PeakPower),
        CalculationItem::AngleConversion(i) => angle::calculate(i).map(CalculationOutput::AngleConversion),
        CalculationItem::Grating(i) => grating::calculate(i).map(CalculationOutput::Grating),
        CalculationItem::PowerDensity(i) => power_density::calculate(i).map(CalculationOutput::PowerDensity),
        CalculationItem::OpticalDelay(i) => optical_delay::calculate(i).map(CalculationOutput::OpticalDelay),
        CalculationItem::Divergence(i) => divergence::calculate(i).map(CalculationOutput::Divergence),
    };

    match &output {
        Ok(result) => debug!("{} result: {:?}", mode.slug(), result),
        Err(e) => warn!("{} rejected [{}]: {}", mode.slug(), e.error_code(), e),
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Quantity;
    use approx::assert_relative_eq;

    fn settings() -> CalculatorSettings {
        CalculatorSettings::default()
    }

    fn headline(item: &CalculationItem) -> String {
        let report = evaluate(item).unwrap().report(&settings()).unwrap();
        report.headline().unwrap().to_string()
    }

    #[test]
    fn test_mode_tables_agree() {
        for mode in Mode::all() {
            assert!(!mode.display_name().is_empty());
            assert!(!mode.formulas().is_empty(), "{} has no formulas", mode);
        }
        let mut slugs: Vec<_> = Mode::all().iter().map(|m| m.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), 9);
    }

    #[test]
    fn test_pulse_energy_from_json() {
        let json = r#"{
            "mode": "PulseEnergy",
            "average_power": { "value": 1.0, "unit": "W" },
            "rep_rate": { "value": 100.0, "unit": "kHz" }
        }"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.mode(), Mode::PulseEnergy);
        assert_eq!(headline(&item), "10 µJ");
    }

    #[test]
    fn test_focused_spot() {
        let item = CalculationItem::FocusedSpot(FocusedSpotInput {
            wavelength: Quantity::new(1030.0, "nm"),
            na: 0.10,
            spot: SpotDefinition::AiryDiameter,
        });
        assert_eq!(headline(&item), "12.57 µm");
    }

    #[test]
    fn test_rayleigh_range() {
        let item = CalculationItem::RayleighRange(RayleighRangeInput {
            wavelength: Quantity::new(1030.0, "nm"),
            waist: WaistSource::Direct {
                waist: Quantity::new(5.0, "um"),
            },
        });
        let CalculationOutput::RayleighRange(result) = evaluate(&item).unwrap() else {
            panic!("wrong output mode");
        };
        assert_relative_eq!(result.rayleigh_range_m, 76.25e-6, max_relative = 1e-3);
        assert_relative_eq!(result.depth_of_focus_m, 152.5e-6, max_relative = 1e-3);
    }

    #[test]
    fn test_grating_angle_and_no_solution() {
        let grating = |order: i32| {
            CalculationItem::Grating(GratingInput {
                wavelength: Quantity::new(532.0, "nm"),
                incidence_angle: Quantity::new(0.0, "deg"),
                order,
                solve: GratingSolve::DiffractionAngle {
                    line_density: Quantity::new(1200.0, "lines/mm"),
                    output_unit: None,
                },
            })
        };

        let Ok(CalculationOutput::Grating(GratingResult::DiffractionAngle { angle_rad, .. })) = evaluate(&grating(1))
        else {
            panic!("expected a diffraction angle");
        };
        assert!((angle_rad.to_degrees() - 39.67).abs() < 0.01);

        let err = evaluate(&grating(2)).unwrap_err();
        assert_eq!(err.error_code(), "NO_REAL_SOLUTION");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_divergence_half_and_full() {
        let item = |convention| {
            CalculationItem::Divergence(DivergenceInput {
                wavelength: Quantity::new(1030.0, "nm"),
                waist: Quantity::new(5.0, "um"),
                m_squared: 1.0,
                convention,
                output_unit: None,
            })
        };
        assert_eq!(headline(&item(AngleConvention::Half)), "65.5718 mrad");
        assert_eq!(headline(&item(AngleConvention::Full)), "131.144 mrad");
    }

    #[test]
    fn test_optical_delay_from_json() {
        let json = r#"{
            "mode": "OpticalDelay",
            "conversion": { "from": "LengthToTime", "length": { "value": 0.3, "unit": "m" } },
            "passes": "Double"
        }"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        assert_eq!(headline(&item), "2.001 ns");
    }

    #[test]
    fn test_angle_never_fails() {
        let item = CalculationItem::AngleConversion(AngleInput {
            value: -720.0,
            direction: AngleDirection::DegreesToRadians,
        });
        assert!(item.validate().is_ok());
        assert!(evaluate(&item).is_ok());
    }

    #[test]
    fn test_validation_errors_surface() {
        let item = CalculationItem::PulseEnergy(PulseEnergyInput {
            average_power: Quantity::new(1.0, "W"),
            rep_rate: Quantity::new(0.0, "Hz"),
        });
        assert_eq!(item.validate().unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(evaluate(&item).unwrap_err().error_code(), "INVALID_INPUT");

        let item = CalculationItem::PeakPower(PeakPowerInput {
            energy: Quantity::new(1.0, "mJ"),
            duration: Quantity::new(10.0, "kHz"),
            shape: PulseShape::Rectangular,
        });
        assert_eq!(evaluate(&item).unwrap_err().error_code(), "DIMENSION_MISMATCH");
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let json = r#"{ "mode": "Interferometer", "value": 1.0 }"#;
        assert!(serde_json::from_str::<CalculationItem>(json).is_err());
    }

    #[test]
    fn test_output_serializes_with_mode_tag() {
        let item = CalculationItem::AngleConversion(AngleInput {
            value: 180.0,
            direction: AngleDirection::DegreesToRadians,
        });
        let output = evaluate(&item).unwrap();
        assert_eq!(output.mode(), Mode::AngleConversion);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["mode"], "AngleConversion");
        assert_relative_eq!(json["radians"].as_f64().unwrap(), std::f64::consts::PI);
    }
}
