//! # Grating Equation
//!
//! Solves the scalar grating equation for one unknown:
//!
//! ```text
//! m λ = d (sin θ_i + sin θ_m),   d = 1/N
//! ```
//!
//! with both angles measured from the grating normal. Three targets are
//! supported: the diffraction angle θ_m, the line density N, and a rough upper
//! bound on the propagating order |m|max.
//!
//! ## Failure Modes
//!
//! - θ_m: `NoRealSolution` when the implied sin θ_m lies outside [-1, 1]
//! - N: `InvalidInput` when |sin θ_i + sin θ_m| < 1e-15, `NonPhysicalResult`
//!   when the computed spacing is d ≤ 0. A negative spacing is reported, not
//!   sign-corrected: it means the caller's angle/order conventions disagree.

use serde::{Deserialize, Serialize};

use super::require_positive;
use crate::equations::{self, Formula};
use crate::errors::{CalcError, CalcResult};
use crate::format::{format_angle, format_sig};
use crate::report::Report;
use crate::settings::CalculatorSettings;
use crate::units::{from_si, require_dimension, Dimension, Quantity};

/// Denominator magnitude below which the line density is not solved for
pub const MIN_ANGLE_SUM: f64 = 1e-15;

/// Unknown to solve for, with the input specific to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "solve")]
pub enum GratingSolve {
    /// Diffraction angle θ_m from line density N
    DiffractionAngle {
        line_density: Quantity,
        /// Angle unit for the report (settings default when absent)
        #[serde(default)]
        output_unit: Option<String>,
    },
    /// Line density N from diffraction angle θ_m
    LineDensity {
        diffraction_angle: Quantity,
        /// Line-density unit for the report (settings default when absent)
        #[serde(default)]
        output_unit: Option<String>,
    },
    /// Highest order with a real diffraction angle
    MaxOrder { line_density: Quantity },
}

/// Input parameters for the grating equation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "wavelength": { "value": 532.0, "unit": "nm" },
///   "incidence_angle": { "value": 0.0, "unit": "deg" },
///   "order": 1,
///   "solve": {
///     "solve": "DiffractionAngle",
///     "line_density": { "value": 1200.0, "unit": "lines/mm" }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GratingInput {
    /// Wavelength (length units)
    pub wavelength: Quantity,

    /// Incidence angle θ_i from the normal (angle units)
    pub incidence_angle: Quantity,

    /// Diffraction order m (ignored when solving for the max order)
    #[serde(default = "default_order")]
    pub order: i32,

    pub solve: GratingSolve,
}

fn default_order() -> i32 {
    1
}

impl GratingInput {
    /// Validate the inputs that do not depend on the solution.
    pub fn validate(&self) -> CalcResult<()> {
        self.resolve_common()?;
        match &self.solve {
            GratingSolve::DiffractionAngle {
                line_density,
                output_unit,
            } => {
                resolve_line_density(line_density)?;
                check_output_unit("output_unit", output_unit.as_deref(), Dimension::Angle)
            }
            GratingSolve::LineDensity {
                diffraction_angle,
                output_unit,
            } => {
                diffraction_angle.to_si_in("diffraction_angle", Dimension::Angle)?;
                check_output_unit("output_unit", output_unit.as_deref(), Dimension::LineDensity)
            }
            GratingSolve::MaxOrder { line_density } => resolve_line_density(line_density).map(|_| ()),
        }
    }

    /// SI wavelength and incidence angle
    fn resolve_common(&self) -> CalcResult<(f64, f64)> {
        let wavelength = self.wavelength.to_si_in("wavelength", Dimension::Length)?;
        let incidence = self.incidence_angle.to_si_in("incidence_angle", Dimension::Angle)?;
        require_positive("wavelength", wavelength, "Wavelength must be greater than 0")?;
        Ok((wavelength, incidence))
    }
}

fn resolve_line_density(line_density: &Quantity) -> CalcResult<f64> {
    let n = line_density.to_si_in("line_density", Dimension::LineDensity)?;
    require_positive("line_density", n, "Line density must be greater than 0")?;
    Ok(n)
}

fn check_output_unit(field: &str, unit: Option<&str>, dimension: Dimension) -> CalcResult<()> {
    match unit {
        Some(unit) => require_dimension(field, unit, dimension).map(|_| ()),
        None => Ok(()),
    }
}

/// Solution of the grating equation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "solved")]
pub enum GratingResult {
    DiffractionAngle {
        /// Diffraction angle θ_m (rad)
        angle_rad: f64,
        /// sin θ_m
        sine: f64,
        /// Groove spacing d (m)
        spacing_m: f64,
        output_unit: Option<String>,
    },
    LineDensity {
        /// Line density N (lines/m)
        line_density_per_m: f64,
        /// Groove spacing d (m)
        spacing_m: f64,
        output_unit: Option<String>,
    },
    MaxOrder {
        /// |m|max
        max_order: i64,
        /// Groove spacing d (m)
        spacing_m: f64,
    },
}

impl GratingResult {
    pub fn report(&self, settings: &CalculatorSettings) -> CalcResult<Report> {
        let digits = settings.plain_digits;
        let report = Report::new("Grating Equation");

        Ok(match self {
            GratingResult::DiffractionAngle {
                angle_rad,
                output_unit,
                ..
            } => {
                let unit = output_unit.as_deref().unwrap_or(&settings.angle_unit);
                let value = from_si(*angle_rad, unit)?;
                report
                    .with_line("θ_m", format_angle(value, unit, digits))
                    .with_formula(Formula::GratingEquation)
            }
            GratingResult::LineDensity {
                line_density_per_m,
                output_unit,
                ..
            } => {
                let unit = output_unit.as_deref().unwrap_or(&settings.line_density_unit);
                let value = from_si(*line_density_per_m, unit)?;
                report
                    .with_line("N", format!("{} {}", format_sig(value, digits), unit))
                    .with_formula(Formula::GratingLineDensity)
                    .with_formula(Formula::GratingEquation)
            }
            GratingResult::MaxOrder { max_order, .. } => report
                .with_line("|m|max", max_order.to_string())
                .with_formula(Formula::GratingMaxOrder),
        })
    }
}

/// Solve the grating equation for the requested unknown.
pub fn calculate(input: &GratingInput) -> CalcResult<GratingResult> {
    let (wavelength, incidence) = input.resolve_common()?;
    let order = f64::from(input.order);

    match &input.solve {
        GratingSolve::DiffractionAngle {
            line_density,
            output_unit,
        } => {
            check_output_unit("output_unit", output_unit.as_deref(), Dimension::Angle)?;
            let spacing = equations::grating_spacing(resolve_line_density(line_density)?);
            let sine = equations::grating_diffraction_sine(order, wavelength, spacing, incidence);

            if !(-1.0..=1.0).contains(&sine) {
                return Err(CalcError::no_real_solution(
                    "diffraction_angle",
                    format!(
                        "order {} needs sin θ_m = {}, outside [-1, 1] for this incidence angle and groove spacing",
                        input.order,
                        format_sig(sine, 4)
                    ),
                ));
            }

            Ok(GratingResult::DiffractionAngle {
                angle_rad: sine.asin(),
                sine,
                spacing_m: spacing,
                output_unit: output_unit.clone(),
            })
        }

        GratingSolve::LineDensity {
            diffraction_angle,
            output_unit,
        } => {
            check_output_unit("output_unit", output_unit.as_deref(), Dimension::LineDensity)?;
            let diffraction = diffraction_angle.to_si_in("diffraction_angle", Dimension::Angle)?;

            let angle_sum = equations::grating_angle_sum(incidence, diffraction);
            if angle_sum.abs() < MIN_ANGLE_SUM {
                return Err(CalcError::invalid_input(
                    "diffraction_angle",
                    diffraction_angle.to_string(),
                    "sin θ_i + sin θ_m is too close to 0 to solve (denominator near zero)",
                ));
            }

            let spacing = equations::grating_spacing_for_angles(order, wavelength, incidence, diffraction);
            if spacing <= 0.0 {
                return Err(CalcError::non_physical(
                    "spacing",
                    spacing.to_string(),
                    "computed d ≤ 0, the angle and order sign conventions are probably inconsistent; check the inputs",
                ));
            }

            Ok(GratingResult::LineDensity {
                line_density_per_m: 1.0 / spacing,
                spacing_m: spacing,
                output_unit: output_unit.clone(),
            })
        }

        GratingSolve::MaxOrder { line_density } => {
            let spacing = equations::grating_spacing(resolve_line_density(line_density)?);
            Ok(GratingResult::MaxOrder {
                max_order: equations::grating_max_order(wavelength, spacing, incidence),
                spacing_m: spacing,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn angle_input(order: i32) -> GratingInput {
        GratingInput {
            wavelength: Quantity::new(532.0, "nm"),
            incidence_angle: Quantity::new(0.0, "deg"),
            order,
            solve: GratingSolve::DiffractionAngle {
                line_density: Quantity::new(1200.0, "lines/mm"),
                output_unit: None,
            },
        }
    }

    fn density_input(order: i32, theta_i_deg: f64, theta_m_deg: f64) -> GratingInput {
        GratingInput {
            wavelength: Quantity::new(532.0, "nm"),
            incidence_angle: Quantity::new(theta_i_deg, "deg"),
            order,
            solve: GratingSolve::LineDensity {
                diffraction_angle: Quantity::new(theta_m_deg, "deg"),
                output_unit: None,
            },
        }
    }

    #[test]
    fn test_first_order_angle() {
        let result = calculate(&angle_input(1)).unwrap();
        let GratingResult::DiffractionAngle {
            angle_rad,
            sine,
            spacing_m,
            ..
        } = result.clone()
        else {
            panic!("expected diffraction angle, got {:?}", result);
        };
        assert_relative_eq!(spacing_m, 833.333e-9, max_relative = 1e-6);
        assert_relative_eq!(sine, 0.6384, max_relative = 1e-9);
        assert_relative_eq!(angle_rad.to_degrees(), 39.67, epsilon = 0.01);

        let report = result.report(&CalculatorSettings::default()).unwrap();
        assert!(report.headline().unwrap().starts_with("39.67"));
        assert!(report.headline().unwrap().ends_with('°'));
    }

    #[test]
    fn test_angle_output_in_radians() {
        let mut input = angle_input(1);
        input.solve = GratingSolve::DiffractionAngle {
            line_density: Quantity::new(1200.0, "lines/mm"),
            output_unit: Some("rad".to_string()),
        };
        let report = calculate(&input).unwrap().report(&CalculatorSettings::default()).unwrap();
        assert!(report.headline().unwrap().ends_with(" rad"));
    }

    #[test]
    fn test_second_order_has_no_real_solution() {
        let err = calculate(&angle_input(2)).unwrap_err();
        assert_eq!(err.error_code(), "NO_REAL_SOLUTION");
    }

    #[test]
    fn test_zero_line_density_rejected() {
        let mut input = angle_input(1);
        input.solve = GratingSolve::DiffractionAngle {
            line_density: Quantity::new(0.0, "lines/mm"),
            output_unit: None,
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_line_density_recovers_grating() {
        let theta_m = calculate(&angle_input(1)).unwrap();
        let GratingResult::DiffractionAngle { angle_rad, .. } = theta_m else {
            panic!("expected diffraction angle");
        };

        let result = calculate(&density_input(1, 0.0, angle_rad.to_degrees())).unwrap();
        let GratingResult::LineDensity {
            line_density_per_m, ..
        } = result.clone()
        else {
            panic!("expected line density");
        };
        assert_relative_eq!(line_density_per_m, 1.2e6, max_relative = 1e-9);

        let report = result.report(&CalculatorSettings::default()).unwrap();
        assert_eq!(report.headline(), Some("1200 lines/mm"));
    }

    #[test]
    fn test_line_density_zero_denominator() {
        // sin(-30°) + sin(30°) = 0
        let err = calculate(&density_input(1, -30.0, 30.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_line_density_negative_spacing_is_reported() {
        // Positive order with negative angles gives d < 0
        let err = calculate(&density_input(1, -10.0, -20.0)).unwrap_err();
        assert_eq!(err.error_code(), "NON_PHYSICAL_RESULT");
    }

    #[test]
    fn test_max_order() {
        let input = GratingInput {
            wavelength: Quantity::new(532.0, "nm"),
            incidence_angle: Quantity::new(0.0, "deg"),
            order: 1,
            solve: GratingSolve::MaxOrder {
                line_density: Quantity::new(1200.0, "lines/mm"),
            },
        };
        let result = calculate(&input).unwrap();
        assert!(matches!(result, GratingResult::MaxOrder { max_order: 1, .. }));

        let coarse = GratingInput {
            solve: GratingSolve::MaxOrder {
                line_density: Quantity::new(300.0, "lines/mm"),
            },
            ..input
        };
        // d = 3.333 µm, 3.333/0.532 = 6.27
        assert!(matches!(calculate(&coarse).unwrap(), GratingResult::MaxOrder { max_order: 6, .. }));
    }

    #[test]
    fn test_output_unit_dimension_checked() {
        let mut input = angle_input(1);
        input.solve = GratingSolve::DiffractionAngle {
            line_density: Quantity::new(1200.0, "lines/mm"),
            output_unit: Some("lines/mm".to_string()),
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "DIMENSION_MISMATCH");
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let json = r#"{
            "wavelength": {"value": 532.0, "unit": "nm"},
            "incidence_angle": {"value": 0.0, "unit": "deg"},
            "solve": {"solve": "MaxOrder", "line_density": {"value": 600.0, "unit": "lines/mm"}}
        }"#;
        let input: GratingInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.order, 1);
        assert!(matches!(input.solve, GratingSolve::MaxOrder { .. }));
    }
}
