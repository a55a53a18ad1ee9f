//! # Angle Conversion
//!
//! Degrees to radians and back. No validation: every finite angle converts.

use serde::{Deserialize, Serialize};

use crate::equations::Formula;
use crate::errors::CalcResult;
use crate::format::format_sig;
use crate::report::Report;
use crate::settings::CalculatorSettings;
use crate::units::{deg_to_rad, rad_to_deg};

/// Conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleDirection {
    #[default]
    DegreesToRadians,
    RadiansToDegrees,
}

/// Input for angle conversion.
///
/// ## JSON Example
///
/// ```json
/// { "value": 30.0, "direction": "DegreesToRadians" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleInput {
    /// Angle in the source unit of `direction`
    pub value: f64,

    #[serde(default)]
    pub direction: AngleDirection,
}

/// Both representations of the angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleResult {
    pub degrees: f64,
    pub radians: f64,
    pub direction: AngleDirection,
}

impl AngleResult {
    pub fn report(&self, settings: &CalculatorSettings) -> CalcResult<Report> {
        let digits = settings.plain_digits;
        let deg = format!("{}°", format_sig(self.degrees, digits));
        let rad = format!("{} rad", format_sig(self.radians, digits));

        let report = Report::new("Angle Conversion");
        Ok(match self.direction {
            AngleDirection::DegreesToRadians => report
                .with_line("θ", format!("{} = {}", deg, rad))
                .with_formula(Formula::DegreesToRadians),
            AngleDirection::RadiansToDegrees => report
                .with_line("θ", format!("{} = {}", rad, deg))
                .with_formula(Formula::RadiansToDegrees),
        })
    }
}

/// Convert the angle in the requested direction.
pub fn calculate(input: &AngleInput) -> CalcResult<AngleResult> {
    let (degrees, radians) = match input.direction {
        AngleDirection::DegreesToRadians => (input.value, deg_to_rad(input.value)),
        AngleDirection::RadiansToDegrees => (rad_to_deg(input.value), input.value),
    };

    Ok(AngleResult {
        degrees,
        radians,
        direction: input.direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_degrees_to_radians() {
        let input = AngleInput {
            value: 30.0,
            direction: AngleDirection::DegreesToRadians,
        };
        let result = calculate(&input).unwrap();
        assert_relative_eq!(result.radians, PI / 6.0);

        let report = result.report(&CalculatorSettings::default()).unwrap();
        assert_eq!(report.headline(), Some("30° = 0.523599 rad"));
    }

    #[test]
    fn test_radians_to_degrees() {
        let input = AngleInput {
            value: PI / 6.0,
            direction: AngleDirection::RadiansToDegrees,
        };
        let result = calculate(&input).unwrap();
        assert_relative_eq!(result.degrees, 30.0, max_relative = 1e-12);

        let report = result.report(&CalculatorSettings::default()).unwrap();
        assert_eq!(report.headline(), Some("0.523599 rad = 30°"));
    }

    #[test]
    fn test_negative_and_large_angles_convert() {
        for value in [-45.0, 0.0, 720.0] {
            let input = AngleInput {
                value,
                direction: AngleDirection::DegreesToRadians,
            };
            assert!(calculate(&input).is_ok());
        }
    }
}
