//! # Optical Delay
//!
//! Converts between a physical path-length difference ΔL and the time delay
//! Δt it produces in a medium of refractive index n, for single-pass or
//! double-pass (retro-reflected) geometries.
//!
//! Group index is taken equal to the phase index, which is fine for
//! engineering estimates; ultrafast work should enter the group index n_g.

use serde::{Deserialize, Serialize};

use super::require_non_negative;
use crate::equations::{self, Formula};
use crate::errors::{CalcError, CalcResult};
use crate::format::format_eng_with;
use crate::report::Report;
use crate::settings::CalculatorSettings;
use crate::units::{Dimension, Quantity};

/// Number of times the light crosses the length difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PassCount {
    #[default]
    Single,
    Double,
}

impl PassCount {
    pub fn factor(&self) -> f64 {
        match self {
            PassCount::Single => 1.0,
            PassCount::Double => 2.0,
        }
    }
}

/// Known quantity; the other one is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "from")]
pub enum DelayConversion {
    /// Δt → ΔL
    TimeToLength { delay: Quantity },
    /// ΔL → Δt
    LengthToTime { length: Quantity },
}

/// Input parameters for optical delay.
///
/// ## JSON Example
///
/// ```json
/// {
///   "conversion": { "from": "LengthToTime", "length": { "value": 0.3, "unit": "m" } },
///   "index": 1.0,
///   "passes": "Double"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticalDelayInput {
    pub conversion: DelayConversion,

    /// Refractive index n ≥ 1
    #[serde(default = "default_index")]
    pub index: f64,

    #[serde(default)]
    pub passes: PassCount,
}

fn default_index() -> f64 {
    1.0
}

impl OpticalDelayInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.resolve().map(|_| ())
    }

    /// SI value of the known quantity
    fn resolve(&self) -> CalcResult<f64> {
        if !(self.index.is_finite() && self.index >= 1.0) {
            return Err(CalcError::invalid_input(
                "index",
                self.index.to_string(),
                "Refractive index must be at least 1",
            ));
        }

        match &self.conversion {
            DelayConversion::TimeToLength { delay } => {
                let dt = delay.to_si_in("delay", Dimension::Time)?;
                require_non_negative("delay", dt, "Delay cannot be negative")?;
                Ok(dt)
            }
            DelayConversion::LengthToTime { length } => {
                let dl = length.to_si_in("length", Dimension::Length)?;
                require_non_negative("length", dl, "Length difference cannot be negative")?;
                Ok(dl)
            }
        }
    }
}

/// Results from the optical delay conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticalDelayResult {
    /// Delay Δt (s)
    pub delay_s: f64,

    /// Physical length difference ΔL (m)
    pub length_m: f64,

    /// True when the delay was the computed quantity
    pub solved_for_delay: bool,

    pub passes: PassCount,
}

impl OpticalDelayResult {
    pub fn report(&self, settings: &CalculatorSettings) -> CalcResult<Report> {
        let digits = settings.eng_digits;
        let report = Report::new("Optical Delay");
        let report = if self.solved_for_delay {
            report.with_line("Δt", format_eng_with(self.delay_s, "s", digits))
        } else {
            report.with_line("ΔL", format_eng_with(self.length_m, "m", digits))
        };
        let formula = match self.passes {
            PassCount::Single => Formula::OpticalDelaySinglePass,
            PassCount::Double => Formula::OpticalDelayDoublePass,
        };
        Ok(report.with_formula(formula))
    }
}

/// Convert between path-length difference and delay.
pub fn calculate(input: &OpticalDelayInput) -> CalcResult<OpticalDelayResult> {
    let known = input.resolve()?;
    let passes = input.passes.factor();

    let (delay_s, length_m, solved_for_delay) = match input.conversion {
        DelayConversion::TimeToLength { .. } => {
            (known, equations::path_length_for_delay(known, input.index, passes), false)
        }
        DelayConversion::LengthToTime { .. } => (equations::optical_delay(known, input.index, passes), known, true),
    };

    Ok(OpticalDelayResult {
        delay_s,
        length_m,
        solved_for_delay,
        passes: input.passes,
    })
}
