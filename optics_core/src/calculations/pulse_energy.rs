//! # Pulse Energy
//!
//! Energy of a single pulse from the average power and repetition rate of a
//! pulsed laser.
//!
//! ## Example
//!
//! ```rust
//! use optics_core::calculations::pulse_energy::{calculate, PulseEnergyInput};
//! use optics_core::units::Quantity;
//!
//! let input = PulseEnergyInput {
//!     average_power: Quantity::new(1.0, "W"),
//!     rep_rate: Quantity::new(100.0, "kHz"),
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.energy_j - 1e-5).abs() < 1e-18);
//! ```

use serde::{Deserialize, Serialize};

use super::{require_non_negative, require_positive};
use crate::equations::{self, Formula};
use crate::errors::CalcResult;
use crate::format::format_eng_with;
use crate::report::Report;
use crate::settings::CalculatorSettings;
use crate::units::{Dimension, Quantity};

/// Input parameters for pulse energy.
///
/// ## JSON Example
///
/// ```json
/// {
///   "average_power": { "value": 1.0, "unit": "W" },
///   "rep_rate": { "value": 100.0, "unit": "kHz" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseEnergyInput {
    /// Average output power (power units)
    pub average_power: Quantity,

    /// Pulse repetition rate (frequency units)
    pub rep_rate: Quantity,
}

impl PulseEnergyInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.resolve().map(|_| ())
    }

    /// SI values (W, Hz) after validation
    fn resolve(&self) -> CalcResult<(f64, f64)> {
        let power = self.average_power.to_si_in("average_power", Dimension::Power)?;
        let rep_rate = self.rep_rate.to_si_in("rep_rate", Dimension::Frequency)?;

        require_non_negative("average_power", power, "Average power cannot be negative")?;
        require_positive("rep_rate", rep_rate, "Repetition rate must be greater than 0")?;
        Ok((power, rep_rate))
    }
}

/// Results from pulse energy calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseEnergyResult {
    /// Energy per pulse (J)
    pub energy_j: f64,

    /// Average power used (W)
    pub average_power_w: f64,

    /// Repetition rate used (Hz)
    pub rep_rate_hz: f64,
}

impl PulseEnergyResult {
    pub fn report(&self, settings: &CalculatorSettings) -> CalcResult<Report> {
        Ok(Report::new("Pulse Energy")
            .with_line("E", format_eng_with(self.energy_j, "J", settings.eng_digits))
            .with_formula(Formula::PulseEnergy))
    }
}

/// Calculate single pulse energy E = P_avg / f_rep.
pub fn calculate(input: &PulseEnergyInput) -> CalcResult<PulseEnergyResult> {
    let (power, rep_rate) = input.resolve()?;

    Ok(PulseEnergyResult {
        energy_j: equations::pulse_energy(power, rep_rate),
        average_power_w: power,
        rep_rate_hz: rep_rate,
    })
}
