//! # Formula Registry
//!
//! Central registry of every formula the calculation modes evaluate. Each
//! entry carries the plain-text formula, its variables and the explanatory
//! notes shown under a result, so the CLI and the generated reference stay
//! in sync with the code.
//!
//! ## Usage
//!
//! ```rust
//! use optics_core::calculations::Mode;
//! use optics_core::equations::registry::Formula;
//!
//! let meta = Formula::RayleighRange.metadata();
//! assert_eq!(meta.formula_plain, "z_R = pi * w0^2 / lambda");
//! assert_eq!(meta.mode, Mode::RayleighRange);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::Mode;

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in a formula.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "λ", "w0")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// SI units (e.g., "m", "W")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Formula Metadata
// ============================================================================

/// Everything needed to document a formula next to its result.
#[derive(Debug, Clone)]
pub struct FormulaMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// What the formula calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Background and caveats, one bullet each
    pub notes: Vec<&'static str>,
    /// Mode that evaluates this formula
    pub mode: Mode,
    /// Function in `equations::optics` implementing it
    pub source_function: &'static str,
}

// ============================================================================
// Formula Enum
// ============================================================================

/// All formulas evaluated by Opticalc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Formula {
    /// E = P/f
    PulseEnergy,
    /// d = 1.22λ/NA
    AiryDiameter,
    /// w0 = λ/(πNA)
    GaussianWaistFromNa,
    /// z_R = πw0²/λ
    RayleighRange,
    /// DOF = 2z_R
    DepthOfFocus,
    /// P = E/τ
    PeakPowerRectangular,
    /// P = E/(τ√(π/4ln2))
    PeakPowerGaussian,
    /// rad = deg·π/180
    DegreesToRadians,
    /// deg = rad·180/π
    RadiansToDegrees,
    /// mλ = d(sinθ_i + sinθ_m)
    GratingEquation,
    /// N = (sinθ_i + sinθ_m)/(mλ)
    GratingLineDensity,
    /// |m|max = ⌊d(1+|sinθ_i|)/λ⌋
    GratingMaxOrder,
    /// I = P/(πr²)
    TopHatIntensity,
    /// I0 = 2P/(πw²)
    GaussianPeakIntensity,
    /// Δt = nΔL/c
    OpticalDelaySinglePass,
    /// Δt = 2nΔL/c
    OpticalDelayDoublePass,
    /// θ = M²λ/(πw0)
    DivergenceHalfAngle,
    /// 2θ
    DivergenceFullAngle,
}

impl Formula {
    /// Get the full metadata for this formula
    pub fn metadata(&self) -> FormulaMetadata {
        match self {
            Formula::PulseEnergy => FormulaMetadata {
                name: "Pulse Energy",
                description: "Energy of a single pulse from average power and repetition rate",
                formula_plain: "E = P_avg / f_rep",
                variables: vec![
                    Variable::new("E", "Single pulse energy", "J"),
                    Variable::new("P_avg", "Average power", "W"),
                    Variable::new("f_rep", "Repetition rate", "Hz"),
                ],
                notes: vec![
                    "Average power is the energy delivered per second.",
                    "Repetition rate is the number of pulses per second, so their ratio is the energy per pulse.",
                    "For gated or burst-mode output, first convert to the average power inside the burst.",
                ],
                mode: Mode::PulseEnergy,
                source_function: "pulse_energy",
            },

            Formula::AiryDiameter => FormulaMetadata {
                name: "Airy Disk Diameter",
                description: "Diffraction-limited spot diameter to the first dark ring",
                formula_plain: "d_Airy = 1.22 * lambda / NA",
                variables: vec![
                    Variable::new("d_Airy", "Airy disk diameter", "m"),
                    Variable::new("λ", "Wavelength", "m"),
                    Variable::new("NA", "Numerical aperture", "-"),
                ],
                notes: vec![
                    "A circular aperture produces an Airy pattern whose first dark ring has radius 0.61 λ/NA.",
                ],
                mode: Mode::FocusedSpot,
                source_function: "airy_diameter",
            },

            Formula::GaussianWaistFromNa => FormulaMetadata {
                name: "Gaussian Waist from NA",
                description: "Engineering estimate of the focused 1/e² waist radius",
                formula_plain: "w0 = lambda / (pi * NA)",
                variables: vec![
                    Variable::new("w0", "1/e² waist radius", "m"),
                    Variable::new("λ", "Wavelength", "m"),
                    Variable::new("NA", "Numerical aperture", "-"),
                ],
                notes: vec![
                    "The exact waist depends on pupil fill, aberrations and M².",
                    "For beams that are not ideal TEM00, scale the spot up by M².",
                ],
                mode: Mode::FocusedSpot,
                source_function: "gaussian_waist_from_na",
            },

            Formula::RayleighRange => FormulaMetadata {
                name: "Rayleigh Range",
                description: "Distance from the waist at which the beam radius grows by √2",
                formula_plain: "z_R = pi * w0^2 / lambda",
                variables: vec![
                    Variable::new("z_R", "Rayleigh range", "m"),
                    Variable::new("w0", "1/e² waist radius", "m"),
                    Variable::new("λ", "Wavelength", "m"),
                ],
                notes: vec!["At z = z_R the beam radius is w(z) = √2 w0."],
                mode: Mode::RayleighRange,
                source_function: "rayleigh_range",
            },

            Formula::DepthOfFocus => FormulaMetadata {
                name: "Depth of Focus",
                description: "Confocal parameter used as the engineering depth of focus",
                formula_plain: "DOF = 2 * z_R",
                variables: vec![
                    Variable::new("DOF", "Depth of focus", "m"),
                    Variable::new("z_R", "Rayleigh range", "m"),
                ],
                notes: vec!["Other fields define depth of focus with different thresholds."],
                mode: Mode::RayleighRange,
                source_function: "depth_of_focus",
            },

            Formula::PeakPowerRectangular => FormulaMetadata {
                name: "Peak Power (Rectangular)",
                description: "Peak power assuming constant power over the pulse duration",
                formula_plain: "P_peak = E / tau",
                variables: vec![
                    Variable::new("P_peak", "Peak power", "W"),
                    Variable::new("E", "Pulse energy", "J"),
                    Variable::new("τ", "Pulse duration", "s"),
                ],
                notes: vec!["The rectangular equivalent treats the pulse as constant power while it is on."],
                mode: Mode::PeakPower,
                source_function: "peak_power_rectangular",
            },

            Formula::PeakPowerGaussian => FormulaMetadata {
                name: "Peak Power (Gaussian FWHM)",
                description: "Peak power of a Gaussian pulse given its intensity FWHM",
                formula_plain: "P_peak = E / (tau_FWHM * sqrt(pi / (4 ln 2)))",
                variables: vec![
                    Variable::new("P_peak", "Peak power", "W"),
                    Variable::new("E", "Pulse energy", "J"),
                    Variable::new("τ_FWHM", "Intensity full width at half maximum", "s"),
                ],
                notes: vec!["The factor √(π/(4 ln 2)) ≈ 1.0645 relates pulse area (energy) to its peak."],
                mode: Mode::PeakPower,
                source_function: "peak_power_gaussian",
            },

            Formula::DegreesToRadians => FormulaMetadata {
                name: "Degrees to Radians",
                description: "Angle conversion from degrees to radians",
                formula_plain: "theta_rad = theta_deg * pi / 180",
                variables: vec![
                    Variable::new("θ_rad", "Angle", "rad"),
                    Variable::new("θ_deg", "Angle", "deg"),
                ],
                notes: vec![
                    "One radian subtends an arc equal to the radius.",
                    "A full turn is 2π rad = 360°.",
                ],
                mode: Mode::AngleConversion,
                source_function: "deg_to_rad",
            },

            Formula::RadiansToDegrees => FormulaMetadata {
                name: "Radians to Degrees",
                description: "Angle conversion from radians to degrees",
                formula_plain: "theta_deg = theta_rad * 180 / pi",
                variables: vec![
                    Variable::new("θ_deg", "Angle", "deg"),
                    Variable::new("θ_rad", "Angle", "rad"),
                ],
                notes: vec!["A full turn is 2π rad = 360°."],
                mode: Mode::AngleConversion,
                source_function: "rad_to_deg",
            },

            Formula::GratingEquation => FormulaMetadata {
                name: "Grating Equation",
                description: "Diffraction angle of order m for a given groove spacing",
                formula_plain: "m * lambda = d * (sin(theta_i) + sin(theta_m)), d = 1/N",
                variables: vec![
                    Variable::new("m", "Diffraction order", "-"),
                    Variable::new("λ", "Wavelength", "m"),
                    Variable::new("d", "Groove spacing", "m"),
                    Variable::new("N", "Line density", "lines/m"),
                    Variable::new("θ_i", "Incidence angle from the normal", "rad"),
                    Variable::new("θ_m", "Diffraction angle from the normal", "rad"),
                ],
                notes: vec![
                    "Light from neighbouring grooves interferes constructively when the path difference is a whole number m of wavelengths.",
                    "Sign conventions for angles and reflection/transmission differ between texts.",
                    "If there is no real solution or d comes out negative, check the angle and order signs first.",
                ],
                mode: Mode::Grating,
                source_function: "grating_diffraction_sine",
            },

            Formula::GratingLineDensity => FormulaMetadata {
                name: "Grating Line Density",
                description: "Line density that sends order m from θ_i to θ_m",
                formula_plain: "d = m * lambda / (sin(theta_i) + sin(theta_m)), N = 1/d",
                variables: vec![
                    Variable::new("N", "Line density", "lines/m"),
                    Variable::new("d", "Groove spacing", "m"),
                    Variable::new("m", "Diffraction order", "-"),
                ],
                notes: vec!["A computed d ≤ 0 usually means the angle and order sign conventions disagree."],
                mode: Mode::Grating,
                source_function: "grating_spacing_for_angles",
            },

            Formula::GratingMaxOrder => FormulaMetadata {
                name: "Maximum Grating Order",
                description: "Rough bound on the highest order that has a real diffraction angle",
                formula_plain: "|m|max = floor(d * (1 + |sin(theta_i)|) / lambda)",
                variables: vec![
                    Variable::new("|m|max", "Highest propagating order", "-"),
                    Variable::new("d", "Groove spacing", "m"),
                    Variable::new("θ_i", "Incidence angle", "rad"),
                    Variable::new("λ", "Wavelength", "m"),
                ],
                notes: vec![
                    "Only checks that some diffraction angle exists; efficiency, blaze angle and aperture are ignored.",
                ],
                mode: Mode::Grating,
                source_function: "grating_max_order",
            },

            Formula::TopHatIntensity => FormulaMetadata {
                name: "Top-Hat Intensity",
                description: "Average power density over a uniform circular spot",
                formula_plain: "I = P / (pi * r^2)",
                variables: vec![
                    Variable::new("I", "Intensity", "W/m2"),
                    Variable::new("P", "Average power", "W"),
                    Variable::new("r", "Spot radius", "m"),
                ],
                notes: vec!["Assumes power is spread evenly inside the spot, as for a flat-top shaped beam."],
                mode: Mode::PowerDensity,
                source_function: "top_hat_intensity",
            },

            Formula::GaussianPeakIntensity => FormulaMetadata {
                name: "Gaussian Peak Intensity",
                description: "On-axis intensity of a Gaussian spot with 1/e² radius w",
                formula_plain: "I0 = 2 * P / (pi * w^2)",
                variables: vec![
                    Variable::new("I0", "Peak intensity", "W/m2"),
                    Variable::new("P", "Average power", "W"),
                    Variable::new("w", "1/e² radius", "m"),
                ],
                notes: vec![
                    "From I(r) = I0 exp(-2r²/w²) integrated over the plane: P = (π w²/2) I0.",
                    "For pulsed lasers, use the peak power instead of the average power to get the instantaneous peak intensity.",
                ],
                mode: Mode::PowerDensity,
                source_function: "gaussian_peak_intensity",
            },

            Formula::OpticalDelaySinglePass => FormulaMetadata {
                name: "Optical Delay (Single Pass)",
                description: "Delay from a length difference traversed once",
                formula_plain: "dt = n * dL / c",
                variables: vec![
                    Variable::new("Δt", "Delay", "s"),
                    Variable::new("n", "Refractive index", "-"),
                    Variable::new("ΔL", "Physical length difference", "m"),
                    Variable::new("c", "Speed of light, 299 792 458", "m/s"),
                ],
                notes: vec![
                    "Light travels at v = c/n in a medium of index n.",
                    "Group index is taken equal to phase index; ultrafast pulses should use n_g.",
                ],
                mode: Mode::OpticalDelay,
                source_function: "optical_delay",
            },

            Formula::OpticalDelayDoublePass => FormulaMetadata {
                name: "Optical Delay (Double Pass)",
                description: "Delay from a length difference traversed there and back",
                formula_plain: "dt = 2 * n * dL / c",
                variables: vec![
                    Variable::new("Δt", "Delay", "s"),
                    Variable::new("n", "Refractive index", "-"),
                    Variable::new("ΔL", "Physical length difference", "m"),
                ],
                notes: vec!["A retro-reflecting geometry doubles the path difference and so the delay."],
                mode: Mode::OpticalDelay,
                source_function: "optical_delay",
            },

            Formula::DivergenceHalfAngle => FormulaMetadata {
                name: "Divergence Half-Angle",
                description: "Far-field half-angle divergence of a beam with quality M²",
                formula_plain: "theta_half = M2 * lambda / (pi * w0)",
                variables: vec![
                    Variable::new("θ_half", "Half-angle divergence", "rad"),
                    Variable::new("M²", "Beam-quality factor", "-"),
                    Variable::new("λ", "Wavelength", "m"),
                    Variable::new("w0", "1/e² waist radius", "m"),
                ],
                notes: vec![
                    "Waist size and far-field angle are a Fourier pair: a smaller waist diverges faster.",
                    "Real beams diverge M² times faster than an ideal TEM00 beam.",
                ],
                mode: Mode::Divergence,
                source_function: "divergence_half_angle",
            },

            Formula::DivergenceFullAngle => FormulaMetadata {
                name: "Divergence Full-Angle",
                description: "Full-angle divergence",
                formula_plain: "theta_full = 2 * theta_half",
                variables: vec![
                    Variable::new("θ_full", "Full-angle divergence", "rad"),
                    Variable::new("θ_half", "Half-angle divergence", "rad"),
                ],
                notes: vec![],
                mode: Mode::Divergence,
                source_function: "divergence_full_angle",
            },
        }
    }

    /// Get all formulas evaluated by a mode
    pub fn for_mode(mode: Mode) -> Vec<Formula> {
        ALL_FORMULAS
            .iter()
            .filter(|f| f.metadata().mode == mode)
            .copied()
            .collect()
    }
}

/// All formulas in the registry (for iteration)
pub static ALL_FORMULAS: &[Formula] = &[
    Formula::PulseEnergy,
    Formula::AiryDiameter,
    Formula::GaussianWaistFromNa,
    Formula::RayleighRange,
    Formula::DepthOfFocus,
    Formula::PeakPowerRectangular,
    Formula::PeakPowerGaussian,
    Formula::DegreesToRadians,
    Formula::RadiansToDegrees,
    Formula::GratingEquation,
    Formula::GratingLineDensity,
    Formula::GratingMaxOrder,
    Formula::TopHatIntensity,
    Formula::GaussianPeakIntensity,
    Formula::OpticalDelaySinglePass,
    Formula::OpticalDelayDoublePass,
    Formula::DivergenceHalfAngle,
    Formula::DivergenceFullAngle,
];

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate the formula reference as markdown.
///
/// ```rust
/// use optics_core::equations::generate_formulas_markdown;
///
/// let markdown = generate_formulas_markdown();
/// assert!(markdown.contains("## Rayleigh Range"));
/// ```
pub fn generate_formulas_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(
        r#"# Opticalc Formula Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-formulas`

Every formula below works in SI base units (m, s, W, J, rad). Inputs are
converted from the selected unit before evaluation and results are scaled
to an SI prefix for display.

## Sign Conventions

| Quantity | Convention |
|----------|-----------|
| Grating angles | Measured from the grating normal |
| Grating equation | m λ = d (sin θ_i + sin θ_m) |
| Divergence | Half-angle unless stated otherwise |

---

"#,
    );

    for mode in Mode::all() {
        let formulas = Formula::for_mode(mode);
        if formulas.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", mode.display_name()));

        for formula in formulas {
            let meta = formula.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Source:** `equations::optics::{}`\n\n", meta.source_function));

            if !meta.notes.is_empty() {
                output.push_str("**Notes:**\n");
                for note in &meta.notes {
                    output.push_str(&format!("- {}\n", note));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Formulas:** {}\n- **Modes:** {}\n",
        ALL_FORMULAS.len(),
        Mode::all().len()
    ));

    output
}
