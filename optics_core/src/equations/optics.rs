//! # Laser and Optics Formulas
//!
//! Closed-form relations used by the calculation modes. Every function takes
//! and returns SI base units (m, s, W, J, rad, 1/m) and does no validation;
//! the calculation modules check their inputs before calling in.
//!
//! ## Notation
//!
//! - `λ` = Wavelength
//! - `NA` = Numerical aperture
//! - `w0` = Gaussian 1/e² waist radius
//! - `z_R` = Rayleigh range
//! - `τ` = Pulse duration
//! - `d` = Grating groove spacing, `N = 1/d` line density
//! - `m` = Diffraction order
//! - `n` = Refractive index
//! - `M²` = Beam-quality factor
//!
//! ## Sign Conventions
//!
//! - Grating angles are measured from the grating normal and the equation is
//!   written `mλ = d(sinθ_i + sinθ_m)`
//!
//! ## References
//!
//! - Siegman, *Lasers*, ch. 17 (Gaussian beams)
//! - Born & Wolf, *Principles of Optics*, §8.5 (Airy pattern) and §8.6 (gratings)

/// Speed of light in vacuum (m/s)
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

// =============================================================================
// PULSES
// =============================================================================

/// Energy of one pulse from average power and repetition rate
///
/// # Formula
/// - E = P_avg / f_rep
#[inline]
pub fn pulse_energy(average_power: f64, rep_rate: f64) -> f64 {
    average_power / rep_rate
}

/// Peak power of a rectangular-equivalent pulse
///
/// # Formula
/// - P_peak = E / τ
#[inline]
pub fn peak_power_rectangular(energy: f64, duration: f64) -> f64 {
    energy / duration
}

/// Ratio between the energy-equivalent width of a Gaussian pulse and its
/// intensity FWHM: √(π / (4 ln 2)) ≈ 1.0645
#[inline]
pub fn gaussian_fwhm_factor() -> f64 {
    (std::f64::consts::PI / (4.0 * std::f64::consts::LN_2)).sqrt()
}

/// Peak power of a Gaussian pulse given its intensity FWHM
///
/// # Formula
/// - P_peak = E / (τ_FWHM · √(π / (4 ln 2)))
#[inline]
pub fn peak_power_gaussian(energy: f64, duration_fwhm: f64) -> f64 {
    energy / (duration_fwhm * gaussian_fwhm_factor())
}

// =============================================================================
// FOCUSING AND GAUSSIAN BEAMS
// =============================================================================

/// Diameter of the Airy disk to the first dark ring
///
/// # Formula
/// - d_Airy = 1.22 λ / NA
#[inline]
pub fn airy_diameter(wavelength: f64, na: f64) -> f64 {
    1.22 * wavelength / na
}

/// Gaussian 1/e² waist radius for a beam focused at numerical aperture NA
///
/// # Formula
/// - w0 = λ / (π NA)
#[inline]
pub fn gaussian_waist_from_na(wavelength: f64, na: f64) -> f64 {
    wavelength / (std::f64::consts::PI * na)
}

/// Rayleigh range of a Gaussian beam
///
/// ```text
///   w(z)
///    │╲                     ╱
///  √2w0 ─╲───────────────╱─
///    │     ╲ ___ w0 ___ ╱
///    │←z_R→|     0     |←z_R→
/// ```
///
/// # Formula
/// - z_R = π w0² / λ
#[inline]
pub fn rayleigh_range(waist: f64, wavelength: f64) -> f64 {
    std::f64::consts::PI * waist * waist / wavelength
}

/// Depth of focus as the confocal parameter
///
/// # Formula
/// - DOF = 2 z_R
#[inline]
pub fn depth_of_focus(rayleigh_range: f64) -> f64 {
    2.0 * rayleigh_range
}

/// Far-field half-angle divergence, corrected for beam quality
///
/// # Formula
/// - θ_half = M² λ / (π w0)
#[inline]
pub fn divergence_half_angle(m_squared: f64, wavelength: f64, waist: f64) -> f64 {
    m_squared * wavelength / (std::f64::consts::PI * waist)
}

/// Full-angle divergence
///
/// # Formula
/// - θ_full = 2 θ_half
#[inline]
pub fn divergence_full_angle(half_angle: f64) -> f64 {
    2.0 * half_angle
}

// =============================================================================
// GRATINGS
// =============================================================================

/// Groove spacing from line density, d = 1/N
#[inline]
pub fn grating_spacing(line_density: f64) -> f64 {
    1.0 / line_density
}

/// Sine of the diffraction angle from the grating equation
///
/// # Formula
/// - sin θ_m = mλ/d − sin θ_i
///
/// A result outside [-1, 1] means order `m` does not propagate.
#[inline]
pub fn grating_diffraction_sine(order: f64, wavelength: f64, spacing: f64, incidence: f64) -> f64 {
    order * wavelength / spacing - incidence.sin()
}

/// Denominator of the spacing solution, sin θ_i + sin θ_m
#[inline]
pub fn grating_angle_sum(incidence: f64, diffraction: f64) -> f64 {
    incidence.sin() + diffraction.sin()
}

/// Groove spacing that sends order `m` from θ_i to θ_m
///
/// # Formula
/// - d = mλ / (sin θ_i + sin θ_m)
#[inline]
pub fn grating_spacing_for_angles(order: f64, wavelength: f64, incidence: f64, diffraction: f64) -> f64 {
    order * wavelength / grating_angle_sum(incidence, diffraction)
}

/// Highest order with a real solution for some diffraction angle
///
/// # Formula
/// - |m|max = ⌊d (1 + |sin θ_i|) / λ⌋
#[inline]
pub fn grating_max_order(wavelength: f64, spacing: f64, incidence: f64) -> i64 {
    (spacing * (1.0 + incidence.sin().abs()) / wavelength).floor() as i64
}

// =============================================================================
// INTENSITY
// =============================================================================

/// Uniform intensity over a top-hat spot of radius r
///
/// # Formula
/// - I = P / (π r²)
#[inline]
pub fn top_hat_intensity(power: f64, radius: f64) -> f64 {
    power / (std::f64::consts::PI * radius * radius)
}

/// On-axis peak intensity of a Gaussian spot with 1/e² radius w
///
/// From I(r) = I0 exp(−2r²/w²) and P = (π w²/2) I0:
///
/// # Formula
/// - I0 = 2P / (π w²)
#[inline]
pub fn gaussian_peak_intensity(power: f64, radius: f64) -> f64 {
    2.0 * power / (std::f64::consts::PI * radius * radius)
}

/// Characteristic average P / (π w²) over the 1/e² disk
#[inline]
pub fn gaussian_reference_intensity(power: f64, radius: f64) -> f64 {
    top_hat_intensity(power, radius)
}

// =============================================================================
// OPTICAL DELAY
// =============================================================================

/// Delay accumulated over `passes` traversals of a length difference ΔL
///
/// # Formula
/// - Δt = passes · n ΔL / c
#[inline]
pub fn optical_delay(length: f64, index: f64, passes: f64) -> f64 {
    passes * index * length / SPEED_OF_LIGHT
}

/// Length difference that produces delay Δt over `passes` traversals
///
/// # Formula
/// - ΔL = c Δt / (passes · n)
#[inline]
pub fn path_length_for_delay(delay: f64, index: f64, passes: f64) -> f64 {
    SPEED_OF_LIGHT * delay / (passes * index)
}
