//! # Optics Equations
//!
//! All closed-form relations used by the calculation modes live here, with
//! their metadata in one registry. Keeping them together allows:
//! - Easy verification against textbook references
//! - Documentation of assumptions and sign conventions
//! - A generated formula reference that cannot drift from the code
//!
//! ## Modules
//!
//! - [`optics`] - Pulse, Gaussian-beam, grating, intensity and delay formulas
//! - [`registry`] - Formula metadata and markdown generation
//!
//! ## Units
//!
//! Every function takes and returns SI base units.

pub mod optics;
pub mod registry;

pub use optics::{
    airy_diameter,
    depth_of_focus,
    divergence_full_angle,
    divergence_half_angle,
    gaussian_fwhm_factor,
    gaussian_peak_intensity,
    gaussian_reference_intensity,
    gaussian_waist_from_na,
    grating_angle_sum,
    grating_diffraction_sine,
    grating_max_order,
    grating_spacing,
    grating_spacing_for_angles,
    optical_delay,
    path_length_for_delay,
    peak_power_gaussian,
    peak_power_rectangular,
    pulse_energy,
    rayleigh_range,
    top_hat_intensity,
    SPEED_OF_LIGHT,
};

pub use registry::{generate_formulas_markdown, Formula, FormulaMetadata, Variable, ALL_FORMULAS};
