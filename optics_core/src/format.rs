//! # Result Formatting
//!
//! Engineering notation for results: the magnitude is scaled to the nearest
//! SI prefix at or below it (femto through tera) and rendered with a fixed
//! number of significant digits.
//!
//! ```rust
//! use optics_core::format::{format_eng, format_sig};
//!
//! assert_eq!(format_eng(1e-5, "J"), "10 µJ");
//! assert_eq!(format_eng(0.0, "W"), "0 W");
//! assert_eq!(format_sig(0.5235987755982988, 6), "0.523599");
//! ```

use serde::{Deserialize, Serialize};

/// Significant digits used by [`format_eng`]
pub const ENG_DIGITS: usize = 4;

/// Smallest and largest exponents with an SI prefix we print
const MIN_EXPONENT: i32 = -15;
const MAX_EXPONENT: i32 = 12;

/// SI prefix letter for an exponent that is a multiple of 3 in [-15, 12]
fn prefix_for(exponent: i32) -> &'static str {
    match exponent {
        -15 => "f",
        -12 => "p",
        -9 => "n",
        -6 => "µ",
        -3 => "m",
        3 => "k",
        6 => "M",
        9 => "G",
        12 => "T",
        _ => "",
    }
}

/// A value split into `mantissa × 10^exponent` with its SI prefix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineeringValue {
    pub mantissa: f64,
    pub exponent: i32,
    pub prefix: &'static str,
}

/// Split `x` into engineering form.
///
/// Returns `None` for zero, NaN and infinities, which are printed raw.
pub fn engineering(x: f64) -> Option<EngineeringValue> {
    if x == 0.0 || !x.is_finite() {
        return None;
    }
    let exponent = ((x.abs().log10() / 3.0).floor() * 3.0) as i32;
    let exponent = exponent.clamp(MIN_EXPONENT, MAX_EXPONENT);
    Some(EngineeringValue {
        mantissa: x / 10f64.powi(exponent),
        exponent,
        prefix: prefix_for(exponent),
    })
}

/// Format `x` with 4 significant digits and an SI prefix on `unit`.
pub fn format_eng(x: f64, unit: &str) -> String {
    format_eng_with(x, unit, ENG_DIGITS)
}

/// [`format_eng`] with a caller-chosen number of significant digits.
pub fn format_eng_with(x: f64, unit: &str, digits: usize) -> String {
    match engineering(x) {
        Some(eng) => format!("{} {}{}", format_sig(eng.mantissa, digits), eng.prefix, unit),
        None => format!("{} {}", x, unit),
    }
}

/// Render `x` with `digits` significant digits, `%g` style.
///
/// Fixed notation is used unless the decimal exponent is below -4 or at
/// least `digits`; trailing zeros are stripped either way.
pub fn format_sig(x: f64, digits: usize) -> String {
    if x == 0.0 || !x.is_finite() {
        return x.to_string();
    }
    let digits = digits.max(1);

    // Exponent after rounding to `digits`, as printf's %g decides it
    let sci = format!("{:.*e}", digits - 1, x);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, x))
    }
}

/// Angle in `unit` with `digits` significant digits; degrees get a degree
/// sign, other units a spaced symbol.
pub fn format_angle(value: f64, unit: &str, digits: usize) -> String {
    if unit == "deg" {
        format!("{}°", format_sig(value, digits))
    } else {
        format!("{} {}", format_sig(value, digits), unit)
    }
}

fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_nan_inf_are_raw() {
        assert_eq!(format_eng(0.0, "W"), "0 W");
        assert_eq!(format_eng(f64::NAN, "W"), "NaN W");
        assert_eq!(format_eng(f64::INFINITY, "J"), "inf J");
        assert_eq!(format_eng(f64::NEG_INFINITY, "J"), "-inf J");
    }

    #[test]
    fn test_prefix_selection() {
        assert_eq!(format_eng(1e-5, "J"), "10 µJ");
        assert_eq!(format_eng(1.2566e-5, "m"), "12.57 µm");
        assert_eq!(format_eng(3.278e-6, "m"), "3.278 µm");
        assert_eq!(format_eng(1.00069e-9, "s"), "1.001 ns");
        assert_eq!(format_eng(33.33e6, "W"), "33.33 MW");
        assert_eq!(format_eng(1.0, "W"), "1 W");
        assert_eq!(format_eng(999.0, "W"), "999 W");
        assert_eq!(format_eng(1500.0, "W"), "1.5 kW");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_eng(-2.5e-3, "m"), "-2.5 mm");
    }

    #[test]
    fn test_exponent_clamped() {
        // below femto stays in femto
        assert_eq!(format_eng(1e-18, "s"), "0.001 fs");
        // above tera stays in tera
        assert_eq!(format_eng(5e15, "W"), "5000 TW");
        assert_eq!(format_eng(5e16, "W"), "5e+04 TW");
    }

    #[test]
    fn test_engineering_parts() {
        let eng = engineering(4.7e4).unwrap();
        assert_eq!(eng.exponent, 3);
        assert_eq!(eng.prefix, "k");
        assert!((eng.mantissa - 47.0).abs() < 1e-9);
        assert!(engineering(0.0).is_none());
    }

    #[test]
    fn test_format_sig() {
        assert_eq!(format_sig(39.6716, 6), "39.6716");
        assert_eq!(format_sig(1200.0, 6), "1200");
        assert_eq!(format_sig(1.2e6, 6), "1.2e+06");
        assert_eq!(format_sig(0.000123456, 4), "0.0001235");
        assert_eq!(format_sig(0.0000123456, 4), "1.235e-05");
        assert_eq!(format_sig(30.0, 6), "30");
        assert_eq!(format_sig(-0.5, 3), "-0.5");
    }

    #[test]
    fn test_format_angle() {
        assert_eq!(format_angle(39.6726147, "deg", 6), "39.6726°");
        assert_eq!(format_angle(65.57183, "mrad", 4), "65.57 mrad");
    }

    #[test]
    fn test_custom_digits() {
        assert_eq!(format_eng_with(1.23456e-5, "J", 6), "12.3456 µJ");
        assert_eq!(format_eng_with(1.23456e-5, "J", 2), "12 µJ");
    }
}
