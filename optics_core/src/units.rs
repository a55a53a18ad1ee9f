//! # Unit Table
//!
//! Every unit symbol a user can select maps to a scale factor that converts a
//! value in that unit to its SI base unit, plus the physical dimension it
//! measures. The table is built once on first use and never mutated.
//!
//! ## SI Base Units
//!
//! | Dimension | Base unit |
//! |-----------|-----------|
//! | Power | W |
//! | Frequency | Hz |
//! | Energy | J |
//! | Time | s |
//! | Length | m |
//! | Angle | rad |
//! | Area | m2 |
//! | Line density | lines/m |
//! | Intensity | W/m2 |
//!
//! ## Example
//!
//! ```rust
//! use optics_core::units::{to_si, Dimension, Quantity};
//!
//! assert_eq!(to_si(5.0, "mW").unwrap(), 5e-3);
//!
//! let rep_rate: Quantity = "100 kHz".parse().unwrap();
//! assert_eq!(rep_rate.to_si_in("rep_rate", Dimension::Frequency).unwrap(), 1e5);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::trace;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Dimensions
// ============================================================================

/// Physical dimension a unit measures. Conversions only compose within one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Power,
    Frequency,
    Energy,
    Time,
    Length,
    Angle,
    Area,
    LineDensity,
    Intensity,
}

impl Dimension {
    /// Display name for the dimension
    pub fn display_name(&self) -> &'static str {
        match self {
            Dimension::Power => "power",
            Dimension::Frequency => "frequency",
            Dimension::Energy => "energy",
            Dimension::Time => "time",
            Dimension::Length => "length",
            Dimension::Angle => "angle",
            Dimension::Area => "area",
            Dimension::LineDensity => "line density",
            Dimension::Intensity => "intensity",
        }
    }

    /// Symbol of the SI base unit (scale factor 1.0)
    pub fn si_symbol(&self) -> &'static str {
        match self {
            Dimension::Power => "W",
            Dimension::Frequency => "Hz",
            Dimension::Energy => "J",
            Dimension::Time => "s",
            Dimension::Length => "m",
            Dimension::Angle => "rad",
            Dimension::Area => "m2",
            Dimension::LineDensity => "lines/m",
            Dimension::Intensity => "W/m2",
        }
    }

    /// All dimensions in table order
    pub fn all() -> [Dimension; 9] {
        [
            Dimension::Power,
            Dimension::Frequency,
            Dimension::Energy,
            Dimension::Time,
            Dimension::Length,
            Dimension::Angle,
            Dimension::Area,
            Dimension::LineDensity,
            Dimension::Intensity,
        ]
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Unit Definitions
// ============================================================================

/// One row of the unit table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    /// Symbol as typed by the user (e.g. "ns", "lines/mm")
    pub symbol: &'static str,
    /// Dimension this unit measures
    pub dimension: Dimension,
    /// Multiply by this to get the SI base unit
    pub scale: f64,
}

impl UnitDef {
    const fn new(symbol: &'static str, dimension: Dimension, scale: f64) -> Self {
        Self { symbol, dimension, scale }
    }
}

const DEG: f64 = std::f64::consts::PI / 180.0;

/// Canonical unit rows, in the order they are listed to users.
pub static UNIT_DEFS: &[UnitDef] = &[
    // Power
    UnitDef::new("W", Dimension::Power, 1.0),
    UnitDef::new("mW", Dimension::Power, 1e-3),
    UnitDef::new("kW", Dimension::Power, 1e3),
    // Frequency
    UnitDef::new("Hz", Dimension::Frequency, 1.0),
    UnitDef::new("kHz", Dimension::Frequency, 1e3),
    UnitDef::new("MHz", Dimension::Frequency, 1e6),
    UnitDef::new("GHz", Dimension::Frequency, 1e9),
    // Energy
    UnitDef::new("J", Dimension::Energy, 1.0),
    UnitDef::new("mJ", Dimension::Energy, 1e-3),
    UnitDef::new("uJ", Dimension::Energy, 1e-6),
    UnitDef::new("nJ", Dimension::Energy, 1e-9),
    // Time
    UnitDef::new("s", Dimension::Time, 1.0),
    UnitDef::new("ms", Dimension::Time, 1e-3),
    UnitDef::new("us", Dimension::Time, 1e-6),
    UnitDef::new("ns", Dimension::Time, 1e-9),
    UnitDef::new("ps", Dimension::Time, 1e-12),
    UnitDef::new("fs", Dimension::Time, 1e-15),
    // Length
    UnitDef::new("m", Dimension::Length, 1.0),
    UnitDef::new("mm", Dimension::Length, 1e-3),
    UnitDef::new("um", Dimension::Length, 1e-6),
    UnitDef::new("nm", Dimension::Length, 1e-9),
    // Angle
    UnitDef::new("rad", Dimension::Angle, 1.0),
    UnitDef::new("mrad", Dimension::Angle, 1e-3),
    UnitDef::new("deg", Dimension::Angle, DEG),
    // Area
    UnitDef::new("m2", Dimension::Area, 1.0),
    UnitDef::new("cm2", Dimension::Area, 1e-4),
    UnitDef::new("mm2", Dimension::Area, 1e-6),
    UnitDef::new("um2", Dimension::Area, 1e-12),
    // Grating line density (per meter)
    UnitDef::new("lines/m", Dimension::LineDensity, 1.0),
    UnitDef::new("lines/mm", Dimension::LineDensity, 1e3),
    // Intensity
    UnitDef::new("W/m2", Dimension::Intensity, 1.0),
    UnitDef::new("W/cm2", Dimension::Intensity, 1e4),
    UnitDef::new("W/mm2", Dimension::Intensity, 1e6),
];

/// Alternate spellings accepted on input, mapped to their canonical symbol.
static UNIT_ALIASES: &[(&str, &str)] = &[
    ("µJ", "uJ"),
    ("μJ", "uJ"),
    ("µs", "us"),
    ("μs", "us"),
    ("µm", "um"),
    ("μm", "um"),
    ("µm2", "um2"),
    ("μm2", "um2"),
    ("°", "deg"),
];

/// Symbol -> definition lookup, aliases included.
static UNIT_TABLE: Lazy<HashMap<&'static str, UnitDef>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, UnitDef> = UNIT_DEFS.iter().map(|def| (def.symbol, *def)).collect();
    for &(alias, canonical) in UNIT_ALIASES {
        if let Some(def) = table.get(canonical).copied() {
            table.insert(alias, def);
        }
    }
    table
});

// ============================================================================
// Conversion Functions
// ============================================================================

/// Look up a unit symbol in the table.
pub fn lookup(unit: &str) -> CalcResult<UnitDef> {
    trace!("unit lookup: {}", unit);
    UNIT_TABLE.get(unit).copied().ok_or_else(|| CalcError::unknown_unit(unit))
}

/// Scale factor that converts `unit` to its SI base unit.
pub fn scale(unit: &str) -> CalcResult<f64> {
    lookup(unit).map(|def| def.scale)
}

/// Convert `value` expressed in `unit` to SI base units.
///
/// ```rust
/// use optics_core::units::to_si;
///
/// assert_eq!(to_si(1200.0, "lines/mm").unwrap(), 1.2e6);
/// assert!(to_si(1.0, "furlong").is_err());
/// ```
pub fn to_si(value: f64, unit: &str) -> CalcResult<f64> {
    Ok(value * scale(unit)?)
}

/// Convert an SI value into `unit` (inverse of [`to_si`]).
pub fn from_si(value_si: f64, unit: &str) -> CalcResult<f64> {
    Ok(value_si / scale(unit)?)
}

/// Check that `unit` measures `dimension`, returning its definition.
pub fn require_dimension(field: &str, unit: &str, dimension: Dimension) -> CalcResult<UnitDef> {
    let def = lookup(unit)?;
    if def.dimension != dimension {
        return Err(CalcError::dimension_mismatch(
            field,
            unit,
            dimension.display_name(),
            def.dimension.display_name(),
        ));
    }
    Ok(def)
}

/// Canonical units of one dimension, in display order.
pub fn units_in(dimension: Dimension) -> Vec<&'static UnitDef> {
    UNIT_DEFS.iter().filter(|def| def.dimension == dimension).collect()
}

/// θ_rad = θ_deg · π/180
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

/// θ_deg = θ_rad · 180/π
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}

// ============================================================================
// Quantity
// ============================================================================

/// A numeric value paired with a unit symbol.
///
/// ## JSON Example
///
/// ```json
/// { "value": 100.0, "unit": "kHz" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

impl Quantity {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Convert to SI, failing if the unit does not measure `dimension`.
    ///
    /// `field` names the input in the error message.
    pub fn to_si_in(&self, field: &str, dimension: Dimension) -> CalcResult<f64> {
        let def = require_dimension(field, &self.unit, dimension)?;
        Ok(self.value * def.scale)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl FromStr for Quantity {
    type Err = CalcError;

    /// Parse `"<value> <unit>"` or `"<value><unit>"`, e.g. `"532nm"`,
    /// `"1.5e-3 W"`. The longest numeric prefix wins so exponents stay
    /// attached to the number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.parse::<f64>().is_ok() {
            return Err(CalcError::invalid_input("quantity", s, "Missing unit"));
        }

        let split = text
            .char_indices()
            .map(|(i, _)| i)
            .skip(1)
            .filter(|&i| text[..i].trim().parse::<f64>().is_ok())
            .last();

        let Some(i) = split else {
            return Err(CalcError::invalid_input(
                "quantity",
                s,
                "Expected a number followed by a unit, e.g. '100 kHz'",
            ));
        };

        let def = lookup(text[i..].trim())?;
        let value: f64 = text[..i].trim().parse().map_err(|_| {
            CalcError::invalid_input("quantity", s, "Value is not a number")
        })?;

        Ok(Quantity::new(value, def.symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_to_si_matches_scale_for_every_unit() {
        for def in UNIT_DEFS {
            assert_eq!(to_si(1.0, def.symbol).unwrap(), def.scale, "unit {}", def.symbol);
        }
    }

    #[test]
    fn test_si_roundtrip() {
        for def in UNIT_DEFS {
            let value = 123.456;
            let si = to_si(value, def.symbol).unwrap();
            assert_relative_eq!(from_si(si, def.symbol).unwrap(), value, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_known_scales() {
        assert_eq!(scale("mW").unwrap(), 1e-3);
        assert_eq!(scale("MHz").unwrap(), 1e6);
        assert_eq!(scale("lines/mm").unwrap(), 1e3);
        assert_relative_eq!(scale("deg").unwrap(), std::f64::consts::PI / 180.0);
    }

    #[test]
    fn test_unknown_unit() {
        let err = to_si(1.0, "furlong").unwrap_err();
        assert_eq!(err, CalcError::unknown_unit("furlong"));
    }

    #[test]
    fn test_each_symbol_has_one_dimension() {
        let mut seen = std::collections::HashSet::new();
        for def in UNIT_DEFS {
            assert!(seen.insert(def.symbol), "duplicate symbol {}", def.symbol);
        }
    }

    #[test]
    fn test_si_symbol_has_unit_scale() {
        for dim in Dimension::all() {
            let def = lookup(dim.si_symbol()).unwrap();
            assert_eq!(def.dimension, dim);
            assert_eq!(def.scale, 1.0);
        }
    }

    #[test]
    fn test_micro_aliases() {
        assert_eq!(scale("µm").unwrap(), scale("um").unwrap());
        assert_eq!(scale("μs").unwrap(), scale("us").unwrap());
    }

    #[test]
    fn test_angle_roundtrip() {
        for x in [-720.0, -90.0, 0.0, 1e-9, 30.0, 45.0, 180.0, 1234.5] {
            assert_relative_eq!(rad_to_deg(deg_to_rad(x)), x, epsilon = 1e-12, max_relative = 1e-12);
        }
        assert_relative_eq!(deg_to_rad(180.0), std::f64::consts::PI);
    }

    #[test]
    fn test_dimension_mismatch() {
        let q = Quantity::new(5.0, "ns");
        let err = q.to_si_in("wavelength", Dimension::Length).unwrap_err();
        assert_eq!(err.error_code(), "DIMENSION_MISMATCH");
        assert_relative_eq!(q.to_si_in("duration", Dimension::Time).unwrap(), 5e-9);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!("100 kHz".parse::<Quantity>().unwrap(), Quantity::new(100.0, "kHz"));
        assert_eq!("532nm".parse::<Quantity>().unwrap(), Quantity::new(532.0, "nm"));
        assert_eq!("1.5e-3 W".parse::<Quantity>().unwrap(), Quantity::new(1.5e-3, "W"));
        assert_eq!("1e3mm".parse::<Quantity>().unwrap(), Quantity::new(1e3, "mm"));
        assert_eq!("-5 deg".parse::<Quantity>().unwrap(), Quantity::new(-5.0, "deg"));
        assert_eq!("1200 lines/mm".parse::<Quantity>().unwrap(), Quantity::new(1200.0, "lines/mm"));
        // aliases normalize to the canonical symbol
        assert_eq!("5 µm".parse::<Quantity>().unwrap(), Quantity::new(5.0, "um"));
    }

    #[test]
    fn test_parse_quantity_errors() {
        assert_eq!("100".parse::<Quantity>().unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!("kHz".parse::<Quantity>().unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!("3 furlong".parse::<Quantity>().unwrap_err().error_code(), "UNKNOWN_UNIT");
    }

    #[test]
    fn test_units_in_dimension() {
        let symbols: Vec<_> = units_in(Dimension::LineDensity).iter().map(|d| d.symbol).collect();
        assert_eq!(symbols, vec!["lines/m", "lines/mm"]);
    }
}
