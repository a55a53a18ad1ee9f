//! # optics_core - Laser & Optics Formula Engine
//!
//! `optics_core` is the computational heart of Opticalc: a set of closed-form
//! laser and optics relations with unit-aware inputs. All inputs and outputs
//! are JSON-serializable, so a calculation can be described in a file, piped
//! through a script, or built directly in Rust.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **SI inside**: Inputs carry their unit, everything is converted to SI
//!   before a formula runs, results are stored in SI
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use optics_core::calculations::{evaluate, CalculationItem, PulseEnergyInput};
//! use optics_core::settings::CalculatorSettings;
//! use optics_core::units::Quantity;
//!
//! let item = CalculationItem::PulseEnergy(PulseEnergyInput {
//!     average_power: Quantity::new(1.0, "W"),
//!     rep_rate: Quantity::new(100.0, "kHz"),
//! });
//!
//! let report = evaluate(&item).unwrap().report(&CalculatorSettings::default()).unwrap();
//! assert_eq!(report.headline(), Some("10 µJ"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The nine calculation modes and the dispatcher
//! - [`equations`] - Raw formulas plus the formula registry
//! - [`units`] - Unit table and SI conversion
//! - [`format`] - Engineering-notation rendering
//! - [`report`] - Human-readable result reports
//! - [`settings`] - Output preferences, loaded from and saved to JSON
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod format;
pub mod report;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{evaluate, CalculationItem, CalculationOutput, Mode};
pub use errors::{CalcError, CalcResult};
pub use format::{format_eng, format_eng_with};
pub use report::Report;
pub use settings::{load_settings, save_settings, CalculatorSettings};
pub use units::{Dimension, Quantity};
