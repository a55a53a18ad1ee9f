//! # Opticalc CLI
//!
//! Command-line front end for `optics_core`. Each calculation mode is a
//! subcommand taking unit-tagged quantities (`--wavelength 1030nm`,
//! `--power "1.5 W"`); `eval` runs a JSON calculation file instead.
//!
//! ```bash
//! opticalc pulse-energy --power 1W --rep-rate 100kHz
//! opticalc grating --wavelength 532nm --line-density 1200lines/mm --order 1
//! echo '{"mode":"AngleConversion","value":30}' | opticalc --json eval -
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde_json::json;

use optics_core::calculations::{
    evaluate, AngleConvention, AngleDirection, AngleInput, CalculationItem, DelayConversion, DivergenceInput,
    FocusedSpotInput, GratingInput, GratingSolve, OpticalDelayInput, PassCount, PeakPowerInput, PowerDensityInput,
    PulseEnergyInput, PulseShape, RayleighRangeInput, SpotDefinition, SpotProfile, WaistSource,
};
use optics_core::equations::generate_formulas_markdown;
use optics_core::units::{units_in, Dimension, Quantity};
use optics_core::{load_settings, save_settings, CalcError, CalculatorSettings};

#[derive(Parser)]
#[command(name = "opticalc", version)]
#[command(about = "Laser and optics formula calculator", long_about = None)]
struct Cli {
    /// Print results and errors as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Load output settings from a JSON file
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Energy per pulse: E = P / f
    PulseEnergy {
        /// Average power (e.g. "1 W")
        #[arg(long)]
        power: Quantity,

        /// Repetition rate (e.g. "100 kHz")
        #[arg(long)]
        rep_rate: Quantity,
    },

    /// Diffraction-limited focused spot from NA
    FocusedSpot {
        #[arg(long)]
        wavelength: Quantity,

        /// Numerical aperture of the focusing optic
        #[arg(long)]
        na: f64,

        #[arg(long, value_enum, default_value_t = SpotArg::Airy)]
        spot: SpotArg,
    },

    /// Rayleigh range and depth of focus
    RayleighRange {
        #[arg(long)]
        wavelength: Quantity,

        /// 1/e² waist radius
        #[arg(long, required_unless_present = "na", conflicts_with = "na")]
        waist: Option<Quantity>,

        /// Estimate the waist from this NA instead
        #[arg(long)]
        na: Option<f64>,
    },

    /// Peak power from pulse energy and duration
    PeakPower {
        #[arg(long)]
        energy: Quantity,

        /// Pulse duration (FWHM for the Gaussian shape)
        #[arg(long)]
        duration: Quantity,

        #[arg(long, value_enum, default_value_t = ShapeArg::Rectangular)]
        shape: ShapeArg,
    },

    /// Degrees to radians and back
    Angle {
        #[arg(allow_hyphen_values = true)]
        value: f64,

        /// Unit of VALUE
        #[arg(long, value_enum, default_value_t = AngleUnitArg::Deg)]
        from: AngleUnitArg,
    },

    /// Grating equation: m λ = d (sin θi + sin θm)
    Grating {
        #[arg(long)]
        wavelength: Quantity,

        /// Incidence angle from the normal
        #[arg(long, default_value = "0 deg", allow_hyphen_values = true)]
        incidence: Quantity,

        /// Diffraction order
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        order: i32,

        /// Line density; solves for the diffraction angle
        #[arg(long, required_unless_present = "diffraction_angle")]
        line_density: Option<Quantity>,

        /// Diffraction angle; solves for the line density
        #[arg(long, conflicts_with = "line_density", allow_hyphen_values = true)]
        diffraction_angle: Option<Quantity>,

        /// Report the highest propagating order instead
        #[arg(long, requires = "line_density")]
        max_order: bool,

        /// Output unit for the solved angle or line density
        #[arg(long)]
        unit: Option<String>,
    },

    /// Average power density of a spot
    PowerDensity {
        #[arg(long)]
        power: Quantity,

        /// Spot radius (1/e² radius for Gaussian)
        #[arg(long)]
        radius: Quantity,

        #[arg(long, value_enum, default_value_t = ProfileArg::TopHat)]
        profile: ProfileArg,

        /// Intensity output unit
        #[arg(long)]
        unit: Option<String>,
    },

    /// Convert between path-length difference and time delay
    OpticalDelay {
        /// Path-length difference; solves for the delay
        #[arg(long, required_unless_present = "delay", conflicts_with = "delay")]
        length: Option<Quantity>,

        /// Time delay; solves for the path length
        #[arg(long)]
        delay: Option<Quantity>,

        /// Refractive index of the medium
        #[arg(long, default_value_t = 1.0)]
        index: f64,

        /// Light crosses the length twice (retro-reflector)
        #[arg(long)]
        double_pass: bool,
    },

    /// Far-field beam divergence
    Divergence {
        #[arg(long)]
        wavelength: Quantity,

        /// 1/e² waist radius
        #[arg(long)]
        waist: Quantity,

        /// Beam-quality factor M²
        #[arg(long = "m2", default_value_t = 1.0)]
        m_squared: f64,

        /// Report the full angle instead of the half angle
        #[arg(long)]
        full: bool,

        /// Angle output unit
        #[arg(long)]
        unit: Option<String>,
    },

    /// Evaluate a JSON calculation ("-" reads stdin)
    Eval { path: String },

    /// Print the formula reference as markdown
    Formulas,

    /// List supported units by dimension
    Units,

    /// Write the default settings to a JSON file
    InitSettings { path: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum SpotArg {
    Airy,
    Gaussian,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    Rectangular,
    Gaussian,
}

#[derive(Clone, Copy, ValueEnum)]
enum AngleUnitArg {
    Deg,
    Rad,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    TopHat,
    Gaussian,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli) {
        report_error(&e, cli.json);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = match &cli.settings {
        Some(path) => {
            info!("using settings from {}", path.display());
            load_settings(path)?
        }
        None => CalculatorSettings::default(),
    };

    let item = match &cli.command {
        Commands::Formulas => {
            print!("{}", generate_formulas_markdown());
            return Ok(());
        }
        Commands::Units => return print_units(cli.json),
        Commands::InitSettings { path } => {
            save_settings(&settings, path)?;
            println!("Wrote settings to {}", path.display());
            return Ok(());
        }
        Commands::Eval { path } => read_item(path)?,
        command => build_item(command)?,
    };

    let output = evaluate(&item)?;
    let report = output.report(&settings)?;

    if cli.json {
        let doc = json!({ "input": item, "output": output, "report": report });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

/// Translate a mode subcommand into the calculation it describes.
fn build_item(command: &Commands) -> Result<CalculationItem> {
    let item = match command {
        Commands::PulseEnergy { power, rep_rate } => CalculationItem::PulseEnergy(PulseEnergyInput {
            average_power: power.clone(),
            rep_rate: rep_rate.clone(),
        }),
        Commands::FocusedSpot { wavelength, na, spot } => CalculationItem::FocusedSpot(FocusedSpotInput {
            wavelength: wavelength.clone(),
            na: *na,
            spot: match spot {
                SpotArg::Airy => SpotDefinition::AiryDiameter,
                SpotArg::Gaussian => SpotDefinition::GaussianWaist,
            },
        }),
        Commands::RayleighRange { wavelength, waist, na } => {
            let waist = match (waist, na) {
                (Some(waist), _) => WaistSource::Direct { waist: waist.clone() },
                (None, Some(na)) => WaistSource::FromNa { na: *na },
                (None, None) => bail!("either --waist or --na is required"),
            };
            CalculationItem::RayleighRange(RayleighRangeInput {
                wavelength: wavelength.clone(),
                waist,
            })
        }
        Commands::PeakPower { energy, duration, shape } => CalculationItem::PeakPower(PeakPowerInput {
            energy: energy.clone(),
            duration: duration.clone(),
            shape: match shape {
                ShapeArg::Rectangular => PulseShape::Rectangular,
                ShapeArg::Gaussian => PulseShape::GaussianFwhm,
            },
        }),
        Commands::Angle { value, from } => CalculationItem::AngleConversion(AngleInput {
            value: *value,
            direction: match from {
                AngleUnitArg::Deg => AngleDirection::DegreesToRadians,
                AngleUnitArg::Rad => AngleDirection::RadiansToDegrees,
            },
        }),
        Commands::Grating {
            wavelength,
            incidence,
            order,
            line_density,
            diffraction_angle,
            max_order,
            unit,
        } => {
            let solve = match (line_density, diffraction_angle) {
                (Some(line_density), _) if *max_order => GratingSolve::MaxOrder {
                    line_density: line_density.clone(),
                },
                (Some(line_density), _) => GratingSolve::DiffractionAngle {
                    line_density: line_density.clone(),
                    output_unit: unit.clone(),
                },
                (None, Some(angle)) => GratingSolve::LineDensity {
                    diffraction_angle: angle.clone(),
                    output_unit: unit.clone(),
                },
                (None, None) => bail!("either --line-density or --diffraction-angle is required"),
            };
            CalculationItem::Grating(GratingInput {
                wavelength: wavelength.clone(),
                incidence_angle: incidence.clone(),
                order: *order,
                solve,
            })
        }
        Commands::PowerDensity {
            power,
            radius,
            profile,
            unit,
        } => CalculationItem::PowerDensity(PowerDensityInput {
            average_power: power.clone(),
            spot: match profile {
                ProfileArg::TopHat => SpotProfile::TopHat { radius: radius.clone() },
                ProfileArg::Gaussian => SpotProfile::Gaussian { radius: radius.clone() },
            },
            output_unit: unit.clone(),
        }),
        Commands::OpticalDelay {
            length,
            delay,
            index,
            double_pass,
        } => {
            let conversion = match (length, delay) {
                (Some(length), _) => DelayConversion::LengthToTime { length: length.clone() },
                (None, Some(delay)) => DelayConversion::TimeToLength { delay: delay.clone() },
                (None, None) => bail!("either --length or --delay is required"),
            };
            CalculationItem::OpticalDelay(OpticalDelayInput {
                conversion,
                index: *index,
                passes: if *double_pass { PassCount::Double } else { PassCount::Single },
            })
        }
        Commands::Divergence {
            wavelength,
            waist,
            m_squared,
            full,
            unit,
        } => CalculationItem::Divergence(DivergenceInput {
            wavelength: wavelength.clone(),
            waist: waist.clone(),
            m_squared: *m_squared,
            convention: if *full { AngleConvention::Full } else { AngleConvention::Half },
            output_unit: unit.clone(),
        }),
        Commands::Eval { .. } | Commands::Formulas | Commands::Units | Commands::InitSettings { .. } => {
            bail!("not a calculation mode")
        }
    };
    Ok(item)
}

/// Read a JSON `CalculationItem` from a file, or stdin for "-".
fn read_item(path: &str) -> Result<CalculationItem> {
    let contents = if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(Path::new(path)).with_context(|| format!("failed to read {}", path))?
    };

    let item: CalculationItem = serde_json::from_str(&contents).map_err(CalcError::from)?;
    info!("loaded {} calculation from {}", item.mode().slug(), path);
    Ok(item)
}

fn print_units(as_json: bool) -> Result<()> {
    if as_json {
        let table: Vec<_> = Dimension::all()
            .iter()
            .map(|dim| {
                let units: Vec<_> = units_in(*dim)
                    .iter()
                    .map(|u| json!({ "symbol": u.symbol, "scale": u.scale }))
                    .collect();
                json!({ "dimension": dim.display_name(), "si": dim.si_symbol(), "units": units })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    for dim in Dimension::all() {
        let symbols: Vec<_> = units_in(dim).iter().map(|u| u.symbol).collect();
        println!("{:<14} [{}]  {}", dim.display_name(), dim.si_symbol(), symbols.join(", "));
    }
    Ok(())
}

/// Print an error; calculation errors keep their structure under `--json`.
fn report_error(error: &anyhow::Error, as_json: bool) {
    match error.downcast_ref::<CalcError>() {
        Some(calc) if as_json => {
            let doc = json!({ "error": calc, "code": calc.error_code() });
            match serde_json::to_string_pretty(&doc) {
                Ok(text) => println!("{}", text),
                Err(_) => eprintln!("Error: {}", calc),
            }
        }
        Some(calc) => eprintln!("Error [{}]: {}", calc.error_code(), calc),
        None if as_json => println!("{}", json!({ "error": format!("{:#}", error) })),
        None => eprintln!("Error: {:#}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn item_for(args: &[&str]) -> CalculationItem {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        build_item(&cli.command).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pulse_energy_args() {
        let item = item_for(&["opticalc", "pulse-energy", "--power", "1 W", "--rep-rate", "100kHz"]);
        let report = evaluate(&item).unwrap().report(&CalculatorSettings::default()).unwrap();
        assert_eq!(report.headline(), Some("10 µJ"));
    }

    #[test]
    fn test_grating_solve_selection() {
        let grating = |extra: &[&str]| {
            let mut args = vec!["opticalc", "grating", "--wavelength", "532nm"];
            args.extend_from_slice(extra);
            item_for(&args)
        };

        let item = grating(&["--line-density", "1200lines/mm"]);
        assert!(matches!(
            item,
            CalculationItem::Grating(GratingInput { solve: GratingSolve::DiffractionAngle { .. }, .. })
        ));

        let item = grating(&["--line-density", "1200lines/mm", "--max-order"]);
        assert!(matches!(
            item,
            CalculationItem::Grating(GratingInput { solve: GratingSolve::MaxOrder { .. }, .. })
        ));

        let item = grating(&["--diffraction-angle", "30deg", "--unit", "lines/m"]);
        assert!(matches!(
            item,
            CalculationItem::Grating(GratingInput { solve: GratingSolve::LineDensity { .. }, .. })
        ));
    }

    #[test]
    fn test_rayleigh_needs_waist_or_na() {
        assert!(Cli::try_parse_from(["opticalc", "rayleigh-range", "--wavelength", "1030nm"]).is_err());
        let item = item_for(&["opticalc", "rayleigh-range", "--wavelength", "1030nm", "--na", "0.1"]);
        assert!(matches!(
            item,
            CalculationItem::RayleighRange(RayleighRangeInput { waist: WaistSource::FromNa { .. }, .. })
        ));
    }

    #[test]
    fn test_bad_quantity_rejected_at_parse() {
        assert!(Cli::try_parse_from(["opticalc", "pulse-energy", "--power", "1", "--rep-rate", "1kHz"]).is_err());
        assert!(Cli::try_parse_from(["opticalc", "pulse-energy", "--power", "1 parsec", "--rep-rate", "1kHz"])
            .is_err());
    }

    #[test]
    fn test_negative_angle_value() {
        let item = item_for(&["opticalc", "angle", "-90", "--from", "deg"]);
        assert_eq!(
            item,
            CalculationItem::AngleConversion(AngleInput {
                value: -90.0,
                direction: AngleDirection::DegreesToRadians,
            })
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["opticalc", "units", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }
}
