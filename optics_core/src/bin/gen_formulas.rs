//! Generate FORMULAS.md from the formula registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-formulas
//! ```
//!
//! The generated file is written to `optics_core/src/equations/FORMULAS.md`
//! (paths are relative to the workspace root). Pass a path to write elsewhere.

use std::env;
use std::fs;
use std::path::PathBuf;

use optics_core::equations::{generate_formulas_markdown, ALL_FORMULAS};

fn main() {
    let output_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("optics_core/src/equations/FORMULAS.md"));

    println!("Generating reference for {} formulas...", ALL_FORMULAS.len());
    let markdown = generate_formulas_markdown();

    match fs::write(&output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", output_path.display(), e);
            std::process::exit(1);
        }
    }
}
