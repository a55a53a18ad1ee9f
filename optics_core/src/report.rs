//! # Reports
//!
//! A `Report` is what a front end shows after an evaluation: a title, the
//! formatted result lines, the formulas that produced them and any notes.
//!
//! ```rust
//! use optics_core::report::Report;
//!
//! let report = Report::new("Pulse Energy")
//!     .with_line("E", "10 µJ")
//!     .with_note("For burst-mode output use the in-burst average power.");
//! assert_eq!(report.headline(), Some("10 µJ"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::equations::Formula;

/// One labelled, already formatted result value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
}

/// Formatted output of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub lines: Vec<ReportLine>,
    /// Plain-text formulas used for this result
    pub formulas: Vec<String>,
    pub notes: Vec<String>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Report {
            title: title.into(),
            lines: Vec::new(),
            formulas: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_line(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.lines.push(ReportLine {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Attach a formula and its registry notes.
    pub fn with_formula(mut self, formula: Formula) -> Self {
        let meta = formula.metadata();
        self.formulas.push(meta.formula_plain.to_string());
        self.notes.extend(meta.notes.iter().map(|n| n.to_string()));
        self
    }

    /// Value of the first result line
    pub fn headline(&self) -> Option<&str> {
        self.lines.first().map(|l| l.value.as_str())
    }

    /// Value of the line with `label`
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.lines.iter().find(|l| l.label == label).map(|l| l.value.as_str())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        let width = self.lines.iter().map(|l| l.label.chars().count()).max().unwrap_or(0);
        for line in &self.lines {
            writeln!(f, "  {:<width$} ≈ {}", line.label, line.value, width = width)?;
        }
        if !self.formulas.is_empty() {
            writeln!(f)?;
            writeln!(f, "Formulas:")?;
            for formula in &self.formulas {
                writeln!(f, "  {}", formula)?;
            }
        }
        if !self.notes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Notes:")?;
            for note in &self.notes {
                writeln!(f, "  - {}", note)?;
            }
        }
        Ok(())
    }
}
