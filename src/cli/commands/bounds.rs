//! `planar bounds` command - Resolve the bounding rectangle of a chip

use console::style;
use miette::{Diagnostic, Result};
use tabled::{builder::Builder, settings::Style};
use thiserror::Error;

use crate::cli::helpers::{
    format_mm, format_rect, open_design, output_format, print_structured, BoundsReport,
};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{ChipStatus, Config};

#[derive(clap::Args, Debug)]
pub struct BoundsArgs {
    /// Chip name (e.g., main)
    #[arg(default_value = "main")]
    pub chip: String,
}

/// A chip whose bounds could not be resolved
#[derive(Debug, Error, Diagnostic)]
#[error("no bounds for chip '{chip}' (status {code}: {status})")]
#[diagnostic(code(planar::bounds::unresolved))]
pub struct UnresolvedBounds {
    pub chip: String,
    pub status: ChipStatus,
    pub code: u8,
    #[help]
    pub help: Option<String>,
}

impl UnresolvedBounds {
    fn from_report(report: &BoundsReport) -> Self {
        let help = match report.status {
            ChipStatus::ChipNotFound => Some("Run 'planar chip list' to see the chips in this design.".to_string()),
            ChipStatus::SizeInfoInvalid => Some(format!(
                "Give the chip numeric center_x, center_y, size_x and size_y with 'planar chip set-size {}'.",
                report.chip
            )),
            ChipStatus::Ok => None,
        };
        Self {
            chip: report.chip.clone(),
            status: report.status,
            code: report.code,
            help,
        }
    }
}

pub fn run(args: BoundsArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let design = open_design(global, &config)?;
    let report = BoundsReport::new(&args.chip, design.get_x_y_for_chip(&args.chip));

    match output_format(global, &config) {
        format @ (OutputFormat::Yaml | OutputFormat::Json) => {
            print_structured(&report, format)?;
        }
        OutputFormat::Csv => {
            if report.status.is_ok() {
                println!("{}", report.cells().join(","));
            }
        }
        OutputFormat::Tsv => {
            if report.status.is_ok() {
                println!("{}", report.cells().join("\t"));
            }
        }
        OutputFormat::Md => {
            if report.status.is_ok() {
                println!("{}", markdown_row(&report));
            }
        }
        OutputFormat::Auto => {
            if let Some(rect) = &report.bounds {
                println!(
                    "{} {} {}",
                    style("✓").green(),
                    style(&report.chip).cyan(),
                    format_rect(rect)
                );
                if !global.quiet {
                    println!(
                        "  {} x {} centered at ({}, {})",
                        format_mm(rect.width()),
                        format_mm(rect.height()),
                        rect.center().0,
                        rect.center().1
                    );
                }
            }
        }
    }

    if report.status.is_ok() {
        Ok(())
    } else {
        Err(UnresolvedBounds::from_report(&report).into())
    }
}

/// One-row markdown table of a resolved chip
fn markdown_row(report: &BoundsReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Chip", "min_x", "min_y", "max_x", "max_y"]);
    let mut row = vec![report.chip.clone()];
    row.extend(report.cells());
    builder.push_record(row);

    let mut table = builder.build();
    table.with(Style::markdown());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BoundingRectangle;

    #[test]
    fn test_markdown_row() {
        let rect = BoundingRectangle {
            min_x: -1.0,
            min_y: -0.5,
            max_x: 1.0,
            max_y: 0.5,
        };
        let report = BoundsReport::new("flip", (Some(rect), ChipStatus::Ok));
        let table = markdown_row(&report);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("| Chip"));
        assert!(lines[1].starts_with("|--"));
        assert!(lines[2].starts_with("| flip"));
        assert!(lines[2].contains("| -0.5"));
        assert!(!table.contains('\t'));
    }
}
