//! `planar chip` command - Chip listing and editing

use clap::Subcommand;
use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{
    escape_csv, format_rect, open_design, output_format, print_structured, BoundsReport,
};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{save_design, ChipSize, Config, MAIN_CHIP};

#[derive(Subcommand, Debug)]
pub enum ChipCommands {
    /// List chips with their bounds or lookup status
    List,

    /// Create or update the size section of a chip (values in meters)
    SetSize(SetSizeArgs),

    /// Remove a chip from the design
    Remove(RemoveArgs),
}

#[derive(clap::Args, Debug)]
pub struct SetSizeArgs {
    /// Chip name
    pub chip: String,

    /// Center x coordinate
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub center_x: f64,

    /// Center y coordinate
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub center_y: f64,

    /// Full width
    #[arg(long, allow_negative_numbers = true)]
    pub size_x: f64,

    /// Full height
    #[arg(long, allow_negative_numbers = true)]
    pub size_y: f64,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Chip name
    pub chip: String,
}

/// Run a chip subcommand
pub fn run(cmd: ChipCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ChipCommands::List => run_list(global),
        ChipCommands::SetSize(args) => run_set_size(args, global),
        ChipCommands::Remove(args) => run_remove(args, global),
    }
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let design = open_design(global, &config)?;

    let reports: Vec<BoundsReport> = design
        .chips()
        .names()
        .map(|name| BoundsReport::new(name, design.get_x_y_for_chip(name)))
        .collect();

    match output_format(global, &config) {
        format @ (OutputFormat::Yaml | OutputFormat::Json) => print_structured(&reports, format)?,
        OutputFormat::Tsv => {
            for r in &reports {
                println!("{}\t{}\t{}", r.chip, r.code, r.cells().join("\t"));
            }
        }
        OutputFormat::Csv => {
            println!("chip,status,min_x,min_y,max_x,max_y");
            for r in &reports {
                println!("{},{},{}", escape_csv(&r.chip), r.code, r.cells().join(","));
            }
        }
        format @ (OutputFormat::Md | OutputFormat::Auto) => {
            if reports.is_empty() {
                println!("{}", style("No chips in this design.").dim());
                return Ok(());
            }

            let mut builder = Builder::default();
            builder.push_record(["Chip", "Status", "min_x", "min_y", "max_x", "max_y"]);
            for r in &reports {
                let [min_x, min_y, max_x, max_y] = r.cells();
                builder.push_record([
                    r.chip.clone(),
                    format!("{} ({})", r.status, r.code),
                    min_x,
                    min_y,
                    max_x,
                    max_y,
                ]);
            }

            let mut table = builder.build();
            if format == OutputFormat::Md {
                table.with(Style::markdown());
            } else {
                table.with(Style::rounded());
            }
            println!("{}", table);

            if !global.quiet {
                let unresolved = reports.iter().filter(|r| !r.status.is_ok()).count();
                println!(
                    "\n{} chip(s), {} without usable size information",
                    reports.len(),
                    unresolved
                );
            }
        }
    }

    Ok(())
}

fn run_set_size(args: SetSizeArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let path = config.design_path(global.design.as_deref());
    let mut design = open_design(global, &config)?;

    let size = ChipSize {
        center_x: args.center_x,
        center_y: args.center_y,
        size_x: args.size_x,
        size_y: args.size_y,
    };
    let created = !design.chips().contains(&args.chip);
    design.chips_mut().entry(args.chip.as_str()).set_size(size);
    save_design(&path, &design)?;

    let verb = if created { "Added" } else { "Updated" };
    println!(
        "{} {} chip {} {}",
        style("✓").green(),
        verb,
        style(&args.chip).cyan(),
        format_rect(&size.bounds())
    );

    Ok(())
}

fn run_remove(args: RemoveArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let path = config.design_path(global.design.as_deref());
    let mut design = open_design(global, &config)?;

    if design.chips_mut().remove(&args.chip).is_none() {
        return Err(miette::miette!("Chip '{}' is not in this design", args.chip));
    }
    save_design(&path, &design)?;

    println!(
        "{} Removed chip {}",
        style("✓").green(),
        style(&args.chip).cyan()
    );
    if args.chip == MAIN_CHIP && !global.quiet {
        println!(
            "  {}",
            style("Export tooling expects a 'main' chip; restore it with 'planar chip set-size main --size-x 0.005 --size-y 0.005'.").dim()
        );
    }

    Ok(())
}
