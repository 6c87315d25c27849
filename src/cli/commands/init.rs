//! `planar init` command - Create a new design file

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{format_mm, format_rect};
use crate::cli::GlobalOpts;
use crate::core::loader::create_design;
use crate::core::{Config, MAIN_CHIP};
use crate::design::{DesignMetadata, DesignPlanar};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Design file to create (default: --design, config, or ./design.planar.yaml)
    pub path: Option<PathBuf>,

    /// Design name stored in the metadata
    #[arg(long, short = 'n', default_value = "my_design")]
    pub name: String,

    /// Allow components to be replaced under an existing name
    #[arg(long)]
    pub overwrite_enabled: bool,

    /// Do not attach renderers when the design is opened
    #[arg(long)]
    pub no_renderers: bool,

    /// Overwrite the file if it already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let path = match args.path {
        Some(path) => path,
        None => config.design_path(global.design.as_deref()),
    };

    let design = DesignPlanar::new(
        DesignMetadata::named(&args.name),
        args.overwrite_enabled,
        !args.no_renderers,
    );
    create_design(&path, &design, args.force)?;

    println!(
        "{} Created design {} at {}",
        style("✓").green(),
        style(&design.metadata.design_name).cyan(),
        style(path.display()).cyan()
    );

    if !global.quiet {
        if let (Some(rect), _) = design.get_x_y_for_chip(MAIN_CHIP) {
            println!(
                "  chip {}: {} x {} at origin, bounds {}",
                style(MAIN_CHIP).yellow(),
                format_mm(rect.width()),
                format_mm(rect.height()),
                format_rect(&rect)
            );
        }
        println!();
        println!("Next steps:");
        println!("  {} List chips and their bounds", style("planar chip list").yellow());
        println!(
            "  {} Resize a chip",
            style("planar chip set-size main --size-x 0.01 --size-y 0.01").yellow()
        );
    }

    Ok(())
}
