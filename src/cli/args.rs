//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    bounds::BoundsArgs, chip::ChipCommands, completions::CompletionsArgs,
    config::ConfigCommands, init::InitArgs,
};

#[derive(Parser)]
#[command(name = "planar")]
#[command(author, version, about = "Planar chip geometry toolkit")]
#[command(long_about = "Inspect and edit the chips of a planar superconducting-circuit design kept as a plain-text YAML file.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Design file (default: from config, else ./design.planar.yaml)
    #[arg(long, short = 'd', global = true, env = "PLANAR_DESIGN")]
    pub design: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new design file with the default main chip
    Init(InitArgs),

    /// Chip management
    #[command(subcommand)]
    Chip(ChipCommands),

    /// Print the bounding rectangle of a chip
    Bounds(BoundsArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (tables for lists)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// JSON format (for programming)
    Json,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}

impl OutputFormat {
    /// Resolve `auto` against a configured default format
    pub fn or_configured(self, configured: Option<&str>) -> Self {
        if self != OutputFormat::Auto {
            return self;
        }
        configured
            .and_then(|name| OutputFormat::from_str(name, true).ok())
            .unwrap_or(OutputFormat::Auto)
    }
}
