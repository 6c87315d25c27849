//! `planar config` command - Configuration management
//!
//! Values live in a global user config and in a `.planar.yaml` in the
//! working directory; the local file wins.

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::LOCAL_CONFIG_FILE;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., design, default_format)
    pub key: String,

    /// Value to set
    pub value: String,

    /// Set in global (user) config instead of the local config
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of the local config
    #[arg(long, short = 'g')]
    pub global: bool,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("design", "Design file used when --design is not given"),
    (
        "default_format",
        "Default output format (auto, yaml, json, tsv, csv, md)",
    ),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, _global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Set(args) => run_set(args),
        ConfigCommands::Unset(args) => run_unset(args),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        check_key(key)?;
        return match get_config_value(&config, key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in VALID_KEYS {
        print_config_value(key, get_config_value(&config, key).as_deref());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (PLANAR_DESIGN, PLANAR_FORMAT)");
    println!("  2. Local config ({})", LOCAL_CONFIG_FILE);
    println!("  3. Global config (~/.config/planar/config.yaml)");

    Ok(())
}

fn run_set(args: SetArgs) -> Result<()> {
    check_key(&args.key)?;
    check_value(&args.key, &args.value)?;
    let path = config_path(args.global)?;

    let mut map = read_mapping(&path)?;
    map.insert(
        serde_yml::Value::String(args.key.clone()),
        serde_yml::Value::String(args.value.clone()),
    );
    write_mapping(&path, map)?;

    println!(
        "{} Set {} {} {} in {}",
        style("✓").green(),
        style(&args.key).cyan(),
        style("→").dim(),
        style(&args.value).yellow(),
        path.display()
    );

    Ok(())
}

fn run_unset(args: UnsetArgs) -> Result<()> {
    check_key(&args.key)?;
    let path = config_path(args.global)?;

    let mut map = read_mapping(&path)?;
    let removed = map
        .remove(&serde_yml::Value::String(args.key.clone()))
        .is_some();

    if removed {
        write_mapping(&path, map)?;
        println!(
            "{} Unset {} in {}",
            style("✓").green(),
            style(&args.key).cyan(),
            path.display()
        );
    } else {
        println!(
            "{} Key '{}' was not set in {}",
            style("→").dim(),
            args.key,
            path.display()
        );
    }

    Ok(())
}

fn run_path() -> Result<()> {
    let global_path = config_path(true)?;
    let local_path = config_path(false)?;

    println!("{}", style("Configuration file paths:").bold());
    println!();
    print_path("Global:", &global_path);
    print_path("Local:", &local_path);

    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'planar config set <key> <value>' to set a value.").dim()
    );

    Ok(())
}

// Helper functions

fn check_key(key: &str) -> Result<()> {
    if VALID_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(miette::miette!(
            help = "Run 'planar config keys' to list valid keys.",
            "Unknown configuration key '{}'",
            key
        ))
    }
}

fn check_value(key: &str, value: &str) -> Result<()> {
    if key != "default_format" || OutputFormat::from_str(value, true).is_ok() {
        return Ok(());
    }
    let names: Vec<String> = OutputFormat::value_variants()
        .iter()
        .filter_map(|f| f.to_possible_value())
        .map(|v| v.get_name().to_string())
        .collect();
    Err(miette::miette!(
        help = format!("Valid formats: {}", names.join(", ")),
        "Invalid value '{}' for default_format",
        value
    ))
}

fn config_path(global: bool) -> Result<PathBuf> {
    if global {
        Config::global_config_path()
            .ok_or_else(|| miette::miette!("Could not determine global config directory"))
    } else {
        Ok(std::env::current_dir()
            .into_diagnostic()?
            .join(LOCAL_CONFIG_FILE))
    }
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "design" => config.design.as_ref().map(|p| p.display().to_string()),
        "default_format" => config.default_format.clone(),
        _ => None,
    }
}

fn print_config_value(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        println!("  {}: {}", style(key).cyan(), style(v).yellow());
    } else {
        println!("  {}: {}", style(key).cyan(), style("(not set)").dim());
    }
}

fn print_path(label: &str, path: &Path) {
    println!("  {:<8} {}", style(label).cyan(), path.display());
    if path.exists() {
        println!("           {}", style("(exists)").green());
    } else {
        println!("           {}", style("(not created)").dim());
    }
}

fn read_mapping(path: &Path) -> Result<serde_yml::Mapping> {
    if !path.exists() {
        return Ok(serde_yml::Mapping::new());
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    match serde_yml::from_str::<serde_yml::Value>(&content).into_diagnostic()? {
        serde_yml::Value::Mapping(map) => Ok(map),
        serde_yml::Value::Null => Ok(serde_yml::Mapping::new()),
        _ => Err(miette::miette!(
            "Config file {} is not a mapping",
            path.display()
        )),
    }
}

fn write_mapping(path: &Path, map: serde_yml::Mapping) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    let yaml = serde_yml::to_string(&serde_yml::Value::Mapping(map)).into_diagnostic()?;
    fs::write(path, yaml).into_diagnostic()
}
