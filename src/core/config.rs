//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::loader::DEFAULT_DESIGN_FILE;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".planar.yaml";

/// Planar configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Design file used when `--design` is not given
    pub design: Option<PathBuf>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(&cwd)
    }

    /// Load configuration using `dir` as the working directory
    pub fn load_from(dir: &Path) -> Self {
        let mut config = Config::default();

        // 1. Global user config (~/.config/planar/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 2. Local config (./.planar.yaml)
        if let Some(local) = Self::read_file(&dir.join(LOCAL_CONFIG_FILE)) {
            config.merge(local);
        }

        // 3. Environment variables
        if let Ok(design) = std::env::var("PLANAR_DESIGN") {
            config.design = Some(PathBuf::from(design));
        }
        if let Ok(format) = std::env::var("PLANAR_FORMAT") {
            config.default_format = Some(format);
        }

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable config: {}", e);
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "planar")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.design.is_some() {
            self.design = other.design;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Design file to operate on, preferring an explicit path
    pub fn design_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.design.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DESIGN_FILE))
    }
}
