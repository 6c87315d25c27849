//! Design file loading and saving
//!
//! Designs are stored as plain YAML. Chip sections are kept as loose values,
//! so a chip with unusable size data still loads and is reported later by
//! bounds resolution rather than rejected here.

use miette::Diagnostic;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::design::DesignPlanar;
use crate::yaml::{DesignSyntaxError, YamlError};

/// Default file name for a design in the working directory
pub const DEFAULT_DESIGN_FILE: &str = "design.planar.yaml";

/// Errors that can occur while reading or writing a design file
#[derive(Debug, Error, Diagnostic)]
pub enum DesignError {
    #[error("design file not found: {}", .0.display())]
    #[diagnostic(
        code(planar::design::not_found),
        help("Run 'planar init' to create a design, or pass --design <FILE>.")
    )]
    NotFound(PathBuf),

    #[error("design file already exists: {}", .0.display())]
    #[diagnostic(code(planar::design::exists), help("Use --force to overwrite it."))]
    AlreadyExists(PathBuf),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Yaml(#[from] YamlError),
}

impl From<std::io::Error> for DesignError {
    fn from(err: std::io::Error) -> Self {
        DesignError::Yaml(YamlError::Io(err))
    }
}

/// Load a design from a YAML file.
///
/// The registry is taken exactly as stored; the default `main` chip is not
/// re-seeded.
pub fn load_design(path: &Path) -> Result<DesignPlanar, DesignError> {
    if !path.exists() {
        return Err(DesignError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    parse_design(&content, &path.display().to_string())
}

/// Parse design YAML, naming `filename` in any diagnostic
pub fn parse_design(content: &str, filename: &str) -> Result<DesignPlanar, DesignError> {
    serde_yml::from_str(content).map_err(|e| {
        DesignError::Yaml(YamlError::Syntax(DesignSyntaxError::from_serde_error(
            &e, content, filename,
        )))
    })
}

/// Write a design to a YAML file, creating parent directories as needed
pub fn save_design(path: &Path, design: &DesignPlanar) -> Result<(), DesignError> {
    let yaml = serde_yml::to_string(design).map_err(YamlError::Serialize)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, yaml)?;

    tracing::debug!(path = %path.display(), chips = design.chips().len(), "saved design");
    Ok(())
}

/// Write a new design file, refusing to replace an existing one unless forced
pub fn create_design(path: &Path, design: &DesignPlanar, force: bool) -> Result<(), DesignError> {
    if path.exists() && !force {
        return Err(DesignError::AlreadyExists(path.to_path_buf()));
    }
    save_design(path, design)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bounds::ChipStatus;
    use crate::core::chip::{ChipSize, MAIN_CHIP};
    use crate::design::DesignMetadata;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load_preserves_design() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/chip.planar.yaml");

        let mut design = DesignPlanar::new(DesignMetadata::named("transmon"), true, false);
        design
            .chips_mut()
            .entry("flip")
            .set_section("material", serde_yml::Value::from("silicon"));

        save_design(&path, &design).unwrap();
        let loaded = load_design(&path).unwrap();

        assert_eq!(loaded, design);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_design(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, DesignError::NotFound(_)));
    }

    #[test]
    fn test_load_does_not_reseed_main() {
        let yaml = "metadata:\n  design_name: bare\nchips:\n  other:\n    size: {center_x: 0, center_y: 0, size_x: 1, size_y: 1}\n";
        let design = parse_design(yaml, "bare.yaml").unwrap();

        assert!(!design.chips().contains(MAIN_CHIP));
        assert_eq!(design.get_x_y_for_chip(MAIN_CHIP).1, ChipStatus::ChipNotFound);
        assert_eq!(design.get_x_y_for_chip("other").1, ChipStatus::Ok);
    }

    #[test]
    fn test_load_keeps_invalid_size_for_resolution() {
        let yaml = "chips:\n  x:\n    size:\n      center_x: 0\n      center_y: 0\n      size_x: bad\n      size_y: 1\n";
        let design = parse_design(yaml, "bad.yaml").unwrap();

        let (rect, status) = design.get_x_y_for_chip("x");
        assert!(rect.is_none());
        assert_eq!(status, ChipStatus::SizeInfoInvalid);
    }

    #[test]
    fn test_infinite_size_survives_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_DESIGN_FILE);

        let mut design = DesignPlanar::default();
        design.chips_mut().entry("wide").set_size(ChipSize {
            center_x: 0.0,
            center_y: 0.0,
            size_x: f64::INFINITY,
            size_y: 1.0,
        });
        save_design(&path, &design).unwrap();

        let loaded = load_design(&path).unwrap();
        let (rect, status) = loaded.get_x_y_for_chip("wide");
        assert_eq!(status, ChipStatus::Ok);
        assert_eq!(rect.unwrap().max_x, f64::INFINITY);
    }

    #[test]
    fn test_yaml_inf_resolves() {
        let yaml = "chips:\n  x:\n    size: {center_x: 0, center_y: 0, size_x: .inf, size_y: 1}\n";
        let design = parse_design(yaml, "inf.yaml").unwrap();

        let (rect, status) = design.get_x_y_for_chip("x");
        assert_eq!(status, ChipStatus::Ok);
        assert_eq!(rect.unwrap().min_x, f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_defaults() {
        let design = parse_design("{}", "empty.yaml").unwrap();
        assert_eq!(design.metadata.design_name, "my_design");
        assert!(design.enable_renderers);
        assert!(!design.overwrite_enabled);
        assert!(design.chips().is_empty());
    }

    #[test]
    fn test_parse_syntax_error() {
        let err = parse_design("chips: [unclosed\n", "broken.yaml").unwrap_err();
        assert!(matches!(err, DesignError::Yaml(YamlError::Syntax(_))));
    }

    #[test]
    fn test_create_refuses_existing_without_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_DESIGN_FILE);
        let design = DesignPlanar::default();

        create_design(&path, &design, false).unwrap();
        let err = create_design(&path, &design, false).unwrap_err();
        assert!(matches!(err, DesignError::AlreadyExists(_)));

        create_design(&path, &design, true).unwrap();
    }
}
