//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{load_design, BoundingRectangle, ChipStatus, Config};
use crate::design::DesignPlanar;

/// Bounds lookup result for one chip, as printed by list/show commands
#[derive(Debug, Clone, Serialize)]
pub struct BoundsReport {
    pub chip: String,
    pub status: ChipStatus,
    pub code: u8,
    pub bounds: Option<BoundingRectangle>,
}

impl BoundsReport {
    pub fn new(chip: &str, (bounds, status): (Option<BoundingRectangle>, ChipStatus)) -> Self {
        Self {
            chip: chip.to_string(),
            status,
            code: status.code(),
            bounds,
        }
    }

    /// Bounds as four cells, empty when unresolved
    pub fn cells(&self) -> [String; 4] {
        match self.bounds {
            Some(r) => [
                r.min_x.to_string(),
                r.min_y.to_string(),
                r.max_x.to_string(),
                r.max_y.to_string(),
            ],
            None => Default::default(),
        }
    }
}

/// Load the design selected by `--design`, config, or the default file
pub fn open_design(global: &GlobalOpts, config: &Config) -> Result<DesignPlanar> {
    let path = config.design_path(global.design.as_deref());
    tracing::debug!(path = %path.display(), "loading design");
    Ok(load_design(&path)?)
}

/// Effective output format after applying the configured default
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.format.or_configured(config.default_format.as_deref())
}

/// Print a serializable value as YAML or JSON
pub fn print_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
        }
        _ => {
            print!("{}", serde_yml::to_string(value).into_diagnostic()?);
        }
    }
    Ok(())
}

/// Rectangle as `(min_x, min_y, max_x, max_y)`
pub fn format_rect(rect: &BoundingRectangle) -> String {
    format!(
        "({}, {}, {}, {})",
        rect.min_x, rect.min_y, rect.max_x, rect.max_y
    )
}

/// Length in meters shown in millimeters, e.g. `5 mm`
pub fn format_mm(meters: f64) -> String {
    let mm = meters * 1000.0;
    let rounded = (mm * 1e6).round() / 1e6;
    format!("{} mm", rounded)
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rect() {
        let rect = BoundingRectangle {
            min_x: -0.0025,
            min_y: -0.0025,
            max_x: 0.0025,
            max_y: 0.0025,
        };
        assert_eq!(format_rect(&rect), "(-0.0025, -0.0025, 0.0025, 0.0025)");
    }

    #[test]
    fn test_format_mm() {
        assert_eq!(format_mm(0.005), "5 mm");
        assert_eq!(format_mm(0.0125), "12.5 mm");
    }

    #[test]
    fn test_report_cells() {
        let report = BoundsReport::new("x", (None, ChipStatus::ChipNotFound));
        assert_eq!(report.code, 1);
        assert!(report.cells().iter().all(String::is_empty));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }
}
