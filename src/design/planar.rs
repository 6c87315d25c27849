//! Planar (2D) design consisting of a single plane chip

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::core::bounds::{resolve_chip_bounds, BoundingRectangle, ChipStatus};
use crate::core::chip::{initialize_default_chip, ChipRegistry};

/// Descriptive metadata carried with a design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignMetadata {
    /// Design name
    #[serde(default = "default_design_name")]
    pub design_name: String,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Any other keys found in the metadata section
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn default_design_name() -> String {
    "my_design".to_string()
}

impl Default for DesignMetadata {
    fn default() -> Self {
        Self {
            design_name: default_design_name(),
            notes: None,
            extra: BTreeMap::new(),
        }
    }
}

impl DesignMetadata {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            design_name: name.into(),
            ..Self::default()
        }
    }
}

/// A planar design: one or more chips in a single plane, typically holding
/// CPW-style geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPlanar {
    #[serde(default)]
    pub metadata: DesignMetadata,

    /// Allow components to be replaced under an existing name
    #[serde(default)]
    pub overwrite_enabled: bool,

    /// Whether renderers should be attached when the design is opened
    #[serde(default = "default_enable_renderers")]
    pub enable_renderers: bool,

    #[serde(default)]
    chips: ChipRegistry,
}

fn default_enable_renderers() -> bool {
    true
}

impl Default for DesignPlanar {
    fn default() -> Self {
        Self::new(DesignMetadata::default(), false, true)
    }
}

impl DesignPlanar {
    /// Create a design with the default `main` chip
    pub fn new(metadata: DesignMetadata, overwrite_enabled: bool, enable_renderers: bool) -> Self {
        let mut design = Self {
            metadata,
            overwrite_enabled,
            enable_renderers,
            chips: ChipRegistry::new(),
        };
        design.add_chip_info();
        design
    }

    /// Re-seed the `main` chip with the default 5mm x 5mm geometry
    pub fn add_chip_info(&mut self) {
        initialize_default_chip(&mut self.chips);
    }

    pub fn chips(&self) -> &ChipRegistry {
        &self.chips
    }

    pub fn chips_mut(&mut self) -> &mut ChipRegistry {
        &mut self.chips
    }

    /// Bounding rectangle `(min_x, min_y, max_x, max_y)` of a chip plus the
    /// lookup status. The rectangle is `None` unless the status is ok.
    pub fn get_x_y_for_chip(&self, chip_name: &str) -> (Option<BoundingRectangle>, ChipStatus) {
        resolve_chip_bounds(&self.chips, chip_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chip::{ChipRecord, ChipSize, MAIN_CHIP};

    #[test]
    fn test_new_design_has_main_chip() {
        let design = DesignPlanar::default();
        assert_eq!(design.chips().len(), 1);
        assert!(design.chips().contains(MAIN_CHIP));
        assert!(!design.overwrite_enabled);
        assert!(design.enable_renderers);
        assert_eq!(design.metadata.design_name, "my_design");
    }

    #[test]
    fn test_get_x_y_for_main_chip() {
        let design = DesignPlanar::new(DesignMetadata::named("qubit"), true, false);
        let (rect, status) = design.get_x_y_for_chip(MAIN_CHIP);
        assert_eq!(status, ChipStatus::Ok);
        assert_eq!(
            rect.unwrap().as_tuple(),
            (-0.0025, -0.0025, 0.0025, 0.0025)
        );
    }

    #[test]
    fn test_get_x_y_for_added_chip() {
        let mut design = DesignPlanar::default();
        design.chips_mut().insert(
            "flip",
            ChipRecord::with_size(ChipSize {
                center_x: 0.01,
                center_y: 0.0,
                size_x: 0.002,
                size_y: 0.004,
            }),
        );

        let (rect, status) = design.get_x_y_for_chip("flip");
        assert_eq!(status, ChipStatus::Ok);
        let rect = rect.unwrap();
        assert!((rect.min_x - 0.009).abs() < 1e-12);
        assert!((rect.max_y - 0.002).abs() < 1e-12);
    }

    #[test]
    fn test_add_chip_info_restores_default() {
        let mut design = DesignPlanar::default();
        design.chips_mut().remove(MAIN_CHIP);
        assert_eq!(design.get_x_y_for_chip(MAIN_CHIP).1, ChipStatus::ChipNotFound);

        design.add_chip_info();
        assert_eq!(design.get_x_y_for_chip(MAIN_CHIP).1, ChipStatus::Ok);
    }

    #[test]
    fn test_metadata_keeps_extra_keys() {
        let yaml = "design_name: demo\nauthor: someone\n";
        let metadata: DesignMetadata = serde_yml::from_str(yaml).unwrap();
        assert_eq!(metadata.design_name, "demo");
        assert_eq!(
            metadata.extra.get("author"),
            Some(&Value::String("someone".to_string()))
        );
    }
}
