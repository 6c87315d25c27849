//! Chip bounds resolution
//!
//! Export routines need a chip's physical extent to subtract or clip design
//! features against. Resolution is a soft-fail query: it never errors, it
//! returns the rectangle (if any) together with a [`ChipStatus`] the caller
//! branches on. Details of why size information was unusable go to the log.

use serde::{Deserialize, Serialize};

use crate::core::chip::ChipRegistry;

/// Axis-aligned chip footprint in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRectangle {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingRectangle {
    /// `(min_x, min_y, max_x, max_y)`
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.min_x, self.min_y, self.max_x, self.max_y)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

impl From<BoundingRectangle> for (f64, f64, f64, f64) {
    fn from(rect: BoundingRectangle) -> Self {
        rect.as_tuple()
    }
}

/// Outcome of a bounds lookup
///
/// Every size-related problem maps to [`ChipStatus::SizeInfoInvalid`]; the
/// warning logged at resolution time says which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipStatus {
    Ok,
    ChipNotFound,
    SizeInfoInvalid,
}

impl ChipStatus {
    /// Numeric status code: 0 ok, 1 chip not found, 2 size info invalid
    pub fn code(self) -> u8 {
        match self {
            ChipStatus::Ok => 0,
            ChipStatus::ChipNotFound => 1,
            ChipStatus::SizeInfoInvalid => 2,
        }
    }

    pub fn is_ok(self) -> bool {
        self == ChipStatus::Ok
    }
}

impl From<ChipStatus> for u8 {
    fn from(status: ChipStatus) -> Self {
        status.code()
    }
}

impl std::fmt::Display for ChipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChipStatus::Ok => write!(f, "ok"),
            ChipStatus::ChipNotFound => write!(f, "chip_not_found"),
            ChipStatus::SizeInfoInvalid => write!(f, "size_info_invalid"),
        }
    }
}

/// Resolve the bounding rectangle of a named chip.
///
/// Checks run in order: chip present, size section present, all four size
/// fields present, all four numeric. The first failing check logs a warning
/// and determines the status. The registry is only read.
pub fn resolve_chip_bounds(
    registry: &ChipRegistry,
    chip_name: &str,
) -> (Option<BoundingRectangle>, ChipStatus) {
    let Some(record) = registry.get(chip_name) else {
        tracing::warn!(chip = chip_name, "chip \"{}\" is not in the chip registry", chip_name);
        return (None, ChipStatus::ChipNotFound);
    };

    match record.size() {
        Ok(size) => (Some(size.bounds()), ChipStatus::Ok),
        Err(err) => {
            tracing::warn!(chip = chip_name, "chip \"{}\": {}", chip_name, err);
            (None, ChipStatus::SizeInfoInvalid)
        }
    }
}
