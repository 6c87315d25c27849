//! Core module - chip registry, bounds resolution and supporting utilities

pub mod bounds;
pub mod chip;
pub mod config;
pub mod loader;

pub use bounds::{resolve_chip_bounds, BoundingRectangle, ChipStatus};
pub use chip::{
    initialize_default_chip, ChipRecord, ChipRegistry, ChipSize, SizeError, DEFAULT_CHIP_SIZE,
    MAIN_CHIP,
};
pub use config::Config;
pub use loader::{load_design, save_design, DesignError, DEFAULT_DESIGN_FILE};
