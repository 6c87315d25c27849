//! Planar: chip geometry for planar superconducting-circuit designs
//!
//! A planar design holds its chips in a [`core::ChipRegistry`]. New designs
//! are seeded with a 5mm x 5mm `main` chip, and [`core::resolve_chip_bounds`]
//! turns a chip's stored center and size into the rectangle export tooling
//! clips against.

pub mod cli;
pub mod core;
pub mod design;
pub mod logging;
pub mod yaml;
