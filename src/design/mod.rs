//! Design module - design objects that own a chip registry

pub mod planar;

pub use planar::{DesignMetadata, DesignPlanar};
