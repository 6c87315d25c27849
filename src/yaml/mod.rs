//! YAML handling for design files

pub mod diagnostics;

pub use diagnostics::{DesignSyntaxError, YamlError};
