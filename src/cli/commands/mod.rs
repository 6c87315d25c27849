//! CLI command implementations

pub mod bounds;
pub mod chip;
pub mod completions;
pub mod config;
pub mod init;
