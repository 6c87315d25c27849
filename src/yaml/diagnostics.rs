//! Design file diagnostics with source-located error messages

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A design file that could not be parsed, pointing at the offending spot
#[derive(Debug, Error, Diagnostic)]
#[error("invalid design file: {message}")]
#[diagnostic(code(planar::yaml::syntax))]
pub struct DesignSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl DesignSyntaxError {
    /// Build from a serde_yml error, locating it in `source`
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let offset = err
            .location()
            .map(|loc| line_col_to_offset(source, loc.line(), loc.column()))
            .unwrap_or(0);
        let message = err.to_string();
        let help = suggest(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised while reading or writing YAML
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] DesignSyntaxError),

    #[error("failed to serialize design: {0}")]
    Serialize(#[source] serde_yml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Byte offset of a 1-based line/column pair, clamped to the source
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        match source.match_indices('\n').nth(line - 2) {
            Some((idx, _)) => idx + 1,
            None => return source.len().saturating_sub(1),
        }
    };

    let line_text = source[line_start..].split('\n').next().unwrap_or("");
    let col_offset = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(line_text.len());

    line_start + col_offset
}

/// Hints for mistakes commonly made when hand-editing a design file
fn suggest(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("tab") {
        return Some("YAML indentation must use spaces, not tabs.".to_string());
    }

    if msg.contains("duplicate") {
        return Some("Chip names and section keys must be unique.".to_string());
    }

    if msg.starts_with("chips") || msg.contains("chips:") {
        return Some(
            "`chips` maps chip names to sections, e.g. `main: { size: { center_x: 0.0, ... } }`."
                .to_string(),
        );
    }

    if msg.contains("invalid type") && msg.contains("bool") {
        return Some("Flags such as `overwrite_enabled` take true or false.".to_string());
    }

    if msg.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation.".to_string());
    }

    None
}
