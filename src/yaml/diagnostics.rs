//! Diagnostics for malformed input files

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Syntax or shape error in a YAML input file, with the offending location
#[derive(Debug, Error, Diagnostic)]
#[error("Invalid input file: {message}")]
#[diagnostic(code(rkt::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl YamlSyntaxError {
    /// Build from a serde_yml error, locating it in `source`
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        let offset = offset_of(source, line, column);
        let message = err.to_string();
        let help = suggest_fix(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            message,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("Cannot read input file: {0}")]
    Io(#[from] std::io::Error),
}

/// Byte offset of a 1-based line/column, clamped to the source length
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        source
            .match_indices('\n')
            .nth(line - 2)
            .map(|(i, _)| i + 1)
            .unwrap_or(source.len())
    };

    let line_len = source[line_start..]
        .find('\n')
        .unwrap_or(source.len() - line_start);

    line_start + column.saturating_sub(1).min(line_len)
}

fn suggest_fix(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("tab") {
        return Some("Indent with spaces; YAML does not allow tabs.".to_string());
    }
    if msg.contains("duplicate") {
        return Some("Each field may appear only once.".to_string());
    }
    if msg.contains("did not match any variant") {
        return Some(
            "Durations are a number of hours or a mapping like `{ value: 12, unit: days }`."
                .to_string(),
        );
    }
    if msg.contains("mapping values are not allowed") {
        return Some("Check the space after ':' and the indentation.".to_string());
    }
    if msg.contains("unknown field") {
        return Some("Run `rkt init` to see the expected field names.".to_string());
    }

    None
}
