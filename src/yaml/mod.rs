//! YAML loading with source-annotated errors

pub mod diagnostics;

pub use diagnostics::{YamlError, YamlSyntaxError};

use serde::de::DeserializeOwned;
use std::path::Path;

/// Parse YAML text, turning serde errors into a diagnostic pointing at the source
pub fn parse_yaml_str<T: DeserializeOwned + 'static>(
    content: &str,
    filename: &str,
) -> Result<T, YamlError> {
    // An empty document means "all fields empty", not a syntax error
    let content = if content.trim().is_empty() { "{}" } else { content };

    serde_yml::from_str(content)
        .map_err(|e| YamlSyntaxError::from_serde_error(&e, content, filename).into())
}

/// Read and parse a YAML file
pub fn parse_yaml_file<T: DeserializeOwned + 'static>(path: &Path) -> Result<T, YamlError> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml_str(&content, &path.display().to_string())
}
