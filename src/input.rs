//! Address list loading.

use crate::error::ScrapeError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Reads one address per line, trimmed, skipping blank lines.
pub fn load_addresses(path: impl AsRef<Path>) -> Result<Vec<String>, ScrapeError> {
    let path = path.as_ref();
    debug!("Loading addresses from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ScrapeError::MissingInput { path: path.to_path_buf() },
        _ => ScrapeError::ReadInput { path: path.to_path_buf(), source },
    })?;

    Ok(parse_addresses(&content))
}

/// Splits text into trimmed, non-empty lines.
pub fn parse_addresses(content: &str) -> Vec<String> {
    content.lines().map(str::trim).filter(|line| !line.is_empty()).map(String::from).collect()
}
