//! Source file reading
//!
//! Reads a bundled JSON source in full and parses it. Read failures map to
//! `MissingSourceFile`, parse failures to `MalformedSource`.

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::core::error::LoadError;

/// Read the full contents of a source file
pub fn read_source(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::MissingSourceFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse source bytes as JSON
pub fn parse_source(path: &Path, bytes: &[u8]) -> Result<Value, LoadError> {
    serde_json::from_slice(bytes).map_err(|source| LoadError::MalformedSource {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a JSON source file
pub fn load_json(path: &Path) -> Result<Value, LoadError> {
    let bytes = read_source(path)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "read source file");
    parse_source(path, &bytes)
}
