//! Path resolution utilities
//!
//! All bundled resources are resolved relative to the application root.

use std::path::{Path, PathBuf};

/// Directory holding bundled data files, relative to root
pub const DATA_DIR: &str = "data";

/// Bundled font catalogue file name
pub const GOOGLE_FONTS_FILE: &str = "google_fonts.json";

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Resolve an application-relative path from its components
pub fn app_path(root: &Path, parts: &[&str]) -> PathBuf {
    parts.iter().fold(root.to_path_buf(), |acc, part| acc.join(part))
}

/// Default location of the font catalogue for a given root
pub fn google_fonts_path(root: &Path) -> PathBuf {
    app_path(root, &[DATA_DIR, GOOGLE_FONTS_FILE])
}

/// Get the .fontcache directory for a given root
pub fn cache_dir(root: &Path) -> PathBuf {
    root.join(".fontcache")
}
