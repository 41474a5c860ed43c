use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Expand `~` and environment variables in a path string
pub fn expand_path_str(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| path.into())
        .into_owned()
}

/// Expand a path with environment variables
pub fn expand_path_buf(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    PathBuf::from(expand_path_str(&path_str))
}

/// Create a directory and all parent directories if they don't exist
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {path:?}"))?;
        debug!("Created directory: {path:?}");
    }
    Ok(())
}

/// Expand a path and make it relative to `base_dir` unless it is absolute.
///
/// The path does not need to exist.
pub fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    let expanded = expand_path_buf(path);
    if expanded.is_absolute() {
        expanded
    } else {
        base_dir.join(expanded)
    }
}

/// Expand a glob pattern string and make it relative to `base_dir`
pub fn resolve_pattern_str(pattern: &str, base_dir: &Path) -> String {
    resolve_path(Path::new(pattern), base_dir)
        .to_string_lossy()
        .into_owned()
}
