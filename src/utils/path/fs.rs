//! Path normalization utilities.
//!
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `resolve_path` - resolve relative paths with fallback directory

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a command-line path against the cwd, then the scan root.
///
/// Always returns an absolute path.
///
/// Tries in order:
/// 1. If absolute, use as-is
/// 2. If exists relative to cwd, normalize to absolute
/// 3. Otherwise, resolve relative to `root`
///
/// ```ignore
/// // `icons/arrow.svg` typed from anywhere inside the project
/// let resolved = resolve_path(Path::new("icons/arrow.svg"), &config.root);
/// ```
#[inline]
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if path.exists() {
        return normalize_path(path);
    }

    normalize_path(&root.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/icon.svg"));
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("relative/icon.svg"));
    }

    #[test]
    fn test_resolve_path_absolute() {
        let resolved = resolve_path(Path::new("/absolute/icon.svg"), Path::new("/root"));
        assert_eq!(resolved, PathBuf::from("/absolute/icon.svg"));
    }

    #[test]
    fn test_resolve_path_falls_back_to_root() {
        let resolved = resolve_path(Path::new("missing/icon.svg"), Path::new("/fallback"));
        assert_eq!(resolved, PathBuf::from("/fallback/missing/icon.svg"));
    }

    #[test]
    fn test_resolve_path_existing_under_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("icons")).unwrap();
        fs::write(dir.path().join("icons/a.svg"), "<svg/>").unwrap();

        let resolved = resolve_path(Path::new("icons/a.svg"), dir.path());
        assert!(resolved.is_file());
        assert!(resolved.is_absolute());
    }
}
