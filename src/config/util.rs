//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
///
/// # Example
/// ```text
/// /home/user/project/assets/icons/  ← start
/// /home/user/project/svgcc.toml     ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_parent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("assets/icons");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("svgcc.toml"), "").unwrap();

        let found = find_config_file(Path::new("svgcc.toml"), &nested).unwrap();
        assert_eq!(found, dir.path().join("svgcc.toml"));
    }

    #[test]
    fn test_find_config_ignores_directory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("svgcc-missing.toml")).unwrap();

        let found = find_config_file(Path::new("svgcc-missing.toml"), dir.path());
        assert!(found.is_none_or(|path| !path.starts_with(dir.path())));
    }
}
