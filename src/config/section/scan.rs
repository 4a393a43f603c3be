//! `[scan]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [scan]
//! root = "uploads"              # Directory searched for *.svg (relative to svgcc.toml)
//! exclude = ["node_modules"]    # Directory names skipped while walking
//! hidden = false                # Descend into dot-directories
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Where SVG files are searched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Search root. `~` is expanded, relative paths are resolved against
    /// the directory holding `svgcc.toml`.
    pub root: PathBuf,

    /// Directory names skipped during the walk.
    pub exclude: Vec<String>,

    /// Include hidden files and directories.
    pub hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            exclude: vec!["node_modules".into(), "target".into()],
            hidden: false,
        }
    }
}

impl ScanConfig {
    pub const ROOT: FieldPath = FieldPath::new("scan.root");
    pub const EXCLUDE: FieldPath = FieldPath::new("scan.exclude");

    /// Check whether a directory name is excluded from the walk.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }

    /// Validate the resolved search root.
    pub fn validate(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        if !root.exists() {
            diag.error_with_hint(
                Self::ROOT,
                format!("directory `{}` not found", root.display()),
                "set `[scan] root` or pass `--root`",
            );
        } else if !root.is_dir() {
            diag.error(Self::ROOT, format!("`{}` is not a directory", root.display()));
        }

        if self.exclude.iter().any(|name| name.is_empty() || name.contains('/')) {
            diag.error(Self::EXCLUDE, "entries must be plain directory names");
        }
    }
}
