//! Configuration management for `svgcc.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [scan], [colors], [replace]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # find_config_file
//! └── mod.rs         # SvgccConfig (this file)
//! ```
//!
//! The config file is optional. Without one every section uses its defaults
//! and the scan root is resolved against the current directory.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{ColorsConfig, ReplaceConfig, ScanConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    debug, log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name, searched upward from the cwd.
pub const CONFIG_FILE: &str = "svgcc.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing svgcc.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SvgccConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Resolved absolute search root (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Print JSON instead of human output (internal use only)
    #[serde(skip)]
    pub json: bool,

    /// Where SVG files are searched
    #[serde(default)]
    pub scan: ScanConfig,

    /// Discovery defaults
    #[serde(default)]
    pub colors: ColorsConfig,

    /// Replacement defaults and preset pairs
    #[serde(default)]
    pub replace: ReplaceConfig,
}

impl SvgccConfig {
    /// Load configuration from CLI arguments.
    ///
    /// An explicit `--config` must exist. Otherwise `svgcc.toml` is searched
    /// upward from the cwd and defaults apply when none is found.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let config_path = match &cli.config {
            Some(path) => {
                let path = normalize_path(path);
                if !path.is_file() {
                    bail!(ConfigError::Validation(format!(
                        "config file `{}` not found",
                        path.display()
                    )));
                }
                Some(path)
            }
            None => find_config_file(Path::new(CONFIG_FILE), &cwd),
        };

        let mut config = match &config_path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };

        // Relative paths in the file are relative to the file itself
        let base = config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| cwd.clone(), Path::to_path_buf);

        config.config_path = config_path;
        config.finalize(cli, &base);
        config.validate()?;

        match &config.config_path {
            Some(path) => debug!("config"; "using {}", path.display()),
            None => debug!("config"; "no {} found, using defaults", CONFIG_FILE),
        }
        debug!("config"; "searching {}", config.root.display());

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get path relative to the search root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Resolve the search root and apply CLI overrides.
    fn finalize(&mut self, cli: &Cli, base: &Path) {
        self.root = match &cli.root {
            // --root is typed relative to the cwd, not the config file
            Some(root) => normalize_path(root),
            None => Self::resolve_root(&self.scan.root, base),
        };
        self.json = cli.json;
        self.apply_command_options(cli);
    }

    /// Expand `~` and resolve a configured root against `base`.
    fn resolve_root(root: &Path, base: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&root.to_string_lossy()).into_owned();
        let path = PathBuf::from(expanded);
        let full_path = if path.is_relative() {
            base.join(&path)
        } else {
            path
        };
        normalize_path(&full_path)
    }

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Top { limit, all, .. } => {
                if *all {
                    self.colors.limit = 0;
                } else {
                    Self::update_option(&mut self.colors.limit, limit.as_ref());
                }
            }
            Commands::Replace { args } => {
                self.replace.dry_run |= args.dry_run;
            }
            Commands::Files | Commands::Colors { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.scan.validate(&self.root, &mut diag);
        self.replace.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config text, panicking on unknown fields (to catch typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SvgccConfig {
    let (parsed, ignored) = SvgccConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
