//! Common utilities shared across CLI commands.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::config::SvgccConfig;
use crate::log;
use crate::scan::resolve_targets;
use crate::utils::plural::plural_count;

/// Resolve command paths to SVG files, warning about skipped arguments.
pub fn collect_targets(paths: &[PathBuf], config: &SvgccConfig) -> Result<Vec<PathBuf>> {
    let targets = resolve_targets(paths, &config.root, &config.scan)?;

    if !targets.skipped.is_empty() {
        log!(
            "warning";
            "skipped {} (not an SVG file or directory):",
            plural_count(targets.skipped.len(), "path")
        );
        for path in &targets.skipped {
            eprintln!("- {}", path.display());
        }
    }

    Ok(targets.files)
}

/// Path for output, relative to the search root when inside it.
pub fn display_path(path: &std::path::Path, config: &SvgccConfig) -> String {
    config.root_relative(path).display().to_string()
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
