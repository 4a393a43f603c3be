//! SVG file enumeration.
//!
//! Two entry points:
//!
//! - [`collect_svg_files`]: every in-scope file under a directory
//! - [`resolve_targets`]: command-line paths (files, directories or `-` for
//!   stdin), falling back to the whole root when none are given
//!
//! A file is in scope when its name ends in `.svg`, compared case-insensitively.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::Result;
use jwalk::WalkDir;
use rustc_hash::FxHashSet;

use crate::config::ScanConfig;
use crate::debug;
use crate::utils::path::resolve_path;

/// Check whether a path names an SVG file (by extension only).
pub fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Collect SVG files under `dir`, recursively and sorted by path.
///
/// Excluded directory names are pruned before descending. Hidden entries are
/// skipped unless `[scan] hidden` is set.
pub fn collect_svg_files(dir: &Path, options: &ScanConfig) -> Vec<PathBuf> {
    let exclude = options.exclude.clone();
    let mut files: Vec<_> = WalkDir::new(dir)
        .skip_hidden(!options.hidden)
        .process_read_dir(move |_depth, _path, _state, children| {
            children.retain(|entry| {
                entry.as_ref().map_or(true, |e| {
                    !(e.file_type().is_dir()
                        && e.file_name()
                            .to_str()
                            .is_some_and(|name| exclude.iter().any(|x| x == name)))
                })
            });
        })
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|path| is_svg_path(path))
        .collect();
    files.sort();
    files
}

/// Files selected by command-line paths.
#[derive(Debug, Default)]
pub struct Targets {
    /// In-scope files, deduplicated, in argument order.
    pub files: Vec<PathBuf>,
    /// Arguments that named neither an SVG file nor a directory.
    pub skipped: Vec<PathBuf>,
}

/// Resolve command-line paths to the SVG files they select.
///
/// - no paths: every SVG under `root`
/// - a single `-`: paths are read from stdin, one per line
/// - a directory: every SVG below it
/// - a file: kept when it is an SVG, otherwise skipped
///
/// Relative paths are tried against the cwd first, then against `root`.
pub fn resolve_targets(paths: &[PathBuf], root: &Path, options: &ScanConfig) -> Result<Targets> {
    let paths: Vec<PathBuf> = if paths.len() == 1 && paths[0].as_os_str() == "-" {
        read_paths_from_stdin()?
    } else {
        paths.to_vec()
    };

    if paths.is_empty() {
        return Ok(Targets {
            files: collect_svg_files(root, options),
            skipped: Vec::new(),
        });
    }

    let mut targets = Targets::default();
    let mut seen = FxHashSet::default();
    for path in &paths {
        let resolved = resolve_path(path, root);

        let found = if resolved.is_dir() {
            collect_svg_files(&resolved, options)
        } else if resolved.is_file() && is_svg_path(&resolved) {
            vec![resolved]
        } else {
            debug!("scan"; "skipping {}: not an SVG file or directory", path.display());
            targets.skipped.push(path.clone());
            continue;
        };

        for file in found {
            if seen.insert(file.clone()) {
                targets.files.push(file);
            }
        }
    }

    Ok(targets)
}

/// Read file paths from stdin, one per line
pub fn read_paths_from_stdin() -> Result<Vec<PathBuf>> {
    read_paths(io::stdin().lock())
}

fn read_paths(reader: impl BufRead) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }
    Ok(paths)
}
