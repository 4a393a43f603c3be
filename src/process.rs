//! Per-file discovery and replacement.
//!
//! Reads files, hands their text to the pure functions in [`crate::color`],
//! and writes results back. Files are processed in parallel and
//! independently: a failing file is recorded and the batch continues.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::color::{
    ColorPair, RankedColor, SubstituteError, Substitution, discover_colors, rank_colors,
};
use crate::logger::ProgressLine;
use crate::scan::is_svg_path;

/// Errors for a single file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{}` is not an SVG file", .0.display())]
    NotSvg(PathBuf),

    #[error("`{}` left unchanged", path.display())]
    Substitute {
        path: PathBuf,
        #[source]
        source: SubstituteError,
    },
}

impl FileError {
    /// Full message including the underlying cause.
    pub fn detail(&self) -> String {
        match std::error::Error::source(self) {
            Some(source) => format!("{self}: {source}"),
            None => self.to_string(),
        }
    }
}

/// Read an in-scope file as UTF-8 text.
fn read_svg(path: &Path) -> Result<String, FileError> {
    if !is_svg_path(path) {
        return Err(FileError::NotSvg(path.to_path_buf()));
    }
    let read_err = |source: io::Error| FileError::Read {
        path: path.to_path_buf(),
        source,
    };
    let bytes = fs::read(path).map_err(read_err)?;
    String::from_utf8(bytes).map_err(|err| read_err(io::Error::new(io::ErrorKind::InvalidData, err)))
}

// ============================================================================
// Discovery
// ============================================================================

/// Distinct canonical colors of one file, in first-seen order.
pub fn discover_file(path: &Path) -> Result<Vec<String>, FileError> {
    read_svg(path).map(|text| discover_colors(&text))
}

/// Discover colors of many files in parallel, results in input order.
pub fn discover_files(files: &[PathBuf]) -> Vec<(PathBuf, Result<Vec<String>, FileError>)> {
    files
        .par_iter()
        .map(|path| (path.clone(), discover_file(path)))
        .collect()
}

/// Rank colors by the number of files using them.
///
/// Each file contributes its distinct colors once. Failed files contribute
/// nothing.
pub fn top_colors(
    discovered: &[(PathBuf, Result<Vec<String>, FileError>)],
    limit: Option<usize>,
) -> Vec<RankedColor> {
    let all: Vec<&str> = discovered
        .iter()
        .filter_map(|(_, result)| result.as_ref().ok())
        .flatten()
        .map(String::as_str)
        .collect();
    rank_colors(&all, limit)
}

// ============================================================================
// Replacement
// ============================================================================

/// Result of rewriting one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Text changed (and was written unless dry-run).
    Changed,
    /// No pair matched.
    Unchanged,
}

/// Apply a compiled substitution to one file, writing only when the text changed.
///
/// On [`SubstituteError::EmptyOutput`] the file is left untouched.
pub fn replace_in_file(
    path: &Path,
    substitution: &Substitution,
    dry_run: bool,
) -> Result<Outcome, FileError> {
    let text = read_svg(path)?;
    let output = substitution.apply(&text).map_err(|source| FileError::Substitute {
        path: path.to_path_buf(),
        source,
    })?;

    if output == text {
        return Ok(Outcome::Unchanged);
    }
    if !dry_run {
        fs::write(path, output).map_err(|source| FileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(Outcome::Changed)
}

/// A file that could not be processed.
#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// Aggregate of a replacement batch, paths in input order.
#[derive(Debug, Default, Serialize)]
pub struct ReplaceReport {
    pub changed: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub failed: Vec<FailedFile>,
}

impl ReplaceReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Replace colors in every file, continuing past failures.
///
/// Patterns are compiled once for the whole batch.
pub fn replace_files(
    files: &[PathBuf],
    pairs: &[ColorPair],
    dry_run: bool,
    progress: Option<&ProgressLine>,
) -> Result<ReplaceReport, SubstituteError> {
    let substitution = Substitution::new(pairs)?;
    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let result = replace_in_file(path, &substitution, dry_run);
            if let Some(progress) = progress {
                progress.inc("files");
            }
            (path, result)
        })
        .collect();

    let mut report = ReplaceReport::default();
    for (path, result) in results {
        match result {
            Ok(Outcome::Changed) => report.changed.push(path.clone()),
            Ok(Outcome::Unchanged) => report.unchanged.push(path.clone()),
            Err(err) => report.failed.push(FailedFile {
                path: path.clone(),
                error: err.detail(),
            }),
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_discover_file() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "a.svg",
            r##"<svg><rect fill="#FFF"/><circle fill="rgb(255,255,255)"/><path stroke="#f00"/></svg>"##,
        );
        assert_eq!(discover_file(&path).unwrap(), vec!["#ffffff", "#ff0000"]);
    }

    #[test]
    fn test_discover_rejects_non_svg() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", "#fff");
        assert!(matches!(discover_file(&path), Err(FileError::NotSvg(_))));
    }

    #[test]
    fn test_discover_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = discover_file(&dir.path().join("gone.svg")).unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
        assert!(err.detail().contains("gone.svg"));
    }

    #[test]
    fn test_top_colors_counts_files() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.svg", r##"<path fill="#000"/><path fill="#000"/><path fill="#f00"/>"##);
        let b = write(&dir, "b.svg", r##"<path fill="#000000"/>"##);
        let c = dir.path().join("missing.svg");

        let discovered = discover_files(&[a, b, c]);
        assert!(discovered[2].1.is_err());

        let top = top_colors(&discovered, None);
        assert_eq!(top[0], RankedColor { color: "#000000".into(), count: 2 });
        assert_eq!(top[1], RankedColor { color: "#ff0000".into(), count: 1 });
        assert_eq!(top_colors(&discovered, Some(1)).len(), 1);
    }

    #[test]
    fn test_replace_in_file_writes() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.svg", r##"<path fill="#ff0000"/>"##);
        let substitution = Substitution::new(&[ColorPair::new("#f00", "#00f")]).unwrap();

        assert_eq!(replace_in_file(&path, &substitution, false).unwrap(), Outcome::Changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), r##"<path fill="#00f"/>"##);
        assert_eq!(replace_in_file(&path, &substitution, false).unwrap(), Outcome::Unchanged);
    }

    #[test]
    fn test_replace_dry_run_leaves_file() {
        let dir = TempDir::new().unwrap();
        let original = r##"<path fill="#ff0000"/>"##;
        let path = write(&dir, "a.svg", original);

        let substitution = Substitution::new(&[ColorPair::new("#f00", "#00f")]).unwrap();
        let outcome = replace_in_file(&path, &substitution, true).unwrap();
        assert_eq!(outcome, Outcome::Changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_replace_files_continues_on_error() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.svg", r##"<path fill="#000"/>"##);
        let b = dir.path().join("missing.svg");
        let c = write(&dir, "c.svg", r##"<path fill="#123456"/>"##);
        fs::write(dir.path().join("bad.svg"), [0xff, 0xfe, 0x00]).unwrap();
        let d = dir.path().join("bad.svg");

        let report = replace_files(
            &[a.clone(), b.clone(), c.clone(), d.clone()],
            &[ColorPair::new("#000", "#fff")],
            false,
            None,
        )
        .unwrap();

        assert_eq!(report.changed, vec![a.clone()]);
        assert_eq!(report.unchanged, vec![c]);
        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.failed[0].path, b);
        assert_eq!(report.failed[1].path, d);
        assert!(!report.is_success());
        assert_eq!(fs::read_to_string(&a).unwrap(), r##"<path fill="#fff"/>"##);
    }

    #[test]
    fn test_report_json_shape() {
        let report = ReplaceReport {
            changed: vec![PathBuf::from("a.svg")],
            unchanged: Vec::new(),
            failed: vec![FailedFile {
                path: PathBuf::from("b.svg"),
                error: "boom".into(),
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["changed"][0], "a.svg");
        assert_eq!(json["failed"][0]["error"], "boom");
    }
}
