//! `svgcc replace`: rewrite colors in place.

use std::path::PathBuf;

use anyhow::{Result, bail};

use super::ReplaceArgs;
use super::common::{collect_targets, print_json};
use crate::color::ColorPair;
use crate::config::SvgccConfig;
use crate::logger::ProgressLine;
use crate::process::{FailedFile, ReplaceReport, replace_files};
use crate::utils::plural::plural_count;
use crate::{debug, log};

/// Replace colors in the selected files.
///
/// Every file is attempted; the command fails afterwards if any file did.
pub fn run_replace(args: &ReplaceArgs, config: &SvgccConfig) -> Result<()> {
    let pairs = collect_pairs(&config.replace.pairs, &args.pairs);
    if pairs.is_empty() {
        bail!("no color pairs provided");
    }
    for pair in &pairs {
        if let Err(err) = pair.decode() {
            log!("warning"; "ignoring pair {pair}: {err}");
        }
    }

    let files = collect_targets(&args.paths, config)?;
    if files.is_empty() {
        bail!("no SVG files found");
    }

    let dry_run = config.replace.dry_run;
    if !config.json {
        log!(
            "replace";
            "applying {} to {}{}",
            plural_count(pairs.len(), "pair"),
            plural_count(files.len(), "file"),
            if dry_run { " (dry run)" } else { "" }
        );
    }

    let progress = (!config.json).then(|| ProgressLine::new("replace", &[("files", files.len())]));
    let report = replace_files(&files, &pairs, dry_run, progress.as_ref())?;
    if let Some(progress) = progress {
        progress.finish();
    }

    let report = relative_report(report, config);
    if config.json {
        print_json(&report)?;
    } else {
        print_summary(&report, dry_run);
    }

    if !report.is_success() {
        bail!("{} failed", plural_count(report.failed.len(), "file"));
    }
    Ok(())
}

/// Preset pairs first, then command-line pairs.
fn collect_pairs(presets: &[ColorPair], cli: &[ColorPair]) -> Vec<ColorPair> {
    presets.iter().chain(cli).cloned().collect()
}

fn relative_report(report: ReplaceReport, config: &SvgccConfig) -> ReplaceReport {
    let relative = |paths: Vec<PathBuf>| -> Vec<PathBuf> {
        paths.into_iter().map(|p| config.root_relative(p)).collect()
    };
    ReplaceReport {
        changed: relative(report.changed),
        unchanged: relative(report.unchanged),
        failed: report
            .failed
            .into_iter()
            .map(|f| FailedFile {
                path: config.root_relative(&f.path),
                error: f.error,
            })
            .collect(),
    }
}

fn print_summary(report: &ReplaceReport, dry_run: bool) {
    for path in &report.changed {
        debug!("replace"; "{} {}", if dry_run { "would change" } else { "changed" }, path.display());
    }
    for failed in &report.failed {
        log!("error"; "{}", failed.error);
    }

    log!(
        "replace";
        "{} {}, {} unchanged, {} failed",
        if dry_run { "would change" } else { "changed" },
        plural_count(report.changed.len(), "file"),
        report.unchanged.len(),
        report.failed.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(root: &std::path::Path) -> SvgccConfig {
        SvgccConfig {
            root: crate::utils::path::normalize_path(root),
            json: true,
            ..SvgccConfig::default()
        }
    }

    fn args(pairs: &[ColorPair], paths: Vec<PathBuf>) -> ReplaceArgs {
        ReplaceArgs {
            paths,
            pairs: pairs.to_vec(),
            dry_run: false,
        }
    }

    #[test]
    fn test_collect_pairs_presets_first() {
        let presets = [ColorPair::new("#000", "#111")];
        let cli = [ColorPair::new("#222", "#333")];
        let pairs = collect_pairs(&presets, &cli);
        assert_eq!(pairs, vec![presets[0].clone(), cli[0].clone()]);
    }

    #[test]
    fn test_no_pairs_is_error() {
        let dir = TempDir::new().unwrap();
        let err = run_replace(&args(&[], Vec::new()), &config(dir.path())).unwrap_err();
        assert_eq!(err.to_string(), "no color pairs provided");
    }

    #[test]
    fn test_no_files_is_error() {
        let dir = tempfile::Builder::new().prefix("svgcc").tempdir().unwrap();
        let pairs = [ColorPair::new("#000", "#fff")];
        let err = run_replace(&args(&pairs, Vec::new()), &config(dir.path())).unwrap_err();
        assert_eq!(err.to_string(), "no SVG files found");
    }

    #[test]
    fn test_replace_all_under_root() {
        let dir = tempfile::Builder::new().prefix("svgcc").tempdir().unwrap();
        fs::write(dir.path().join("a.svg"), r##"<path fill="#000"/>"##).unwrap();
        fs::write(dir.path().join("b.svg"), r##"<path fill="rgb(0, 0, 0)"/>"##).unwrap();

        let pairs = [ColorPair::new("black", "#fff"), ColorPair::new("#000", "#fff")];
        run_replace(&args(&pairs, Vec::new()), &config(dir.path())).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("a.svg")).unwrap(), r##"<path fill="#fff"/>"##);
        assert_eq!(fs::read_to_string(dir.path().join("b.svg")).unwrap(), r##"<path fill="#fff"/>"##);
    }

    #[test]
    fn test_relative_report() {
        let config = config(std::path::Path::new("/work"));
        let report = ReplaceReport {
            changed: vec![config.root.join("icons/a.svg")],
            ..ReplaceReport::default()
        };
        let report = relative_report(report, &config);
        assert_eq!(report.changed, vec![PathBuf::from("icons/a.svg")]);
    }
}
