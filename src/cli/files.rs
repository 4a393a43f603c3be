//! `svgcc files`: list in-scope SVG files.

use anyhow::Result;

use super::common::{display_path, print_json};
use crate::config::SvgccConfig;
use crate::log;
use crate::scan::collect_svg_files;
use crate::utils::plural::plural_count;

/// List every SVG file under the search root.
pub fn list_files(config: &SvgccConfig) -> Result<()> {
    let files = collect_svg_files(&config.root, &config.scan);
    let paths: Vec<String> = files.iter().map(|f| display_path(f, config)).collect();

    if config.json {
        return print_json(&paths);
    }

    for path in &paths {
        println!("{path}");
    }
    log!(
        "scan";
        "found {} under {}",
        plural_count(paths.len(), "SVG file"),
        config.root.display()
    );
    Ok(())
}
