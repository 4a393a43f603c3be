//! `svgcc colors` and `svgcc top`: color discovery.

use std::path::PathBuf;

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};
use serde_json::{Map, Value};

use super::common::{collect_targets, display_path, print_json};
use crate::config::SvgccConfig;
use crate::log;
use crate::process::{FileError, discover_files, top_colors};
use crate::utils::plural::plural_count;

type Discovered = Vec<(PathBuf, Result<Vec<String>, FileError>)>;

/// Discover colors in the selected files, logging failures.
fn discover(paths: &[PathBuf], config: &SvgccConfig) -> Result<Option<Discovered>> {
    let files = collect_targets(paths, config)?;
    if files.is_empty() {
        log!("colors"; "no SVG files found");
        return Ok(None);
    }

    let discovered = discover_files(&files);
    for (_, result) in &discovered {
        if let Err(err) = result {
            log!("error"; "{}", err.detail());
        }
    }
    Ok(Some(discovered))
}

/// Print the distinct colors of each file.
pub fn list_colors(paths: &[PathBuf], config: &SvgccConfig) -> Result<()> {
    let Some(discovered) = discover(paths, config)? else {
        return if config.json { print_json(&Map::new()) } else { Ok(()) };
    };

    if config.json {
        let map: Map<String, Value> = discovered
            .iter()
            .filter_map(|(path, result)| {
                let colors = result.as_ref().ok()?;
                Some((display_path(path, config), Value::from(colors.clone())))
            })
            .collect();
        return print_json(&map);
    }

    for (path, result) in &discovered {
        let Ok(colors) = result else { continue };
        let path = display_path(path, config);
        println!("{}", path.if_supports_color(Stream::Stdout, |p| p.bold()));
        for color in colors {
            println!("  {color}");
        }
    }
    Ok(())
}

/// Print colors ranked by the number of files using them.
pub fn rank_top(paths: &[PathBuf], config: &SvgccConfig) -> Result<()> {
    let Some(discovered) = discover(paths, config)? else {
        return if config.json { print_json(&Vec::<Value>::new()) } else { Ok(()) };
    };

    let ranked = top_colors(&discovered, config.colors.limit());
    if config.json {
        return print_json(&ranked);
    }

    for entry in &ranked {
        println!("{:>5}  {}", entry.count, entry.color);
    }
    log!(
        "colors";
        "{} across {}",
        plural_count(ranked.len(), "color"),
        plural_count(discovered.len(), "file")
    );
    Ok(())
}
