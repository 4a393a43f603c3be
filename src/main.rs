//! svgcc - discover and replace colors across SVG files.

mod cli;
mod color;
mod config;
mod logger;
mod process;
mod scan;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SvgccConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SvgccConfig::load(&cli)?;

    match &cli.command {
        Commands::Files => cli::files::list_files(&config),
        Commands::Colors { paths } => cli::colors::list_colors(paths, &config),
        Commands::Top { paths, .. } => cli::colors::rank_top(paths, &config),
        Commands::Replace { args } => cli::replace::run_replace(args, &config),
    }
}
