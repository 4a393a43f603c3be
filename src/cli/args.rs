//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::color::ColorPair;

/// Discover and replace colors across SVG files
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: svgcc.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Directory searched for SVG files (overrides `[scan] root`)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON to stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List SVG files under the root
    #[command(visible_alias = "f")]
    Files,

    /// List the distinct colors used by each file
    #[command(visible_alias = "c")]
    Colors {
        /// Files or directories to inspect. If omitted, inspects every SVG under root.
        /// Use `-` to read paths from stdin.
        #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
        paths: Vec<PathBuf>,
    },

    /// Rank colors by the number of files using them
    #[command(visible_alias = "t")]
    Top {
        /// Files or directories to rank. If omitted, ranks every SVG under root.
        /// Use `-` to read paths from stdin.
        #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
        paths: Vec<PathBuf>,

        /// Number of colors to show (overrides `[colors] limit`)
        #[arg(short = 'n', long, conflicts_with = "all")]
        limit: Option<usize>,

        /// Show every color
        #[arg(short, long)]
        all: bool,
    },

    /// Replace colors in SVG files, matching every equivalent notation
    #[command(visible_alias = "r")]
    Replace {
        #[command(flatten)]
        args: ReplaceArgs,
    },
}

/// Replace command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ReplaceArgs {
    /// Files or directories to rewrite. If omitted, rewrites every SVG under root.
    /// Use `-` to read paths from stdin.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Color pair `OLD=NEW`, e.g. `-p '#ff0000=rgb(0,128,0)'`. Repeatable, applied in order.
    #[arg(short, long = "pair", value_name = "OLD=NEW")]
    pub pairs: Vec<ColorPair>,

    /// Report what would change without writing files
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("svgcc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_replace_pairs_in_order() {
        let cli = parse(&["replace", "-p", "#f00=#0f0", "--pair", "rgb(0,0,0)=#fff", "a.svg"]);
        let Commands::Replace { args } = cli.command else {
            panic!("expected replace");
        };
        assert_eq!(args.pairs.len(), 2);
        assert_eq!(args.pairs[0], ColorPair::new("#f00", "#0f0"));
        assert_eq!(args.pairs[1].old, "rgb(0,0,0)");
        assert_eq!(args.paths, vec![PathBuf::from("a.svg")]);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_pair_without_separator_rejected() {
        let result = Cli::try_parse_from(["svgcc", "replace", "-p", "#f00"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_top_limit_conflicts_with_all() {
        assert!(Cli::try_parse_from(["svgcc", "top", "-n", "3", "--all"]).is_err());
        let cli = parse(&["t", "-n", "3"]);
        assert!(matches!(cli.command, Commands::Top { limit: Some(3), all: false, .. }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["files", "--json", "-r", "icons", "-v"]);
        assert!(matches!(cli.command, Commands::Files));
        assert!(cli.json);
        assert!(cli.verbose);
        assert_eq!(cli.root, Some(PathBuf::from("icons")));
        assert!(cli.config.is_none());
    }
}
