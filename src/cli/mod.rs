//! Command-line interface module.

mod args;
pub mod colors;
pub mod common;
pub mod files;
pub mod replace;

pub use args::{Cli, Commands, ReplaceArgs};
