//! Small helpers shared by the scanner, config loader and commands.

pub mod path;
pub mod plural;
