//! Configuration section definitions.
//!
//! Each module corresponds to a section in `svgcc.toml`:
//!
//! | Module    | TOML Section | Purpose                              |
//! |-----------|--------------|--------------------------------------|
//! | `scan`    | `[scan]`     | Where SVG files are searched         |
//! | `colors`  | `[colors]`   | Discovery defaults (top-N limit)     |
//! | `replace` | `[replace]`  | Dry-run default and preset pairs     |

mod colors;
mod replace;
mod scan;

pub use colors::ColorsConfig;
pub use replace::ReplaceConfig;
pub use scan::ScanConfig;
