//! `[replace]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [replace]
//! dry_run = false
//! pairs = [
//!     { old = "#ff0000", new = "#00ff00" },
//!     { old = "rgba(0, 0, 0, 0.5)", new = "#333" },
//! ]
//! ```
//!
//! Preset pairs run before any `--pair` given on the command line.

use serde::{Deserialize, Serialize};

use crate::color::ColorPair;
use crate::config::{ConfigDiagnostics, FieldPath};

/// Replacement defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaceConfig {
    /// Report changes without writing files.
    pub dry_run: bool,

    /// Preset color pairs.
    pub pairs: Vec<ColorPair>,
}

impl ReplaceConfig {
    pub const PAIRS: FieldPath = FieldPath::new("replace.pairs");

    /// Every preset pair must decode on both sides.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (i, pair) in self.pairs.iter().enumerate() {
            if let Err(err) = pair.decode() {
                diag.error_with_hint(
                    Self::PAIRS,
                    format!("pair {} ({pair}): {err}", i + 1),
                    "use `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or `rgba(r, g, b, a)`",
                );
            }
        }
    }
}
