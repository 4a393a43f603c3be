//! `[colors]` section configuration.
//!
//! ```toml
//! [colors]
//! limit = 10    # Default top-N for `svgcc top` (0 = all)
//! ```

use serde::{Deserialize, Serialize};

/// Discovery defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Number of colors `top` shows. `0` shows every color.
    pub limit: usize,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

impl ColorsConfig {
    /// Limit as passed to the ranker, `None` when unlimited.
    pub const fn limit(&self) -> Option<usize> {
        if self.limit == 0 { None } else { Some(self.limit) }
    }
}
