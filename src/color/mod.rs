//! Color notation equivalence, discovery and substitution.
//!
//! Pure text-in, text-out functions. Nothing here touches the filesystem
//! or holds state beyond compiled static patterns, so every call is
//! independent and safe to run from parallel workers.
//!
//! # Modules
//!
//! - [`notation`]: `Color`, `Notation`, decode/encode, equivalent spellings
//! - [`pattern`]: shared recognizers and the `id="` / `url(` guard
//! - [`extract`]: find and canonicalize colors in text
//! - [`rank`]: frequency ranking with alpha tie-break
//! - [`substitute`]: two-phase multi-pair replacement, compiled once per batch
//!
//! # Pipeline
//!
//! ```text
//!  discover:   text ──► extract ──► canonical colors ──► rank ──► top N
//!
//!  replace:    text ──► [per pair] all_notations_of(old) ──► placeholders
//!                   ──► resolve placeholders ──► new text
//! ```

pub mod extract;
pub mod notation;
pub mod pattern;
pub mod rank;
pub mod substitute;

pub use extract::discover_colors;
pub use rank::{RankedColor, rank_colors};
pub use substitute::{ColorPair, SubstituteError, Substitution};
