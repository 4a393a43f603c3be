//! Multi-pair color substitution.
//!
//! Replacing `old -> new` pair by pair would let a later pair rewrite what
//! an earlier pair just wrote (swapping red and blue would turn everything
//! blue). Substitution therefore runs in two phases:
//!
//! 1. **placeholders**: for each pair, every spelling of the old color is
//!    replaced by a token derived from a blake3 hash of the new color text
//! 2. **resolution**: every token is replaced by its literal new color
//!
//! Tokens contain neither `#` nor `rgb(`, so no color pattern can match
//! them, and distinct new colors never share a token.
//!
//! # Example
//!
//! ```ignore
//! let pairs = [ColorPair::new("#f00", "#00f"), ColorPair::new("#00f", "#f00")];
//! substitute(r##"<a fill="red"/><b fill="#f00"/><c fill="rgb(0, 0, 255)"/>"##, &pairs)?;
//! // -> <a fill="red"/><b fill="#00f"/><c fill="#f00"/>
//!
//! // Compile once, apply to many files
//! let substitution = Substitution::new(&pairs)?;
//! substitution.apply(text)?;
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::notation::{Color, ColorError, Notation, all_notations_of, decode, format_alpha};
use super::pattern::{GuardedMatches, RGBA_EXACT};

const PLACEHOLDER_PREFIX: &str = "_SVGCC__REPLACE_COLOR_";
const PLACEHOLDER_SUFFIX: &str = "__SVGCC_";

/// Substitution errors.
#[derive(Debug, Error)]
pub enum SubstituteError {
    /// Non-empty input produced empty output; the result must not be stored.
    #[error("replacing colors produced empty output")]
    EmptyOutput,

    #[error("invalid color pattern")]
    Pattern(#[from] regex::Error),
}

/// A replacement instruction: every spelling of `old` becomes `new` verbatim.
///
/// Both sides are trimmed, including when read from `svgcc.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawColorPair")]
pub struct ColorPair {
    pub old: String,
    pub new: String,
}

/// `ColorPair` as written in config, before trimming.
#[derive(Deserialize)]
struct RawColorPair {
    old: String,
    new: String,
}

impl From<RawColorPair> for ColorPair {
    fn from(raw: RawColorPair) -> Self {
        Self::new(raw.old, raw.new)
    }
}

impl ColorPair {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into().trim().to_string(),
            new: new.into().trim().to_string(),
        }
    }

    /// Decode both sides, failing on the first that is not a color.
    pub fn decode(&self) -> Result<(Notation, Notation), ColorError> {
        Ok((decode(&self.old)?, decode(&self.new)?))
    }
}

impl fmt::Display for ColorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.old, self.new)
    }
}

/// Parse `OLD=NEW` (colors never contain `=`).
impl FromStr for ColorPair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (old, new) = s
            .split_once('=')
            .ok_or_else(|| format!("expected OLD=NEW, got `{s}`"))?;
        let pair = Self::new(old, new);
        if pair.old.is_empty() || pair.new.is_empty() {
            return Err(format!("expected OLD=NEW, got `{s}`"));
        }
        Ok(pair)
    }
}

/// Replace every spelling of each pair's old color with its new color.
///
/// Pairs whose old or new side does not decode are skipped. Returns
/// [`SubstituteError::EmptyOutput`] if non-empty text came out empty.
#[allow(dead_code)] // batches compile a `Substitution` instead
pub fn substitute(text: &str, pairs: &[ColorPair]) -> Result<String, SubstituteError> {
    Substitution::new(pairs)?.apply(text)
}

/// Compiled patterns for a set of pairs, reusable across texts.
pub struct Substitution {
    rules: Vec<Rule>,
}

/// One decodable pair: the patterns of its old color and its token.
struct Rule {
    patterns: Vec<NotationPattern>,
    token: String,
    new: String,
}

impl Substitution {
    /// Compile the patterns of every decodable pair, in pair order.
    pub fn new(pairs: &[ColorPair]) -> Result<Self, SubstituteError> {
        let mut rules = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let Ok((old, _)) = pair.decode() else {
                continue;
            };
            let written = written_channels(&pair.old);
            let patterns = all_notations_of(old)
                .iter()
                .map(|notation| NotationPattern::new(notation, written.as_ref()))
                .collect::<Result<Vec<_>, _>>()?;
            rules.push(Rule {
                patterns,
                token: placeholder(&pair.new),
                new: pair.new.clone(),
            });
        }
        Ok(Self { rules })
    }

    /// Run both phases over `text`.
    pub fn apply(&self, text: &str) -> Result<String, SubstituteError> {
        let mut output = text.to_string();

        for rule in &self.rules {
            for pattern in &rule.patterns {
                if let Cow::Owned(replaced) = pattern.replace_all(&output, &rule.token) {
                    output = replaced;
                }
            }
        }

        // Pairs sharing a new color share a token; the first resolves them all
        for rule in &self.rules {
            if output.contains(rule.token.as_str()) {
                output = output.replace(rule.token.as_str(), &rule.new);
            }
        }

        if output.is_empty() && !text.is_empty() {
            return Err(SubstituteError::EmptyOutput);
        }
        Ok(output)
    }
}

/// Channel digits as written in an rgb-family pair (`07` in `rgb(0,0,07)`).
fn written_channels(old: &str) -> Option<[String; 3]> {
    let caps = RGBA_EXACT.captures(old.trim())?;
    Some([caps[2].to_string(), caps[3].to_string(), caps[4].to_string()])
}

/// Placeholder token for a new color.
fn placeholder(new_color: &str) -> String {
    let hash = blake3::hash(new_color.as_bytes());
    format!("{PLACEHOLDER_PREFIX}{}{PLACEHOLDER_SUFFIX}", hash.to_hex())
}

// ============================================================================
// per-notation patterns
// ============================================================================

/// Compiled matcher for one spelling of a color.
struct NotationPattern {
    regex: Regex,
    /// rgb-family matches must be followed by `; " ' , }`
    terminated: bool,
}

impl NotationPattern {
    /// Build the matcher:
    /// - hex: literal, case-insensitive, word-terminated (`#fff` never matches in `#ffff00`)
    /// - rgb/rgba: whitespace-tolerant around `(`, `,` and `)`, alpha with optional trailing zeros
    ///
    /// `written` channel digits are matched as well as the plain decimals.
    fn new(notation: &Notation, written: Option<&[String; 3]>) -> Result<Self, regex::Error> {
        let (source, terminated) = match *notation {
            Notation::Rgb {
                color,
                explicit_alpha,
            } => (function_source("rgb", color, explicit_alpha, written), true),
            Notation::Rgba {
                color,
                explicit_alpha,
            } => (function_source("rgba", color, explicit_alpha, written), true),
            _ => (format!(r"(?i){}\b", regex::escape(&notation.to_string())), false),
        };
        Ok(Self {
            regex: Regex::new(&source)?,
            terminated,
        })
    }

    fn replace_all<'t>(&self, text: &'t str, replacement: &str) -> Cow<'t, str> {
        let matches = GuardedMatches::new(&self.regex, text);
        let matches = if self.terminated {
            matches.terminated()
        } else {
            matches
        };

        let mut result = String::new();
        let mut last = 0;
        let mut replaced = false;
        for m in matches {
            result.push_str(&text[last..m.start()]);
            result.push_str(replacement);
            last = m.end();
            replaced = true;
        }
        if !replaced {
            return Cow::Borrowed(text);
        }
        result.push_str(&text[last..]);
        Cow::Owned(result)
    }
}

/// Regex source for an rgb-family notation.
fn function_source(
    name: &str,
    color: Color,
    explicit_alpha: bool,
    written: Option<&[String; 3]>,
) -> String {
    let channel = |index: usize, value: u8| {
        let plain = value.to_string();
        match written.map(|w| w[index].as_str()) {
            Some(digits) if digits != plain => format!("(?:{plain}|{digits})"),
            _ => plain,
        }
    };
    let mut components = vec![
        channel(0, color.red),
        channel(1, color.green),
        channel(2, color.blue),
    ];
    if explicit_alpha {
        components.push(alpha_source(color.alpha));
    }
    format!(r"(?i){name}\(\s*{}\s*\)", components.join(r"\s*,\s*"))
}

/// Alpha written as formatted, with or without trailing zeros (`1`, `1.0`, `0.50`).
fn alpha_source(alpha: f64) -> String {
    let formatted = format_alpha(alpha);
    if formatted.contains('.') {
        format!("{}0*", regex::escape(&formatted))
    } else {
        format!(r"{formatted}(?:\.0+)?")
    }
}
