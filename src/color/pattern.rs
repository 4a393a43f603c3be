//! Shared color recognizers and the fragment-reference guard.
//!
//! The `regex` crate has no look-around, so the two guards every color
//! pattern needs are checked around each candidate match instead:
//!
//! - **lookbehind**: a match directly preceded by `id="` or `url(` is an
//!   SVG fragment reference (`url(#fff)`), not a color
//! - **lookahead** (rgb family, replacement only): the closing parenthesis
//!   must be followed by optional whitespace and one of `; " ' , }`
//!
//! A rejected candidate resumes the search one character after its start,
//! so a valid color starting inside the rejected span is still found.

use regex::{Match, Regex};
use std::sync::LazyLock;

/// Hex color anywhere in text: `#` + 8, 6, 4 or 3 hex digits, word-terminated.
pub static HEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)#(?:[0-9a-f]{8}|[0-9a-f]{6}|[0-9a-f]{4}|[0-9a-f]{3})\b").unwrap()
});

/// `rgb()` / `rgba()` anywhere in text, alpha optional.
pub static RGBA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rgba?\(\s*\d+\s*,\s*\d+\s*,\s*\d+(?:\s*,\s*[01](?:\.\d+)?)?\s*\)").unwrap()
});

/// Captures the alpha component of a four-component `rgb()` / `rgba()`.
pub static RGBA_ALPHA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rgba?\(\s*\d+\s*,\s*\d+\s*,\s*\d+\s*,\s*(\d*(?:\.\d+)?)\s*\)").unwrap()
});

/// Anchored hex notation, digits captured.
pub static HEX_EXACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#([0-9a-f]{8}|[0-9a-f]{6}|[0-9a-f]{4}|[0-9a-f]{3})$").unwrap()
});

/// Anchored rgb/rgba notation: function name, three channels, optional alpha.
pub static RGBA_EXACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(rgba?)\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)(?:\s*,\s*([01](?:\.\d+)?))?\s*\)$",
    )
    .unwrap()
});

/// Prefixes that mark a fragment reference rather than a color.
const GUARDS: [&[u8]; 2] = [b"id=\"", b"url("];

/// Characters allowed right after an rgb-family match during replacement.
const TERMINATORS: [char; 5] = [';', '"', '\'', ',', '}'];

/// Check whether the text right before `start` is `id="` or `url(` (ASCII case-insensitive).
#[inline]
pub fn is_guarded(text: &str, start: usize) -> bool {
    let before = &text.as_bytes()[..start];
    GUARDS.iter().any(|guard| {
        before.len() >= guard.len() && before[before.len() - guard.len()..].eq_ignore_ascii_case(guard)
    })
}

/// Check whether `end` is followed by optional whitespace and a terminator.
#[inline]
pub fn has_terminator(text: &str, end: usize) -> bool {
    text[end..]
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| TERMINATORS.contains(&c))
}

/// Iterator over guard-respecting, non-overlapping matches of a pattern.
pub struct GuardedMatches<'r, 't> {
    regex: &'r Regex,
    text: &'t str,
    pos: usize,
    terminated: bool,
}

impl<'r, 't> GuardedMatches<'r, 't> {
    /// Matches honoring the `id="` / `url(` lookbehind only.
    pub fn new(regex: &'r Regex, text: &'t str) -> Self {
        Self {
            regex,
            text,
            pos: 0,
            terminated: false,
        }
    }

    /// Additionally require a terminator after each match.
    pub fn terminated(mut self) -> Self {
        self.terminated = true;
        self
    }

    fn accepts(&self, m: &Match<'t>) -> bool {
        !is_guarded(self.text, m.start()) && (!self.terminated || has_terminator(self.text, m.end()))
    }
}

impl<'t> Iterator for GuardedMatches<'_, 't> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Match<'t>> {
        while self.pos <= self.text.len() {
            let m = self.regex.find_at(self.text, self.pos)?;
            if self.accepts(&m) {
                self.pos = if m.is_empty() {
                    next_boundary(self.text, m.end())
                } else {
                    m.end()
                };
                return Some(m);
            }
            self.pos = next_boundary(self.text, m.start());
        }
        None
    }
}

/// Byte offset of the character after the one starting at `pos`.
#[inline]
fn next_boundary(text: &str, pos: usize) -> usize {
    pos + text[pos..].chars().next().map_or(1, char::len_utf8)
}
