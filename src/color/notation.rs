//! Color notation model.
//!
//! A [`Color`] is a decoded RGBA quadruple and is only ever compared by
//! value. A [`Notation`] is one textual spelling of a color: a hex form of
//! 3, 4, 6 or 8 digits, or an `rgb()` / `rgba()` function with or without
//! an explicit alpha component.
//!
//! # Conversions
//!
//! RGB channels convert losslessly between all forms. Alpha is stored as a
//! byte in hex and as a fraction in rgb/rgba; the byte-to-fraction direction
//! rounds to two decimals (`round(byte / 255, 2)`), the other direction
//! rounds to the nearest byte.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::pattern::{HEX_EXACT, RGBA_EXACT};

/// Color decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("not a color: `{0}`")]
    NotAColor(String),
}

/// Hex channel bytes: red, green, blue, alpha.
pub type Channels = [u8; 4];

/// A semantic color: 8-bit RGB channels plus alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl Color {
    /// Create a fully opaque color.
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// Create a color with explicit alpha.
    pub const fn with_alpha(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Decode from hex channel bytes (alpha rounded to two decimals).
    pub fn from_channels([red, green, blue, alpha]: Channels) -> Self {
        Self::with_alpha(red, green, blue, alpha_from_byte(alpha))
    }

    /// Hex channel bytes (alpha rounded to the nearest byte).
    pub fn channels(&self) -> Channels {
        [self.red, self.green, self.blue, alpha_to_byte(self.alpha)]
    }

    /// Check if the color is fully opaque.
    #[allow(clippy::float_cmp)] // alpha is parsed or rounded, never computed
    pub fn is_opaque(&self) -> bool {
        self.alpha == 1.0
    }
}

/// One spelling of a color.
///
/// Hex variants carry the exact channel bytes they were written with, so an
/// alpha byte survives conversions between hex forms unrounded. The rgb
/// family records which function name was written and whether a fourth
/// (alpha) component is present: `rgb(1,2,3,0.5)` and `rgba(1,2,3)` are both
/// accepted spellings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notation {
    /// `#rgb`
    Hex3(Channels),
    /// `#rgba`
    Hex4(Channels),
    /// `#rrggbb`
    Hex6(Channels),
    /// `#rrggbbaa`
    Hex8(Channels),
    /// `rgb(r,g,b)` or `rgb(r,g,b,a)`
    Rgb { color: Color, explicit_alpha: bool },
    /// `rgba(r,g,b)` or `rgba(r,g,b,a)`
    Rgba { color: Color, explicit_alpha: bool },
}

impl Notation {
    /// The decoded color.
    pub fn color(&self) -> Color {
        match *self {
            Self::Hex3(ch) | Self::Hex4(ch) | Self::Hex6(ch) | Self::Hex8(ch) => {
                Color::from_channels(ch)
            }
            Self::Rgb { color, .. } | Self::Rgba { color, .. } => color,
        }
    }

    /// Hex channel bytes of this spelling.
    pub fn channels(&self) -> Channels {
        match *self {
            Self::Hex3(ch) | Self::Hex4(ch) | Self::Hex6(ch) | Self::Hex8(ch) => ch,
            Self::Rgb { color, .. } | Self::Rgba { color, .. } => color.channels(),
        }
    }
}

impl FromStr for Notation {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

/// Encode a notation: lowercase hex, comma-separated decimals without spaces.
impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Hex3([r, g, b, _]) => write!(f, "#{:x}{:x}{:x}", r & 0xf, g & 0xf, b & 0xf),
            Self::Hex4([r, g, b, a]) => {
                write!(f, "#{:x}{:x}{:x}{:x}", r & 0xf, g & 0xf, b & 0xf, a & 0xf)
            }
            Self::Hex6([r, g, b, _]) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Hex8([r, g, b, a]) => write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}"),
            Self::Rgb {
                color,
                explicit_alpha,
            } => write_function(f, "rgb", color, explicit_alpha),
            Self::Rgba {
                color,
                explicit_alpha,
            } => write_function(f, "rgba", color, explicit_alpha),
        }
    }
}

fn write_function(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    color: Color,
    explicit_alpha: bool,
) -> fmt::Result {
    let Color {
        red, green, blue, ..
    } = color;
    if explicit_alpha {
        write!(f, "{name}({red},{green},{blue},{})", format_alpha(color.alpha))
    } else {
        write!(f, "{name}({red},{green},{blue})")
    }
}

/// Format alpha as a plain decimal without trailing zeros (`1`, `0.5`, `0.25`).
pub fn format_alpha(alpha: f64) -> String {
    format!("{alpha}")
}

/// Byte alpha to a fraction rounded to two decimals.
pub fn alpha_from_byte(byte: u8) -> f64 {
    (f64::from(byte) / 255.0 * 100.0).round() / 100.0
}

/// Fractional alpha to the nearest byte.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=255
pub fn alpha_to_byte(alpha: f64) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Check if a byte is written with two equal hex digits (`0x33`, `0xff`).
#[inline]
const fn is_doubled(byte: u8) -> bool {
    byte >> 4 == byte & 0xf
}

// ============================================================================
// decode
// ============================================================================

/// Decode one complete notation (surrounding whitespace ignored).
///
/// # Examples
/// ```ignore
/// decode("#f00")                  // Hex3 -> rgb(255,0,0)
/// decode("rgba(255, 0, 0, 0.5)")  // Rgba with explicit alpha
/// decode("url(#f00)")             // Err(NotAColor)
/// ```
pub fn decode(input: &str) -> Result<Notation, ColorError> {
    let s = input.trim();
    decode_hex(s)
        .or_else(|| decode_function(s))
        .ok_or_else(|| ColorError::NotAColor(input.to_string()))
}

fn decode_hex(s: &str) -> Option<Notation> {
    let digits = HEX_EXACT.captures(s)?.get(1)?.as_str();

    let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

    Some(match digits.len() {
        3 => Notation::Hex3([nibble(0)?, nibble(1)?, nibble(2)?, 0xff]),
        4 => Notation::Hex4([nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?]),
        6 => Notation::Hex6([byte(0)?, byte(2)?, byte(4)?, 0xff]),
        8 => Notation::Hex8([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => return None,
    })
}

fn decode_function(s: &str) -> Option<Notation> {
    let caps = RGBA_EXACT.captures(s)?;

    // Channels above 255 do not fit a byte and are rejected here
    let red = caps[2].parse::<u8>().ok()?;
    let green = caps[3].parse::<u8>().ok()?;
    let blue = caps[4].parse::<u8>().ok()?;

    let explicit_alpha = caps.get(5).is_some();
    let color = match caps.get(5) {
        Some(m) => {
            let alpha = m.as_str().parse::<f64>().ok().filter(|a| *a <= 1.0)?;
            Color::with_alpha(red, green, blue, alpha)
        }
        None => Color::opaque(red, green, blue),
    };

    Some(if caps[1].eq_ignore_ascii_case("rgba") {
        Notation::Rgba {
            color,
            explicit_alpha,
        }
    } else {
        Notation::Rgb {
            color,
            explicit_alpha,
        }
    })
}

// ============================================================================
// notation closure
// ============================================================================

/// Every spelling that must be treated as the same color as `observed`.
///
/// Always starts with `observed` itself, followed by:
/// - `#rrggbbaa`
/// - `#rrggbb`, plus `#rgb` / `#rgbf` when every channel is doubled (opaque only)
/// - `#rgba` when all four bytes are doubled (translucent only)
/// - opaque: `rgb()` and `rgba()`, each without alpha and with alpha `1`
/// - translucent: `rgb()` and `rgba()` with the explicit alpha
///
/// The hex forms derive from one channel set, so nothing is expanded more
/// than one hop and the result holds at most nine entries. An rgb-family
/// alpha that no hex byte decodes back to (`0.999`) gets no hex forms.
pub fn all_notations_of(observed: Notation) -> Vec<Notation> {
    let channels = observed.channels();
    let [r, g, b, a] = channels;
    let doubled_rgb = is_doubled(r) && is_doubled(g) && is_doubled(b);
    let opaque_channels = [r, g, b, 0xff];

    let mut notations = vec![observed];
    let mut push = |notation: Notation| {
        if !notations.contains(&notation) {
            notations.push(notation);
        }
    };

    if has_hex_alpha(observed) {
        if a == 0xff {
            if doubled_rgb {
                push(Notation::Hex3(opaque_channels));
                push(Notation::Hex4(opaque_channels));
            }
            push(Notation::Hex6(opaque_channels));
        } else if doubled_rgb && is_doubled(a) {
            push(Notation::Hex4(channels));
        }
        push(Notation::Hex8(channels));
    }

    let color = observed.color();
    let alpha_spellings: &[bool] = if color.is_opaque() {
        &[false, true]
    } else {
        &[true]
    };
    for &explicit_alpha in alpha_spellings {
        push(Notation::Rgb {
            color,
            explicit_alpha,
        });
        push(Notation::Rgba {
            color,
            explicit_alpha,
        });
    }

    notations
}

/// Check whether the alpha of a notation survives a hex byte unchanged.
#[allow(clippy::float_cmp)] // both sides are rounded the same way
fn has_hex_alpha(notation: Notation) -> bool {
    match notation {
        Notation::Rgb { color, .. } | Notation::Rgba { color, .. } => {
            alpha_from_byte(alpha_to_byte(color.alpha)) == color.alpha
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spellings(input: &str) -> Vec<String> {
        all_notations_of(decode(input).unwrap())
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_decode_hex_forms() {
        assert_eq!(decode("#f00").unwrap(), Notation::Hex3([255, 0, 0, 255]));
        assert_eq!(decode("#F008").unwrap(), Notation::Hex4([255, 0, 0, 0x88]));
        assert_eq!(decode("#ff0000").unwrap(), Notation::Hex6([255, 0, 0, 255]));
        assert_eq!(decode("#ff000080").unwrap(), Notation::Hex8([255, 0, 0, 0x80]));
    }

    #[test]
    fn test_decode_hex_alpha_rounding() {
        let color = decode("#ff000080").unwrap().color();
        assert_eq!(color, Color::with_alpha(255, 0, 0, 0.5));
        assert_eq!(decode("#0000").unwrap().color().alpha, 0.0);
    }

    #[test]
    fn test_decode_functions() {
        assert_eq!(
            decode("rgb(255, 0, 0)").unwrap(),
            Notation::Rgb {
                color: Color::opaque(255, 0, 0),
                explicit_alpha: false
            }
        );
        assert_eq!(
            decode("RGBA( 1 ,2,3 , 0.25 )").unwrap(),
            Notation::Rgba {
                color: Color::with_alpha(1, 2, 3, 0.25),
                explicit_alpha: true
            }
        );
        // rgb() with a fourth component is accepted as written
        assert_eq!(
            decode("rgb(1,2,3,1)").unwrap(),
            Notation::Rgb {
                color: Color::opaque(1, 2, 3),
                explicit_alpha: true
            }
        );
    }

    #[test]
    fn test_decode_rejects() {
        for input in [
            "",
            "fff",
            "#ff",
            "#fffff",
            "#ggg",
            "red",
            "hsl(0, 100%, 50%)",
            "url(#fff)",
            "rgb(256,0,0)",
            "rgba(1,2,3,1.5)",
            "rgba(1,2,3,.5)",
            "rgb(1,2)",
            "#fff #000",
        ] {
            assert_eq!(
                decode(input),
                Err(ColorError::NotAColor(input.to_string())),
                "{input:?} should not decode"
            );
        }
    }

    #[test]
    fn test_decode_trims() {
        assert!(decode("  #abc\n").is_ok());
    }

    #[test]
    fn test_encode() {
        assert_eq!(Notation::Hex3([0xaa, 0xbb, 0xcc, 0xff]).to_string(), "#abc");
        assert_eq!(Notation::Hex4([0xaa, 0xbb, 0xcc, 0x88]).to_string(), "#abc8");
        assert_eq!(Notation::Hex6([1, 2, 255, 0xff]).to_string(), "#0102ff");
        assert_eq!(Notation::Hex8([1, 2, 255, 0]).to_string(), "#0102ff00");
        let color = Color::with_alpha(255, 0, 0, 0.5);
        assert_eq!(
            Notation::Rgba {
                color,
                explicit_alpha: true
            }
            .to_string(),
            "rgba(255,0,0,0.5)"
        );
        assert_eq!(
            Notation::Rgb {
                color: Color::opaque(0, 10, 200),
                explicit_alpha: true
            }
            .to_string(),
            "rgb(0,10,200,1)"
        );
    }

    #[test]
    fn test_alpha_conversions() {
        assert_eq!(alpha_from_byte(0xff), 1.0);
        assert_eq!(alpha_from_byte(0x80), 0.5);
        assert_eq!(alpha_from_byte(0x4d), 0.3);
        assert_eq!(alpha_to_byte(0.5), 0x80);
        assert_eq!(alpha_to_byte(1.0), 0xff);
        assert_eq!(format_alpha(1.0), "1");
        assert_eq!(format_alpha(0.25), "0.25");
    }

    #[test]
    fn test_all_notations_of_hex3() {
        assert_eq!(
            spellings("#f00"),
            vec![
                "#f00",
                "#f00f",
                "#ff0000",
                "#ff0000ff",
                "rgb(255,0,0)",
                "rgba(255,0,0)",
                "rgb(255,0,0,1)",
                "rgba(255,0,0,1)",
            ]
        );
    }

    #[test]
    fn test_all_notations_of_irreducible_hex6() {
        let all = spellings("#123456");
        assert!(!all.contains(&"#12345600".to_string()));
        assert!(all.contains(&"#123456ff".to_string()));
        assert!(all.iter().all(|s| s.len() != 4 && s.len() != 5));
    }

    #[test]
    fn test_all_notations_of_opaque_hex8_includes_hex6() {
        let all = spellings("#ff0000ff");
        assert_eq!(all[0], "#ff0000ff");
        assert!(all.contains(&"#ff0000".to_string()));
        assert!(all.contains(&"#f00".to_string()));
        assert!(all.contains(&"rgb(255,0,0)".to_string()));
    }

    #[test]
    fn test_all_notations_of_translucent_hex() {
        assert_eq!(
            spellings("#ff000080"),
            vec!["#ff000080", "rgb(255,0,0,0.5)", "rgba(255,0,0,0.5)"]
        );
        assert_eq!(
            spellings("#f008"),
            vec!["#f008", "#ff000088", "rgb(255,0,0,0.53)", "rgba(255,0,0,0.53)"]
        );
    }

    #[test]
    fn test_all_notations_of_rgb() {
        let all = spellings("rgb(255, 255, 255)");
        for expected in ["#fff", "#ffff", "#ffffff", "#ffffffff", "rgba(255,255,255,1)"] {
            assert!(all.contains(&expected.to_string()), "missing {expected}");
        }
        assert!(all.len() <= 9);
    }

    #[test]
    fn test_all_notations_of_rgba_translucent() {
        let all = spellings("rgba(0,0,0,0.5)");
        assert!(all.contains(&"#00000080".to_string()));
        assert!(all.contains(&"rgb(0,0,0,0.5)".to_string()));
        assert!(!all.contains(&"#000000".to_string()));
    }

    #[test]
    fn test_all_notations_of_alpha_without_hex_byte() {
        assert_eq!(
            spellings("rgba(1,2,3,0.999)"),
            vec!["rgba(1,2,3,0.999)", "rgb(1,2,3,0.999)"]
        );
        let all = spellings("rgba(1,2,3,0.3)");
        assert!(all.contains(&"#0102034d".to_string()));
    }

    #[test]
    fn test_closure_decodes_to_same_color() {
        for input in [
            "#abc",
            "#abcf",
            "#aabbcc",
            "#aabbccff",
            "#11223380",
            "rgb(17,34,51)",
            "rgba(17, 34, 51)",
            "rgb(17,34,51,1)",
            "rgba( 17 , 34 , 51 , 0.5 )",
            "rgba(1,2,3,0.999)",
            "rgb(1,2,3,0.001)",
        ] {
            let observed = decode(input).unwrap();
            for notation in all_notations_of(observed) {
                let redecoded = decode(&notation.to_string()).unwrap();
                assert_eq!(
                    redecoded.color(),
                    observed.color(),
                    "{notation} does not round-trip from {input}"
                );
            }
        }
    }
}
