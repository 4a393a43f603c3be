//! Color discovery in raw SVG/XML+CSS text.
//!
//! Two full-text scans (hex first, then rgb/rgba), each honoring the
//! `id="` / `url(` guard. Every match is reduced to one canonical display
//! string:
//!
//! | Found                         | Canonical            |
//! |-------------------------------|----------------------|
//! | `#rgb`, `#rgba`, `#rrggbb`    | `#rrggbb`            |
//! | `#rrggbbff`                   | `#rrggbb`            |
//! | `#rrggbbaa` (aa != ff)        | `rgba(r,g,b,a)`      |
//! | `rgb()` / `rgba()`, alpha 1   | `#rrggbb`            |
//! | `rgb()` / `rgba()`, alpha < 1 | `rgba(r,g,b,a)`      |
//!
//! `#rgba` keeps only its RGB part; the alpha nibble is not shown.

use rustc_hash::FxHashSet;

use super::notation::{Color, Notation, decode};
use super::pattern::{GuardedMatches, HEX, RGBA};

/// All colors in `text`, canonicalized, in scan order, duplicates retained.
pub fn extract_colors(text: &str) -> Vec<String> {
    GuardedMatches::new(&HEX, text)
        .chain(GuardedMatches::new(&RGBA, text))
        // rgb matches with channels above 255 do not decode and are dropped
        .filter_map(|m| decode(m.as_str()).ok())
        .map(|notation| canonicalize(&notation))
        .collect()
}

/// Unique canonical colors of `text`, in first-seen order.
pub fn discover_colors(text: &str) -> Vec<String> {
    let mut seen = FxHashSet::default();
    extract_colors(text)
        .into_iter()
        .filter(|color| seen.insert(color.clone()))
        .collect()
}

/// Canonical display string of a notation.
pub fn canonicalize(notation: &Notation) -> String {
    let [r, g, b, a] = notation.channels();
    let opaque = Notation::Hex6([r, g, b, 0xff]);

    let canonical = match *notation {
        Notation::Hex3(_) | Notation::Hex4(_) | Notation::Hex6(_) => opaque,
        Notation::Hex8(_) if a == 0xff => opaque,
        Notation::Hex8(_) => translucent(notation.color()),
        Notation::Rgb { color, .. } | Notation::Rgba { color, .. } => {
            if color.is_opaque() {
                opaque
            } else {
                translucent(color)
            }
        }
    };
    canonical.to_string().to_ascii_lowercase()
}

const fn translucent(color: Color) -> Notation {
    Notation::Rgba {
        color,
        explicit_alpha: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(input: &str) -> String {
        canonicalize(&decode(input).unwrap())
    }

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonical("#ff0000ff"), "#ff0000");
        assert_eq!(canonical("rgba(255,0,0,1)"), "#ff0000");
        assert_eq!(canonical("rgba(255,0,0,0.5)"), "rgba(255,0,0,0.5)");
        assert_eq!(canonical("#f00"), "#ff0000");
        assert_eq!(canonical("#FF0000"), "#ff0000");
        assert_eq!(canonical("rgb(0, 128, 255)"), "#0080ff");
        assert_eq!(canonical("#ff000080"), "rgba(255,0,0,0.5)");
        assert_eq!(canonical("rgba(1, 2, 3, 0.50)"), "rgba(1,2,3,0.5)");
    }

    #[test]
    fn test_canonicalize_hex4_drops_alpha() {
        assert_eq!(canonical("#f008"), "#ff0000");
    }

    #[test]
    fn test_extract_hex_before_rgb() {
        let text = r##"<path fill="rgb(0,0,255)"/><path fill="#0f0"/>"##;
        assert_eq!(extract_colors(text), vec!["#00ff00", "#0000ff"]);
    }

    #[test]
    fn test_extract_keeps_duplicates() {
        let text = r##"<a fill="#fff"/><b fill="#ffffff"/><c style="fill:rgb(255, 255, 255)"/>"##;
        assert_eq!(extract_colors(text), vec!["#ffffff"; 3]);
    }

    #[test]
    fn test_extract_skips_fragment_references() {
        let text = r##"<rect fill="url(#abc)"/><use href="#def"/><g id="#bad"/>"##;
        assert_eq!(extract_colors(text), vec!["#ddeeff"]);
    }

    #[test]
    fn test_extract_skips_out_of_range() {
        assert!(extract_colors("fill: rgb(300, 0, 0);").is_empty());
    }

    #[test]
    fn test_extract_style_block() {
        let text = "<style>.a{fill:#000;stroke:rgba(0, 0, 0, .5)}.b{color:RGBA(10,20,30,0.25)}</style>";
        // `.5` has no leading digit and is not recognized
        assert_eq!(extract_colors(text), vec!["#000000", "rgba(10,20,30,0.25)"]);
    }

    #[test]
    fn test_discover_colors_unique() {
        let text = r##"<a fill="#f00"/><b fill="rgba(255,0,0,1)"/><c fill="#00f"/>"##;
        assert_eq!(discover_colors(text), vec!["#ff0000", "#0000ff"]);
    }

    #[test]
    fn test_discover_colors_empty() {
        assert!(discover_colors("<svg></svg>").is_empty());
        assert!(discover_colors("").is_empty());
    }
}
