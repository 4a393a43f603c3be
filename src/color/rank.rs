//! Frequency ranking of canonical colors.

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::pattern::RGBA_ALPHA;

/// A canonical color and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedColor {
    pub color: String,
    pub count: usize,
}

/// Rank colors by descending frequency.
///
/// Among equally frequent colors, higher alpha ranks first (hex colors count
/// as alpha `1`); remaining ties keep first-seen order. `limit` of `None` or
/// `Some(0)` keeps every color.
pub fn rank_colors<S: AsRef<str>>(colors: &[S], limit: Option<usize>) -> Vec<RankedColor> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    let mut order = Vec::new();
    for color in colors {
        let color = color.as_ref();
        let count = counts.entry(color).or_insert(0);
        if *count == 0 {
            order.push(color);
        }
        *count += 1;
    }

    let mut ranked: Vec<(RankedColor, f64)> = order
        .into_iter()
        .map(|color| {
            let ranked = RankedColor {
                color: color.to_string(),
                count: counts[color],
            };
            (ranked, alpha_of(color))
        })
        .collect();

    // Stable sort: equal count and alpha keep first-seen order
    ranked.sort_by(|(a, alpha_a), (b, alpha_b)| {
        b.count
            .cmp(&a.count)
            .then_with(|| alpha_b.total_cmp(alpha_a))
    });

    if let Some(limit) = limit.filter(|n| *n > 0) {
        ranked.truncate(limit);
    }
    ranked.into_iter().map(|(ranked, _)| ranked).collect()
}

/// Alpha of an `rgb()` / `rgba()` color with explicit alpha, `1.0` otherwise.
fn alpha_of(color: &str) -> f64 {
    RGBA_ALPHA
        .captures(color)
        .and_then(|caps| caps.get(1))
        // an empty alpha component reads as zero
        .map_or(1.0, |m| m.as_str().parse().unwrap_or(0.0))
}
