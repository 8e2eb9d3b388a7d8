//! Deterministic highlight colors.
//!
//! Every atom (and rule) gets a stable `(base, hover)` color pair picked from a
//! fixed palette by hashing its identifier. No lookup table is kept; two
//! unrelated keys may land on the same pair.

use serde::Serialize;

use crate::models::{AtomId, RuleId};

/// A background color pair: `base` for the resting state, `hover` when the
/// owning atom is emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HighlightColor {
    pub base: &'static str,
    pub hover: &'static str,
}

impl HighlightColor {
    const fn new(base: &'static str, hover: &'static str) -> Self {
        Self { base, hover }
    }

    /// `base` as an RGB triple.
    pub fn rgb_base(&self) -> (u8, u8, u8) {
        parse_hex(self.base)
    }

    /// `hover` as an RGB triple.
    pub fn rgb_hover(&self) -> (u8, u8, u8) {
        parse_hex(self.hover)
    }
}

/// Reference palette, grouped by hue family.
pub const PALETTE: [HighlightColor; 20] = [
    // Blue
    HighlightColor::new("#e3f2fd", "#4a94e8"),
    HighlightColor::new("#e8f4fd", "#74e8b4"),
    // Green
    HighlightColor::new("#e8f5e8", "#3cb371"),
    HighlightColor::new("#ecfdf5", "#00c292"),
    // Yellow / amber
    HighlightColor::new("#fffbf0", "#ffd700"),
    HighlightColor::new("#fff8dc", "#f0e478"),
    // Pink / rose
    HighlightColor::new("#fdf2f8", "#fc7ec8"),
    HighlightColor::new("#fff0f5", "#ff6b6b"),
    HighlightColor::new("#fef7f7", "#ff80a4"),
    // Purple / lavender
    HighlightColor::new("#f8f4ff", "#bd80ff"),
    HighlightColor::new("#f5f0ff", "#8a2be2"),
    HighlightColor::new("#f0e6ff", "#9370db"),
    // Orange / peach
    HighlightColor::new("#fff7ed", "#ff8c00"),
    HighlightColor::new("#fffaf0", "#ffa07a"),
    // Cyan / teal
    HighlightColor::new("#f0fdfa", "#20b2aa"),
    HighlightColor::new("#ecfeff", "#00bfff"),
    // Brown / earth
    HighlightColor::new("#f8f6f4", "#d2b48c"),
    HighlightColor::new("#f5f5dc", "#bc8f8f"),
    // Indigo / navy
    HighlightColor::new("#f0f8ff", "#7c05cf"),
    HighlightColor::new("#f5f5ff", "#6f5ed6"),
];

/// Bernstein's djb2 (xor variant) over UTF-16 code units.
///
/// Wrapping 32-bit arithmetic gives the same result as the browser
/// implementation, which hashes `charCodeAt` values and coerces the result
/// with `>>> 0`.
pub fn djb2(key: &str) -> u32 {
    key.encode_utf16()
        .fold(5381u32, |hash, unit| hash.wrapping_mul(33) ^ u32::from(unit))
}

/// Color pair for an arbitrary key.
pub fn highlight_color(key: &str) -> HighlightColor {
    PALETTE[djb2(key) as usize % PALETTE.len()]
}

/// Color pair for an atom, keyed by its stringified id.
pub fn atom_color(id: AtomId) -> HighlightColor {
    highlight_color(&id.to_string())
}

/// Color pair for a rule, keyed by its stringified id.
pub fn rule_color(id: RuleId) -> HighlightColor {
    highlight_color(&id.to_string())
}

/// `#rrggbb` as an RGB triple. Malformed channels read as 0.
pub fn parse_hex(hex: &str) -> (u8, u8, u8) {
    let digits = hex.trim_start_matches('#');
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    (channel(0), channel(2), channel(4))
}
