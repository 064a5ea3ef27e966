//! The width-estimation scan.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::{Error, Result};
use crate::registry::FontEntry;

/// Characters of `text` as the estimator measures them: canonically decomposed, with all
/// combining marks discarded.
///
/// The glyph tables are built over a plain one-byte range, so accented characters are
/// intentionally measured as their base letters ("é" scans as "e"). This is a documented
/// lossy approximation; without it, anything outside the measured range would either fail
/// the lookup or silently mis-measure.
pub(crate) fn measurable_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd().filter(|c| !is_combining_mark(*c))
}

/// Single left-to-right scan: sum glyph widths, sum kerning corrections for each adjacent
/// ordered pair, return `naive − corrections`.
///
/// Any glyph miss fails the whole call; partial sums are never returned. The result is not
/// clamped: a negative width from a pathological hand-built table surfaces as-is.
pub(crate) fn width_for_entry(entry: &FontEntry, font: &str, text: &str) -> Result<f64> {
    let mut naive = 0.0;
    let mut corrections = 0.0;
    let mut prev: Option<char> = None;

    for c in measurable_chars(text) {
        let Some(width) = entry.glyphs.lookup(c) else {
            return Err(Error::CharacterNotSupported {
                character: c,
                font: font.to_string(),
            });
        };
        naive += width;
        if let Some(p) = prev {
            corrections += entry.kerning.correction(p, c);
        }
        prev = Some(c);
    }

    Ok(naive - corrections)
}
