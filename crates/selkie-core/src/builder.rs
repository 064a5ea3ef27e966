//! One-time table construction against the oracle.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::config::{CharRange, KerningRetention};
use crate::error::{Error, Result};
use crate::glyph::GlyphWidthTable;
use crate::kerning::KerningCorrectionTable;
use crate::oracle::WidthOracle;

fn measure(oracle: &dyn WidthOracle, font: &str, text: &str) -> Result<f64> {
    oracle.measure(font, text).map_err(|source| Error::Oracle {
        font: font.to_string(),
        text: text.to_string(),
        source,
    })
}

/// Measures every character of `range` once and returns the dense width table.
///
/// One oracle call per character; an oracle failure aborts the build and propagates verbatim.
/// Deterministic for a fixed oracle and font.
pub fn build_glyph_table(
    oracle: &dyn WidthOracle,
    font: &str,
    range: CharRange,
) -> Result<GlyphWidthTable> {
    let mut widths = Vec::with_capacity(range.len());
    let mut buf = [0u8; 4];
    for c in range.chars() {
        widths.push(measure(oracle, font, c.encode_utf8(&mut buf))?);
    }
    debug!(
        font,
        first = range.first(),
        last = range.last(),
        glyphs = widths.len(),
        "measured glyph widths"
    );
    GlyphWidthTable::from_widths(range, widths)
}

/// Measures every ordered pair from `range × range` (including doubled characters) and keeps
/// the corrections that pass `retention`.
///
/// A pair's correction is `glyphs(a) + glyphs(b) − measured(ab)`. This is O(|range|²) oracle
/// calls (about 9,025 for the default printable-ASCII range), paid once per font, which is
/// what makes query-time estimation a pure table scan.
pub fn build_kerning_table(
    oracle: &dyn WidthOracle,
    font: &str,
    range: CharRange,
    glyphs: &GlyphWidthTable,
    retention: KerningRetention,
) -> Result<KerningCorrectionTable> {
    let mut pairs = FxHashMap::default();
    let mut text = String::with_capacity(8);
    for a in range.chars() {
        let Some(width_a) = glyphs.lookup(a) else {
            return Err(Error::CharacterNotSupported {
                character: a,
                font: font.to_string(),
            });
        };
        for b in range.chars() {
            let Some(width_b) = glyphs.lookup(b) else {
                return Err(Error::CharacterNotSupported {
                    character: b,
                    font: font.to_string(),
                });
            };
            text.clear();
            text.push(a);
            text.push(b);
            let measured = measure(oracle, font, &text)?;
            let correction = width_a + width_b - measured;
            if retention.retains(correction) {
                pairs.insert((a, b), correction);
            }
        }
    }
    debug!(
        font,
        measured = range.len() * range.len(),
        retained = pairs.len(),
        "measured kerning corrections"
    );
    Ok(KerningCorrectionTable::from_pairs(pairs))
}
