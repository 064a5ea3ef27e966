//! Per-font metrics ownership and the public estimation surface.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::estimate;
use crate::glyph::GlyphWidthTable;
use crate::kerning::KerningCorrectionTable;


/// Both tables for one font. They are installed together or not at all; an entry is never
/// visible half-built.
#[derive(Debug, Clone, PartialEq)]
pub struct FontEntry {
    pub glyphs: GlyphWidthTable,
    pub kerning: KerningCorrectionTable,
}

/// Owns `(glyph, kerning)` table pairs keyed by font identity.
///
/// The font identity is an opaque string, typically the canonical font-description shorthand
/// (`500 14px / 15px "Source Sans Pro", sans-serif`) that also keyed the measurements.
///
/// Installation is the only mutation path and takes `&mut self`; estimation takes `&self` and
/// never mutates, so install-before-estimate is enforced by the borrow rules in-process and
/// a populated registry can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct FontMetricsRegistry {
    fonts: FxHashMap<String, FontEntry>,
}

impl FontMetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs both tables for `font`, atomically replacing any existing pair.
    pub fn install(
        &mut self,
        font: impl Into<String>,
        glyphs: GlyphWidthTable,
        kerning: KerningCorrectionTable,
    ) {
        self.fonts
            .insert(font.into(), FontEntry { glyphs, kerning });
    }

    pub fn contains(&self, font: &str) -> bool {
        self.fonts.contains_key(font)
    }

    pub fn fonts(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    /// The installed table pair for `font`.
    pub fn resolve(&self, font: &str) -> Result<&FontEntry> {
        self.fonts.get(font).ok_or_else(|| Error::UnknownFont {
            font: font.to_string(),
        })
    }

    /// Estimated rendered width of `text` in `font`, from the installed tables.
    ///
    /// Empty text is `Ok(0.0)`. Fails with [`Error::UnknownFont`] when `font` has no installed
    /// pair and [`Error::CharacterNotSupported`] when the normalized text reaches outside the
    /// measured range; a failing character fails the whole call.
    pub fn estimate_width(&self, font: &str, text: &str) -> Result<f64> {
        let entry = self.resolve(font)?;
        estimate::width_for_entry(entry, font, text)
    }

    /// [`estimate_width`](Self::estimate_width) over many texts, order-preserving and
    /// same-length as the input. Duplicates are legal and independent. The batch is
    /// all-or-nothing: the first failing text fails the call.
    pub fn estimate_widths<S: AsRef<str>>(&self, font: &str, texts: &[S]) -> Result<Vec<f64>> {
        let entry = self.resolve(font)?;
        texts
            .iter()
            .map(|text| estimate::width_for_entry(entry, font, text.as_ref()))
            .collect()
    }
}
