#![forbid(unsafe_code)]

//! `selkie` estimates rendered text widths from precomputed font metrics.
//!
//! Measuring text through a real rendering surface is accurate but expensive and stateful.
//! `selkie` pays that cost once per font: an external oracle measures every character of a
//! configured range plus every ordered character pair, the results become two immutable lookup
//! tables, and every estimate afterwards is a pure table scan, cheap enough to run for
//! thousands of strings and parallelizable for free.
//!
//! The crate re-exports the whole of [`selkie_core`] and adds the small orchestration helpers
//! that tie a registry, an oracle, and a cache together.

pub use selkie_core::*;

/// Builds (or cache-warms) tables for each font in `fonts` and installs them into `registry`.
///
/// Fonts already installed are rebuilt and replaced. Fails on the first font whose build
/// fails; fonts installed before the failure stay installed.
pub fn warm_registry<S: AsRef<str>>(
    registry: &mut FontMetricsRegistry,
    oracle: &dyn WidthOracle,
    cache: &mut dyn MetricsCache,
    fonts: &[S],
    config: &MetricsConfig,
) -> Result<()> {
    for font in fonts {
        let font = font.as_ref();
        let (glyphs, kerning) = load_or_build(oracle, cache, font, config)?;
        registry.install(font, glyphs, kerning);
    }
    Ok(())
}

/// Estimates from the installed tables, falling back to a single oracle measurement when the
/// tables cannot answer (unknown font, or text outside the measured range).
///
/// This packages the recovery that is otherwise left to callers; anything other than those
/// two misses (an oracle failure in particular) still propagates.
pub fn estimate_or_measure(
    registry: &FontMetricsRegistry,
    oracle: &dyn WidthOracle,
    font: &str,
    text: &str,
) -> Result<f64> {
    match registry.estimate_width(font, text) {
        Ok(width) => Ok(width),
        Err(Error::UnknownFont { .. } | Error::CharacterNotSupported { .. }) => {
            oracle.measure(font, text).map_err(|source| Error::Oracle {
                font: font.to_string(),
                text: text.to_string(),
                source,
            })
        }
        Err(err) => Err(err),
    }
}
