//! Advisory byte-cache collaborator and cache-aware table loading.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::builder::{build_glyph_table, build_kerning_table};
use crate::codec;
use crate::config::MetricsConfig;
use crate::error::Result;
use crate::glyph::GlyphWidthTable;
use crate::kerning::KerningCorrectionTable;
use crate::oracle::WidthOracle;

/// Opaque key-value store for encoded tables.
///
/// The cache is advisory: a missing or undecodable entry falls back to rebuilding via the
/// oracle, never to an error. Keys are derived from the font identity.
pub trait MetricsCache {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn put(&mut self, key: &str, bytes: &[u8]);
}

/// In-process [`MetricsCache`], mostly useful for tests and single-run tools.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: FxHashMap<String, Vec<u8>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetricsCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, bytes: &[u8]) {
        self.entries.insert(key.to_string(), bytes.to_vec());
    }
}

pub fn glyph_cache_key(font: &str) -> String {
    format!("{font}/glyphs")
}

pub fn kerning_cache_key(font: &str) -> String {
    format!("{font}/kerning")
}

/// Returns both tables for `font`, decoding from `cache` where possible and rebuilding via
/// `oracle` otherwise. Freshly built tables are written back.
///
/// A cached glyph table is only accepted when it covers the configured range; kerning entries
/// that fail structural validation are discarded and rebuilt. Only genuine build failures
/// (the oracle itself) propagate.
pub fn load_or_build(
    oracle: &dyn WidthOracle,
    cache: &mut dyn MetricsCache,
    font: &str,
    config: &MetricsConfig,
) -> Result<(GlyphWidthTable, KerningCorrectionTable)> {
    let glyph_key = glyph_cache_key(font);
    let glyphs = match cache.get(&glyph_key).map(|bytes| codec::decode_glyph_table(&bytes)) {
        Some(Ok(table)) if table.range() == config.range => {
            debug!(font, key = %glyph_key, "glyph table warmed from cache");
            Some(table)
        }
        Some(Ok(table)) => {
            debug!(
                font,
                cached_first = table.range().first(),
                cached_last = table.range().last(),
                "cached glyph table covers a different range; rebuilding"
            );
            None
        }
        Some(Err(err)) => {
            warn!(font, %err, "discarding malformed cached glyph table");
            None
        }
        None => None,
    };
    let glyphs_warmed = glyphs.is_some();
    let glyphs = match glyphs {
        Some(table) => table,
        None => {
            let table = build_glyph_table(oracle, font, config.range)?;
            cache.put(&glyph_key, &codec::encode_glyph_table(&table));
            table
        }
    };

    // Corrections are only meaningful against the glyph widths they were measured with, so a
    // rebuilt glyph table invalidates whatever kerning bytes the cache still holds.
    let kerning_key = kerning_cache_key(font);
    let kerning = if glyphs_warmed {
        match cache
            .get(&kerning_key)
            .map(|bytes| codec::decode_kerning_table(&bytes))
        {
            Some(Ok(table)) => {
                debug!(font, key = %kerning_key, "kerning table warmed from cache");
                Some(table)
            }
            Some(Err(err)) => {
                warn!(font, %err, "discarding malformed cached kerning table");
                None
            }
            None => None,
        }
    } else {
        None
    };
    let kerning = match kerning {
        Some(table) => table,
        None => {
            let table = build_kerning_table(oracle, font, config.range, &glyphs, config.retention)?;
            cache.put(&kerning_key, &codec::encode_kerning_table(&table)?);
            table
        }
    };

    Ok((glyphs, kerning))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OracleError;
    use std::cell::Cell;

    struct CountingOracle {
        calls: Cell<usize>,
    }

    impl CountingOracle {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
            }
        }
    }

    impl WidthOracle for CountingOracle {
        fn measure(&self, _font: &str, text: &str) -> std::result::Result<f64, OracleError> {
            self.calls.set(self.calls.get() + 1);
            // Doubled characters render 0.25 tighter, everything else is additive.
            let tight = text.chars().count() == 2 && {
                let mut chars = text.chars();
                chars.next() == chars.next()
            };
            let width: f64 = text.chars().map(|c| (u32::from(c) % 11 + 2) as f64).sum();
            Ok(if tight { width - 0.25 } else { width })
        }
    }

    fn config() -> MetricsConfig {
        MetricsConfig {
            range: crate::CharRange::new(65, 70),
            ..MetricsConfig::default()
        }
    }

    #[test]
    fn a_cold_cache_builds_and_writes_back() {
        let oracle = CountingOracle::new();
        let mut cache = MemoryCache::new();
        let config = config();

        let (glyphs, kerning) = load_or_build(&oracle, &mut cache, "mono", &config).unwrap();
        assert_eq!(oracle.calls.get(), 6 + 36);
        assert_eq!(glyphs.range(), config.range);
        assert_eq!(kerning.len(), 6);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn a_warm_cache_skips_the_oracle_entirely() {
        let oracle = CountingOracle::new();
        let mut cache = MemoryCache::new();
        let config = config();

        let (first_glyphs, first_kerning) =
            load_or_build(&oracle, &mut cache, "mono", &config).unwrap();
        oracle.calls.set(0);

        let (glyphs, kerning) = load_or_build(&oracle, &mut cache, "mono", &config).unwrap();
        assert_eq!(oracle.calls.get(), 0);
        assert_eq!(glyphs, first_glyphs);
        assert_eq!(kerning, first_kerning);
    }

    #[test]
    fn a_malformed_cached_entry_is_rebuilt_and_overwritten() {
        let oracle = CountingOracle::new();
        let mut cache = MemoryCache::new();
        let config = config();

        // Warm both entries, then corrupt the kerning bytes in place.
        load_or_build(&oracle, &mut cache, "mono", &config).unwrap();
        cache.put(&kerning_cache_key("mono"), &[1, 2, 3]);
        oracle.calls.set(0);

        let (_, kerning) = load_or_build(&oracle, &mut cache, "mono", &config).unwrap();
        assert_eq!(kerning.len(), 6);
        // Only the kerning pass went back to the oracle.
        assert_eq!(oracle.calls.get(), 36);

        // The overwrite made the entry decodable for the next run.
        let cached = cache.get(&kerning_cache_key("mono")).unwrap();
        assert_eq!(codec::decode_kerning_table(&cached).unwrap(), kerning);
    }

    #[test]
    fn a_cached_table_for_a_different_range_is_rebuilt() {
        let oracle = CountingOracle::new();
        let mut cache = MemoryCache::new();

        let narrow = MetricsConfig {
            range: crate::CharRange::new(65, 66),
            ..MetricsConfig::default()
        };
        load_or_build(&oracle, &mut cache, "mono", &narrow).unwrap();
        oracle.calls.set(0);

        let config = config();
        let (glyphs, kerning) = load_or_build(&oracle, &mut cache, "mono", &config).unwrap();
        assert_eq!(glyphs.range(), config.range);
        // The rebuilt glyph table also invalidates the narrower cached kerning entry.
        assert_eq!(oracle.calls.get(), 6 + 36);
        assert_eq!(kerning.len(), 6);
    }

    #[test]
    fn cache_keys_separate_fonts_and_tables() {
        assert_eq!(glyph_cache_key("mono 14px"), "mono 14px/glyphs");
        assert_eq!(kerning_cache_key("mono 14px"), "mono 14px/kerning");
        assert_ne!(glyph_cache_key("a"), glyph_cache_key("b"));
    }
}
