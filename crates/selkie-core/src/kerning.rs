//! Pairwise kerning corrections for one font.

use rustc_hash::FxHashMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Correction values for ordered character pairs.
///
/// A stored correction is `(glyph(a) + glyph(b)) − measured(ab)`: positive when the pair
/// renders tighter than the sum of its advances. Subtracting corrections from the naive sum
/// recovers the measured width.
///
/// Absence means "no kerning adjustment": the table is additive, so a missing pair reads back
/// as `0.0` and is *not* an error. Contrast with
/// [`GlyphWidthTable::lookup`](crate::GlyphWidthTable::lookup), where a miss is a hard signal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KerningCorrectionTable {
    pairs: FxHashMap<(char, char), f64>,
}

impl KerningCorrectionTable {
    pub fn from_pairs(pairs: impl IntoIterator<Item = ((char, char), f64)>) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }

    /// Correction for the ordered pair `(a, b)`, `0.0` when none is stored.
    pub fn correction(&self, a: char, b: char) -> f64 {
        self.pairs.get(&(a, b)).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, a: char, b: char) -> bool {
        self.pairs.contains_key(&(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((char, char), f64)> + '_ {
        self.pairs.iter().map(|(&pair, &correction)| (pair, correction))
    }
}

// The JSON form uses the two characters themselves as the map key ("AV": 0.734…), which is
// both compact and diffable when tables are dumped for diagnostics.
impl Serialize for KerningCorrectionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        let mut key = String::with_capacity(8);
        for (&(a, b), &correction) in &self.pairs {
            key.clear();
            key.push(a);
            key.push(b);
            map.serialize_entry(&key, &correction)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for KerningCorrectionTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairMapVisitor;

        impl<'de> Visitor<'de> for PairMapVisitor {
            type Value = KerningCorrectionTable;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map from two-character pair keys to corrections")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs = FxHashMap::default();
                while let Some((key, correction)) = access.next_entry::<String, f64>()? {
                    let mut chars = key.chars();
                    let (Some(a), Some(b), None) = (chars.next(), chars.next(), chars.next())
                    else {
                        return Err(de::Error::custom(format!(
                            "kerning pair key {key:?} is not exactly two characters"
                        )));
                    };
                    pairs.insert((a, b), correction);
                }
                Ok(KerningCorrectionTable { pairs })
            }
        }

        deserializer.deserialize_map(PairMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_pairs_read_back_as_zero() {
        let table = KerningCorrectionTable::from_pairs([(('A', 'V'), 0.75)]);
        assert_eq!(table.correction('A', 'V'), 0.75);
        assert_eq!(table.correction('V', 'A'), 0.0);
        assert_eq!(table.correction('x', 'y'), 0.0);
        assert!(!table.contains('V', 'A'));
    }

    #[test]
    fn pair_order_is_significant() {
        let table = KerningCorrectionTable::from_pairs([(('A', 'V'), 0.75), (('V', 'A'), 0.5)]);
        assert_eq!(table.correction('A', 'V'), 0.75);
        assert_eq!(table.correction('V', 'A'), 0.5);
    }

    #[test]
    fn json_round_trip_preserves_pairs_and_values() {
        let table = KerningCorrectionTable::from_pairs([
            (('A', 'V'), 0.734375),
            (('T', 'o'), 1.25),
            (('L', '\''), 0.5),
        ]);
        let json = serde_json::to_string(&table).unwrap();
        let back: KerningCorrectionTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn json_rejects_keys_that_are_not_two_characters() {
        assert!(serde_json::from_str::<KerningCorrectionTable>(r#"{"A": 1.0}"#).is_err());
        assert!(serde_json::from_str::<KerningCorrectionTable>(r#"{"ABC": 1.0}"#).is_err());
    }
}
