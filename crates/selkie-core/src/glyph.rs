//! Per-character advance widths for one font.

use serde::{Deserialize, Serialize};

use crate::config::CharRange;
use crate::error::{Error, Result};

/// Measured advance width of every character in a contiguous one-byte range.
///
/// Built once per font (one oracle call per character) and immutable afterwards. Storage is a
/// dense slot per character, so lookups are an index computation, not a hash.
///
/// A lookup miss is a signal, never a zero: [`GlyphWidthTable::lookup`] returns `None` for
/// unmeasured characters and the estimator turns that into
/// [`Error::CharacterNotSupported`](crate::Error::CharacterNotSupported).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphWidthTable {
    range: CharRange,
    widths: Vec<f64>,
}

impl GlyphWidthTable {
    /// Wraps pre-measured widths, one per character of `range` in code-point order.
    pub fn from_widths(range: CharRange, widths: Vec<f64>) -> Result<Self> {
        if widths.len() != range.len() {
            return Err(Error::MalformedTable {
                reason: format!(
                    "glyph table holds {} widths but its range {}..={} needs {}",
                    widths.len(),
                    range.first(),
                    range.last(),
                    range.len()
                ),
            });
        }
        Ok(Self { range, widths })
    }

    pub fn range(&self) -> CharRange {
        self.range
    }

    /// Stored width of `c`, or `None` when `c` was never measured. Callers must not coerce a
    /// miss to zero.
    pub fn lookup(&self, c: char) -> Option<f64> {
        self.range.index_of(c).map(|i| self.widths[i])
    }

    /// Widths in range order (the codec's on-wire order).
    pub fn widths(&self) -> &[f64] {
        &self.widths
    }
}
