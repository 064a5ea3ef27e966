//! Compact binary forms for cached tables.
//!
//! Kerning tables are a flat, order-independent sequence of fixed-size records: a 2-byte pair
//! key (one byte per code point) followed by the correction as a little-endian `f64`, for a
//! 10-byte stride. Glyph tables carry a 2-byte range header (`first`, `last`) followed by one
//! little-endian `f64` per character in range order.
//!
//! Decoding validates structure (stride, truncation, header ordering) and value sanity
//! (finite widths and corrections); any violation is [`Error::MalformedTable`], which cache
//! loading downgrades to a miss.

use rustc_hash::FxHashMap;

use crate::config::CharRange;
use crate::error::{Error, Result};
use crate::glyph::GlyphWidthTable;
use crate::kerning::KerningCorrectionTable;

/// 2-byte pair key + little-endian `f64` correction.
pub const KERNING_RECORD_LEN: usize = 10;

/// `first` and `last` code points of the encoded range.
pub const GLYPH_HEADER_LEN: usize = 2;

fn byte_key(c: char) -> Option<u8> {
    u8::try_from(u32::from(c)).ok()
}

pub fn encode_kerning_table(table: &KerningCorrectionTable) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(table.len() * KERNING_RECORD_LEN);
    for ((a, b), correction) in table.iter() {
        let (Some(key_a), Some(key_b)) = (byte_key(a), byte_key(b)) else {
            return Err(Error::UnencodablePair { a, b });
        };
        out.push(key_a);
        out.push(key_b);
        out.extend_from_slice(&correction.to_le_bytes());
    }
    Ok(out)
}

pub fn decode_kerning_table(bytes: &[u8]) -> Result<KerningCorrectionTable> {
    if !bytes.len().is_multiple_of(KERNING_RECORD_LEN) {
        return Err(Error::MalformedTable {
            reason: format!(
                "kerning buffer of {} bytes is not a whole number of {KERNING_RECORD_LEN}-byte records",
                bytes.len()
            ),
        });
    }
    let mut pairs = FxHashMap::default();
    for record in bytes.chunks_exact(KERNING_RECORD_LEN) {
        let a = char::from(record[0]);
        let b = char::from(record[1]);
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&record[2..KERNING_RECORD_LEN]);
        let correction = f64::from_le_bytes(raw);
        if !correction.is_finite() {
            return Err(Error::MalformedTable {
                reason: format!("kerning pair ({a:?}, {b:?}) decodes to a non-finite correction"),
            });
        }
        pairs.insert((a, b), correction);
    }
    Ok(KerningCorrectionTable::from_pairs(pairs))
}

pub fn encode_glyph_table(table: &GlyphWidthTable) -> Vec<u8> {
    let range = table.range();
    let mut out = Vec::with_capacity(GLYPH_HEADER_LEN + table.widths().len() * 8);
    out.push(range.first());
    out.push(range.last());
    for width in table.widths() {
        out.extend_from_slice(&width.to_le_bytes());
    }
    out
}

pub fn decode_glyph_table(bytes: &[u8]) -> Result<GlyphWidthTable> {
    if bytes.len() < GLYPH_HEADER_LEN {
        return Err(Error::MalformedTable {
            reason: format!("glyph buffer of {} bytes is shorter than its header", bytes.len()),
        });
    }
    let (first, last) = (bytes[0], bytes[1]);
    if first > last {
        return Err(Error::MalformedTable {
            reason: format!("glyph range header {first}..={last} is inverted"),
        });
    }
    let range = CharRange::new(first, last);
    let body = &bytes[GLYPH_HEADER_LEN..];
    if body.len() != range.len() * 8 {
        return Err(Error::MalformedTable {
            reason: format!(
                "glyph range {first}..={last} needs {} width bytes, buffer holds {}",
                range.len() * 8,
                body.len()
            ),
        });
    }
    let mut widths = Vec::with_capacity(range.len());
    for (i, raw) in body.chunks_exact(8).enumerate() {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(raw);
        let width = f64::from_le_bytes(buf);
        if !width.is_finite() || width < 0.0 {
            return Err(Error::MalformedTable {
                reason: format!("glyph slot {i} decodes to an invalid width {width}"),
            });
        }
        widths.push(width);
    }
    GlyphWidthTable::from_widths(range, widths)
}
