//! Ground-truth measurement interface.

use crate::error::OracleError;

/// External, authoritative text-measurement facility.
///
/// Implementations wrap whatever expensive surface actually renders text (a canvas context, a
/// shaping engine, a headless browser). Table construction is the only caller; query-time
/// estimation never touches the oracle.
///
/// Contract: deterministic for a fixed `(font, text)` pair, and responsible for its own
/// Unicode normalization. Errors are propagated verbatim by this crate; retry policy, if any,
/// belongs to the oracle's own client.
pub trait WidthOracle {
    /// Measured advance width of `text` rendered in `font`, in px.
    fn measure(&self, font: &str, text: &str) -> Result<f64, OracleError>;
}
