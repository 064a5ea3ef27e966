pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a [`WidthOracle`](crate::oracle::WidthOracle) implementation.
///
/// The estimator layer never retries oracle calls; whatever the oracle reports is wrapped in
/// [`Error::Oracle`] together with the font and text that were being measured.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct OracleError {
    message: String,
}

impl OracleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for OracleError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for OracleError {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no font metrics installed for font \"{font}\"")]
    UnknownFont { font: String },

    /// The text contains a character the glyph table was never measured for. A missing glyph
    /// width must surface here rather than default to zero: a zero would corrupt every
    /// downstream sum without detection.
    #[error("character {character:?} is outside the measured range for font \"{font}\"")]
    CharacterNotSupported { character: char, font: String },

    #[error("oracle measurement of {text:?} failed for font \"{font}\"")]
    Oracle {
        font: String,
        text: String,
        #[source]
        source: OracleError,
    },

    /// A binary-encoded table failed structural validation. Cache loading treats this as a
    /// miss and rebuilds; it is never fatal on its own.
    #[error("malformed metrics table: {reason}")]
    MalformedTable { reason: String },

    /// Kerning pair keys are encoded as one byte per character; pairs outside U+0000..=U+00FF
    /// cannot be written to the binary form.
    #[error("kerning pair ({a:?}, {b:?}) has no one-byte key encoding")]
    UnencodablePair { a: char, b: char },
}
