use thiserror::Error;

/// Result alias used by every operation in the engine.
pub type ScanResult<T> = Result<T, ScanError>;

/// The error kinds surfaced by the scanning engine.
///
/// Each variant maps to one recovery policy (see the crate-level docs):
/// `EndOfRange` is frequently non-fatal, `ValueOutOfRange` is paired with a
/// saturated stored value, and the rest are fatal to the current field or
/// scan. The payload is a short static message for display; the variant
/// itself is the stable kind callers should match on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// The source was exhausted before the operation could complete.
    #[error("end of range: {0}")]
    EndOfRange(&'static str),
    /// The format specifier is malformed. Programmer error, never retried.
    #[error("invalid format string: {0}")]
    InvalidFormatString(&'static str),
    /// The input characters do not form a valid token of the requested kind.
    #[error("invalid scanned value: {0}")]
    InvalidScannedValue(&'static str),
    /// The scanned numeral does not fit the requested type. The output has
    /// been stored saturated to the nearest representable bound.
    #[error("value out of range: {0}")]
    ValueOutOfRange(&'static str),
    /// The transport failed, not the content: a putback or indirect
    /// dereference that cannot be locally repaired.
    #[error("unrecoverable source error: {0}")]
    UnrecoverableSourceError(&'static str),
}

impl ScanError {
    #[inline]
    pub(crate) const fn eof() -> Self {
        ScanError::EndOfRange("EOF")
    }

    /// Returns `true` if the transport failed rather than the scanned
    /// content; such errors must never be retried.
    #[must_use]
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, ScanError::UnrecoverableSourceError(_))
    }
}
