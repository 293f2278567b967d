//! Locale-aware whitespace skipping.

use crate::{
    error::ScanResult,
    locale::Locale,
    range::SourceRange,
    read::read_char,
};

/// The space classification used in front of a field.
///
/// The fixed table (space and `\t`..`\r`) is the fast path; the locale is
/// consulted only when the field's specifier carried the `L` flag.
/// Predicates run on code units: under a locale, ASCII units are classified
/// through it and non-ASCII lead/continuation units terminate the skip, so a
/// multi-unit code point is never half consumed.
#[derive(Clone, Copy)]
pub struct SpacePredicate<'a> {
    locale: &'a dyn Locale,
    localized: bool,
}

impl<'a> SpacePredicate<'a> {
    /// Builds the predicate for one field.
    pub fn new(locale: &'a dyn Locale, localized: bool) -> Self {
        Self { locale, localized }
    }

    /// Whether `unit` is a space under this field's classification.
    #[inline]
    #[must_use]
    pub fn is_space(&self, unit: u8) -> bool {
        if self.localized {
            unit.is_ascii() && self.locale.is_space(char::from(unit))
        } else {
            unit == b' ' || (b'\t'..=b'\r').contains(&unit)
        }
    }
}

impl core::fmt::Debug for SpacePredicate<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpacePredicate")
            .field("localized", &self.localized)
            .finish_non_exhaustive()
    }
}

/// Consumes leading space units so the range is positioned just before the
/// first non-space unit.
///
/// Contiguous ranges are scanned and repositioned in one step, with no
/// per-unit range mutation. Other ranges read one unit at a time and put the
/// first non-space unit back; exhausting such a range before a non-space
/// unit is found reports `EndOfRange`, while a contiguous range ending in
/// spaces succeeds positioned at its end.
pub fn skip_whitespace<'src, R: SourceRange<'src>>(
    r: &mut R,
    locale: &dyn Locale,
    localized: bool,
) -> ScanResult<()> {
    let pred = SpacePredicate::new(locale, localized);
    if let Some(bytes) = r.contiguous() {
        let n = bytes.iter().take_while(|&&unit| pred.is_space(unit)).count();
        r.advance(n);
        return Ok(());
    }
    loop {
        let unit = read_char(r, true)?;
        if !pred.is_space(unit) {
            r.putback(1)?;
            return Ok(());
        }
    }
}
