//! The typed integer reader.
//!
//! One field's scan runs: specifier parse ([`IntReader::parse`]) →
//! whitespace skip → token acquisition (zero-copy span on contiguous input,
//! materialized otherwise, bounded by the field width) → sign and base
//! prefix resolution → [`parse_int`] → putback of whatever the numeral did
//! not consume, so trailing content stays available to the next field.

use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::{
    error::{ScanError, ScanResult},
    format::{CommonOptions, ParseContext, parse_common},
    integer::{ScanInt, Sign, parse_int, unit_digit_value},
    locale::Locale,
    range::SourceRange,
    read::{putback_n, read_until_space, read_until_space_ranged, read_until_space_zero_copy},
    whitespace::{SpacePredicate, skip_whitespace},
};

/// Base selection sentinel: detect the base from the scanned prefix.
const DETECT_BASE: u32 = 0;

/// Reader for one integer field.
///
/// Recognized specifier flags, after the common width/precision/`L` ones:
/// `b` (binary), `o` (octal), `x` (hexadecimal), `d` (decimal), `i` (detect
/// the base from a `0x`/`0b`/`0o`/leading-zero prefix), `u` (reject a sign),
/// and the sub-grammar `B<digits>` selecting any base 2..=36. At most one
/// base selection per field.
#[derive(Debug, Clone)]
pub struct IntReader<T> {
    options: CommonOptions,
    base: u32,
    no_sign: bool,
    _target: PhantomData<T>,
}

impl<T: ScanInt> Default for IntReader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ScanInt> IntReader<T> {
    /// A reader with the default specifier: base 10, sign allowed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: CommonOptions::default(),
            base: 10,
            no_sign: false,
            _target: PhantomData,
        }
    }

    /// The common options produced by [`parse`](Self::parse).
    #[must_use]
    pub fn options(&self) -> &CommonOptions {
        &self.options
    }

    /// The working base, or 0 while base detection is active.
    #[must_use]
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Consumes this field's specifier.
    pub fn parse<'fmt>(&mut self, ctx: &mut ParseContext<'fmt>) -> ScanResult<()> {
        const TYPE_OPTIONS: &[u8] = b"bdioux";
        let mut seen = [false; 6];
        let mut custom_base: Option<u32> = None;

        parse_common(
            ctx,
            &mut self.options,
            TYPE_OPTIONS,
            &mut seen,
            |ctx: &mut ParseContext<'fmt>, _opts: &mut CommonOptions| {
                if ctx.peek() != Some(b'B') {
                    return Ok(false);
                }
                if custom_base.is_some() {
                    return Err(ScanError::InvalidFormatString(
                        "repeated flag in format string",
                    ));
                }
                ctx.advance();
                let mut base = match ctx.peek() {
                    Some(unit) if unit.is_ascii_digit() => u32::from(unit - b'0'),
                    _ => {
                        return Err(ScanError::InvalidFormatString(
                            "expected base digits after 'B'",
                        ));
                    }
                };
                ctx.advance();
                if let Some(unit) = ctx.peek().filter(u8::is_ascii_digit) {
                    base = base * 10 + u32::from(unit - b'0');
                    ctx.advance();
                }
                if !(2..=36).contains(&base) {
                    return Err(ScanError::InvalidFormatString(
                        "base must be between 2 and 36",
                    ));
                }
                custom_base = Some(base);
                Ok(true)
            },
        )?;

        let [binary, decimal, detect, octal, no_sign, hex] = seen;
        if no_sign {
            self.no_sign = true;
        }

        let mut selected = custom_base.map(|base| (base, 1usize)).unwrap_or((10, 0));
        for (flag_set, base) in [
            (binary, 2),
            (decimal, 10),
            (detect, DETECT_BASE),
            (octal, 8),
            (hex, 16),
        ] {
            if flag_set {
                selected = (base, selected.1 + 1);
            }
        }
        if selected.1 > 1 {
            return Err(ScanError::InvalidFormatString(
                "multiple base flags in format string",
            ));
        }
        self.base = selected.0;
        Ok(())
    }

    /// Scans one integer field from `r` into `value`.
    ///
    /// On `ValueOutOfRange` the saturated value is stored before the error
    /// is returned; on other errors the range position is caller-observable
    /// but the field failed.
    pub fn read<'src, R: SourceRange<'src>>(
        &self,
        r: &mut R,
        locale: &dyn Locale,
        value: &mut T,
    ) -> ScanResult<()> {
        skip_whitespace(r, locale, self.options.localized)?;
        let pred = SpacePredicate::new(locale, self.options.localized);

        if r.contiguous().is_some() {
            let mut span = read_until_space_zero_copy(r, |unit| pred.is_space(unit), false)?;
            if let Some(width) = self.options.field_width {
                if span.len() > width {
                    putback_n(r, span.len() - width)?;
                    span = &span[..width];
                }
            }
            let consumed = self.parse_span(span, value)?;
            putback_n(r, span.len() - consumed)?;
            return Ok(());
        }

        let mut buf = Vec::new();
        match self.options.field_width {
            Some(width) => {
                read_until_space_ranged(r, &mut buf, width, |unit| pred.is_space(unit), false)?;
            }
            None => read_until_space(r, &mut buf, |unit| pred.is_space(unit), false)?,
        }
        let consumed = self.parse_span(&buf, value)?;
        putback_n(r, buf.len() - consumed)?;
        Ok(())
    }

    /// Parses a whole acquired token; returns the units consumed.
    fn parse_span(&self, span: &[u8], value: &mut T) -> ScanResult<usize> {
        let mut pos = 0usize;
        let mut sign = Sign::Default;
        match span.first() {
            None => return Err(ScanError::eof()),
            Some(b'-') => {
                if !T::SIGNED || self.no_sign {
                    return Err(ScanError::InvalidScannedValue("sign not allowed"));
                }
                sign = Sign::Minus;
                pos = 1;
            }
            Some(b'+') => {
                if self.no_sign {
                    return Err(ScanError::InvalidScannedValue("sign not allowed"));
                }
                sign = Sign::Plus;
                pos = 1;
            }
            Some(_) => {}
        }
        if pos >= span.len() {
            return Err(ScanError::InvalidScannedValue("expected a number"));
        }

        let (base, skip) = self.resolve_base(&span[pos..]);
        pos += skip;
        debug_assert!(pos < span.len());

        let sign = if matches!(sign, Sign::Default) { Sign::Plus } else { sign };
        let consumed = parse_int(&span[pos..], value, sign, base)?;
        Ok(pos + consumed)
    }

    /// Picks the working base and how many prefix units to skip.
    ///
    /// A `0x`/`0b`/`0o` prefix is honored when it matches the selected base,
    /// or any of them under base detection; it only counts as a prefix when
    /// a digit of the base follows, so a bare `"0x"` scans as `0` with the
    /// `x` left over. Under detection a remaining leading zero selects
    /// octal.
    fn resolve_base(&self, rest: &[u8]) -> (u32, usize) {
        let prefixed = |marker: u8, base: u32| -> bool {
            rest.len() > 2
                && rest[0] == b'0'
                && rest[1].eq_ignore_ascii_case(&marker)
                && unit_digit_value(rest[2]) < base
        };

        match self.base {
            DETECT_BASE => {
                if prefixed(b'x', 16) {
                    (16, 2)
                } else if prefixed(b'b', 2) {
                    (2, 2)
                } else if prefixed(b'o', 8) {
                    (8, 2)
                } else if rest[0] == b'0' && rest.len() > 1 {
                    (8, 0)
                } else {
                    (10, 0)
                }
            }
            16 if prefixed(b'x', 16) => (16, 2),
            2 if prefixed(b'b', 2) => (2, 2),
            8 if prefixed(b'o', 8) => (8, 2),
            base => (base, 0),
        }
    }
}
