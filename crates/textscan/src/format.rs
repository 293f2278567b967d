//! The format-specifier state machine shared by every typed reader.
//!
//! One field's specifier is the `{...}` portion of a format string. Parsing
//! runs Begin (consume `{`) → common flags (width, `.precision`, `L`) →
//! type-specific flags (a recognized-flag table plus a callback for each
//! type's own sub-grammar) → End (consume `}`). The common state lands in
//! [`CommonOptions`]; type flags land in the caller's seen-array.

use crate::{
    error::{ScanError, ScanResult},
    integer::{Sign, parse_int},
};

/// Cursor over one field's specifier text.
///
/// Owned exclusively by the field being parsed and discarded once its
/// specifier is fully consumed. The cursor works on code units; specifier
/// grammars are ASCII.
#[derive(Debug, Clone)]
pub struct ParseContext<'fmt> {
    fmt: &'fmt [u8],
    pos: usize,
}

impl<'fmt> ParseContext<'fmt> {
    /// Creates a cursor over `fmt`, which must start at the field's opening
    /// `{`.
    #[must_use]
    pub fn new(fmt: &'fmt str) -> Self {
        Self {
            fmt: fmt.as_bytes(),
            pos: 0,
        }
    }

    /// Whether any specifier text remains.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.pos < self.fmt.len()
    }

    /// The next unit, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.fmt.get(self.pos).copied()
    }

    /// Consumes one unit.
    pub fn advance(&mut self) {
        debug_assert!(self.has_next());
        self.pos = (self.pos + 1).min(self.fmt.len());
    }

    /// Whether the cursor sits at the field's closing delimiter.
    #[must_use]
    pub fn check_arg_end(&self) -> bool {
        self.peek() == Some(b'}')
    }

    /// Everything after the cursor, e.g. the remainder of a format string
    /// once this field's specifier has been consumed.
    #[must_use]
    pub fn rest(&self) -> &'fmt [u8] {
        &self.fmt[self.pos..]
    }

    fn consume_arg_begin(&mut self) -> bool {
        if self.peek() == Some(b'{') {
            self.advance();
            return true;
        }
        false
    }

    fn consume_arg_end(&mut self) -> bool {
        if self.check_arg_end() {
            self.advance();
            return true;
        }
        false
    }

    fn digit_run(&self) -> &'fmt [u8] {
        let rest = &self.fmt[self.pos..];
        let len = rest.iter().take_while(|unit| unit.is_ascii_digit()).count();
        &rest[..len]
    }

    fn advance_by(&mut self, n: usize) {
        debug_assert!(n <= self.fmt.len() - self.pos);
        self.pos = (self.pos + n).min(self.fmt.len());
    }
}

/// How a field is aligned within its width. Consumed by readers that honor
/// fill/alignment; the common flag grammar itself does not produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

/// The specifier state shared by every field type.
///
/// Created fresh per field, mutated only while that field's specifier is
/// parsed, read-only afterwards. Unset is `None`/`false`; re-setting a flag
/// within one field is `InvalidFormatString`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommonOptions {
    /// Maximum field width in code units.
    pub field_width: Option<usize>,
    /// Field precision; meaningful to float/string readers.
    pub field_precision: Option<usize>,
    /// Fill character for aligned fields.
    pub fill_char: Option<char>,
    /// Alignment for width-padded fields.
    pub alignment: Option<Alignment>,
    /// Whether the `L` flag requested locale-aware parsing.
    pub localized: bool,
}

fn parse_common_begin(ctx: &mut ParseContext<'_>) -> ScanResult<()> {
    if !ctx.consume_arg_begin() {
        return Err(ScanError::InvalidFormatString(
            "expected beginning of format argument",
        ));
    }
    if !ctx.has_next() {
        return Err(ScanError::InvalidFormatString("unexpected format string end"));
    }
    Ok(())
}

fn parse_common_end(ctx: &mut ParseContext<'_>) -> ScanResult<()> {
    if !ctx.consume_arg_end() {
        return Err(ScanError::InvalidFormatString("expected end of format argument"));
    }
    Ok(())
}

fn parse_flag_number(ctx: &mut ParseContext<'_>) -> ScanResult<usize> {
    let digits = ctx.digit_run();
    debug_assert!(!digits.is_empty());
    let mut n = 0usize;
    let consumed = parse_int(digits, &mut n, Sign::Plus, 10)?;
    debug_assert_eq!(consumed, digits.len());
    ctx.advance_by(consumed);
    Ok(n)
}

fn parse_common_flags(ctx: &mut ParseContext<'_>, opts: &mut CommonOptions) -> ScanResult<()> {
    if ctx.peek().is_some_and(|unit| unit.is_ascii_digit()) {
        if opts.field_width.is_some() {
            return Err(ScanError::InvalidFormatString(
                "repeated width flag in format string",
            ));
        }
        opts.field_width = Some(parse_flag_number(ctx)?);
    }
    if ctx.peek() == Some(b'.') {
        ctx.advance();
        if !ctx.peek().is_some_and(|unit| unit.is_ascii_digit()) {
            return Err(ScanError::InvalidFormatString(
                "invalid precision flag in format string",
            ));
        }
        if opts.field_precision.is_some() {
            return Err(ScanError::InvalidFormatString(
                "repeated precision flag in format string",
            ));
        }
        opts.field_precision = Some(parse_flag_number(ctx)?);
    }
    if ctx.peek() == Some(b'L') {
        if opts.localized {
            return Err(ScanError::InvalidFormatString(
                "repeated 'L' flag in format string",
            ));
        }
        opts.localized = true;
        ctx.advance();
    }
    Ok(())
}

/// Parses one field's specifier: the common flags, then the caller's
/// type-specific grammar.
///
/// `type_options` and `type_flags` are a same-length recognized-flag table
/// and seen-array; the first table match wins and a repeat is an error. Any
/// other unit is offered to `type_cb`, which consumes its own sub-grammar
/// and reports whether it recognized the unit; a unit neither recognizes
/// fails the parse.
pub fn parse_common<'fmt, F>(
    ctx: &mut ParseContext<'fmt>,
    opts: &mut CommonOptions,
    type_options: &[u8],
    type_flags: &mut [bool],
    mut type_cb: F,
) -> ScanResult<()>
where
    F: FnMut(&mut ParseContext<'fmt>, &mut CommonOptions) -> ScanResult<bool>,
{
    debug_assert_eq!(type_options.len(), type_flags.len());

    parse_common_begin(ctx)?;
    if ctx.check_arg_end() {
        return parse_common_end(ctx);
    }
    parse_common_flags(ctx, opts)?;

    loop {
        let Some(unit) = ctx.peek() else { break };
        if unit == b'}' {
            break;
        }
        let mut parsed = false;
        for (flag, seen) in type_options.iter().zip(type_flags.iter_mut()) {
            if *flag == unit {
                if *seen {
                    return Err(ScanError::InvalidFormatString(
                        "repeated flag in format string",
                    ));
                }
                *seen = true;
                parsed = true;
                break;
            }
        }
        if parsed {
            ctx.advance();
            continue;
        }
        if type_cb(ctx, opts)? {
            continue;
        }
        return Err(ScanError::InvalidFormatString(
            "invalid character in format string",
        ));
    }

    parse_common_end(ctx)
}

/// The default specifier grammar: no type-specific flags at all.
pub fn parse_default<'fmt>(
    ctx: &mut ParseContext<'fmt>,
    opts: &mut CommonOptions,
) -> ScanResult<()> {
    parse_common(
        ctx,
        opts,
        &[],
        &mut [],
        |_ctx: &mut ParseContext<'fmt>, _opts: &mut CommonOptions| Ok(false),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_defaulted(fmt: &str) -> ScanResult<CommonOptions> {
        let mut ctx = ParseContext::new(fmt);
        let mut opts = CommonOptions::default();
        parse_default(&mut ctx, &mut opts)?;
        Ok(opts)
    }

    #[test]
    fn empty_specifier_is_valid() {
        let opts = parse_defaulted("{}").unwrap();
        assert_eq!(opts, CommonOptions::default());
    }

    #[test]
    fn width_precision_and_localized() {
        let opts = parse_defaulted("{8.3L}").unwrap();
        assert_eq!(opts.field_width, Some(8));
        assert_eq!(opts.field_precision, Some(3));
        assert!(opts.localized);
    }

    #[test]
    fn width_only() {
        let opts = parse_defaulted("{42}").unwrap();
        assert_eq!(opts.field_width, Some(42));
        assert_eq!(opts.field_precision, None);
        assert!(!opts.localized);
    }

    #[test]
    fn duplicate_width_across_parses_fails() {
        let mut opts = CommonOptions::default();
        let mut ctx = ParseContext::new("{5.5}");
        parse_default(&mut ctx, &mut opts).unwrap();
        let mut ctx = ParseContext::new("{5.5}");
        match parse_default(&mut ctx, &mut opts) {
            Err(ScanError::InvalidFormatString(_)) => {}
            other => panic!("expected invalid format string, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_precision_fails() {
        match parse_defaulted("{.}") {
            Err(ScanError::InvalidFormatString(_)) => {}
            other => panic!("expected invalid format string, got {other:?}"),
        }
    }

    #[test]
    fn repeated_localized_flag_fails() {
        match parse_defaulted("{LL}") {
            Err(ScanError::InvalidFormatString(_)) => {}
            other => panic!("expected invalid format string, got {other:?}"),
        }
    }

    #[test]
    fn missing_closing_delimiter_fails() {
        match parse_defaulted("{8") {
            Err(ScanError::InvalidFormatString(_)) => {}
            other => panic!("expected invalid format string, got {other:?}"),
        }
    }

    #[test]
    fn empty_specifier_text_fails() {
        match parse_defaulted("{") {
            Err(ScanError::InvalidFormatString(_)) => {}
            other => panic!("expected invalid format string, got {other:?}"),
        }
    }

    #[test]
    fn unknown_flag_without_callback_fails() {
        match parse_defaulted("{q}") {
            Err(ScanError::InvalidFormatString(_)) => {}
            other => panic!("expected invalid format string, got {other:?}"),
        }
    }

    #[test]
    fn recognized_flags_mark_seen_in_table_order() {
        let mut ctx = ParseContext::new("{xd}");
        let mut opts = CommonOptions::default();
        let mut seen = [false, false];
        parse_common(&mut ctx, &mut opts, b"dx", &mut seen, |_, _| Ok(false)).unwrap();
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn repeated_type_flag_fails() {
        let mut ctx = ParseContext::new("{dd}");
        let mut opts = CommonOptions::default();
        let mut seen = [false];
        match parse_common(&mut ctx, &mut opts, b"d", &mut seen, |_, _| Ok(false)) {
            Err(ScanError::InvalidFormatString(_)) => {}
            other => panic!("expected invalid format string, got {other:?}"),
        }
    }

    #[test]
    fn callback_consumes_its_own_sub_grammar() {
        let mut ctx = ParseContext::new("{k7}");
        let mut opts = CommonOptions::default();
        let mut picked = None;
        parse_common(&mut ctx, &mut opts, &[], &mut [], |ctx, _| {
            if ctx.peek() == Some(b'k') {
                ctx.advance();
                let Some(digit) = ctx.peek().filter(u8::is_ascii_digit) else {
                    return Err(ScanError::InvalidFormatString("expected digit after 'k'"));
                };
                ctx.advance();
                picked = Some(digit - b'0');
                return Ok(true);
            }
            Ok(false)
        })
        .unwrap();
        assert_eq!(picked, Some(7));
    }

    #[test]
    fn rest_exposes_remaining_text() {
        let mut ctx = ParseContext::new("{3} tail");
        let mut opts = CommonOptions::default();
        parse_default(&mut ctx, &mut opts).unwrap();
        assert_eq!(ctx.rest(), b" tail");
    }
}
