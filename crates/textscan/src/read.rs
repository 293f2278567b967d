//! Generic reader primitives over [`SourceRange`].
//!
//! Shared contract: never over-advance on success; on failure the range may
//! have advanced by an indeterminate amount and must be treated as unusable
//! for further zero-copy access. Each algorithm branches once on
//! [`SourceRange::contiguous`] between the span fast path and the
//! unit-at-a-time path, so the per-unit error handling only exists where the
//! source can actually produce it.

use alloc::vec::Vec;

use crate::{
    error::{ScanError, ScanResult},
    range::SourceRange,
};


/// Reads a single code unit from the range.
///
/// Returns `EndOfRange` if the range is exhausted. If the read succeeded and
/// `advance` is `true`, the range is advanced by one unit; a failed indirect
/// dereference never advances.
pub fn read_char<'src, R: SourceRange<'src>>(r: &mut R, advance: bool) -> ScanResult<u8> {
    let unit = r.peek()?;
    if advance {
        r.advance(1);
    }
    Ok(unit)
}

/// Reads up to `n` units as a borrowed span.
///
/// For a contiguous range the span holds `min(remaining, n)` units and the
/// range advances by that count; it is never shorter than requested unless
/// the range was. For a non-contiguous range the span is empty (the caller
/// falls back to the per-unit path). Either way an already exhausted range
/// reports `EndOfRange`.
pub fn read_zero_copy<'src, R: SourceRange<'src>>(
    r: &mut R,
    n: usize,
) -> ScanResult<&'src [u8]> {
    if r.at_end() {
        return Err(ScanError::eof());
    }
    let Some(bytes) = r.contiguous() else {
        return Ok(&[]);
    };
    let count = n.min(bytes.len());
    r.advance(count);
    Ok(&bytes[..count])
}

/// Reads every remaining unit as a borrowed span; see [`read_zero_copy`].
pub fn read_all_zero_copy<'src, R: SourceRange<'src>>(r: &mut R) -> ScanResult<&'src [u8]> {
    read_zero_copy(r, usize::MAX)
}

/// Reads `n` units into `out`.
///
/// Contiguous ranges copy from a zero-copy span; if fewer than `n` units
/// existed, what exists is still copied before `EndOfRange` is reported.
/// Other ranges read one unit at a time, stopping with `EndOfRange` the
/// moment the range exhausts, and aborting immediately on an indirect
/// dereference failure.
pub fn read_into<'src, R: SourceRange<'src>>(
    r: &mut R,
    out: &mut Vec<u8>,
    n: usize,
) -> ScanResult<()> {
    if let Some(bytes) = r.contiguous() {
        if r.at_end() {
            return Err(ScanError::eof());
        }
        let count = n.min(bytes.len());
        let incomplete = count != n;
        let span = read_zero_copy(r, count)?;
        out.extend_from_slice(span);
        if incomplete {
            return Err(ScanError::eof());
        }
        return Ok(());
    }

    if r.at_end() {
        return Err(ScanError::eof());
    }
    for _ in 0..n {
        let unit = read_char(r, true)?;
        out.push(unit);
    }
    Ok(())
}

/// Reads units until `is_space` matches, returning a borrowed span.
///
/// On a match, the range is left positioned at the matching unit, or just
/// past it (with the unit included in the span) when `keep_final_space` is
/// set. Exhausting the range with no match returns everything consumed and
/// is not an error; only starting with an exhausted range is. Non-contiguous
/// ranges get an empty span.
pub fn read_until_space_zero_copy<'src, R, P>(
    r: &mut R,
    is_space: P,
    keep_final_space: bool,
) -> ScanResult<&'src [u8]>
where
    R: SourceRange<'src>,
    P: Fn(u8) -> bool,
{
    if r.at_end() {
        return Err(ScanError::eof());
    }
    let Some(bytes) = r.contiguous() else {
        return Ok(&[]);
    };
    for (i, &unit) in bytes.iter().enumerate() {
        if is_space(unit) {
            let end = if keep_final_space { i + 1 } else { i };
            r.advance(end);
            return Ok(&bytes[..end]);
        }
    }
    r.advance(bytes.len());
    Ok(bytes)
}

/// Reads units until `is_space` matches, copying them into `out`.
///
/// Same positioning and exhaustion semantics as
/// [`read_until_space_zero_copy`]; indirect dereference failures abort with
/// the source's own error.
pub fn read_until_space<'src, R, P>(
    r: &mut R,
    out: &mut Vec<u8>,
    is_space: P,
    keep_final_space: bool,
) -> ScanResult<()>
where
    R: SourceRange<'src>,
    P: Fn(u8) -> bool,
{
    if r.contiguous().is_some() {
        let span = read_until_space_zero_copy(r, is_space, keep_final_space)?;
        out.extend_from_slice(span);
        return Ok(());
    }

    if r.at_end() {
        return Err(ScanError::eof());
    }
    loop {
        match r.peek() {
            Err(ScanError::EndOfRange(_)) => return Ok(()),
            Err(err) => return Err(err),
            Ok(unit) => {
                if is_space(unit) {
                    if keep_final_space {
                        out.push(unit);
                        r.advance(1);
                    }
                    return Ok(());
                }
                out.push(unit);
                r.advance(1);
            }
        }
    }
}

/// Like [`read_until_space`], additionally bounded by `max` units of sink
/// capacity. Stops when the sink is full, leaving the range positioned at
/// the first unconsumed unit.
pub fn read_until_space_ranged<'src, R, P>(
    r: &mut R,
    out: &mut Vec<u8>,
    max: usize,
    is_space: P,
    keep_final_space: bool,
) -> ScanResult<()>
where
    R: SourceRange<'src>,
    P: Fn(u8) -> bool,
{
    if r.at_end() {
        return Err(ScanError::eof());
    }
    while out.len() < max {
        match r.peek() {
            Err(ScanError::EndOfRange(_)) => return Ok(()),
            Err(err) => return Err(err),
            Ok(unit) => {
                if is_space(unit) {
                    if keep_final_space {
                        out.push(unit);
                        r.advance(1);
                    }
                    return Ok(());
                }
                out.push(unit);
                r.advance(1);
            }
        }
    }
    Ok(())
}

/// Moves the range back by `n` units.
///
/// A pure index adjustment for contiguous ranges (retreating past the start
/// of the underlying storage is a contract violation, not a recoverable
/// error); simulated one step at a time otherwise, reporting
/// `UnrecoverableSourceError` when the sequence cannot represent that
/// position.
pub fn putback_n<'src, R: SourceRange<'src>>(r: &mut R, n: usize) -> ScanResult<()> {
    r.putback(n)
}

/// Decodes one UTF-8 scalar from the range (one to four units).
///
/// Contiguous ranges decode in place and consume nothing on failure. Other
/// ranges assemble the sequence unit by unit; an invalid or incomplete
/// sequence reports `InvalidScannedValue` (with the already read units
/// consumed), and an indirect dereference failure propagates verbatim.
pub fn read_code_point<'src, R: SourceRange<'src>>(r: &mut R) -> ScanResult<char> {
    if let Some(bytes) = r.contiguous() {
        if bytes.is_empty() {
            return Err(ScanError::eof());
        }
        let (ch, len) = bstr::decode_utf8(bytes);
        return match ch {
            Some(ch) => {
                r.advance(len);
                Ok(ch)
            }
            None => Err(ScanError::InvalidScannedValue("invalid UTF-8 in input")),
        };
    }

    let lead = read_char(r, true)?;
    let len = match lead {
        0x00..=0x7f => return Ok(char::from(lead)),
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return Err(ScanError::InvalidScannedValue("invalid UTF-8 in input")),
    };
    let mut buf = [lead, 0, 0, 0];
    for slot in buf.iter_mut().take(len).skip(1) {
        *slot = match read_char(r, true) {
            Ok(unit) => unit,
            Err(ScanError::EndOfRange(_)) => {
                return Err(ScanError::InvalidScannedValue("incomplete UTF-8 sequence"));
            }
            Err(err) => return Err(err),
        };
    }
    match bstr::decode_utf8(&buf[..len]) {
        (Some(ch), n) if n == len => Ok(ch),
        _ => Err(ScanError::InvalidScannedValue("invalid UTF-8 in input")),
    }
}
