//! A type-safe, locale-aware scanf-style input scanner.
//!
//! The engine extracts typed values from a character source according to a
//! per-field format specifier, with the semantics of classic `scanf` but
//! without undefined behavior on malformed input: every failure is reported
//! through [`ScanResult`] and every partial read leaves the source in a
//! caller-observable position.
//!
//! The crate is built from two subsystems:
//!
//! - a capability-polymorphic **source range** layer ([`SourceRange`] and the
//!   reader primitives in [`read_char`], [`read_zero_copy`] and friends) that
//!   lets every typed reader run unchanged over contiguous buffers, plain
//!   forward iterators, and fallible ("indirect") sources;
//! - an overflow-safe, base-generic **integer value parser** ([`parse_int`])
//!   with an eight-digit-at-a-time fast path for decimal input.

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod format;
mod integer;
mod locale;
mod range;
mod read;
mod reader;
mod whitespace;

pub use error::{ScanError, ScanResult};
pub use format::{Alignment, CommonOptions, ParseContext, parse_common, parse_default};
pub use integer::{ScanInt, Sign, parse_int, parse_int_trusted};
pub use locale::{DefaultLocale, Locale, UnicodeLocale};
pub use range::{Capability, IterRange, SliceRange, SourceRange, TryIterRange};
pub use read::{
    putback_n, read_all_zero_copy, read_char, read_code_point, read_into, read_until_space,
    read_until_space_ranged, read_until_space_zero_copy, read_zero_copy,
};
pub use reader::IntReader;
pub use whitespace::{SpacePredicate, skip_whitespace};
