//! Source ranges: the capability model over scan input.
//!
//! Why this exists
//! - Every typed reader runs over the same small vocabulary (`at_end`,
//!   `peek`, `advance`, `putback`, `contiguous`), while the actual input may
//!   be a contiguous buffer, a plain forward iterator, or a source whose
//!   dereference can itself fail. One trait with a `contiguous()` probe lets
//!   each algorithm branch exactly once between the zero-copy path and the
//!   unit-at-a-time path, and monomorphization means an infallible source
//!   never pays for the error channel it cannot trigger.
//!
//! Invariants
//! - The current position never exceeds the end of the sequence.
//! - `advance(n)` is only called for units the caller has already observed
//!   (peeked, or counted inside a `contiguous()` view).
//! - A span handed out by `contiguous()` borrows the backing storage for
//!   `'src`, not the range borrow, so it stays valid while the range moves;
//!   the engine never retains one across a failed operation.

mod iter;
mod slice;


pub use iter::{IterRange, TryIterRange};
pub use slice::SliceRange;

use crate::error::ScanResult;

/// How a source range may be dereferenced and repositioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Backed by contiguous in-memory storage; supports zero-copy spans and
    /// constant-time putback.
    Contiguous,
    /// Forward-only, but dereferencing the current position cannot fail.
    Direct,
    /// Dereferencing may itself fail; the failure is threaded through
    /// [`SourceRange::peek`] verbatim.
    Indirect,
}

/// A sequence of character code units with a current position.
///
/// `'src` is the lifetime of the backing storage for contiguous ranges;
/// non-contiguous implementations leave it unconstrained and return `None`
/// from [`contiguous`](Self::contiguous).
pub trait SourceRange<'src> {
    /// The dereference/advance contract this range satisfies.
    const CAPABILITY: Capability;

    /// Whether the range is exhausted. May pull one unit into an internal
    /// lookahead for iterator-backed ranges.
    fn at_end(&mut self) -> bool;

    /// The unit at the current position, without consuming it.
    ///
    /// Returns `EndOfRange` when exhausted. Indirect sources propagate their
    /// own dereference error here instead.
    fn peek(&mut self) -> ScanResult<u8>;

    /// Consumes `n` units. The units must already have been observed; an
    /// over-advance is a contract violation (debug-asserted) and clamps.
    fn advance(&mut self, n: usize);

    /// Moves the position back by `n` units.
    ///
    /// Contiguous ranges do this with a pure index adjustment; retreating
    /// past the start of the underlying storage is a contract violation.
    /// Other ranges replay from a bounded window and report
    /// `UnrecoverableSourceError` when the sequence cannot represent the
    /// requested position.
    fn putback(&mut self, n: usize) -> ScanResult<()>;

    /// The remaining units as a single borrowed span, when the backing
    /// storage is contiguous. `None` forces callers onto the per-unit path.
    fn contiguous(&self) -> Option<&'src [u8]>;
}
