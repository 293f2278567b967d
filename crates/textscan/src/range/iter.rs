use alloc::collections::VecDeque;

use crate::{
    error::{ScanError, ScanResult},
    range::{Capability, SourceRange},
};

const DEFAULT_PUTBACK_CAPACITY: usize = 8;

/// Lookahead and replay bookkeeping shared by the iterator-backed ranges.
///
/// `lookahead` holds units pulled from the source but not yet consumed;
/// `replay` holds the most recently consumed units, newest at the back, so
/// putback can be simulated on a forward-only source. The window is bounded:
/// putback deeper than what was retained is the single-pass failure case.
#[derive(Debug)]
struct Backlog {
    lookahead: VecDeque<u8>,
    replay: VecDeque<u8>,
    capacity: usize,
}

impl Backlog {
    fn new(capacity: usize) -> Self {
        Self {
            lookahead: VecDeque::new(),
            replay: VecDeque::new(),
            capacity,
        }
    }

    #[inline]
    fn record(&mut self, unit: u8) {
        if self.capacity == 0 {
            return;
        }
        if self.replay.len() == self.capacity {
            self.replay.pop_front();
        }
        self.replay.push_back(unit);
    }

    fn putback(&mut self, n: usize) -> ScanResult<()> {
        for _ in 0..n {
            match self.replay.pop_back() {
                Some(unit) => self.lookahead.push_front(unit),
                None => {
                    return Err(ScanError::UnrecoverableSourceError("putback failed"));
                }
            }
        }
        Ok(())
    }
}

/// A direct (infallible-dereference) source range over any byte iterator.
///
/// Forward-only apart from a bounded replay window; see
/// [`with_putback_capacity`](Self::with_putback_capacity).
#[derive(Debug)]
pub struct IterRange<I> {
    iter: I,
    backlog: Backlog,
}

impl<I: Iterator<Item = u8>> IterRange<I> {
    /// Wraps `iter` with the default putback window.
    pub fn new(iter: I) -> Self {
        Self::with_putback_capacity(iter, DEFAULT_PUTBACK_CAPACITY)
    }

    /// Wraps `iter`, retaining up to `capacity` consumed units for putback.
    pub fn with_putback_capacity(iter: I, capacity: usize) -> Self {
        Self {
            iter,
            backlog: Backlog::new(capacity),
        }
    }

    fn fill(&mut self) {
        if self.backlog.lookahead.is_empty() {
            if let Some(unit) = self.iter.next() {
                self.backlog.lookahead.push_back(unit);
            }
        }
    }
}

impl<'src, I: Iterator<Item = u8>> SourceRange<'src> for IterRange<I> {
    const CAPABILITY: Capability = Capability::Direct;

    fn at_end(&mut self) -> bool {
        self.fill();
        self.backlog.lookahead.is_empty()
    }

    fn peek(&mut self) -> ScanResult<u8> {
        self.fill();
        self.backlog
            .lookahead
            .front()
            .copied()
            .ok_or(ScanError::eof())
    }

    fn advance(&mut self, n: usize) {
        for _ in 0..n {
            let unit = match self.backlog.lookahead.pop_front() {
                Some(unit) => Some(unit),
                None => self.iter.next(),
            };
            let Some(unit) = unit else {
                debug_assert!(false, "advance past end");
                break;
            };
            self.backlog.record(unit);
        }
    }

    fn putback(&mut self, n: usize) -> ScanResult<()> {
        self.backlog.putback(n)
    }

    fn contiguous(&self) -> Option<&'src [u8]> {
        None
    }
}

/// An indirect source range: dereferencing the current position may itself
/// fail, e.g. when the source wraps a legacy stream.
///
/// A dereference failure is held and handed out of [`peek`] verbatim; per
/// the reader contract the range is unusable afterwards, so the error is
/// sticky.
///
/// [`peek`]: SourceRange::peek
#[derive(Debug)]
pub struct TryIterRange<I> {
    iter: I,
    backlog: Backlog,
    pending: Option<ScanError>,
}

impl<I: Iterator<Item = ScanResult<u8>>> TryIterRange<I> {
    /// Wraps `iter` with the default putback window.
    pub fn new(iter: I) -> Self {
        Self::with_putback_capacity(iter, DEFAULT_PUTBACK_CAPACITY)
    }

    /// Wraps `iter`, retaining up to `capacity` consumed units for putback.
    pub fn with_putback_capacity(iter: I, capacity: usize) -> Self {
        Self {
            iter,
            backlog: Backlog::new(capacity),
            pending: None,
        }
    }

    fn fill(&mut self) {
        if self.backlog.lookahead.is_empty() && self.pending.is_none() {
            match self.iter.next() {
                Some(Ok(unit)) => self.backlog.lookahead.push_back(unit),
                Some(Err(err)) => self.pending = Some(err),
                None => {}
            }
        }
    }
}

impl<'src, I: Iterator<Item = ScanResult<u8>>> SourceRange<'src> for TryIterRange<I> {
    const CAPABILITY: Capability = Capability::Indirect;

    fn at_end(&mut self) -> bool {
        self.fill();
        self.backlog.lookahead.is_empty() && self.pending.is_none()
    }

    fn peek(&mut self) -> ScanResult<u8> {
        self.fill();
        if let Some(unit) = self.backlog.lookahead.front() {
            return Ok(*unit);
        }
        match self.pending {
            Some(err) => Err(err),
            None => Err(ScanError::eof()),
        }
    }

    fn advance(&mut self, n: usize) {
        for _ in 0..n {
            let Some(unit) = self.backlog.lookahead.pop_front() else {
                debug_assert!(false, "advance past observed input");
                break;
            };
            self.backlog.record(unit);
        }
    }

    fn putback(&mut self, n: usize) -> ScanResult<()> {
        self.backlog.putback(n)
    }

    fn contiguous(&self) -> Option<&'src [u8]> {
        None
    }
}
