use crate::{
    error::{ScanError, ScanResult},
    range::{Capability, SourceRange},
};

/// A contiguous source range over a borrowed byte slice.
///
/// Position tracking is a single index; putback is an index decrement and is
/// valid back to the start of the original slice.
#[derive(Debug, Clone)]
pub struct SliceRange<'src> {
    data: &'src [u8],
    pos: usize,
}

impl<'src> SliceRange<'src> {
    /// Creates a range over the full slice.
    #[must_use]
    pub fn new(data: &'src [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a range over the UTF-8 bytes of `s`.
    #[must_use]
    pub fn from_str(s: &'src str) -> Self {
        Self::new(s.as_bytes())
    }

    /// The units not yet consumed.
    #[must_use]
    pub fn rest(&self) -> &'src [u8] {
        &self.data[self.pos..]
    }

    /// Units consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'src> SourceRange<'src> for SliceRange<'src> {
    const CAPABILITY: Capability = Capability::Contiguous;

    #[inline]
    fn at_end(&mut self) -> bool {
        self.pos >= self.data.len()
    }

    #[inline]
    fn peek(&mut self) -> ScanResult<u8> {
        self.data.get(self.pos).copied().ok_or(ScanError::eof())
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.data.len() - self.pos, "advance past end");
        self.pos = (self.pos + n).min(self.data.len());
    }

    #[inline]
    fn putback(&mut self, n: usize) -> ScanResult<()> {
        debug_assert!(n <= self.pos, "putback past start of storage");
        self.pos = self.pos.saturating_sub(n);
        Ok(())
    }

    #[inline]
    fn contiguous(&self) -> Option<&'src [u8]> {
        Some(&self.data[self.pos..])
    }
}
