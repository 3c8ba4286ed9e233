//! The single cached window of a buffered reader.

use super::source::ByteSource;
use std::io;

/// Half-open address range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: u64,
    pub end: u64,
}

impl Span {
    #[inline]
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// `len` bytes starting at `address`, saturating at the top of the
    /// address space.
    #[inline]
    pub fn at(address: u64, len: usize) -> Self {
        Self::new(address, address.saturating_add(len as u64))
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[inline]
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Intersection of two spans. May be empty.
    #[inline]
    pub fn intersect(&self, other: &Span) -> Span {
        Span::new(self.start.max(other.start), self.end.min(other.end))
    }
}

/// Which end of a refill window the request is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    /// The window starts at the request and extends upward.
    Forward,
    /// The window ends at the request end and extends downward.
    Reverse,
}

/// Choose the span to fetch for `request`.
///
/// `request` must already be clipped to `bounds` and be no longer than
/// `max`; the returned span then always contains it.
pub(crate) fn plan(request: Span, bounds: Span, max: usize, anchor: Anchor) -> Span {
    let max = max as u64;
    match anchor {
        Anchor::Forward => Span::new(
            request.start,
            request.start.saturating_add(max).min(bounds.end),
        ),
        Anchor::Reverse => Span::new(
            request.end.saturating_sub(max).max(bounds.start),
            request.end,
        ),
    }
}

/// Cached copy of `[base, base + contents.len())`.
#[derive(Debug, Default)]
pub(crate) struct Window {
    base: u64,
    contents: Vec<u8>,
    valid: bool,
}

impl Window {
    pub fn span(&self) -> Option<Span> {
        self.valid
            .then(|| Span::at(self.base, self.contents.len()))
    }

    /// Check if the window holds every byte of `span`.
    pub fn covers(&self, span: &Span) -> bool {
        self.span().is_some_and(|window| window.contains(span))
    }

    /// Bytes of `span`, which must be covered.
    pub fn slice(&self, span: &Span) -> &[u8] {
        let offset = (span.start - self.base) as usize;
        &self.contents[offset..offset + span.len() as usize]
    }

    /// Replace the window with `span` pulled from `source`.
    ///
    /// The window stays invalid if the source fails.
    pub fn fill<Src: ByteSource + ?Sized>(&mut self, source: &mut Src, span: Span) -> io::Result<()> {
        self.valid = false;
        self.contents.resize(span.len() as usize, 0);
        source.read_at(span.start, &mut self.contents)?;
        self.base = span.start;
        self.valid = true;
        Ok(())
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }
}
