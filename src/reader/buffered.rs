//! Windowed, seekable random-access reader over a [`ByteSource`].
//!
//! The reader keeps a single contiguous window of the source in memory.
//! Forward reads refill it starting at the requested address; reverse reads
//! refill it ending at the request, so stepping backward byte by byte costs
//! one source call per window instead of one per byte.
//!
//! Logical bounds `[start_address, end_address]` clip every read. Bytes
//! outside them read as zero and are never requested from the source.

use super::source::{ByteSource, ReadError, Result};
use super::window::{plan, Anchor, Span, Window};
use crate::config;
use log::{debug, trace};
use std::iter::FusedIterator;

/// Random-access reader caching one window of a byte source.
///
/// # Example
///
/// ```
/// use rangebuf::BufferedReader;
///
/// let data = b"Hello World";
/// let mut reader = BufferedReader::new(&data[..], data.len() as u64);
///
/// assert_eq!(reader.read(0, 5).unwrap(), b"Hello");
/// assert_eq!(reader.read(11, 2).unwrap(), vec![0, 0]);
///
/// let backwards: Vec<u8> = reader.bytes().rev().collect::<Result<_, _>>().unwrap();
/// assert_eq!(backwards, b"dlroW olleH");
/// ```
#[derive(Debug)]
pub struct BufferedReader<Src> {
    source: Src,
    window: Window,
    max_buffer_size: usize,
    start_address: u64,
    /// One past `end_address`; zero for an empty source.
    limit: u64,
}

impl<Src: ByteSource> BufferedReader<Src> {
    /// Create a reader over `size` bytes with the configured default
    /// window capacity.
    pub fn new(source: Src, size: u64) -> Self {
        Self::with_capacity(source, size, config::default_buffer_size())
    }

    /// Create a reader over `size` bytes with a window of at most
    /// `capacity` bytes (at least one).
    pub fn with_capacity(source: Src, size: u64, capacity: usize) -> Self {
        Self {
            source,
            window: Window::default(),
            max_buffer_size: capacity.max(1),
            start_address: 0,
            limit: size,
        }
    }

    /// Move the lower logical bound. Iteration starts here.
    pub fn seek(&mut self, address: u64) {
        self.start_address = address;
    }

    pub fn start_address(&self) -> u64 {
        self.start_address
    }

    /// Move the inclusive upper logical bound.
    pub fn set_end_address(&mut self, address: u64) {
        self.limit = address.saturating_add(1);
    }

    /// Inclusive upper logical bound. Reports 0 for an empty source.
    pub fn end_address(&self) -> u64 {
        self.limit.saturating_sub(1)
    }

    pub fn max_buffer_size(&self) -> usize {
        self.max_buffer_size
    }

    /// Drop the cached window so the next read goes to the source.
    pub fn invalidate(&mut self) {
        debug!("invalidating reader window");
        self.window.invalidate();
    }

    pub fn source(&self) -> &Src {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut Src {
        &mut self.source
    }

    pub fn into_inner(self) -> Src {
        self.source
    }

    /// Read `size` bytes at `address`.
    pub fn read(&mut self, address: u64, size: usize) -> Result<Vec<u8>> {
        let mut result = vec![0; size];
        self.read_into(address, &mut result)?;
        Ok(result)
    }

    /// Read `size` bytes at `address`, refilling the window backward.
    pub fn read_reverse(&mut self, address: u64, size: usize) -> Result<Vec<u8>> {
        let mut result = vec![0; size];
        self.read_reverse_into(address, &mut result)?;
        Ok(result)
    }

    /// Fill `buf` from `address`.
    pub fn read_into(&mut self, address: u64, buf: &mut [u8]) -> Result<()> {
        self.read_anchored(address, buf, Anchor::Forward)
    }

    /// Fill `buf` from `address`, refilling the window backward.
    pub fn read_reverse_into(&mut self, address: u64, buf: &mut [u8]) -> Result<()> {
        self.read_anchored(address, buf, Anchor::Reverse)
    }

    /// Iterate over `[start_address, end_address]`.
    ///
    /// Use `.rev()` to walk backward from `end_address`.
    pub fn bytes(&mut self) -> Bytes<'_, Src> {
        let front = self.start_address;
        let back = self.limit.max(front);
        Bytes {
            reader: self,
            front,
            back,
        }
    }

    /// Iterate from `address` up to `end_address`.
    pub fn bytes_from(&mut self, address: u64) -> Bytes<'_, Src> {
        let back = self.limit.max(address);
        Bytes {
            reader: self,
            front: address,
            back,
        }
    }

    fn bounds(&self) -> Span {
        Span::new(self.start_address, self.limit)
    }

    fn read_anchored(&mut self, address: u64, buf: &mut [u8], anchor: Anchor) -> Result<()> {
        let requested = buf.len();
        let clipped = Span::at(address, requested).intersect(&self.bounds());
        if clipped.is_empty() {
            buf.fill(0);
            return Ok(());
        }

        let offset = (clipped.start - address) as usize;
        let len = clipped.len() as usize;
        let (head, rest) = buf.split_at_mut(offset);
        let (dest, tail) = rest.split_at_mut(len);
        head.fill(0);
        tail.fill(0);

        if requested > self.max_buffer_size {
            debug!(
                "bypassing window for {} byte read at {:#x}",
                requested, address
            );
            return self
                .source
                .read_at(clipped.start, dest)
                .map_err(|source| ReadError::Source {
                    address: clipped.start,
                    size: len,
                    source,
                });
        }

        if !self.window.covers(&clipped) {
            let span = plan(clipped, self.bounds(), self.max_buffer_size, anchor);
            trace!(
                "refilling {:?} window [{:#x}, {:#x}) for read at {:#x}",
                anchor,
                span.start,
                span.end,
                address
            );
            self.window
                .fill(&mut self.source, span)
                .map_err(|source| ReadError::Source {
                    address: span.start,
                    size: span.len() as usize,
                    source,
                })?;
        }

        dest.copy_from_slice(self.window.slice(&clipped));
        Ok(())
    }

    fn byte_at(&mut self, address: u64, anchor: Anchor) -> Result<u8> {
        let mut value = [0u8];
        self.read_anchored(address, &mut value, anchor)?;
        Ok(value[0])
    }
}

/// Byte iterator over a [`BufferedReader`].
///
/// Covers the half-open address range `[front, back)`. Forward steps read
/// through forward-anchored windows, backward steps through reverse ones.
/// Moving the cursor never touches the cache; only reading a byte does.
#[derive(Debug)]
pub struct Bytes<'r, Src> {
    reader: &'r mut BufferedReader<Src>,
    front: u64,
    back: u64,
}

impl<Src: ByteSource> Bytes<'_, Src> {
    /// Address the next forward step reads.
    pub fn position(&self) -> u64 {
        self.front
    }

    /// One past the address the next backward step reads.
    pub fn back_position(&self) -> u64 {
        self.back
    }

    /// Move the front cursor by a signed offset.
    pub fn advance(&mut self, offset: i64) {
        self.front = self.front.saturating_add_signed(offset);
    }

    /// Move the back cursor by a signed offset toward the front.
    pub fn retreat(&mut self, offset: i64) {
        self.back = self.back.saturating_add_signed(offset.saturating_neg());
    }

    /// Read the byte `offset` away from the front cursor without moving it.
    pub fn peek_at(&mut self, offset: i64) -> Result<u8> {
        let address = self.front.saturating_add_signed(offset);
        self.reader.byte_at(address, Anchor::Forward)
    }

    /// Number of bytes left between the cursors.
    pub fn remaining(&self) -> u64 {
        self.back.saturating_sub(self.front)
    }
}

impl<Src: ByteSource> Iterator for Bytes<'_, Src> {
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let address = self.front;
        self.front += 1;
        Some(self.reader.byte_at(address, Anchor::Forward))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n as u64);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl<Src: ByteSource> DoubleEndedIterator for Bytes<'_, Src> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.reader.byte_at(self.back, Anchor::Reverse))
    }

    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        self.back = self.back.saturating_sub(n as u64);
        self.next_back()
    }
}

impl<Src: ByteSource> FusedIterator for Bytes<'_, Src> {}
