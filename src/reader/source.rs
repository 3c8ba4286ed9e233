//! Pull sources feeding a [`BufferedReader`](super::BufferedReader).

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading through a buffered reader.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("source read of {size} bytes at {address:#x} failed: {source}")]
    Source {
        address: u64,
        size: usize,
        #[source]
        source: io::Error,
    },
}

impl ReadError {
    /// Address of the failed source read.
    pub fn address(&self) -> u64 {
        match self {
            ReadError::Source { address, .. } => *address,
        }
    }

    /// Kind of the underlying I/O error.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            ReadError::Source { source, .. } => source.kind(),
        }
    }
}

impl From<ReadError> for io::Error {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::Source { source, .. } => source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReadError>;

/// A random-access byte source.
///
/// `read_at` must fill all of `buf` with the bytes found at `address`, or
/// fail. The reader never validates what a source writes.
pub trait ByteSource {
    fn read_at(&mut self, address: u64, buf: &mut [u8]) -> io::Result<()>;
}

fn read_slice(data: &[u8], address: u64, buf: &mut [u8]) -> io::Result<()> {
    let range = usize::try_from(address)
        .ok()
        .and_then(|start| Some(start..start.checked_add(buf.len())?))
        .filter(|range| range.end <= data.len());

    match range {
        Some(range) => {
            buf.copy_from_slice(&data[range]);
            Ok(())
        }
        None => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "{} bytes at {:#x} past end of {}-byte source",
                buf.len(),
                address,
                data.len()
            ),
        )),
    }
}

impl ByteSource for [u8] {
    fn read_at(&mut self, address: u64, buf: &mut [u8]) -> io::Result<()> {
        read_slice(self, address, buf)
    }
}

impl ByteSource for &[u8] {
    fn read_at(&mut self, address: u64, buf: &mut [u8]) -> io::Result<()> {
        read_slice(self, address, buf)
    }
}

impl ByteSource for Vec<u8> {
    fn read_at(&mut self, address: u64, buf: &mut [u8]) -> io::Result<()> {
        read_slice(self, address, buf)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    fn read_at(&mut self, address: u64, buf: &mut [u8]) -> io::Result<()> {
        (**self).read_at(address, buf)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for Box<T> {
    fn read_at(&mut self, address: u64, buf: &mut [u8]) -> io::Result<()> {
        (**self).read_at(address, buf)
    }
}

/// Adapts any `Read + Seek` stream, seeking before every read.
#[derive(Debug)]
pub struct SeekSource<R> {
    inner: R,
}

impl SeekSource<File> {
    /// Open a file as a source.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read + Seek> SeekSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Total stream length in bytes. Leaves the stream positioned at its end.
    pub fn len(&mut self) -> io::Result<u64> {
        self.inner.seek(SeekFrom::End(0))
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> ByteSource for SeekSource<R> {
    fn read_at(&mut self, address: u64, buf: &mut [u8]) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(address))?;
        self.inner.read_exact(buf)
    }
}

/// A pull function over a borrowed context.
///
/// Built by [`from_fn`].
pub struct FnSource<'a, T: ?Sized, F> {
    context: &'a mut T,
    read: F,
}

/// Wrap a closure `(context, buffer, address)` as a [`ByteSource`].
///
/// The closure must fill the whole buffer. The context stays owned by the
/// caller.
///
/// # Example
///
/// ```
/// use rangebuf::{from_fn, BufferedReader};
///
/// let mut text = String::from("Hello World");
/// let source = from_fn(&mut text, |text: &mut String, buf: &mut [u8], address| {
///     let start = address as usize;
///     buf.copy_from_slice(&text.as_bytes()[start..start + buf.len()]);
///     Ok(())
/// });
///
/// let mut reader = BufferedReader::with_capacity(source, 11, 4);
/// assert_eq!(reader.read(6, 5).unwrap(), b"World");
/// ```
pub fn from_fn<T, F>(context: &mut T, read: F) -> FnSource<'_, T, F>
where
    T: ?Sized,
    F: FnMut(&mut T, &mut [u8], u64) -> io::Result<()>,
{
    FnSource { context, read }
}

impl<T, F> ByteSource for FnSource<'_, T, F>
where
    T: ?Sized,
    F: FnMut(&mut T, &mut [u8], u64) -> io::Result<()>,
{
    fn read_at(&mut self, address: u64, buf: &mut [u8]) -> io::Result<()> {
        (self.read)(&mut *self.context, buf, address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_slice_source() {
        let mut data: &[u8] = b"0123456789";
        let mut buf = [0u8; 3];

        data.read_at(4, &mut buf).unwrap();
        assert_eq!(&buf, b"456");

        data.read_at(7, &mut buf).unwrap();
        assert_eq!(&buf, b"789");
    }

    #[test]
    fn test_slice_source_past_end() {
        let mut data = b"0123456789".to_vec();
        let mut buf = [0u8; 3];

        let err = data.read_at(8, &mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        let err = data.read_at(u64::MAX, &mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_seek_source() {
        let mut source = SeekSource::new(Cursor::new(b"abcdefgh".to_vec()));
        assert_eq!(source.len().unwrap(), 8);

        let mut buf = [0u8; 2];
        source.read_at(5, &mut buf).unwrap();
        assert_eq!(&buf, b"fg");
        source.read_at(0, &mut buf).unwrap();
        assert_eq!(&buf, b"ab");

        assert!(source.read_at(7, &mut buf).is_err());
    }

    #[test]
    fn test_fn_source_borrows_context() {
        let mut calls = 0usize;
        {
            let mut source = from_fn(&mut calls, |calls: &mut usize, buf: &mut [u8], address| {
                *calls += 1;
                buf.fill(address as u8);
                Ok(())
            });

            let mut buf = [0u8; 4];
            source.read_at(7, &mut buf).unwrap();
            assert_eq!(buf, [7; 4]);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_read_error_display() {
        let err = ReadError::Source {
            address: 0x10,
            size: 4,
            source: io::Error::new(io::ErrorKind::Other, "boom"),
        };

        assert_eq!(err.address(), 0x10);
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(err.to_string(), "source read of 4 bytes at 0x10 failed: boom");

        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::Other);
    }
}
