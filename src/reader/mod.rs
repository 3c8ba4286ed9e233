//! Buffered random access over pull sources.
//!
//! - [`ByteSource`]: the pull contract, with stock sources for memory,
//!   seekable streams and closures
//! - [`BufferedReader`]: single-window cache with forward and reverse reads
//! - [`Bytes`]: byte iterator usable in both directions

pub mod buffered;
pub mod source;
mod window;

pub use buffered::{BufferedReader, Bytes};
pub use source::{from_fn, ByteSource, FnSource, ReadError, Result, SeekSource};
