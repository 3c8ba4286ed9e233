// Clippy allows for the whole crate
#![allow(clippy::len_without_is_empty)]

//! rangebuf: interval overlap queries and windowed random-access reading.
//!
//! This library provides two independent building blocks.
//!
//! # Features
//!
//! - **Interval tree**: overlap queries that also find wide intervals
//!   starting long before the query, with an optional bound on the search
//! - **Buffered reader**: one cached window over any pull source, read
//!   forward or backward, with transparent refills
//! - **Batch queries**: Rayon-backed parallel lookups against a shared tree
//!
//! # Example
//!
//! ```rust
//! use rangebuf::{BufferedReader, Interval, IntervalTree};
//!
//! let mut tree = IntervalTree::new();
//! tree.insert(Interval::new(0, 100), "header");
//! tree.insert(Interval::new(40, 60), "table");
//! assert_eq!(tree.overlapping(&Interval::new(50, 50)).len(), 2);
//!
//! let data = b"Hello World";
//! let mut reader = BufferedReader::with_capacity(&data[..], data.len() as u64, 4);
//! assert_eq!(reader.read(6, 5).unwrap(), b"World");
//! ```

pub mod config;
pub mod guard;
pub mod interval;
pub mod parallel;
pub mod reader;
pub mod tree;

// Re-export commonly used types
pub use guard::ScopeGuard;
pub use interval::Interval;
pub use reader::{from_fn, BufferedReader, ByteSource, Bytes, ReadError, SeekSource};
pub use tree::{IntervalTree, Search, SearchRange};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::guard::{guard, ScopeGuard};
    pub use crate::interval::Interval;
    pub use crate::parallel::{count_overlaps_batch, overlapping_batch};
    pub use crate::reader::{from_fn, BufferedReader, ByteSource, ReadError, SeekSource};
    pub use crate::tree::{IntervalTree, Search, SearchRange};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_tree_indexes_reader_regions() {
        use crate::prelude::*;

        // Region map over a byte source, resolved through the reader
        let data = b"HDR:payload-one|payload-two|END";
        let mut regions = IntervalTree::new();
        regions.insert(Interval::new(0, 3), "header");
        regions.insert(Interval::new(4, 14), "first");
        regions.insert(Interval::new(16, 26), "second");

        let mut reader = BufferedReader::with_capacity(&data[..], data.len() as u64, 8);

        let hits = regions.overlapping(&Interval::point(20));
        assert_eq!(hits.len(), 1);
        let (span, name) = hits[0];
        assert_eq!(*name, "second");

        let bytes = reader
            .read(span.start, (span.end - span.start + 1) as usize)
            .unwrap();
        assert_eq!(bytes, b"payload-two");
    }

    #[test]
    fn test_version_set() {
        assert!(!crate::VERSION.is_empty());
    }
}
