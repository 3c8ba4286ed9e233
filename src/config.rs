//! Global configuration for runtime defaults.
//!
//! This module provides thread-safe process-wide defaults that are read when
//! readers are constructed and when batch queries pick an execution strategy.
//! They are meant to be set once at startup, before any work begins.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default window capacity of a [`BufferedReader`](crate::BufferedReader) (1 MiB).
pub const DEFAULT_BUFFER_SIZE: usize = 0x10_0000;

/// Default minimum number of queries before batch queries go parallel.
/// Below this threshold, sequential processing is faster due to
/// thread spawn overhead.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

static BUFFER_SIZE: AtomicUsize = AtomicUsize::new(DEFAULT_BUFFER_SIZE);

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Set the window capacity used by [`BufferedReader::new`](crate::BufferedReader::new).
///
/// A size of zero is clamped to one byte. Readers that already exist keep
/// the capacity they were built with.
///
/// # Example
///
/// ```
/// use rangebuf::config;
///
/// config::set_default_buffer_size(64 * 1024);
/// assert_eq!(config::default_buffer_size(), 64 * 1024);
/// # config::set_default_buffer_size(config::DEFAULT_BUFFER_SIZE);
/// ```
#[inline]
pub fn set_default_buffer_size(size: usize) {
    BUFFER_SIZE.store(size.max(1), Ordering::Release);
}

/// Window capacity used by newly constructed readers.
#[inline]
pub fn default_buffer_size() -> usize {
    BUFFER_SIZE.load(Ordering::Acquire)
}

/// Set the batch size at which batch queries switch to rayon.
#[inline]
pub fn set_parallel_threshold(threshold: usize) {
    PARALLEL_THRESHOLD.store(threshold, Ordering::Release);
}

/// Batch size at which batch queries switch to rayon.
#[inline]
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Acquire)
}

/// Restore every setting to its default.
pub fn reset() {
    set_default_buffer_size(DEFAULT_BUFFER_SIZE);
    set_parallel_threshold(DEFAULT_PARALLEL_THRESHOLD);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        reset();
        assert_eq!(default_buffer_size(), 1024 * 1024);
        assert_eq!(parallel_threshold(), DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    #[serial]
    fn test_zero_buffer_size_clamped() {
        set_default_buffer_size(0);
        assert_eq!(default_buffer_size(), 1);
        reset(); // Reset
    }

    #[test]
    #[serial]
    fn test_parallel_threshold_roundtrip() {
        set_parallel_threshold(4);
        assert_eq!(parallel_threshold(), 4);
        reset();
        assert_eq!(parallel_threshold(), DEFAULT_PARALLEL_THRESHOLD);
    }
}
