//! Interval tree keyed by interval start, for overlap queries.
//!
//! Entries live in an ordered multimap from `start` to `(end, value)`. A query
//! finds the last entry whose start is not past the query's end and walks
//! backward from there, which is how wide intervals that begin long before
//! the query (encompassing intervals) are still discovered.

use crate::interval::Interval;
use std::collections::{btree_map, BTreeMap};
use std::fmt;
use std::slice;

/// How far back an overlap query may walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchRange {
    /// Walk back to the first entry. O(n) in the worst case.
    #[default]
    Unlimited,
    /// Stop after this many matching entries have been collected.
    /// Encompassing intervals further back are not reported.
    Limited(usize),
}

/// Search policy for [`IntervalTree::overlapping_with`].
///
/// The default is exhaustive: every stored interval that overlaps the query
/// is returned, however far back its start lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Search {
    encompassing: bool,
    range: SearchRange,
}

impl Search {
    /// Scan back over every entry, reporting all overlaps.
    pub const fn encompassing() -> Self {
        Self {
            encompassing: true,
            range: SearchRange::Unlimited,
        }
    }

    /// Stop at the first visited entry whose end lies before the query.
    ///
    /// Cheap, and complete only when no stored interval encompasses a
    /// later-starting one.
    pub const fn nearest() -> Self {
        Self {
            encompassing: false,
            range: SearchRange::Unlimited,
        }
    }

    /// Collect at most `limit` matches.
    pub const fn within(self, limit: usize) -> Self {
        self.range(SearchRange::Limited(limit))
    }

    /// Replace the search range.
    pub const fn range(mut self, range: SearchRange) -> Self {
        self.range = range;
        self
    }

    pub fn is_encompassing(&self) -> bool {
        self.encompassing
    }

    pub fn search_range(&self) -> SearchRange {
        self.range
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::encompassing()
    }
}

/// An ordered collection of `[start, end]`-keyed values.
///
/// Entries with equal starts keep their insertion order. Values are never
/// removed individually; use [`clear`](Self::clear) to empty the tree.
///
/// # Example
///
/// ```
/// use rangebuf::{Interval, IntervalTree};
///
/// let tree: IntervalTree<i32> = [
///     (Interval::new(0, 5), 69),
///     (Interval::new(1, 3), 420),
///     (Interval::new(2, 4), 1337),
///     (Interval::new(3, 6), 9001),
///     (Interval::new(6, 8), 8008),
/// ]
/// .into_iter()
/// .collect();
///
/// let mut hits: Vec<i32> = tree
///     .overlapping_values(&Interval::new(4, 5))
///     .into_iter()
///     .copied()
///     .collect();
/// hits.sort();
/// assert_eq!(hits, vec![69, 1337, 9001]);
/// ```
#[derive(Clone)]
pub struct IntervalTree<V, S = u64> {
    entries: BTreeMap<S, Vec<(S, V)>>,
    len: usize,
}

impl<V, S> Default for IntervalTree<V, S> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            len: 0,
        }
    }
}

impl<V, S: Ord + Copy> IntervalTree<V, S> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value under `interval`. The interval is not validated.
    pub fn insert(&mut self, interval: Interval<S>, value: V) {
        self.entries
            .entry(interval.start)
            .or_default()
            .push((interval.end, value));
        self.len += 1;
    }

    /// Get the number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.len = 0;
    }

    /// Iterate over all entries in ascending start order.
    pub fn iter(&self) -> Iter<'_, V, S> {
        Iter {
            buckets: self.entries.iter(),
            current: None,
            remaining: self.len,
        }
    }

    /// Find every stored interval overlapping `query`, with the default
    /// exhaustive search.
    ///
    /// Results come in descending start order.
    pub fn overlapping(&self, query: &Interval<S>) -> Vec<(Interval<S>, &V)> {
        self.overlapping_with(query, Search::default())
    }

    /// Like [`overlapping`](Self::overlapping), returning only the values.
    pub fn overlapping_values(&self, query: &Interval<S>) -> Vec<&V> {
        let mut result = Vec::new();
        self.walk_back(query, Search::default(), |_, value| result.push(value));
        result
    }

    /// Find overlapping intervals using an explicit search policy.
    pub fn overlapping_with(&self, query: &Interval<S>, search: Search) -> Vec<(Interval<S>, &V)> {
        let mut result = Vec::new();
        self.walk_back(query, search, |interval, value| result.push((interval, value)));
        result
    }

    /// Count overlapping intervals without collecting them.
    pub fn count_overlapping(&self, query: &Interval<S>) -> usize {
        let mut count = 0;
        self.walk_back(query, Search::default(), |_, _| count += 1);
        count
    }

    /// Walk entries backward from the last start `<= query.end`.
    fn walk_back<'a, F>(&'a self, query: &Interval<S>, search: Search, mut emit: F)
    where
        F: FnMut(Interval<S>, &'a V),
    {
        let limit = match search.range {
            SearchRange::Unlimited => usize::MAX,
            SearchRange::Limited(0) => return,
            SearchRange::Limited(limit) => limit,
        };

        let mut matched = 0;
        for (&start, bucket) in self.entries.range(..=query.end).rev() {
            for (end, value) in bucket.iter().rev() {
                let stored = Interval { start, end: *end };

                if !search.encompassing && stored.end < query.start {
                    return;
                }

                if stored.overlaps(query) {
                    emit(stored, value);
                    matched += 1;
                    if matched >= limit {
                        return;
                    }
                }
            }
        }
    }
}

impl<V: fmt::Debug, S: fmt::Debug + Ord + Copy> fmt::Debug for IntervalTree<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(interval, value)| ((interval.start, interval.end), value)))
            .finish()
    }
}

impl<V, S: Ord + Copy> FromIterator<(Interval<S>, V)> for IntervalTree<V, S> {
    fn from_iter<I: IntoIterator<Item = (Interval<S>, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<V, S: Ord + Copy> Extend<(Interval<S>, V)> for IntervalTree<V, S> {
    fn extend<I: IntoIterator<Item = (Interval<S>, V)>>(&mut self, iter: I) {
        for (interval, value) in iter {
            self.insert(interval, value);
        }
    }
}

impl<'a, V, S: Ord + Copy> IntoIterator for &'a IntervalTree<V, S> {
    type Item = (Interval<S>, &'a V);
    type IntoIter = Iter<'a, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over tree entries in ascending start order.
pub struct Iter<'a, V, S> {
    buckets: btree_map::Iter<'a, S, Vec<(S, V)>>,
    current: Option<(S, slice::Iter<'a, (S, V)>)>,
    remaining: usize,
}

impl<'a, V, S: Copy> Iterator for Iter<'a, V, S> {
    type Item = (Interval<S>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((start, bucket)) = &mut self.current {
                if let Some((end, value)) = bucket.next() {
                    self.remaining -= 1;
                    return Some((
                        Interval {
                            start: *start,
                            end: *end,
                        },
                        value,
                    ));
                }
            }

            let (start, bucket) = self.buckets.next()?;
            self.current = Some((*start, bucket.iter()));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V, S: Copy> ExactSizeIterator for Iter<'_, V, S> {}
