//! Batch overlap queries using Rayon.
//!
//! A tree is only read during a query, so many queries can share it across
//! threads. Small batches run sequentially; see
//! [`config::parallel_threshold`](crate::config::parallel_threshold).

use crate::config;
use crate::interval::Interval;
use crate::tree::IntervalTree;
use rayon::prelude::*;

/// Run [`IntervalTree::overlapping_values`] for every query, in order.
pub fn overlapping_batch<'a, V, S>(
    tree: &'a IntervalTree<V, S>,
    queries: &[Interval<S>],
) -> Vec<Vec<&'a V>>
where
    V: Sync,
    S: Ord + Copy + Send + Sync,
{
    if queries.len() < config::parallel_threshold() {
        return queries
            .iter()
            .map(|query| tree.overlapping_values(query))
            .collect();
    }

    queries
        .par_iter()
        .map(|query| tree.overlapping_values(query))
        .collect()
}

/// Count the overlaps of every query, in order.
pub fn count_overlaps_batch<V, S>(tree: &IntervalTree<V, S>, queries: &[Interval<S>]) -> Vec<usize>
where
    V: Sync,
    S: Ord + Copy + Send + Sync,
{
    if queries.len() < config::parallel_threshold() {
        return queries
            .iter()
            .map(|query| tree.count_overlapping(query))
            .collect();
    }

    queries
        .par_iter()
        .map(|query| tree.count_overlapping(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn ladder(n: u64) -> IntervalTree<u64> {
        (0..n).map(|i| (Interval::new(i * 10, i * 10 + 15), i)).collect()
    }

    #[test]
    #[serial]
    fn test_batch_matches_single_queries() {
        config::reset();
        let tree = ladder(100);
        let queries: Vec<Interval> = (0..50).map(|i| Interval::new(i * 17, i * 17 + 3)).collect();

        let batch = overlapping_batch(&tree, &queries);
        assert_eq!(batch.len(), queries.len());
        for (query, hits) in queries.iter().zip(&batch) {
            assert_eq!(hits, &tree.overlapping_values(query));
        }
    }

    #[test]
    #[serial]
    fn test_parallel_path_preserves_order() {
        config::set_parallel_threshold(1);
        let tree = ladder(100);
        let queries: Vec<Interval> = (0..200).map(|i| Interval::new(i * 5, i * 5)).collect();

        let counts = count_overlaps_batch(&tree, &queries);
        let expected: Vec<usize> = queries.iter().map(|q| tree.count_overlapping(q)).collect();
        assert_eq!(counts, expected);

        let batch = overlapping_batch(&tree, &queries);
        assert_eq!(batch[10], tree.overlapping_values(&queries[10]));
        config::reset();
    }

    #[test]
    #[serial]
    fn test_empty_batch() {
        config::reset();
        let tree = ladder(3);
        assert!(overlapping_batch(&tree, &[]).is_empty());
        assert!(count_overlaps_batch(&tree, &[]).is_empty());
    }
}
