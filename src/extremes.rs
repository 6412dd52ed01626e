use alloc::collections::VecDeque;

use core::marker::PhantomData;

use num_traits::Float;
use ordered_float::{FloatCore, OrderedFloat};

use crate::{Reducer, Transaction};

/// Order policy for the monotonic deque backing the extremes reducers.
pub trait OrderPolicy<T> {
    /// Returns true if a kept entry can never be the window extreme once
    /// `new` has arrived.
    fn should_remove(kept: &T, new: &T) -> bool;
}

/// Order policy selecting the maximum amount.
#[derive(Debug, Clone)]
pub struct Max;

/// Order policy selecting the minimum amount.
#[derive(Debug, Clone)]
pub struct Min;

impl<T: PartialOrd> OrderPolicy<T> for Max {
    #[inline]
    fn should_remove(kept: &T, new: &T) -> bool {
        kept < new
    }
}

impl<T: PartialOrd> OrderPolicy<T> for Min {
    #[inline]
    fn should_remove(kept: &T, new: &T) -> bool {
        kept > new
    }
}

/// Extreme amount inside the window, maintained with a monotonic deque.
///
/// Entering records evict every kept entry they dominate from the back;
/// the front entry is always the current extreme, so lookups are O(1) and
/// maintenance is O(1) amortized across a pass. An empty window yields
/// `None`.
///
/// Unlike the arithmetic reducers, this structure is order-dependent: it is
/// correct under the aggregation engine's oldest-first exclusion of
/// previously included records (the prefix-removal order the scan
/// guarantees), and does not support excluding a record that is not the
/// oldest surviving member.
///
/// # Examples
///
/// ```
/// use txn_windows::{RollingMax, RollingWindow, Transaction};
///
/// let records = vec![
///     Transaction::new("a", 1, 120.0),
///     Transaction::new("b", 2, 977.98),
///     Transaction::new("c", 4, 171.19),
///     Transaction::new("d", 6, 16.5),
/// ];
///
/// let windows = RollingWindow::new(3).unwrap();
/// let maxima: Vec<Option<f64>> = windows
///     .aggregate(&records, RollingMax::new())
///     .unwrap()
///     .map(|(_, max)| max)
///     .collect();
///
/// assert_eq!(
///     maxima,
///     vec![Some(977.98), Some(977.98), Some(171.19), Some(16.5)]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Extreme<T, O> {
    /// Kept (timestamp, amount) entries, extreme at the front
    deque: VecDeque<(i64, OrderedFloat<T>)>,
    _order: PhantomData<O>,
}

/// Maximum amount inside the window.
pub type RollingMax<T> = Extreme<T, Max>;

/// Minimum amount inside the window.
pub type RollingMin<T> = Extreme<T, Min>;

impl<T, O> Extreme<T, O>
where
    T: Float + FloatCore,
    O: OrderPolicy<OrderedFloat<T>>,
{
    /// Creates an empty extremes tracker.
    pub fn new() -> Self {
        Self {
            deque: VecDeque::new(),
            _order: PhantomData,
        }
    }

    /// Clears the accumulator.
    pub fn reset(&mut self) -> &mut Self {
        self.deque.clear();
        self
    }

    /// Returns true if no records are inside the window.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }
}

impl<T, O> Default for Extreme<T, O>
where
    T: Float + FloatCore,
    O: OrderPolicy<OrderedFloat<T>>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, O> Reducer<T> for Extreme<T, O>
where
    T: Float + FloatCore,
    O: OrderPolicy<OrderedFloat<T>>,
{
    type Output = Option<T>;

    fn include(&mut self, record: &Transaction<T>) {
        let amount = OrderedFloat(record.amount());
        while let Some(&(_, kept)) = self.deque.back() {
            if O::should_remove(&kept, &amount) {
                self.deque.pop_back();
            } else {
                break;
            }
        }
        self.deque.push_back((record.timestamp(), amount));
    }

    fn exclude(&mut self, record: &Transaction<T>) {
        // A record absent from the deque was dominated on entry; nothing to
        // retire for it.
        if let Some(&(timestamp, amount)) = self.deque.front() {
            if timestamp == record.timestamp() && amount == OrderedFloat(record.amount()) {
                self.deque.pop_front();
            }
        }
    }

    #[inline]
    fn value(&self) -> Option<T> {
        self.deque.front().map(|&(_, amount)| amount.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RollingWindow;
    use alloc::vec::Vec;

    fn records(rows: &[(i64, f64)]) -> Vec<Transaction<f64>> {
        rows.iter()
            .enumerate()
            .map(|(i, &(day, amount))| Transaction::new(format!("T{i:04}"), day, amount))
            .collect()
    }

    #[test]
    fn empty_window_yields_none() {
        let max: RollingMax<f64> = RollingMax::new();
        assert_eq!(max.value(), None);
        assert!(max.is_empty());
    }

    #[test]
    fn excluding_a_dominated_record_is_a_no_op() {
        let mut max = RollingMax::new();
        let small = Transaction::new("a", 1, 2.0);
        let large = Transaction::new("b", 2, 9.0);
        max.include(&small);
        max.include(&large);
        assert_eq!(max.value(), Some(9.0));

        // `small` was evicted when `large` entered; retiring it leaves the
        // front untouched.
        max.exclude(&small);
        assert_eq!(max.value(), Some(9.0));
        max.exclude(&large);
        assert_eq!(max.value(), None);
    }

    #[test]
    fn max_tracks_eviction_of_the_peak() {
        let rows = records(&[(1, 25.4), (2, 26.2), (3, 26.0), (4, 26.1), (5, 25.8)]);
        let maxima: Vec<_> = RollingWindow::new(3)
            .and_then(|w| w.aggregate(&rows, RollingMax::new()))
            .map(|agg| agg.map(|(_, m)| m).collect())
            .unwrap_or_default();
        assert_eq!(
            maxima,
            vec![
                Some(26.2),
                Some(26.2),
                Some(26.1),
                Some(26.1),
                Some(25.8)
            ]
        );
    }

    #[test]
    fn min_mirrors_max() {
        let rows = records(&[(1, 25.4), (2, 26.2), (3, 26.0), (4, 26.1), (5, 25.8)]);
        let minima: Vec<_> = RollingWindow::new(3)
            .and_then(|w| w.aggregate(&rows, RollingMin::new()))
            .map(|agg| agg.map(|(_, m)| m).collect())
            .unwrap_or_default();
        assert_eq!(
            minima,
            vec![
                Some(25.4),
                Some(26.0),
                Some(25.8),
                Some(25.8),
                Some(25.8)
            ]
        );
    }

    #[test]
    fn duplicate_amounts_retire_one_entry_at_a_time() {
        let mut max = RollingMax::new();
        let first = Transaction::new("a", 1, 5.0);
        let second = Transaction::new("b", 1, 5.0);
        max.include(&first);
        max.include(&second);
        assert_eq!(max.value(), Some(5.0));

        max.exclude(&first);
        assert_eq!(max.value(), Some(5.0));
        max.exclude(&second);
        assert_eq!(max.value(), None);
    }
}
