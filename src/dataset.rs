//! Whole-dataset aggregations and sequencing helpers.
//!
//! These operate on the full record sequence in one pass, outside any
//! window: per-timestamp totals, the most frequent amount, the dataset time
//! span, and the sort/validation pair the windowing pass depends on.

use alloc::vec::Vec;

use ahash::RandomState;
use hashbrown::HashMap;
use num_traits::Float;
use ordered_float::{FloatCore, OrderedFloat, PrimitiveFloat};

use crate::{Error, Kbn, Result, Transaction};

/// Sorts records ascending by timestamp, the order the windowing pass
/// requires.
///
/// The sort is stable: records sharing a timestamp keep their input order.
pub fn sort_by_timestamp<T: Copy>(records: &mut [Transaction<T>]) {
    records.sort_by(Transaction::cmp_timestamps);
}

/// Verifies that records are sorted ascending by timestamp.
///
/// # Errors
///
/// [`Error::UnsortedInput`] carrying the index of the first record that
/// breaks the order.
pub fn ensure_sorted<T: Copy>(records: &[Transaction<T>]) -> Result<()> {
    for (i, pair) in records.windows(2).enumerate() {
        if pair[1].timestamp() < pair[0].timestamp() {
            return Err(Error::UnsortedInput(i + 1));
        }
    }
    Ok(())
}

/// Returns the `(first, last)` timestamps of a sorted record sequence, or
/// `None` when it is empty.
pub fn span<T: Copy>(records: &[Transaction<T>]) -> Option<(i64, i64)> {
    records
        .first()
        .zip(records.last())
        .map(|(first, last)| (first.timestamp(), last.timestamp()))
}

/// Totals the amounts recorded at each timestamp.
///
/// Accumulates with compensated summation per timestamp and returns the
/// totals sorted ascending by timestamp. Input order does not matter.
///
/// # Examples
///
/// ```
/// use txn_windows::{Transaction, dataset};
///
/// let records = vec![
///     Transaction::new("a", 2, 40.0),
///     Transaction::new("b", 1, 10.0),
///     Transaction::new("c", 2, 2.5),
/// ];
///
/// assert_eq!(
///     dataset::totals_by_timestamp(&records),
///     vec![(1, 10.0), (2, 42.5)]
/// );
/// ```
pub fn totals_by_timestamp<T: Float + Default>(records: &[Transaction<T>]) -> Vec<(i64, T)> {
    let mut totals: HashMap<i64, Kbn<T>, RandomState> = HashMap::default();
    for record in records {
        *totals.entry(record.timestamp()).or_default() += record.amount();
    }

    let mut out: Vec<(i64, T)> = totals
        .into_iter()
        .map(|(timestamp, total)| (timestamp, total.total()))
        .collect();
    out.sort_unstable_by_key(|&(timestamp, _)| timestamp);
    out
}

/// Returns the most frequent amount in the dataset, the smallest such
/// amount on ties, or `None` when the dataset is empty.
///
/// # Examples
///
/// ```
/// use txn_windows::{Transaction, dataset};
///
/// let records = vec![
///     Transaction::new("a", 1, 3.0),
///     Transaction::new("b", 2, 1.0),
///     Transaction::new("c", 3, 3.0),
///     Transaction::new("d", 4, 1.0),
///     Transaction::new("e", 5, 2.0),
/// ];
///
/// assert_eq!(dataset::amount_mode(&records), Some(1.0));
/// ```
pub fn amount_mode<T: Float + FloatCore + PrimitiveFloat>(records: &[Transaction<T>]) -> Option<T> {
    let mut counts: HashMap<OrderedFloat<T>, usize, RandomState> = HashMap::default();
    for record in records {
        *counts.entry(OrderedFloat(record.amount())).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(a_value, a_count), (b_value, b_count)| {
            a_count.cmp(b_count).then_with(|| b_value.cmp(a_value))
        })
        .map(|(value, _)| value.into_inner())
}
