use num_traits::Float;

use crate::{Kbn, Reducer, Transaction};

/// Snapshot of the distribution of amounts inside one window.
///
/// Degenerate windows use sentinels instead of errors: an empty window
/// reports NaN for every statistic, and sample variance (`ddof`) needs at
/// least two records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments<T> {
    /// Number of records in the window
    pub count: usize,
    /// Total amount
    pub sum: T,
    /// Arithmetic mean
    pub mean: T,
    /// Variance (population, or sample when `ddof` is set)
    pub variance: T,
    /// Standard deviation
    pub stddev: T,
}

/// First and second moments of the amounts inside the window.
///
/// Maintains compensated sums of `amount` and `amount^2` under the
/// include/exclude deltas, the incremental form of recomputing
/// mean/variance/stddev from scratch per window. Squared-sum differencing
/// trades a little accuracy for never touching more than the delta records;
/// the compensated accumulators keep the drift bounded over long passes.
///
/// # Examples
///
/// ```
/// use assert_approx_eq::assert_approx_eq;
/// use txn_windows::{RollingMoments, RollingWindow, Transaction};
///
/// let records: Vec<Transaction<f64>> = vec![
///     Transaction::new("a", 1, 25.4),
///     Transaction::new("b", 2, 26.2),
///     Transaction::new("c", 3, 26.0),
/// ];
///
/// let windows = RollingWindow::new(3).unwrap();
/// let (_, moments) = windows
///     .aggregate(&records, RollingMoments::new())
///     .unwrap()
///     .next()
///     .unwrap();
///
/// assert_eq!(moments.count, 3);
/// assert_approx_eq!(moments.mean, 25.8667, 0.0001);
/// assert_approx_eq!(moments.variance, 0.1156, 0.0001);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RollingMoments<T: Float> {
    /// Current membership count
    count: usize,
    /// Compensated sum of amounts
    sum: Kbn<T>,
    /// Compensated sum of squared amounts
    sum_sq: Kbn<T>,
    /// Delta Degrees of Freedom: divide by `n - 1` instead of `n`
    ddof: bool,
}

impl<T: Float + Default> RollingMoments<T> {
    /// Creates an empty accumulator with population variance (`ddof` off).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the Delta Degrees of Freedom setting.
    #[inline]
    pub const fn ddof(&self) -> bool {
        self.ddof
    }

    /// Sets the Delta Degrees of Freedom: when on, variance divides by
    /// `n - 1` (sample variance) instead of `n`.
    #[inline]
    pub const fn set_ddof(mut self, ddof: bool) -> Self {
        self.ddof = ddof;
        self
    }

    /// Returns the current membership count.
    #[inline]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Returns the current total amount.
    #[inline]
    pub fn sum(&self) -> T {
        self.sum.total()
    }

    /// Returns the current mean, or NaN for an empty window.
    pub fn mean(&self) -> T {
        if self.count == 0 {
            return T::nan();
        }
        T::from(self.count).map_or_else(T::nan, |n| self.sum.total() / n)
    }

    /// Returns the current variance, or NaN when the window is empty (or
    /// holds fewer than two records with `ddof` set).
    pub fn variance(&self) -> T {
        if self.count == 0 || (self.ddof && self.count < 2) {
            return T::nan();
        }
        let Some(n) = T::from(self.count) else {
            return T::nan();
        };
        let mean = self.sum.total() / n;
        // Squared-sum differencing can dip just below zero on constant data
        let m2 = (self.sum_sq.total() / n - mean * mean).max(T::zero());
        if self.ddof { m2 * n / (n - T::one()) } else { m2 }
    }

    /// Returns the current standard deviation, with the same sentinels as
    /// [`RollingMoments::variance`].
    pub fn stddev(&self) -> T {
        self.variance().sqrt()
    }

    /// Clears the accumulator, keeping the `ddof` setting.
    pub fn reset(&mut self) -> &mut Self {
        self.count = 0;
        self.sum = Kbn::default();
        self.sum_sq = Kbn::default();
        self
    }
}

impl<T: Float + Default> Reducer<T> for RollingMoments<T> {
    type Output = Moments<T>;

    #[inline]
    fn include(&mut self, record: &Transaction<T>) {
        let amount = record.amount();
        self.sum += amount;
        self.sum_sq += amount * amount;
        self.count += 1;
    }

    #[inline]
    fn exclude(&mut self, record: &Transaction<T>) {
        let amount = record.amount();
        self.sum -= amount;
        self.sum_sq -= amount * amount;
        self.count -= 1;
    }

    fn value(&self) -> Moments<T> {
        Moments {
            count: self.count,
            sum: self.sum(),
            mean: self.mean(),
            variance: self.variance(),
            stddev: self.stddev(),
        }
    }
}
