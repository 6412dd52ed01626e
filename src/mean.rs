use num_traits::Float;

use crate::{Kbn, Reducer, Transaction};

/// Arithmetic mean of the amounts inside the window.
///
/// The running total uses compensated summation; the count rides along so
/// the mean reflects exactly the current membership set. An empty window is
/// an expected case, not an error: it yields the NaN sentinel rather than a
/// division failure.
///
/// # Examples
///
/// ```
/// use txn_windows::{RollingMean, RollingWindow, Transaction};
///
/// let records = vec![
///     Transaction::new("a", 1, 10.0),
///     Transaction::new("b", 2, 20.0),
///     Transaction::new("c", 3, 60.0),
/// ];
///
/// let windows = RollingWindow::new(3).unwrap();
/// let means: Vec<f64> = windows
///     .aggregate(&records, RollingMean::new())
///     .unwrap()
///     .map(|(_, mean)| mean)
///     .collect();
///
/// assert_eq!(means, vec![30.0, 40.0, 60.0]);
/// ```
///
/// A window placed over a quiet stretch of the timeline reports the
/// sentinel:
///
/// ```
/// use txn_windows::{Anchor, RollingMean, RollingWindow, Transaction};
///
/// let records: Vec<Transaction<f64>> = vec![
///     Transaction::new("a", 1, 10.0),
///     Transaction::new("b", 100, 20.0),
/// ];
///
/// let windows = RollingWindow::new(1)
///     .unwrap()
///     .anchor(Anchor::FixedStride { start: Some(50), stride: 60 });
/// let (anchor, mean) = windows
///     .aggregate(&records, RollingMean::new())
///     .unwrap()
///     .next()
///     .unwrap();
///
/// assert_eq!(anchor, 50);
/// assert!(mean.is_nan());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RollingMean<T: Float> {
    /// Compensated running total
    sum: Kbn<T>,
    /// Current membership count
    count: usize,
}

impl<T: Float + Default> RollingMean<T> {
    /// Creates an empty running mean.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current membership count.
    #[inline]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Clears the accumulator.
    pub fn reset(&mut self) -> &mut Self {
        self.sum = Kbn::default();
        self.count = 0;
        self
    }
}

impl<T: Float + Default> Reducer<T> for RollingMean<T> {
    type Output = T;

    #[inline]
    fn include(&mut self, record: &Transaction<T>) {
        self.sum += record.amount();
        self.count += 1;
    }

    #[inline]
    fn exclude(&mut self, record: &Transaction<T>) {
        self.sum -= record.amount();
        self.count -= 1;
    }

    #[inline]
    fn value(&self) -> T {
        if self.count == 0 {
            return T::nan();
        }
        T::from(self.count).map_or_else(T::nan, |n| self.sum.total() / n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn empty_window_yields_the_sentinel() {
        let mean: RollingMean<f64> = RollingMean::new();
        assert!(mean.value().is_nan());
    }

    #[test]
    fn include_then_exclude_is_a_no_op() {
        let mut mean = RollingMean::new();
        mean.include(&Transaction::new("a", 1, 25.4));
        mean.include(&Transaction::new("b", 2, 26.2));
        let before = mean.value();

        let record = Transaction::new("c", 3, -17.0);
        mean.include(&record);
        mean.exclude(&record);

        assert_approx_eq!(before, mean.value(), 1e-12);
        assert_eq!(mean.count(), 2);
    }

    #[test]
    fn draining_back_to_empty_restores_the_sentinel() {
        let mut mean = RollingMean::new();
        let record = Transaction::new("a", 1, 3.5);
        mean.include(&record);
        assert_approx_eq!(mean.value(), 3.5, 1e-12);
        mean.exclude(&record);
        assert!(mean.value().is_nan());
    }
}
